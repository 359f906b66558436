use chrono::Utc;
use poise::serenity_prelude::{CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter};
use rand::Rng;

use crate::discord_text::{date_to_unix, format_date, natural_size, truncate};
use crate::tmdb::constants::{CDN_BASE, TMDB_ICON};
use crate::tmdb::models::{
    CastMember, CrewMember, Detail, MovieDetail, Person, RawDetail, Trailer, TvDetail,
};
use crate::tmdb::TmdbClient;

pub fn random_colour() -> u32 {
    rand::thread_rng().gen_range(0..=0xFF_FF_FF)
}

fn cdn_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty()).map(|p| format!("{CDN_BASE}{p}"))
}

/// Split text into chunks of at most `max` chars, preferring line boundaries.
pub fn chunk_lines(text: &str, max: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if !current.is_empty() && current.chars().count() + line.chars().count() + 1 > max {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        // a single oversized line gets hard-truncated
        current.push_str(&truncate(line, max));
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

pub fn movie_embed(data: &MovieDetail, imdb_rating: Option<f64>) -> CreateEmbed {
    let year = data.year();
    let name = if year.is_empty() {
        data.title.clone()
    } else {
        format!("{} ({year})", data.title)
    };
    let mut em = CreateEmbed::new()
        .colour(random_colour())
        .author(CreateEmbedAuthor::new(name).url(data.tmdb_url()));

    let mut out = String::new();
    if let Some(tagline) = data.tagline.as_deref().filter(|t| !t.is_empty()) {
        out.push_str(&format!("-# *{tagline}*\n"));
    }
    if data.overview.is_some() {
        out.push_str(&format!("\n{}\n\n", data.short_overview(200)));
    }
    let runtime = data.humanize_runtime();
    if !runtime.is_empty() {
        out.push_str(&format!("- **Runtime:**  {runtime}\n"));
    }
    if let Some(rd) = data.release_date.as_deref().filter(|d| !d.is_empty()) {
        if let Some(unix) = date_to_unix(rd) {
            let state = if Utc::now().timestamp() > unix {
                "Released"
            } else {
                "Upcoming"
            };
            let oc = data
                .origin_country
                .first()
                .map(|c| format!(" ({c})"))
                .unwrap_or_default();
            out.push_str(&format!(
                "- **{state}:**  <t:{unix}:R> • <t:{unix}:d>{oc}\n"
            ));
        }
    }
    if let Some(budget) = data.budget.filter(|b| *b > 0) {
        out.push_str(&format!("- **Budget:**  ${}\n", natural_size(budget)));
    }
    if let Some(revenue) = data.revenue.filter(|r| *r > 0) {
        out.push_str(&format!("- **Revenue:**  ${}\n", natural_size(revenue)));
    }
    if let Some(rating) = imdb_rating {
        out.push_str(&format!("- **IMDb rating:**  :star: **{rating}**/10\n"));
    } else if data.vote_average.is_some() && data.vote_count.unwrap_or_default() > 0 {
        out.push_str(&format!("- **Rating:**  {}\n", data.humanize_votes()));
    }
    if !data.genres.is_empty() {
        out.push_str(&format!("- **Genres:**  {}\n", data.all_genres()));
    }
    if !data.spoken_languages.is_empty() {
        let en_only =
            data.spoken_languages.len() == 1 && data.spoken_languages[0].iso_639_1 == "en";
        if !en_only {
            let s = if data.spoken_languages.len() > 1 { "s" } else { "" };
            out.push_str(&format!(
                "- **Language{s}:**  {}\n",
                data.all_spoken_languages()
            ));
        }
    }
    if !data.production_companies.is_empty() {
        let s = if data.production_companies.len() > 1 {
            "s"
        } else {
            ""
        };
        out.push_str(&format!(
            "- **Studio{s}:**  {}\n",
            data.all_production_companies()
        ));
    }
    let mut links = vec![format!("**[Letterboxd]({})**", data.letterboxd_url())];
    if let Some(imdb) = data.imdb_url() {
        links.push(format!("**[IMDb]({imdb})**"));
    }
    if let Some(home) = data.homepage.as_deref().filter(|h| !h.is_empty()) {
        links.push(format!("**[Homepage]({home})**"));
    }
    out.push_str(&format!("- **Links:**  {}\n", links.join(" • ")));

    if let Some(url) = cdn_url(data.backdrop_path.as_deref()) {
        em = em.image(url);
    }
    if let Some(url) = cdn_url(data.poster_path.as_deref()) {
        em = em.thumbnail(url);
    }
    em.description(out)
}

pub fn tvshow_embed(data: &TvDetail) -> CreateEmbed {
    let year = data.year();
    let name = if year.is_empty() {
        data.name.clone()
    } else {
        format!("{} ({year})", data.name)
    };
    let mut em = CreateEmbed::new()
        .colour(random_colour())
        .author(CreateEmbedAuthor::new(name).url(data.tmdb_url()));

    let mut out = String::new();
    if let Some(tagline) = data.tagline.as_deref().filter(|t| !t.is_empty()) {
        out.push_str(&format!("-# *{tagline}*\n"));
    }
    if data.overview.is_some() {
        out.push_str(&format!("\n{}\n\n", data.short_overview(200)));
    }
    if !data.created_by.is_empty() {
        let s = if data.created_by.len() > 1 { "s" } else { "" };
        out.push_str(&format!("- **Creator{s}:**  {}\n", data.creators()));
    }
    if let Some(status) = data.status.as_deref().filter(|s| !s.is_empty()) {
        let kind = data.show_type.as_deref().unwrap_or("Scripted");
        out.push_str(&format!("- **Status:**  {status} ({kind})\n"));
    }
    if data.vote_average.is_some() && data.vote_count.unwrap_or_default() > 0 {
        out.push_str(&format!("- **Rating:**  {}\n", data.humanize_votes()));
    }
    let first = format_date(data.first_air_date.as_deref(), 'R', "");
    if !first.is_empty() {
        out.push_str(&format!("- **First aired:**  {first}\n"));
    }
    let last = format_date(data.last_air_date.as_deref(), 'R', "");
    if !last.is_empty() {
        out.push_str(&format!("- **Last aired:**  {last}\n"));
    }
    if let Some(runtime) = data.episode_run_time.first() {
        out.push_str(&format!("- **Avg. runtime:**  {runtime} minutes\n"));
    }
    if !data.genres.is_empty() {
        out.push_str(&format!("- **Genres:**  {}\n", data.all_genres()));
    }
    if !data.networks.is_empty() {
        out.push_str(&format!("- **Networks:**  {}\n", data.all_networks()));
    }
    if !data.spoken_languages.is_empty() {
        let en_only =
            data.spoken_languages.len() == 1 && data.spoken_languages[0].iso_639_1 == "en";
        if !en_only {
            let s = if data.spoken_languages.len() > 1 { "s" } else { "" };
            out.push_str(&format!(
                "- **Language{s}:**  {}\n",
                data.all_spoken_languages()
            ));
        }
    }
    if !data.production_companies.is_empty() {
        let s = if data.production_companies.len() > 1 {
            "s"
        } else {
            ""
        };
        out.push_str(&format!(
            "- **Studio{s}:**  {}\n",
            data.all_production_companies()
        ));
    }

    if let Some(url) = cdn_url(data.backdrop_path.as_deref()) {
        em = em.image(url);
    }
    em = em.description(out);
    if !data.seasons.is_empty() {
        for page in chunk_lines(&data.all_seasons(), 1024) {
            em = em.field("Seasons", page, true);
        }
    }
    if data.next_episode_to_air.is_some() {
        em = em.field("Next Episode", data.next_episode_info(), false);
    }
    em
}

/// Minimal rendering for the permissive fallback record.
pub fn raw_embed(data: &RawDetail) -> CreateEmbed {
    let mut em = CreateEmbed::new().colour(random_colour()).author(
        CreateEmbedAuthor::new(data.title().to_owned()).url(format!(
            "https://themoviedb.org/{}/{}",
            data.kind,
            data.id()
        )),
    );
    if let Some(overview) = data.overview() {
        em = em.description(truncate(overview, 500));
    }
    if let Some(url) = cdn_url(data.backdrop_path()) {
        em = em.image(url);
    }
    em
}

/// Render any detail record, fetching the IMDb rating supplement for movies.
pub async fn detail_embed(tmdb: &TmdbClient, detail: &Detail) -> CreateEmbed {
    match detail {
        Detail::Movie(movie) => {
            let mut rating = None;
            if let Some(imdb_id) = movie.imdb_id.as_deref().filter(|i| !i.is_empty()) {
                rating = tmdb.imdb_rating(imdb_id).await;
            }
            movie_embed(movie, rating)
        }
        Detail::Tv(tv) => tvshow_embed(tv),
        Detail::Raw(raw) => raw_embed(raw),
    }
}

pub fn person_embed(person: &Person, colour: u32) -> CreateEmbed {
    let mut em = CreateEmbed::new()
        .colour(colour)
        .title(person.name.clone())
        .url(person.tmdb_url());
    if let Some(image) = person.image_url() {
        em = em.thumbnail(image);
    }
    let mut out = String::new();
    if let Some(bio) = person.biography.as_deref().filter(|b| !b.is_empty()) {
        out.push_str(&format!("{}\n\n", truncate(bio, 500)));
    }
    if let Some(dept) = person.known_for_department.as_deref() {
        out.push_str(&format!("- **Known for:**  {dept}\n"));
    }
    let born = format_date(person.birthday.as_deref(), 'D', "");
    if !born.is_empty() {
        let age = person
            .age()
            .map(|a| format!(" (age {a})"))
            .unwrap_or_default();
        out.push_str(&format!("- **Born:**  {born}{age}\n"));
    }
    if let Some(pob) = person.place_of_birth.as_deref() {
        out.push_str(&format!("- **POB:**  {pob}\n"));
    }
    let died = format_date(person.deathday.as_deref(), 'D', "");
    if !died.is_empty() {
        let rel = format_date(person.deathday.as_deref(), 'R', "");
        out.push_str(&format!("- **Died:**  {died} ({rel})\n"));
    }
    let mut links = Vec::new();
    if let Some(imdb_id) = person.imdb_id.as_deref().filter(|i| !i.is_empty()) {
        links.push(format!("[IMDb](https://imdb.com/name/{imdb_id})"));
    }
    if let Some(home) = person.homepage.as_deref().filter(|h| !h.is_empty()) {
        links.push(format!("[Website]({home})"));
    }
    links.push(format!(
        "[Wikipedia](https://en.wikipedia.org/wiki/{})",
        person.name.replace(' ', "_")
    ));
    out.push_str(&format!("- **Links:**  {}\n", links.join(" • ")));
    em.description(out)
}

/// One page per cast member, in billing order.
pub fn cast_pages(cast: &[CastMember]) -> Vec<CreateEmbed> {
    let total = cast.len();
    cast.iter()
        .enumerate()
        .map(|(idx, cs)| {
            let mut em = CreateEmbed::new()
                .colour(0x2B_2D_31)
                .author(CreateEmbedAuthor::new(cs.name.clone()).url(cs.tmdb_url()))
                .description(format!("-# _as **{}**_", if cs.character.is_empty() {
                    "???"
                } else {
                    &cs.character
                }))
                .footer(
                    CreateEmbedFooter::new(format!(
                        "Celebrities Cast • Page {} of {total}",
                        idx + 1
                    ))
                    .icon_url(TMDB_ICON),
                );
            if let Some(url) = cdn_url(cs.profile_path.as_deref()) {
                em = em.image(url);
            }
            em
        })
        .collect()
}

pub fn crew_pages(crew: &[CrewMember]) -> Vec<CreateEmbed> {
    let total = crew.len();
    crew.iter()
        .enumerate()
        .map(|(idx, cs)| {
            let job = if cs.job.is_empty() { "Crew" } else { &cs.job };
            let mut em = CreateEmbed::new()
                .colour(0x2B_2D_31)
                .author(CreateEmbedAuthor::new(cs.name.clone()).url(cs.tmdb_url()))
                .description(format!("-# _{job}_"))
                .footer(
                    CreateEmbedFooter::new(format!("All Crew • Page {} of {total}", idx + 1))
                        .icon_url(TMDB_ICON),
                );
            if let Some(url) = cdn_url(cs.profile_path.as_deref()) {
                em = em.image(url);
            }
            em
        })
        .collect()
}

/// Videos grouped 6 to a page, oldest first.
pub fn trailer_pages(videos: &[Trailer]) -> Vec<CreateEmbed> {
    let mut sorted: Vec<&Trailer> = videos.iter().collect();
    sorted.sort_by(|a, b| a.published_at.cmp(&b.published_at));
    let lines: Vec<String> = sorted
        .iter()
        .map(|tr| {
            let when = tr
                .published_at
                .as_deref()
                .and_then(|p| p.get(..10))
                .map(|d| format_date(Some(d), 'R', " | 🕒 Published "))
                .unwrap_or_default();
            format!("{} **{}**{when}", tr.site_emoji(), tr.markdown_link())
        })
        .collect();
    let pages: Vec<Vec<String>> = lines.chunks(6).map(<[String]>::to_vec).collect();
    let total = pages.len();
    pages
        .into_iter()
        .enumerate()
        .map(|(idx, chunk)| {
            CreateEmbed::new()
                .colour(0x2B_2D_31)
                .description(chunk.join("\n"))
                .footer(
                    CreateEmbedFooter::new(format!("Trailers • Page {} of {total}", idx + 1))
                        .icon_url(TMDB_ICON),
                )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_lines() {
        let text = (1..=10)
            .map(|i| format!("line number {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = chunk_lines(&text, 50);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 50);
        }
        // nothing lost
        assert_eq!(chunks.join("\n"), text);
    }

    #[test]
    fn test_chunk_lines_oversized_line() {
        let long = "x".repeat(200);
        let chunks = chunk_lines(&long, 50);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].chars().count() <= 50);
    }

    #[test]
    fn test_trailer_pages_grouping() {
        let trailer = |key: &str| Trailer {
            name: "t".into(),
            key: key.into(),
            site: "YouTube".into(),
            kind: "Trailer".into(),
            official: true,
            published_at: None,
        };
        let videos: Vec<Trailer> = (0..13).map(|i| trailer(&format!("k{i}"))).collect();
        assert_eq!(trailer_pages(&videos).len(), 3);
        assert!(trailer_pages(&[]).is_empty());
    }

    #[test]
    fn test_cast_pages_count() {
        let member: CastMember = serde_json::from_value(serde_json::json!({
            "id": 1, "name": "Someone", "character": "Hero", "order": 0,
        }))
        .unwrap();
        assert_eq!(cast_pages(&[member.clone(), member]).len(), 2);
    }
}
