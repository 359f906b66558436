use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::constants::CDN_BASE;
use crate::discord_text::{date_to_unix, format_date, truncate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "movie" => Some(MediaKind::Movie),
            "tv" => Some(MediaKind::Tv),
            _ => None,
        }
    }

    pub fn human(self) -> &'static str {
        match self {
            MediaKind::Movie => "Movie",
            MediaKind::Tv => "Series",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductionCompany {
    pub id: i64,
    pub name: String,
    pub logo_path: Option<String>,
    pub origin_country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Language {
    pub iso_639_1: String,
    pub name: String,
    pub english_name: Option<String>,
}

impl Language {
    pub fn display(&self) -> &str {
        self.english_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Trailer {
    pub name: String,
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl Trailer {
    pub fn url(&self) -> Option<String> {
        match self.site.as_str() {
            "YouTube" => Some(format!("https://youtu.be/{}", self.key)),
            "Vimeo" => Some(format!("https://vimeo.com/{}", self.key)),
            _ => None,
        }
    }

    pub fn site_emoji(&self) -> &'static str {
        match self.site.as_str() {
            "YouTube" => "▶️",
            "Vimeo" => "🎞️",
            _ => "📹",
        }
    }

    /// Hosts without a known watch URL get a plain label instead of a dead
    /// markdown link.
    pub fn markdown_link(&self) -> String {
        match self.url() {
            Some(url) => format!("[{} {}]({url})", self.site, self.kind),
            None => format!("{} {}", self.site, self.kind),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub known_for_department: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub gender: Option<u8>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

impl CastMember {
    pub fn tmdb_url(&self) -> String {
        format!("https://www.themoviedb.org/person/{}", self.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub gender: Option<u8>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

impl CrewMember {
    pub fn tmdb_url(&self) -> String {
        format!("https://www.themoviedb.org/person/{}", self.id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Videos {
    #[serde(default)]
    pub results: Vec<Trailer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Season {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub episode_count: i64,
    #[serde(default)]
    pub season_number: i64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

impl Season {
    /// "airing" for future seasons, "aired" otherwise.
    pub fn air_prefix(&self) -> &'static str {
        let Some(unix) = self.air_date.as_deref().and_then(date_to_unix) else {
            return "";
        };
        if unix > Utc::now().timestamp() {
            "airing"
        } else {
            "aired"
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Network {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub episode_number: i64,
    #[serde(default)]
    pub season_number: i64,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub still_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Creator {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub gender: Option<u8>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

fn humanize_votes(vote_average: Option<f64>, vote_count: Option<i64>) -> String {
    let average = vote_average.unwrap_or_default();
    let Some(votes) = vote_count.filter(|v| *v > 0) else {
        return format!(":star: **{average:.1}**");
    };
    let num = if votes > 999 {
        format!("{:.1}K", votes as f64 / 1000.0)
    } else {
        votes.to_string()
    };
    format!(":star: **{average:.1}** ({num} votes)")
}

fn short_overview(overview: Option<&str>, chars: usize) -> String {
    overview.map(|o| truncate(o, chars)).unwrap_or_default()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub budget: Option<i64>,
    #[serde(default)]
    pub revenue: Option<i64>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<i64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<Language>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    #[serde(default)]
    pub credits: Credits,
    #[serde(default)]
    pub videos: Videos,
}

impl MovieDetail {
    pub fn year(&self) -> &str {
        let date = self.release_date.as_deref().unwrap_or("");
        date.split('-').next().unwrap_or("")
    }

    pub fn tmdb_url(&self) -> String {
        format!("https://themoviedb.org/movie/{}", self.id)
    }

    pub fn imdb_url(&self) -> Option<String> {
        self.imdb_id
            .as_deref()
            .map(|id| format!("https://imdb.com/title/{id}"))
    }

    pub fn letterboxd_url(&self) -> String {
        format!("https://letterboxd.com/tmdb/{}", self.id)
    }

    pub fn all_genres(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn all_production_companies(&self) -> String {
        self.production_companies
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn all_spoken_languages(&self) -> String {
        self.spoken_languages
            .iter()
            .map(Language::display)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn humanize_runtime(&self) -> String {
        let Some(runtime) = self.runtime.filter(|r| *r > 0) else {
            return String::new();
        };
        let (h, m) = (runtime / 60, runtime % 60);
        match (h, m) {
            (0, m) => format!("{m} mins"),
            (h, 0) => format!("{h} hr"),
            (h, m) => format!("{h} hr {m} mins"),
        }
    }

    pub fn humanize_votes(&self) -> String {
        humanize_votes(self.vote_average, self.vote_count)
    }

    pub fn short_overview(&self, chars: usize) -> String {
        short_overview(self.overview.as_deref(), chars)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvDetail {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub original_name: String,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "type")]
    pub show_type: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub last_air_date: Option<String>,
    #[serde(default)]
    pub in_production: bool,
    #[serde(default)]
    pub number_of_episodes: Option<i64>,
    #[serde(default)]
    pub number_of_seasons: Option<i64>,
    #[serde(default)]
    pub next_episode_to_air: Option<Episode>,
    #[serde(default)]
    pub last_episode_to_air: Option<Episode>,
    #[serde(default)]
    pub episode_run_time: Vec<i64>,
    #[serde(default)]
    pub created_by: Vec<Creator>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub networks: Vec<Network>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<i64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<Language>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    #[serde(default)]
    pub credits: Credits,
    #[serde(default)]
    pub videos: Videos,
}

impl TvDetail {
    pub fn year(&self) -> &str {
        let date = self.first_air_date.as_deref().unwrap_or("");
        date.split('-').next().unwrap_or("")
    }

    pub fn tmdb_url(&self) -> String {
        format!("https://themoviedb.org/tv/{}", self.id)
    }

    pub fn all_genres(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn all_production_companies(&self) -> String {
        self.production_companies
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn all_spoken_languages(&self) -> String {
        self.spoken_languages
            .iter()
            .map(Language::display)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// First three networks plus an "& N more!" tail.
    pub fn all_networks(&self) -> String {
        if self.networks.len() > 3 {
            let left = self.networks.len() - 3;
            let first: Vec<_> = self.networks[..3].iter().map(|n| n.name.as_str()).collect();
            return format!("{} & {left} more!", first.join(", "));
        }
        self.networks
            .iter()
            .map(|n| n.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn all_seasons(&self) -> String {
        self.seasons
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let when = format_date(
                    s.air_date.as_deref(),
                    'R',
                    &format!(", {} ", s.air_prefix()),
                );
                format!(
                    "{}. {}{}  ({} episodes)",
                    i + 1,
                    s.name,
                    when,
                    s.episode_count
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn creators(&self) -> String {
        self.created_by
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn humanize_votes(&self) -> String {
        humanize_votes(self.vote_average, self.vote_count)
    }

    pub fn next_episode_info(&self) -> String {
        let Some(next) = &self.next_episode_to_air else {
            return String::new();
        };
        let airing = match next.air_date.as_deref() {
            Some(date) if !date.is_empty() => format_date(Some(date), 'R', "likely airing "),
            _ => "ETA unknown!".to_string(),
        };
        format!(
            "**S{}E{}** : {}\n**Titled as:** {}",
            next.season_number, next.episode_number, airing, next.name
        )
    }

    pub fn seasons_count(&self) -> String {
        format!(
            "{} ({} episodes)",
            self.number_of_seasons.unwrap_or_default(),
            self.number_of_episodes.unwrap_or_default()
        )
    }

    pub fn short_overview(&self, chars: usize) -> String {
        short_overview(self.overview.as_deref(), chars)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub gender: Option<u8>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub deathday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub also_known_as: Vec<String>,
}

impl Person {
    pub fn tmdb_url(&self) -> String {
        format!("https://themoviedb.org/person/{}", self.id)
    }

    pub fn image_url(&self) -> Option<String> {
        self.profile_path
            .as_deref()
            .map(|p| format!("{CDN_BASE}{p}"))
    }

    /// Age at death when `deathday` is set, current age otherwise.
    pub fn age(&self) -> Option<u32> {
        let born = NaiveDate::parse_from_str(self.birthday.as_deref()?, "%Y-%m-%d").ok()?;
        let until = match self.deathday.as_deref() {
            Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()?,
            None => Utc::now().date_naive(),
        };
        let mut age = until.year() - born.year();
        if (until.month(), until.day()) < (born.month(), born.day()) {
            age -= 1;
        }
        u32::try_from(age).ok()
    }

    /// Last-resort construction from a raw payload when strict conversion fails.
    pub fn from_raw(value: &Value) -> Self {
        Self {
            id: value.get("id").and_then(Value::as_i64).unwrap_or_default(),
            name: value
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_owned(),
            gender: None,
            adult: false,
            imdb_id: None,
            biography: value
                .get("biography")
                .and_then(Value::as_str)
                .map(str::to_owned),
            known_for_department: value
                .get("known_for_department")
                .and_then(Value::as_str)
                .map(str::to_owned),
            popularity: value.get("popularity").and_then(Value::as_f64),
            birthday: None,
            deathday: None,
            place_of_birth: None,
            profile_path: value
                .get("profile_path")
                .and_then(Value::as_str)
                .map(str::to_owned),
            homepage: None,
            also_known_as: Vec::new(),
        }
    }
}

/// A permissive stand-in for a detail record whose payload did not match the
/// typed shape. Satisfies the same read accessors as the typed variants so
/// callers never have to distinguish the fallback.
#[derive(Debug, Clone)]
pub struct RawDetail {
    pub kind: MediaKind,
    pub value: Value,
    cast: Vec<CastMember>,
    crew: Vec<CrewMember>,
    trailers: Vec<Trailer>,
}

impl RawDetail {
    pub fn new(kind: MediaKind, value: Value) -> Self {
        let cast = lenient_list(&value, &["credits", "cast"]);
        let crew = lenient_list(&value, &["credits", "crew"]);
        let trailers = lenient_list(&value, &["videos", "results"]);
        Self {
            kind,
            value,
            cast,
            crew,
            trailers,
        }
    }

    pub fn id(&self) -> i64 {
        self.value
            .get("id")
            .and_then(Value::as_i64)
            .unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.value
            .get("title")
            .or_else(|| self.value.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown title")
    }

    pub fn overview(&self) -> Option<&str> {
        self.value.get("overview").and_then(Value::as_str)
    }

    pub fn backdrop_path(&self) -> Option<&str> {
        self.value.get("backdrop_path").and_then(Value::as_str)
    }

    pub fn cast(&self) -> &[CastMember] {
        &self.cast
    }

    pub fn crew(&self) -> &[CrewMember] {
        &self.crew
    }

    pub fn trailers(&self) -> &[Trailer] {
        &self.trailers
    }
}

/// Best-effort per-element decode of a nested array; malformed elements are
/// dropped rather than failing the list.
fn lenient_list<T: serde::de::DeserializeOwned>(value: &Value, path: &[&str]) -> Vec<T> {
    let mut node = value;
    for key in path {
        match node.get(key) {
            Some(next) => node = next,
            None => return Vec::new(),
        }
    }
    let Some(items) = node.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|el| serde_json::from_value(el.clone()).ok())
        .collect()
}

/// A fully resolved movie or TV entity, or the permissive fallback.
#[derive(Debug, Clone)]
pub enum Detail {
    Movie(MovieDetail),
    Tv(TvDetail),
    Raw(RawDetail),
}

impl Detail {
    pub fn id(&self) -> i64 {
        match self {
            Detail::Movie(m) => m.id,
            Detail::Tv(t) => t.id,
            Detail::Raw(r) => r.id(),
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Detail::Movie(_) => MediaKind::Movie,
            Detail::Tv(_) => MediaKind::Tv,
            Detail::Raw(r) => r.kind,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Detail::Movie(m) => &m.title,
            Detail::Tv(t) => &t.name,
            Detail::Raw(r) => r.title(),
        }
    }

    pub fn tmdb_url(&self) -> String {
        format!("https://themoviedb.org/{}/{}", self.kind(), self.id())
    }

    pub fn cast(&self) -> &[CastMember] {
        match self {
            Detail::Movie(m) => &m.credits.cast,
            Detail::Tv(t) => &t.credits.cast,
            Detail::Raw(r) => r.cast(),
        }
    }

    pub fn crew(&self) -> &[CrewMember] {
        match self {
            Detail::Movie(m) => &m.credits.crew,
            Detail::Tv(t) => &t.credits.crew,
            Detail::Raw(r) => r.crew(),
        }
    }

    pub fn videos(&self) -> &[Trailer] {
        match self {
            Detail::Movie(m) => &m.videos.results,
            Detail::Tv(t) => &t.videos.results,
            Detail::Raw(r) => r.trailers(),
        }
    }

    pub fn total_cast(&self) -> usize {
        self.cast().len()
    }

    pub fn total_crew(&self) -> usize {
        self.crew().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movie_detail_helpers() {
        let movie: MovieDetail = serde_json::from_value(json!({
            "id": 27205,
            "title": "Inception",
            "imdb_id": "tt1375666",
            "release_date": "2010-07-16",
            "runtime": 148,
            "vote_average": 8.4,
            "vote_count": 34495,
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Sci-fi"}],
        }))
        .unwrap();
        assert_eq!(movie.year(), "2010");
        assert_eq!(movie.humanize_runtime(), "2 hr 28 mins");
        assert_eq!(movie.all_genres(), "Action, Sci-fi");
        assert_eq!(movie.humanize_votes(), ":star: **8.4** (34.5K votes)");
        assert_eq!(movie.imdb_url().unwrap(), "https://imdb.com/title/tt1375666");
        assert_eq!(movie.tmdb_url(), "https://themoviedb.org/movie/27205");
    }

    #[test]
    fn test_votes_without_count() {
        assert_eq!(humanize_votes(Some(7.2), None), ":star: **7.2**");
        assert_eq!(humanize_votes(Some(7.2), Some(0)), ":star: **7.2**");
        assert_eq!(
            humanize_votes(Some(7.25), Some(312)),
            ":star: **7.2** (312 votes)"
        );
    }

    #[test]
    fn test_tv_networks_overflow() {
        let tv: TvDetail = serde_json::from_value(json!({
            "id": 1399,
            "name": "Game of Thrones",
            "networks": [
                {"id": 1, "name": "HBO"},
                {"id": 2, "name": "Sky"},
                {"id": 3, "name": "OCS"},
                {"id": 4, "name": "Crave"},
                {"id": 5, "name": "Neon"},
            ],
        }))
        .unwrap();
        assert_eq!(tv.all_networks(), "HBO, Sky, OCS & 2 more!");
    }

    #[test]
    fn test_next_episode_info() {
        let tv: TvDetail = serde_json::from_value(json!({
            "id": 100,
            "name": "Some Show",
            "next_episode_to_air": {
                "id": 5,
                "name": "Finale",
                "season_number": 2,
                "episode_number": 10,
            },
        }))
        .unwrap();
        let info = tv.next_episode_info();
        assert!(info.contains("**S2E10**"));
        assert!(info.contains("ETA unknown!"));
        assert!(info.contains("Finale"));
    }

    #[test]
    fn test_trailer_urls() {
        let yt: Trailer = serde_json::from_value(json!({
            "name": "Official Trailer",
            "key": "YoHD9XEInc0",
            "site": "YouTube",
            "type": "Trailer",
        }))
        .unwrap();
        assert_eq!(yt.url().as_deref(), Some("https://youtu.be/YoHD9XEInc0"));
        assert_eq!(
            yt.markdown_link(),
            "[YouTube Trailer](https://youtu.be/YoHD9XEInc0)"
        );

        let vimeo: Trailer = serde_json::from_value(json!({
            "name": "Teaser",
            "key": "76979871",
            "site": "Vimeo",
            "type": "Teaser",
        }))
        .unwrap();
        assert_eq!(vimeo.url().as_deref(), Some("https://vimeo.com/76979871"));
    }

    #[test]
    fn test_trailer_unknown_site_plain_label() {
        let clip: Trailer = serde_json::from_value(json!({
            "name": "Featurette",
            "key": "x7u5n2c",
            "site": "Dailymotion",
            "type": "Featurette",
        }))
        .unwrap();
        assert_eq!(clip.url(), None);
        assert_eq!(clip.markdown_link(), "Dailymotion Featurette");
    }

    #[test]
    fn test_raw_detail_accessors() {
        // Shape that fails strict conversion (id as string) must still be
        // readable through the fallback.
        let raw = RawDetail::new(
            MediaKind::Movie,
            json!({
                "id": 603,
                "title": "The Matrix",
                "overview": "Neo.",
                "credits": {
                    "cast": [
                        {"id": 6384, "name": "Keanu Reeves", "character": "Neo", "order": 0},
                        {"bogus": true},
                    ],
                    "crew": [{"id": 905, "name": "Lana Wachowski", "job": "Director"}],
                },
                "videos": {"results": [
                    {"name": "Trailer", "key": "m8e-FF8MsqU", "site": "YouTube", "type": "Trailer"},
                ]},
            }),
        );
        assert_eq!(raw.id(), 603);
        assert_eq!(raw.title(), "The Matrix");
        // malformed cast element is dropped, not fatal
        assert_eq!(raw.cast().len(), 1);
        assert_eq!(raw.cast()[0].character, "Neo");
        assert_eq!(raw.crew().len(), 1);
        assert_eq!(raw.trailers().len(), 1);

        let detail = Detail::Raw(raw);
        assert_eq!(detail.title(), "The Matrix");
        assert_eq!(detail.kind(), MediaKind::Movie);
        assert_eq!(detail.tmdb_url(), "https://themoviedb.org/movie/603");
        assert_eq!(detail.total_cast(), 1);
    }

    #[test]
    fn test_person_age_and_fallback() {
        let person: Person = serde_json::from_value(json!({
            "id": 287,
            "name": "Brad Pitt",
            "birthday": "1963-12-18",
        }))
        .unwrap();
        assert!(person.age().unwrap() >= 60);

        let dead: Person = serde_json::from_value(json!({
            "id": 3084,
            "name": "Marlon Brando",
            "birthday": "1924-04-03",
            "deathday": "2004-07-01",
        }))
        .unwrap();
        assert_eq!(dead.age(), Some(80));

        let fallback = Person::from_raw(&json!({"id": "oops", "popularity": 1.5}));
        assert_eq!(fallback.id, 0);
        assert_eq!(fallback.name, "Unknown");
    }

    #[test]
    fn test_all_seasons_block() {
        let tv: TvDetail = serde_json::from_value(json!({
            "id": 1396,
            "name": "Breaking Bad",
            "seasons": [
                {"id": 1, "name": "Season 1", "episode_count": 7, "air_date": "2008-01-20"},
                {"id": 2, "name": "Season 2", "episode_count": 13},
            ],
        }))
        .unwrap();
        let block = tv.all_seasons();
        assert!(block.starts_with("1. Season 1, aired <t:"));
        assert!(block.contains("(7 episodes)"));
        assert!(block.contains("2. Season 2  (13 episodes)"));
    }
}
