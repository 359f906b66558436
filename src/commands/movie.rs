use crate::prompt::{self, Choice};
use crate::tmdb::{classify, Candidate, MediaKind, MediaNotFound};
use crate::views::run_media_view;
use crate::{Context, Error};

fn numbered_listing(entries: &[Candidate]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("**{}.** {} ({})", i + 1, entry.title(), entry.year()))
        .collect()
}

async fn show_detail(
    ctx: Context<'_>,
    entries: Vec<Candidate>,
    index: usize,
) -> Result<(), Error> {
    let picked = &entries[index];
    let detail = ctx
        .data()
        .tmdb
        .fetch_detail(picked.id(), picked.kind())
        .await?;
    run_media_view(ctx, detail, entries).await
}

/// Look up a movie or TV show on TMDB
#[poise::command(
    slash_command,
    prefix_command,
    aliases("tmdb", "imdb", "tv", "tvshow")
)]
pub async fn movie(
    ctx: Context<'_>,
    #[description = "Movie or TV show to look up"]
    #[rest]
    query: String,
) -> Result<(), Error> {
    ctx.defer().await?;
    let results = ctx.data().tmdb.search_multi(&query).await?;
    let entries = classify(results).entries;
    if entries.is_empty() {
        return Err(MediaNotFound::new(
            404,
            "😔 No movie or TV show matched your query.",
        )
        .into());
    }
    show_detail(ctx, entries, 0).await
}

/// Search TMDB movies and pick one from a numbered list
#[poise::command(slash_command, prefix_command, aliases("movies"))]
pub async fn moviesearch(
    ctx: Context<'_>,
    #[description = "Movie to search for"]
    #[rest]
    query: String,
) -> Result<(), Error> {
    search_one_kind(ctx, query, MediaKind::Movie).await
}

/// Search TMDB TV shows and pick one from a numbered list
#[poise::command(slash_command, prefix_command, aliases("tvshows", "tvsearch"))]
pub async fn tvshowsearch(
    ctx: Context<'_>,
    #[description = "TV show to search for"]
    #[rest]
    query: String,
) -> Result<(), Error> {
    search_one_kind(ctx, query, MediaKind::Tv).await
}

async fn search_one_kind(ctx: Context<'_>, query: String, kind: MediaKind) -> Result<(), Error> {
    ctx.defer().await?;
    let results = ctx.data().tmdb.search_multi(&query).await?;
    let entries: Vec<Candidate> = classify(results)
        .entries
        .into_iter()
        .filter(|entry| entry.kind() == kind)
        .collect();
    match entries.len() {
        0 => Err(MediaNotFound::new(
            404,
            format!("😔 No {} matched your query.", kind.human().to_lowercase()),
        )
        .into()),
        // exactly one hit, nothing to disambiguate
        1 => show_detail(ctx, entries, 0).await,
        _ => {
            let noun = match kind {
                MediaKind::Movie => "movies",
                MediaKind::Tv => "TV shows",
            };
            match prompt::disambiguate(ctx, noun, &numbered_listing(&entries)).await? {
                Choice::Picked(index) => show_detail(ctx, entries, index).await,
                Choice::Cancelled => {
                    ctx.say("Alright, cancelled.").await?;
                    Ok(())
                }
                Choice::TimedOut => {
                    ctx.say("You took too long to respond. Try again.").await?;
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbered_listing_format() {
        let entries = vec![Candidate::Movie(
            serde_json::from_value(json!({
                "id": 27205,
                "title": "Inception",
                "release_date": "2010-07-15",
            }))
            .unwrap(),
        )];
        let listing = numbered_listing(&entries);
        assert_eq!(listing, vec!["**1.** Inception (2010)".to_string()]);
    }

    #[test]
    fn test_numbered_listing_upcoming_has_empty_year() {
        let entries = vec![Candidate::Movie(
            serde_json::from_value(json!({
                "id": 1,
                "title": "Untitled Project",
            }))
            .unwrap(),
        )];
        // the " ()" suffix is scrubbed by the prompt layer before display
        assert_eq!(numbered_listing(&entries)[0], "**1.** Untitled Project ()");
    }
}
