use crate::tmdb::{classify, MediaNotFound};
use crate::views::run_person_view;
use crate::{Context, Error};

/// Look up an actor, director or other film personality on TMDB
#[poise::command(slash_command, prefix_command, aliases("actor", "director"))]
pub async fn celebrity(
    ctx: Context<'_>,
    #[description = "Name of the person to look up"]
    #[rest]
    name: String,
) -> Result<(), Error> {
    ctx.defer().await?;
    let results = ctx.data().tmdb.search_multi(&name).await?;
    let people = classify(results).people;
    let Some(first) = people.first() else {
        return Err(MediaNotFound::new(404, "😔 No celebrity matched your query.").into());
    };
    let person = ctx.data().tmdb.fetch_person(first.id).await?;
    run_person_view(ctx, person, people).await
}
