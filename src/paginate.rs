use std::time::Duration;

use poise::serenity_prelude::{
    self as serenity, ButtonStyle, ComponentInteraction, CreateActionRow, CreateButton,
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse,
};
use tracing::warn;

use crate::Error;

/// Respond to a component press with an ephemeral, button-paginated set of
/// embeds. Pure projection of already-resolved data; no network calls.
pub async fn paginate_ephemeral(
    ctx: &serenity::Context,
    press: &ComponentInteraction,
    pages: Vec<CreateEmbed>,
    timeout: Duration,
) -> Result<(), Error> {
    let prev_id = format!("{}_prev", press.id);
    let next_id = format!("{}_next", press.id);

    if pages.is_empty() {
        return Ok(());
    }
    if pages.len() == 1 {
        press
            .create_response(
                &ctx.http,
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .embed(pages[0].clone())
                        .ephemeral(true),
                ),
            )
            .await?;
        return Ok(());
    }

    let buttons = CreateActionRow::Buttons(vec![
        CreateButton::new(&prev_id)
            .emoji('◀')
            .style(ButtonStyle::Secondary),
        CreateButton::new(&next_id)
            .emoji('▶')
            .style(ButtonStyle::Secondary),
    ]);
    press
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(pages[0].clone())
                    .components(vec![buttons])
                    .ephemeral(true),
            ),
        )
        .await?;
    let message = press.get_response(&ctx.http).await?;

    let mut page = 0usize;
    loop {
        let prefix = format!("{}_", press.id);
        let Some(sub) = serenity::ComponentInteractionCollector::new(ctx)
            .message_id(message.id)
            .timeout(timeout)
            .filter(move |i| i.data.custom_id.starts_with(&prefix))
            .await
        else {
            break;
        };

        if sub.data.custom_id == next_id {
            page = (page + 1) % pages.len();
        } else {
            page = page.checked_sub(1).unwrap_or(pages.len() - 1);
        }
        sub.create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new().embed(pages[page].clone()),
            ),
        )
        .await?;
    }

    // Timed out: strip the buttons, best-effort.
    if let Err(err) = press
        .edit_response(&ctx.http, EditInteractionResponse::new().components(Vec::new()))
        .await
    {
        warn!("failed to disable pagination buttons: {err}");
    }
    Ok(())
}
