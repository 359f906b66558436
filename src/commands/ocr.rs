use poise::serenity_prelude::{self as serenity, CreateAttachment};
use tracing::warn;

use crate::{Context, Error};

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "gif"];
// leaves headroom for the code fence inside Discord's 2000 char limit
const BOXED_TEXT_LIMIT: usize = 1984;

fn is_image_link(url: &str) -> bool {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return false;
    }
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('.')
        .next()
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn first_image_link(text: &str) -> Option<String> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c| c == '<' || c == '>'))
        .find(|word| is_image_link(word))
        .map(str::to_owned)
}

fn image_from_message(message: &serenity::Message) -> Option<String> {
    message
        .attachments
        .iter()
        .find(|a| {
            a.content_type
                .as_deref()
                .is_some_and(|t| t.starts_with("image"))
        })
        .map(|a| a.url.clone())
        .or_else(|| first_image_link(&message.content))
        .or_else(|| {
            message
                .embeds
                .first()
                .and_then(|e| e.image.as_ref())
                .map(|i| i.url.clone())
        })
}

/// Detect text in an image through the Google Cloud Vision API
#[poise::command(slash_command, prefix_command)]
pub async fn ocr(
    ctx: Context<'_>,
    #[description = "Direct link to an image"] image: Option<String>,
    #[description = "An image to scan"] attachment: Option<serenity::Attachment>,
) -> Result<(), Error> {
    if !ctx.data().vision.is_configured() {
        ctx.say("⚠️ Bot owner needs to set a Google Cloud Vision API key first!")
            .await?;
        return Ok(());
    }

    ctx.defer().await?;
    // argument, then attachment, then the invoking/replied-to message
    let url = attachment
        .map(|a| a.url)
        .or_else(|| image.as_deref().and_then(first_image_link))
        .or_else(|| match ctx {
            poise::Context::Prefix(prefix) => image_from_message(prefix.msg).or_else(|| {
                prefix
                    .msg
                    .referenced_message
                    .as_deref()
                    .and_then(image_from_message)
            }),
            poise::Context::Application(_) => None,
        });
    let Some(url) = url else {
        ctx.say("No images or direct image links were detected. 😢")
            .await?;
        return Ok(());
    };

    let text = match ctx.data().vision.annotate(&url).await {
        Ok(text) => text,
        Err(err) => {
            warn!("vision OCR failed for {url}: {err}");
            ctx.say("OCR call failed guh :cry:").await?;
            return Ok(());
        }
    };
    let Some(text) = text else {
        ctx.say("No text content extracted from that image").await?;
        return Ok(());
    };

    if text.chars().count() > BOXED_TEXT_LIMIT {
        ctx.send(
            poise::CreateReply::default()
                .content("Text output was too long so I attached it as a file:")
                .attachment(CreateAttachment::bytes(text.into_bytes(), "ocr.txt")),
        )
        .await?;
    } else {
        ctx.say(format!("```\n{text}\n```")).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_link() {
        assert!(is_image_link("https://cdn.discordapp.com/attachments/1/2/shot.png"));
        assert!(is_image_link("https://i.imgur.com/abc.JPEG?size=1024"));
        assert!(!is_image_link("https://example.com/page.html"));
        assert!(!is_image_link("shot.png"));
    }

    #[test]
    fn test_first_image_link_scans_words() {
        let text = "look at this <https://i.imgur.com/abc.png> wow";
        assert_eq!(
            first_image_link(text).as_deref(),
            Some("https://i.imgur.com/abc.png")
        );
        assert_eq!(first_image_link("no links here"), None);
    }
}
