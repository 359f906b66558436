use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::warn;

use crate::{Context, Error};

/// Outcome of a filtered blocking receive over the gateway message stream.
pub enum Wait {
    Matched(serenity::Message),
    TimedOut,
}

/// Wait for the next message in `channel_id` from `author_id` that satisfies
/// `filter`, up to `timeout`. Non-matching messages are ignored, not
/// rejected; there is no retry feedback loop.
pub async fn await_message(
    ctx: Context<'_>,
    channel_id: serenity::ChannelId,
    author_id: serenity::UserId,
    timeout: Duration,
    filter: impl Fn(&serenity::Message) -> bool + Send + Sync + 'static,
) -> Wait {
    let matched = serenity::MessageCollector::new(ctx.serenity_context())
        .channel_id(channel_id)
        .author_id(author_id)
        .timeout(timeout)
        .filter(filter)
        .await;
    match matched {
        Some(message) => Wait::Matched(message),
        None => Wait::TimedOut,
    }
}

/// Terminal states of one prompt-and-wait cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Zero-based index into the offered list.
    Picked(usize),
    Cancelled,
    TimedOut,
}

/// Parse a prompt reply as an integer in `[0, count]`. `0` is the cancel
/// token; anything else out of range or non-numeric does not match.
pub fn parse_choice(content: &str, count: usize) -> Option<usize> {
    let n: usize = content.trim().parse().ok()?;
    (n <= count).then_some(n)
}

/// Show a numbered list and wait for the requesting user to pick an entry.
/// The prompt message is deleted best-effort on every exit path.
pub async fn disambiguate(
    ctx: Context<'_>,
    noun: &str,
    items: &[String],
) -> Result<Choice, Error> {
    let count = items.len();
    let timeout = ctx.data().config.choice_timeout_secs;
    let listing = items.join("\n").replace(" ()", "");
    let prompt = ctx
        .say(format!(
            "Found below {count} {noun}. Choose one in {timeout} seconds:\n\n{listing}"
        ))
        .await?
        .into_message()
        .await?;

    let outcome = await_message(
        ctx,
        ctx.channel_id(),
        ctx.author().id,
        Duration::from_secs(timeout),
        move |m| parse_choice(&m.content, count).is_some(),
    )
    .await;

    if let Err(err) = prompt.delete(ctx.serenity_context()).await {
        warn!("failed to delete choice prompt: {err}");
    }

    let choice = match outcome {
        Wait::TimedOut => Choice::TimedOut,
        Wait::Matched(message) => match parse_choice(&message.content, count) {
            // the filter guarantees a parse, but don't unwrap on it
            None | Some(0) => Choice::Cancelled,
            Some(n) => Choice::Picked(n - 1),
        },
    };
    Ok(choice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_in_range() {
        assert_eq!(parse_choice("1", 3), Some(1));
        assert_eq!(parse_choice(" 3 ", 3), Some(3));
        assert_eq!(parse_choice("4", 3), None);
    }

    #[test]
    fn test_zero_always_matches_as_cancel() {
        assert_eq!(parse_choice("0", 1), Some(0));
        assert_eq!(parse_choice("0", 250), Some(0));
    }

    #[test]
    fn test_non_numeric_ignored() {
        assert_eq!(parse_choice("first", 3), None);
        assert_eq!(parse_choice("", 3), None);
        assert_eq!(parse_choice("1.5", 3), None);
        assert_eq!(parse_choice("-1", 3), None);
    }
}
