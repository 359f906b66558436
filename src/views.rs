use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use lru::LruCache;
use poise::serenity_prelude::{
    self as serenity, ButtonStyle, ComponentInteraction, ComponentInteractionDataKind,
    CreateActionRow, CreateButton, CreateInteractionResponse, CreateInteractionResponseMessage,
    CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption, EditMessage,
};
use tracing::warn;

use crate::discord_text::truncate;
use crate::embeds::{
    cast_pages, crew_pages, detail_embed, person_embed, random_colour, trailer_pages,
};
use crate::paginate::paginate_ephemeral;
use crate::tmdb::search::PersonCandidate;
use crate::tmdb::{Candidate, Detail, MediaKind};
use crate::{Context, Error};

/// Discord caps select menus at 25 options; when exceeded we show 24 plus an
/// omission placeholder.
pub const SELECT_OPTION_CAP: usize = 25;
const OMITTED_VALUE: &str = "omitted";

/// Per-view memo of already-resolved detail records. Owned by exactly one
/// view loop and dropped with it; never shared across views or users.
pub struct SessionCache {
    inner: LruCache<i64, Arc<Detail>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self {
            inner: LruCache::new(NonZeroUsize::new(SELECT_OPTION_CAP).unwrap()),
        }
    }

    pub fn get(&mut self, id: i64) -> Option<Arc<Detail>> {
        self.inner.get(&id).cloned()
    }

    pub fn put(&mut self, id: i64, detail: Arc<Detail>) {
        self.inner.put(id, detail);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

pub fn parse_select_value(value: &str) -> Option<(i64, MediaKind)> {
    let (id, kind) = value.split_once('_')?;
    Some((id.parse().ok()?, MediaKind::parse(kind)?))
}

pub fn candidate_options(entries: &[Candidate]) -> Vec<CreateSelectMenuOption> {
    let mut options: Vec<CreateSelectMenuOption> = entries
        .iter()
        .take(if entries.len() > SELECT_OPTION_CAP {
            SELECT_OPTION_CAP - 1
        } else {
            SELECT_OPTION_CAP
        })
        .map(|entry| {
            let year = entry.year();
            let year = if year.is_empty() { "Upcoming" } else { year };
            let genres = entry.genre_names();
            let about = if genres.is_empty() {
                entry.short_overview(75)
            } else {
                genres
            };
            let description = format!("{} • {year} • {about}", entry.kind().human());
            CreateSelectMenuOption::new(
                truncate(entry.title(), 100),
                format!("{}_{}", entry.id(), entry.kind()),
            )
            .description(truncate(&description, 100))
        })
        .collect();
    if entries.len() > SELECT_OPTION_CAP {
        let left = entries.len() - (SELECT_OPTION_CAP - 1);
        options.push(
            CreateSelectMenuOption::new(format!("…and {left} more"), OMITTED_VALUE)
                .description("Refine your search to narrow these down."),
        );
    }
    options
}

pub fn person_options(people: &[PersonCandidate]) -> Vec<CreateSelectMenuOption> {
    let mut options: Vec<CreateSelectMenuOption> = people
        .iter()
        .take(if people.len() > SELECT_OPTION_CAP {
            SELECT_OPTION_CAP - 1
        } else {
            SELECT_OPTION_CAP
        })
        .map(|person| {
            let mut option = CreateSelectMenuOption::new(
                truncate(&format!("{} {}", person.gender_emoji(), person.name), 100),
                person.id.to_string(),
            );
            let famous = person.famous_for();
            if !famous.is_empty() {
                option = option.description(truncate(&famous, 100));
            }
            option
        })
        .collect();
    if people.len() > SELECT_OPTION_CAP {
        let left = people.len() - (SELECT_OPTION_CAP - 1);
        options.push(
            CreateSelectMenuOption::new(format!("…and {left} more"), OMITTED_VALUE)
                .description("Refine your search to narrow these down."),
        );
    }
    options
}

fn media_buttons(ctx_id: u64, detail: &Detail) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(format!("{ctx_id}_cast"))
            .label(format!("Cast ({})", detail.total_cast()))
            .style(ButtonStyle::Secondary)
            .disabled(detail.cast().is_empty()),
        CreateButton::new(format!("{ctx_id}_crew"))
            .label(format!("Crew ({})", detail.total_crew()))
            .style(ButtonStyle::Secondary)
            .disabled(detail.crew().is_empty()),
        CreateButton::new(format!("{ctx_id}_trailers"))
            .label(format!("Trailers ({})", detail.videos().len()))
            .style(ButtonStyle::Secondary)
            .disabled(detail.videos().is_empty()),
    ])
}

async fn ephemeral_notice(
    ctx: &serenity::Context,
    press: &ComponentInteraction,
    text: impl Into<String>,
) {
    let result = press
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(text.into())
                    .ephemeral(true),
            ),
        )
        .await;
    if let Err(err) = result {
        warn!("failed to send ephemeral notice: {err}");
    }
}

/// Interactive movie/TV view: cast/crew/trailer buttons plus a dropdown for
/// switching between search candidates. Runs until the idle timeout, then
/// strips the components and drops the session cache.
pub async fn run_media_view(
    ctx: Context<'_>,
    first: Detail,
    entries: Vec<Candidate>,
) -> Result<(), Error> {
    let data = ctx.data();
    let view_timeout = Duration::from_secs(data.config.view_timeout_secs);
    let page_timeout = Duration::from_secs(data.config.page_timeout_secs);
    let ctx_id = ctx.id();

    let mut cache = SessionCache::new();
    let mut current = Arc::new(first);
    cache.put(current.id(), Arc::clone(&current));

    let select_row = (entries.len() > 1).then(|| {
        CreateActionRow::SelectMenu(
            CreateSelectMenu::new(
                format!("{ctx_id}_select"),
                CreateSelectMenuKind::String {
                    options: candidate_options(&entries),
                },
            )
            .placeholder(format!("Check out other {} entries...", entries.len() - 1)),
        )
    });
    let components = |detail: &Detail| {
        let mut rows = vec![media_buttons(ctx_id, detail)];
        rows.extend(select_row.clone());
        rows
    };

    let embed = detail_embed(&data.tmdb, &current).await;
    let reply = ctx
        .send(
            poise::CreateReply::default()
                .embed(embed)
                .components(components(&current)),
        )
        .await?;
    let mut message = reply.into_message().await?;

    loop {
        let prefix = format!("{ctx_id}_");
        let Some(press) = serenity::ComponentInteractionCollector::new(
            ctx.serenity_context(),
        )
        .message_id(message.id)
        .timeout(view_timeout)
        .filter(move |i| i.data.custom_id.starts_with(&prefix))
        .await
        else {
            break;
        };

        match press.data.custom_id.rsplit('_').next() {
            Some("cast") => {
                if current.cast().is_empty() {
                    ephemeral_notice(
                        ctx.serenity_context(),
                        &press,
                        "Looks like TMDB is missing cast data for this one.",
                    )
                    .await;
                    continue;
                }
                let pages = cast_pages(current.cast());
                if let Err(err) =
                    paginate_ephemeral(ctx.serenity_context(), &press, pages, page_timeout).await
                {
                    warn!("cast pagination failed: {err}");
                }
            }
            Some("crew") => {
                if current.crew().is_empty() {
                    ephemeral_notice(
                        ctx.serenity_context(),
                        &press,
                        "Looks like TMDB is missing crew data for this one.",
                    )
                    .await;
                    continue;
                }
                let pages = crew_pages(current.crew());
                if let Err(err) =
                    paginate_ephemeral(ctx.serenity_context(), &press, pages, page_timeout).await
                {
                    warn!("crew pagination failed: {err}");
                }
            }
            Some("trailers") => {
                if current.videos().is_empty() {
                    ephemeral_notice(
                        ctx.serenity_context(),
                        &press,
                        "Looks like trailers for this are missing on TMDB.",
                    )
                    .await;
                    continue;
                }
                let pages = trailer_pages(current.videos());
                if let Err(err) =
                    paginate_ephemeral(ctx.serenity_context(), &press, pages, page_timeout).await
                {
                    warn!("trailer pagination failed: {err}");
                }
            }
            Some("select") => {
                let ComponentInteractionDataKind::StringSelect { values } = &press.data.kind
                else {
                    continue;
                };
                let Some(value) = values.first() else {
                    continue;
                };
                if value == OMITTED_VALUE {
                    ephemeral_notice(
                        ctx.serenity_context(),
                        &press,
                        "Too many results to list them all; refine your search.",
                    )
                    .await;
                    continue;
                }
                let Some((id, kind)) = parse_select_value(value) else {
                    continue;
                };
                if id == current.id() {
                    ephemeral_notice(
                        ctx.serenity_context(),
                        &press,
                        "That entry is currently shown in the embed above.",
                    )
                    .await;
                    continue;
                }
                // Only the requesting user may drive the dropdown.
                if press.user.id != ctx.author().id {
                    ephemeral_notice(
                        ctx.serenity_context(),
                        &press,
                        format!(
                            "Only <@{}> can use this dropdown. You can use the buttons though!",
                            ctx.author().id
                        ),
                    )
                    .await;
                    continue;
                }
                let detail = match cache.get(id) {
                    Some(hit) => hit,
                    None => match data.tmdb.fetch_detail(id, kind).await {
                        Ok(detail) => {
                            let detail = Arc::new(detail);
                            cache.put(id, Arc::clone(&detail));
                            detail
                        }
                        Err(err) => {
                            ephemeral_notice(ctx.serenity_context(), &press, err.to_string())
                                .await;
                            continue;
                        }
                    },
                };
                current = detail;
                let embed = detail_embed(&data.tmdb, &current).await;
                let response = press
                    .create_response(
                        &ctx.serenity_context().http,
                        CreateInteractionResponse::UpdateMessage(
                            CreateInteractionResponseMessage::new()
                                .embed(embed)
                                .components(components(&current)),
                        ),
                    )
                    .await;
                if let Err(err) = response {
                    warn!("failed to update media view: {err}");
                }
            }
            _ => {}
        }
    }

    // Idle timeout: disable the controls, best-effort.
    let edit = EditMessage::new().components(Vec::new());
    if let Err(err) = message.edit(ctx.serenity_context(), edit).await {
        warn!("failed to strip view components: {err}");
    }
    Ok(())
}

/// Dropdown-driven celebrity browser. The requester's picks edit the
/// original message; everyone else gets the embed ephemerally.
pub async fn run_person_view(
    ctx: Context<'_>,
    first: crate::tmdb::models::Person,
    people: Vec<PersonCandidate>,
) -> Result<(), Error> {
    let data = ctx.data();
    let view_timeout = Duration::from_secs(data.config.view_timeout_secs);
    let ctx_id = ctx.id();

    let mut embed_cache: LruCache<i64, serenity::CreateEmbed> =
        LruCache::new(NonZeroUsize::new(SELECT_OPTION_CAP).unwrap());
    let first_id = first.id;
    let first_embed = person_embed(&first, random_colour());
    embed_cache.put(first_id, first_embed.clone());

    if people.len() < 2 {
        ctx.send(poise::CreateReply::default().embed(first_embed))
            .await?;
        return Ok(());
    }

    let select_row = CreateActionRow::SelectMenu(
        CreateSelectMenu::new(
            format!("{ctx_id}_people"),
            CreateSelectMenuKind::String {
                options: person_options(&people),
            },
        )
        .placeholder(format!("Check out other {} celebrities...", people.len() - 1)),
    );
    let reply = ctx
        .send(
            poise::CreateReply::default()
                .embed(first_embed)
                .components(vec![select_row.clone()]),
        )
        .await?;
    let mut message = reply.into_message().await?;
    let mut shown = first_id;

    loop {
        let custom_id = format!("{ctx_id}_people");
        let Some(press) = serenity::ComponentInteractionCollector::new(
            ctx.serenity_context(),
        )
        .message_id(message.id)
        .timeout(view_timeout)
        .filter(move |i| i.data.custom_id == custom_id)
        .await
        else {
            break;
        };

        let ComponentInteractionDataKind::StringSelect { values } = &press.data.kind else {
            continue;
        };
        let Some(value) = values.first() else {
            continue;
        };
        if value == OMITTED_VALUE {
            ephemeral_notice(
                ctx.serenity_context(),
                &press,
                "Too many results to list them all; refine your search.",
            )
            .await;
            continue;
        }
        let Ok(person_id) = value.parse::<i64>() else {
            continue;
        };
        if person_id == shown && press.user.id == ctx.author().id {
            ephemeral_notice(
                ctx.serenity_context(),
                &press,
                "That's what is being currently shown :P",
            )
            .await;
            continue;
        }

        let embed = match embed_cache.get(&person_id) {
            Some(hit) => hit.clone(),
            None => match data.tmdb.fetch_person(person_id).await {
                Ok(person) => {
                    let embed = person_embed(&person, random_colour());
                    embed_cache.put(person_id, embed.clone());
                    embed
                }
                Err(err) => {
                    ephemeral_notice(ctx.serenity_context(), &press, err.to_string()).await;
                    continue;
                }
            },
        };

        if press.user.id == ctx.author().id {
            shown = person_id;
            let response = press
                .create_response(
                    &ctx.serenity_context().http,
                    CreateInteractionResponse::UpdateMessage(
                        CreateInteractionResponseMessage::new()
                            .embed(embed)
                            .components(vec![select_row.clone()]),
                    ),
                )
                .await;
            if let Err(err) = response {
                warn!("failed to update person view: {err}");
            }
        } else {
            let response = press
                .create_response(
                    &ctx.serenity_context().http,
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new()
                            .embed(embed)
                            .ephemeral(true),
                    ),
                )
                .await;
            if let Err(err) = response {
                warn!("failed to send ephemeral person embed: {err}");
            }
        }
    }

    let edit = EditMessage::new().components(Vec::new());
    if let Err(err) = message.edit(ctx.serenity_context(), edit).await {
        warn!("failed to strip person view components: {err}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdb::models::{MediaKind, RawDetail};
    use serde_json::json;

    fn candidate(id: i64) -> Candidate {
        Candidate::Movie(
            serde_json::from_value(json!({
                "id": id,
                "title": format!("Movie {id}"),
                "release_date": "2020-01-01",
                "genre_ids": [28],
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_candidate_options_under_cap() {
        let entries: Vec<Candidate> = (1..=5).map(candidate).collect();
        let options = candidate_options(&entries);
        assert_eq!(options.len(), 5);
    }

    #[test]
    fn test_candidate_options_truncated_at_cap() {
        let entries: Vec<Candidate> = (1..=40).map(candidate).collect();
        let options = candidate_options(&entries);
        assert_eq!(options.len(), SELECT_OPTION_CAP);
        // 24 real options plus the omission placeholder
        let serialized = serde_json::to_value(&options[SELECT_OPTION_CAP - 1]).unwrap();
        assert_eq!(serialized["value"], OMITTED_VALUE);
        assert_eq!(serialized["label"], "…and 16 more");
    }

    #[test]
    fn test_parse_select_value() {
        assert_eq!(parse_select_value("603_movie"), Some((603, MediaKind::Movie)));
        assert_eq!(parse_select_value("1399_tv"), Some((1399, MediaKind::Tv)));
        assert_eq!(parse_select_value("1399_person"), None);
        assert_eq!(parse_select_value("omitted"), None);
        assert_eq!(parse_select_value("abc_movie"), None);
    }

    #[test]
    fn test_session_cache_roundtrip() {
        let mut cache = SessionCache::new();
        assert!(cache.is_empty());
        let detail = Arc::new(Detail::Raw(RawDetail::new(
            MediaKind::Movie,
            json!({"id": 603, "title": "The Matrix"}),
        )));
        cache.put(603, Arc::clone(&detail));
        assert_eq!(cache.len(), 1);
        let hit = cache.get(603).unwrap();
        assert_eq!(hit.title(), "The Matrix");
        assert!(cache.get(604).is_none());
    }
}
