use poise::serenity_prelude::CreateAttachment;

use crate::{Context, Error};

const STATIC_MAP_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";
const MAP_TYPES: [&str; 4] = ["roadmap", "satellite", "terrain", "hybrid"];
const ROADMAP_STYLE: &str =
    "feature:road.highway|element:labels.text.fill|visibility:on|color:0xffffff";

/// Zoom levels run from 1 (world) to 20 (buildings); out-of-range input
/// falls back to city level.
fn clamp_zoom(zoom: Option<u8>) -> u8 {
    match zoom {
        Some(z) if (1..=20).contains(&z) => z,
        _ => 12,
    }
}

fn normalize_map_type(map_type: Option<&str>) -> &'static str {
    map_type
        .and_then(|t| {
            let lower = t.to_lowercase();
            MAP_TYPES.iter().find(|m| **m == lower).copied()
        })
        .unwrap_or("roadmap")
}

fn maps_search_url(location: &str) -> String {
    format!(
        "<https://www.google.com/maps/search/{}>",
        location.replace(' ', "+")
    )
}

/// Fetch a Google map of a location
#[poise::command(slash_command, prefix_command, required_bot_permissions = "ATTACH_FILES")]
pub async fn map(
    ctx: Context<'_>,
    #[description = "Place to show on the map"] location: String,
    #[description = "Zoom level from 1 (world) to 20 (buildings), default 12"] zoom: Option<u8>,
    #[description = "roadmap, satellite, terrain or hybrid"] maptype: Option<String>,
) -> Result<(), Error> {
    let data = ctx.data();
    let Some(api_key) = data.config.googlemaps_api_key.as_deref() else {
        ctx.say("⚠️ Bot owner needs to set a Google Maps API key first!")
            .await?;
        return Ok(());
    };
    if location.trim().is_empty() {
        ctx.say("You need to provide a location name silly").await?;
        return Ok(());
    }

    ctx.defer().await?;
    let zoom = clamp_zoom(zoom);
    let map_type = normalize_map_type(maptype.as_deref());
    let mut params = vec![
        ("center", location.clone()),
        ("zoom", zoom.to_string()),
        ("size", "640x640".into()),
        ("scale", "2".into()),
        ("format", "png32".into()),
        ("maptype", map_type.into()),
        ("key", api_key.to_owned()),
    ];
    if map_type == "roadmap" {
        params.push(("style", ROADMAP_STYLE.into()));
    }

    let response = match data.http_client.get(STATIC_MAP_URL).query(&params).send().await {
        Ok(response) => response,
        Err(err) => {
            ctx.say(format!("Operation timed out: {err}")).await?;
            return Ok(());
        }
    };
    if !response.status().is_success() {
        ctx.say(format!("https://http.cat/{}", response.status().as_u16()))
            .await?;
        return Ok(());
    }
    let image = response.bytes().await?;

    ctx.send(
        poise::CreateReply::default()
            .content(maps_search_url(&location))
            .attachment(CreateAttachment::bytes(image.to_vec(), "google_maps.png")),
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_zoom() {
        assert_eq!(clamp_zoom(Some(1)), 1);
        assert_eq!(clamp_zoom(Some(20)), 20);
        assert_eq!(clamp_zoom(Some(0)), 12);
        assert_eq!(clamp_zoom(Some(21)), 12);
        assert_eq!(clamp_zoom(None), 12);
    }

    #[test]
    fn test_normalize_map_type() {
        assert_eq!(normalize_map_type(Some("satellite")), "satellite");
        assert_eq!(normalize_map_type(Some("HYBRID")), "hybrid");
        assert_eq!(normalize_map_type(Some("moon")), "roadmap");
        assert_eq!(normalize_map_type(None), "roadmap");
    }

    #[test]
    fn test_maps_search_url_escapes_spaces() {
        assert_eq!(
            maps_search_url("New York City"),
            "<https://www.google.com/maps/search/New+York+City>"
        );
    }
}
