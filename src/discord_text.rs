use chrono::NaiveDate;

/// Discord message limit is 2000 characters
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;
/// Embed description limit is 4096 characters
pub const DISCORD_EMBED_LIMIT: usize = 4096;

/// Render a `YYYY-MM-DD` date as Discord timestamp markup (`<t:unix:style>`).
/// Returns an empty string for missing or unparseable dates so callers can
/// interpolate unconditionally.
pub fn format_date(date: Option<&str>, style: char, prefix: &str) -> String {
    let Some(date) = date.filter(|d| !d.is_empty()) else {
        return String::new();
    };
    let Some(unix) = date_to_unix(date) else {
        return String::new();
    };
    format!("{prefix}<t:{unix}:{style}>")
}

pub fn date_to_unix(date: &str) -> Option<i64> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(parsed.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}

// credits to devon (Gorialis)
pub fn natural_size(value: i64) -> String {
    if value < 1_000 {
        return value.to_string();
    }
    let units = ["", "K", "M", "B"];
    let power = (value.abs().max(1) as f64).log(1000.0) as usize;
    let power = power.min(units.len() - 1);
    format!(
        "{:.1}{}",
        value as f64 / 1000f64.powi(power as i32),
        units[power]
    )
}

/// Char-boundary-safe truncation with a trailing ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '*' | '_' | '`' | '~' | '|' | '>' | '#') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(None, 'R', ""), "");
        assert_eq!(format_date(Some(""), 'R', ""), "");
        assert_eq!(format_date(Some("not-a-date"), 'R', ""), "");
        assert_eq!(
            format_date(Some("2010-07-16"), 'd', "released "),
            "released <t:1279238400:d>"
        );
    }

    #[test]
    fn test_natural_size() {
        assert_eq!(natural_size(0), "0");
        assert_eq!(natural_size(999), "999");
        assert_eq!(natural_size(160_000_000), "160.0M");
        assert_eq!(natural_size(2_923_706_026), "2.9B");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        let long = "a".repeat(120);
        let cut = truncate(&long, 100);
        assert!(cut.chars().count() <= 100);
        assert!(cut.ends_with('…'));
        // multi-byte safety
        let emoji = "🍿".repeat(30);
        assert!(truncate(&emoji, 10).chars().count() <= 10);
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("a*b_c"), "a\\*b\\_c");
        assert_eq!(escape_markdown("plain"), "plain");
    }
}
