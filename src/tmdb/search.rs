use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::constants::{movie_genre_name, tv_genre_name};
use super::models::MediaKind;
use crate::discord_text::truncate;

#[derive(Debug, Clone, Deserialize)]
pub struct MovieCandidate {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvCandidate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub original_name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KnownFor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl KnownFor {
    pub fn human_title(&self) -> &str {
        self.name
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonCandidate {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub gender: Option<u8>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub known_for: Vec<KnownFor>,
}

impl PersonCandidate {
    pub fn famous_for(&self) -> String {
        if self.known_for.is_empty() {
            return String::new();
        }
        let titles: Vec<&str> = self
            .known_for
            .iter()
            .map(KnownFor::human_title)
            .filter(|t| !t.is_empty())
            .collect();
        format!("known for {}", titles.join(", "))
    }

    pub fn gender_emoji(&self) -> &'static str {
        match self.gender {
            Some(1) => "♀️",
            Some(2) => "♂️",
            _ => "❔",
        }
    }
}

/// A lightweight search result before detail resolution. The raw variant
/// carries records whose shape did not satisfy the typed struct; a single
/// malformed record never aborts classification of the rest.
#[derive(Debug, Clone)]
pub enum Candidate {
    Movie(MovieCandidate),
    Tv(TvCandidate),
    Raw { kind: MediaKind, value: Value },
}

impl Candidate {
    pub fn id(&self) -> i64 {
        match self {
            Candidate::Movie(m) => m.id,
            Candidate::Tv(t) => t.id,
            Candidate::Raw { value, .. } => {
                value.get("id").and_then(Value::as_i64).unwrap_or_default()
            }
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Candidate::Movie(_) => MediaKind::Movie,
            Candidate::Tv(_) => MediaKind::Tv,
            Candidate::Raw { kind, .. } => *kind,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Candidate::Movie(m) => &m.title,
            Candidate::Tv(t) => {
                if t.name.is_empty() {
                    &t.original_name
                } else {
                    &t.name
                }
            }
            Candidate::Raw { value, .. } => value
                .get("title")
                .or_else(|| value.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("Unknown title"),
        }
    }

    pub fn year(&self) -> &str {
        let date = match self {
            Candidate::Movie(m) => m.release_date.as_deref(),
            Candidate::Tv(t) => t.first_air_date.as_deref(),
            Candidate::Raw { value, .. } => value
                .get("release_date")
                .or_else(|| value.get("first_air_date"))
                .and_then(Value::as_str),
        };
        date.unwrap_or("").split('-').next().unwrap_or("")
    }

    pub fn release_date(&self) -> Option<&str> {
        match self {
            Candidate::Movie(m) => m.release_date.as_deref(),
            Candidate::Tv(t) => t.first_air_date.as_deref(),
            Candidate::Raw { value, .. } => value
                .get("release_date")
                .or_else(|| value.get("first_air_date"))
                .and_then(Value::as_str),
        }
    }

    pub fn genre_names(&self) -> String {
        let (ids, lookup): (&[i64], fn(i64) -> Option<&'static str>) = match self {
            Candidate::Movie(m) => (&m.genre_ids, movie_genre_name),
            Candidate::Tv(t) => (&t.genre_ids, tv_genre_name),
            Candidate::Raw { .. } => return String::new(),
        };
        ids.iter()
            .map(|id| lookup(*id).map(str::to_owned).unwrap_or(format!("Genre{id}")))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn short_overview(&self, chars: usize) -> String {
        let overview = match self {
            Candidate::Movie(m) => m.overview.as_deref(),
            Candidate::Tv(t) => t.overview.as_deref(),
            Candidate::Raw { value, .. } => value.get("overview").and_then(Value::as_str),
        };
        overview.map(|o| truncate(o, chars)).unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct Classified {
    /// Movie/TV entries, service order preserved.
    pub entries: Vec<Candidate>,
    /// Person entries, service order preserved.
    pub people: Vec<PersonCandidate>,
}

/// Partition raw multi-search records by their `media_type` discriminator.
/// Unknown types are dropped; movie/tv records that fail typed conversion
/// fall back to the raw candidate form.
pub fn classify(records: Vec<Value>) -> Classified {
    let mut out = Classified::default();
    for record in records {
        let Some(media_type) = record.get("media_type").and_then(Value::as_str) else {
            continue;
        };
        match media_type {
            "movie" => match serde_json::from_value::<MovieCandidate>(record.clone()) {
                Ok(movie) => out.entries.push(Candidate::Movie(movie)),
                Err(err) => {
                    debug!("falling back to raw movie candidate: {err}");
                    out.entries.push(Candidate::Raw {
                        kind: MediaKind::Movie,
                        value: record,
                    });
                }
            },
            "tv" => match serde_json::from_value::<TvCandidate>(record.clone()) {
                Ok(tv) => out.entries.push(Candidate::Tv(tv)),
                Err(err) => {
                    debug!("falling back to raw tv candidate: {err}");
                    out.entries.push(Candidate::Raw {
                        kind: MediaKind::Tv,
                        value: record,
                    });
                }
            },
            "person" => match serde_json::from_value::<PersonCandidate>(record) {
                Ok(person) => out.people.push(person),
                Err(err) => debug!("dropping malformed person record: {err}"),
            },
            other => debug!("dropping record with media_type {other:?}"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_records() -> Vec<Value> {
        vec![
            json!({"media_type": "movie", "id": 1, "title": "Avatar", "release_date": "2009-12-18", "genre_ids": [878, 12]}),
            json!({"media_type": "person", "id": 2, "name": "James Cameron", "gender": 2,
                   "known_for": [{"title": "Avatar"}, {"title": "Titanic"}]}),
            json!({"media_type": "tv", "id": 3, "name": "Avatar: The Last Airbender", "first_air_date": "2005-02-21"}),
            // unknown type: dropped
            json!({"media_type": "collection", "id": 4, "name": "Avatar Collection"}),
            // malformed movie (id is a string): raw fallback, same partition
            json!({"media_type": "movie", "id": "broken", "title": "Avatar 3"}),
            json!({"media_type": "movie", "id": 5, "title": "Avatar: The Way of Water", "release_date": "2022-12-14"}),
        ]
    }

    #[test]
    fn test_classify_partitions_and_order() {
        let classified = classify(sample_records());
        assert_eq!(classified.entries.len(), 4);
        assert_eq!(classified.people.len(), 1);

        // relative order within the entries partition is preserved
        assert_eq!(classified.entries[0].id(), 1);
        assert!(matches!(classified.entries[1], Candidate::Tv(_)));
        assert!(matches!(
            classified.entries[2],
            Candidate::Raw {
                kind: MediaKind::Movie,
                ..
            }
        ));
        assert_eq!(classified.entries[3].id(), 5);
    }

    #[test]
    fn test_raw_candidate_accessors() {
        let classified = classify(sample_records());
        let raw = &classified.entries[2];
        assert_eq!(raw.id(), 0);
        assert_eq!(raw.title(), "Avatar 3");
        assert_eq!(raw.kind(), MediaKind::Movie);
        assert_eq!(raw.genre_names(), "");
    }

    #[test]
    fn test_genre_names() {
        let classified = classify(sample_records());
        assert_eq!(classified.entries[0].genre_names(), "Sci-fi, Adventure");
        assert_eq!(classified.entries[0].year(), "2009");
    }

    #[test]
    fn test_person_famous_for() {
        let classified = classify(sample_records());
        let person = &classified.people[0];
        assert_eq!(person.famous_for(), "known for Avatar, Titanic");
        assert_eq!(person.gender_emoji(), "♂️");
    }

    #[test]
    fn test_empty_input() {
        let classified = classify(Vec::new());
        assert!(classified.entries.is_empty());
        assert!(classified.people.is_empty());
    }
}
