use serde_json::{json, Value};
use tracing::warn;

use super::constants::{API_BASE, IMDBAPI_GQL_QUERY};
use super::error::MediaNotFound;
use super::models::{Detail, MediaKind, MovieDetail, Person, RawDetail, TvDetail};

/// Thin client over the TMDB v3 API. One network attempt per call, no retry;
/// every failure mode is folded into [`MediaNotFound`].
#[derive(Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    api_key: String,
}

impl TmdbClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }

    /// Shared status mapping: 401/404 pass the upstream message through,
    /// other non-200s become a generic not-found with the raw status, and
    /// transport/decode failures map to 408.
    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, MediaNotFound> {
        let resp = self
            .http
            .get(format!("{API_BASE}{path}"))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(MediaNotFound::timed_out)?;

        let status = resp.status().as_u16();
        if status == 401 || status == 404 {
            let body: Value = resp.json().await.map_err(MediaNotFound::timed_out)?;
            return Err(MediaNotFound::from_upstream(status, &body));
        }
        if status != 200 {
            return Err(MediaNotFound::no_results(status));
        }
        resp.json().await.map_err(MediaNotFound::timed_out)
    }

    /// Search across all media types; returns the raw heterogeneous records.
    pub async fn search_multi(&self, query: &str) -> Result<Vec<Value>, MediaNotFound> {
        let data = self
            .get_json(
                "/search/multi",
                &[("query", query), ("include_adult", "false")],
            )
            .await?;
        let results = data
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| {
                MediaNotFound::new(404, "😔 TMDB returned zero results for your query.")
            })?;
        if results.is_empty() {
            return Err(MediaNotFound::new(
                404,
                "😔 TMDB returned zero results for your query.",
            ));
        }
        Ok(results)
    }

    /// Fetch the full detail record with embedded credits and videos. On an
    /// unexpected payload shape, falls back to the permissive raw record
    /// rather than failing the caller.
    pub async fn fetch_detail(&self, id: i64, kind: MediaKind) -> Result<Detail, MediaNotFound> {
        let path = format!("/{}/{}", kind.as_str(), id);
        let data = self
            .get_json(&path, &[("append_to_response", "credits,videos")])
            .await?;
        let detail = match kind {
            MediaKind::Movie => match serde_json::from_value::<MovieDetail>(data.clone()) {
                Ok(movie) => Detail::Movie(movie),
                Err(err) => {
                    warn!("strict conversion failed for movie {id}: {err}");
                    Detail::Raw(RawDetail::new(kind, data))
                }
            },
            MediaKind::Tv => match serde_json::from_value::<TvDetail>(data.clone()) {
                Ok(tv) => Detail::Tv(tv),
                Err(err) => {
                    warn!("strict conversion failed for tvshow {id}: {err}");
                    Detail::Raw(RawDetail::new(kind, data))
                }
            },
        };
        Ok(detail)
    }

    pub async fn fetch_person(&self, id: i64) -> Result<Person, MediaNotFound> {
        let data = self
            .get_json(
                &format!("/person/{id}"),
                &[("append_to_response", "combined_credits")],
            )
            .await?;
        let person = match serde_json::from_value::<Person>(data.clone()) {
            Ok(person) => person,
            Err(err) => {
                warn!("strict conversion failed for person {id}: {err}");
                Person::from_raw(&data)
            }
        };
        Ok(person)
    }

    /// Best-effort IMDb aggregate rating via the imdbapi.dev GraphQL
    /// endpoint. Any failure simply yields `None`.
    pub async fn imdb_rating(&self, imdb_id: &str) -> Option<f64> {
        let resp = self
            .http
            .post("https://graph.imdbapi.dev/v1")
            .json(&json!({
                "query": IMDBAPI_GQL_QUERY,
                "variables": {"IMDB_ID": imdb_id},
            }))
            .send()
            .await
            .ok()?;
        if !resp.status().is_success() {
            return None;
        }
        let data: Value = resp.json().await.ok()?;
        data.pointer("/data/title/rating/aggregate_rating")?
            .as_f64()
    }
}
