use serde_json::Value;

/// Upstream returned no usable data. The message is shown to the user as-is.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{status_message}")]
pub struct MediaNotFound {
    pub status_code: u16,
    pub status_message: String,
}

impl MediaNotFound {
    pub fn new(status_code: u16, status_message: impl Into<String>) -> Self {
        Self {
            status_code,
            status_message: status_message.into(),
        }
    }

    /// 401/404 bodies carry a `status_message` field we pass through verbatim.
    pub fn from_upstream(status_code: u16, body: &Value) -> Self {
        let message = body
            .get("status_message")
            .and_then(Value::as_str)
            .unwrap_or("😔 No results found.")
            .to_owned();
        Self::new(status_code, message)
    }

    pub fn timed_out(_err: reqwest::Error) -> Self {
        Self::new(408, "⚠️ Operation timed out.")
    }

    pub fn no_results(status_code: u16) -> Self {
        Self::new(
            status_code,
            format!("😔 No results found (code {status_code})."),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upstream_message_passthrough() {
        let body = json!({"status_message": "The resource you requested could not be found.", "success": false});
        let err = MediaNotFound::from_upstream(404, &body);
        assert_eq!(err.status_code, 404);
        assert_eq!(
            err.to_string(),
            "The resource you requested could not be found."
        );
    }

    #[test]
    fn test_upstream_message_missing() {
        let err = MediaNotFound::from_upstream(401, &json!({}));
        assert_eq!(err.status_code, 401);
        assert_eq!(err.to_string(), "😔 No results found.");
    }
}
