use serde::{Deserialize, Serialize};

/// Success body of `POST /api/v1/generate/single`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleResult {
    pub url: String,
    pub seed: u32,
    pub truncation_psi: f64,
    pub enhancement: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Success body of `POST /api/v1/generate/style-mix`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleMixResponse {
    pub url: String,
}

/// A finished grid: the service only returns the image URL, the seeds are
/// echoed from the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct GridResult {
    pub url: String,
    pub row_seeds: Vec<u32>,
    pub col_seeds: Vec<u32>,
    pub truncation: f64,
    /// Milliseconds since the Unix epoch when the response arrived.
    pub completed_at_ms: i64,
}

impl GridResult {
    pub fn rows(&self) -> usize {
        self.row_seeds.len()
    }

    pub fn cols(&self) -> usize {
        self.col_seeds.len()
    }
}

/// Single-slot store for the last successful result.
///
/// Only ever overwritten, so a failed generation leaves the previous
/// result downloadable.
#[derive(Debug, Clone)]
pub struct ResultCache<T> {
    slot: Option<T>,
}

impl<T> Default for ResultCache<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T> ResultCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, result: T) {
        self.slot = Some(result);
    }

    pub fn get(&self) -> Option<&T> {
        self.slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keeps_latest_only() {
        let mut cache = ResultCache::new();
        assert!(cache.is_empty());

        cache.set("first");
        cache.set("second");
        assert_eq!(cache.get(), Some(&"second"));
    }

    #[test]
    fn test_single_result_parses_service_body() {
        let body = r#"{
            "seed": 42,
            "filename": "42.png",
            "url": "/static/generated/42.png",
            "enhancement": "on",
            "truncation_psi": 0.7,
            "timestamp": "2024-01-01T00:00:00Z"
        }"#;
        let result: SingleResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.seed, 42);
        assert_eq!(result.filename.as_deref(), Some("42.png"));
        assert_eq!(result.truncation_psi, 0.7);
    }

    #[test]
    fn test_single_result_without_filename() {
        let body = r#"{"url":"/img/42.png","seed":42,"truncation_psi":0.7,"enhancement":"on","timestamp":"2024-01-01T00:00:00Z"}"#;
        let result: SingleResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.filename, None);
    }
}
