use thiserror::Error;

/// Form input that could not be coerced into a request. Nothing is sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Seed must be a whole number, got '{0}'")]
    InvalidSeed(String),
    #[error("Grid needs at least one row and one column, got {rows}×{cols}")]
    EmptyGrid { rows: usize, cols: usize },
}

/// Failure of a generation call. `Display` is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Non-2xx response carrying a `detail` string.
    #[error("{0}")]
    Rejected(String),
    /// Non-2xx response whose body was JSON without a usable `detail`.
    #[error("{0}")]
    Unspecified(&'static str),
    /// Non-2xx response whose body could not be parsed.
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Decode(String),
}

impl GenerationError {
    /// Classifies a non-2xx response from its status line and raw body.
    pub fn from_failure(status: u16, reason: &str, body: &[u8], fallback: &'static str) -> Self {
        match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(value) => match value.get("detail").and_then(|d| d.as_str()) {
                Some(detail) if !detail.is_empty() => Self::Rejected(detail.to_string()),
                _ => Self::Unspecified(fallback),
            },
            Err(_) => Self::Http {
                status,
                reason: reason.to_string(),
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Download failed: HTTP {0}")]
    Http(u16),
    #[error("Download failed: {0}")]
    Transport(String),
    #[error("Download failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_is_used_verbatim() {
        let err = GenerationError::from_failure(400, "Bad Request", br#"{"detail":"bad seed"}"#, "Generation failed");
        assert_eq!(err.to_string(), "bad seed");
    }

    #[test]
    fn test_unparsable_body_reports_status_line() {
        let err = GenerationError::from_failure(500, "Internal Server Error", b"<html>oops</html>", "Generation failed");
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }

    #[test]
    fn test_json_without_detail_falls_back() {
        let err = GenerationError::from_failure(422, "Unprocessable Entity", br#"{"detail":[{"loc":["body"]}]}"#, "Grid generation failed");
        assert_eq!(err, GenerationError::Unspecified("Grid generation failed"));
    }

    #[test]
    fn test_empty_body_is_unparsable() {
        let err = GenerationError::from_failure(502, "Bad Gateway", b"", "Generation failed");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }
}
