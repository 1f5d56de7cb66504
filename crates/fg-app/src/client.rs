use async_trait::async_trait;
use log::debug;
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use fg_core::error::{DownloadError, GenerationError};
use fg_core::request::{GenerationRequest, GridGenerationRequest};
use fg_core::result::{SingleResult, StyleMixResponse};
use fg_core::service::{DownloadSource, GenerationService};
use crate::textures;

const SINGLE_ENDPOINT: &str = "/api/v1/generate/single";
const STYLE_MIX_ENDPOINT: &str = "/api/v1/generate/style-mix";
const SINGLE_DOWNLOAD_ENDPOINT: &str = "/api/v1/generate/single/download";

/// `GenerationService` over HTTP. No timeout is set; reqwest's transport
/// defaults apply.
pub struct HttpGenerationService {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpGenerationService {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Resolves a service path or a returned image URL against the base URL.
    pub fn resolve(&self, url: &str) -> Result<Url, String> {
        self.base_url
            .join(url)
            .map_err(|e| format!("Invalid URL '{}': {}", url, e))
    }

    pub fn download_url(&self, source: &DownloadSource) -> Result<Url, String> {
        match source {
            DownloadSource::Seed(seed) => {
                let mut url = self.resolve(SINGLE_DOWNLOAD_ENDPOINT)?;
                url.query_pairs_mut().append_pair("seed", &seed.to_string());
                Ok(url)
            }
            DownloadSource::Url(raw) => self.resolve(raw),
        }
    }

    /// Fetches and decodes a display image.
    pub async fn fetch_image(&self, url: &str) -> Result<egui::ColorImage, String> {
        let bytes = self
            .fetch_bytes(&DownloadSource::Url(url.to_string()))
            .await
            .map_err(|e| e.to_string())?;
        textures::decode(&bytes).map_err(|e| e.to_string())
    }

    #[instrument(level = "debug", skip(self, body))]
    async fn post_json<B, T>(&self, path: &str, body: &B, fallback: &'static str) -> Result<T, GenerationError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.resolve(path).map_err(GenerationError::Transport)?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        debug!("{} answered {}", path, status);

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(GenerationError::from_failure(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status"),
                &body,
                fallback,
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| GenerationError::Decode(e.to_string()))
    }
}

#[async_trait]
impl GenerationService for HttpGenerationService {
    async fn generate_single(&self, request: &GenerationRequest) -> Result<SingleResult, GenerationError> {
        self.post_json(SINGLE_ENDPOINT, request, "Generation failed").await
    }

    async fn generate_grid(&self, request: &GridGenerationRequest) -> Result<StyleMixResponse, GenerationError> {
        self.post_json(STYLE_MIX_ENDPOINT, request, "Grid generation failed").await
    }

    async fn fetch_bytes(&self, source: &DownloadSource) -> Result<Vec<u8>, DownloadError> {
        let url = self.download_url(source).map_err(DownloadError::Transport)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DownloadError::Http(response.status().as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DownloadError::Transport(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use super::*;

    fn service() -> HttpGenerationService {
        HttpGenerationService::new(Url::parse("http://127.0.0.1:8000").unwrap())
    }

    /// Answers exactly one request on a loopback port with `response`.
    async fn serve_once(response: String) -> HttpGenerationService {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        HttpGenerationService {
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
            base_url: Url::parse(&format!("http://{}", addr)).unwrap(),
        }
    }

    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            let Some(header_end) = text.find("\r\n\r\n") else {
                continue;
            };
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);

            if buf.len() >= header_end + 4 + content_length {
                return;
            }
        }
    }

    fn reply(status: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        )
    }

    fn single_request() -> GenerationRequest {
        GenerationRequest {
            seed: Some(42),
            truncation: 0.7,
            enhance: true,
        }
    }

    #[tokio::test]
    async fn test_html_error_page_reports_status() {
        let service = serve_once(reply(
            "500 Internal Server Error",
            "text/html",
            "<html><body>boom</body></html>",
        ))
        .await;

        let err = service.generate_single(&single_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }

    #[tokio::test]
    async fn test_detail_is_passed_through() {
        let service = serve_once(reply(
            "400 Bad Request",
            "application/json",
            r#"{"detail":"bad seed"}"#,
        ))
        .await;

        let err = service.generate_single(&single_request()).await.unwrap_err();
        assert_eq!(err, GenerationError::Rejected("bad seed".into()));
        assert_eq!(err.to_string(), "bad seed");
    }

    #[tokio::test]
    async fn test_json_error_without_detail_uses_fallback() {
        let service = serve_once(reply(
            "422 Unprocessable Entity",
            "application/json",
            r#"{"detail":[{"loc":["body","row_seeds"]}]}"#,
        ))
        .await;

        let request = GridGenerationRequest {
            row_seeds: vec![1],
            col_seeds: vec![10_001],
            truncation: 0.5,
        };
        let err = service.generate_grid(&request).await.unwrap_err();
        assert_eq!(err.to_string(), "Grid generation failed");
    }

    #[tokio::test]
    async fn test_incomplete_success_body_is_a_decode_error() {
        let service = serve_once(reply("200 OK", "application/json", r#"{"url":"/img/42.png"}"#)).await;

        let err = service.generate_single(&single_request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Decode(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_missing_download_is_http_error() {
        let service = serve_once(reply("404 Not Found", "application/json", r#"{"detail":"Not Found"}"#)).await;

        let err = service.fetch_bytes(&DownloadSource::Seed(42)).await.unwrap_err();
        assert!(matches!(err, DownloadError::Http(404)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_download_returns_body_bytes() {
        let service = serve_once(reply("200 OK", "image/png", "PNGDATA")).await;

        let bytes = service
            .fetch_bytes(&DownloadSource::Url("/static/generated/grid_1.png".into()))
            .await
            .unwrap();
        assert_eq!(bytes, b"PNGDATA");
    }

    #[test]
    fn test_seed_download_url() {
        let url = service().download_url(&DownloadSource::Seed(42)).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/v1/generate/single/download?seed=42");
    }

    #[test]
    fn test_relative_image_url_keeps_query() {
        let url = service()
            .download_url(&DownloadSource::Url("/static/generated/grid_1.png?t=1700000000".into()))
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/static/generated/grid_1.png?t=1700000000");
    }

    #[test]
    fn test_absolute_image_url_is_used_as_is() {
        let url = service().resolve("https://cdn.example.com/42.png").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/42.png");
    }
}
