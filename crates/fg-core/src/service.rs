use std::path::PathBuf;
use async_trait::async_trait;
use crate::error::{DownloadError, GenerationError};
use crate::request::{GenerationRequest, GridGenerationRequest};
use crate::result::{SingleResult, StyleMixResponse};

/// Where the bytes of a cached result are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadSource {
    /// `GET /api/v1/generate/single/download?seed=…`, served from the
    /// service's on-disk cache.
    Seed(u32),
    /// The image URL exactly as the service returned it.
    Url(String),
}

/// The remote generation service.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate_single(&self, request: &GenerationRequest) -> Result<SingleResult, GenerationError>;

    async fn generate_grid(&self, request: &GridGenerationRequest) -> Result<StyleMixResponse, GenerationError>;

    async fn fetch_bytes(&self, source: &DownloadSource) -> Result<Vec<u8>, DownloadError>;
}

/// Destination for downloaded images.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Persists `bytes` under `file_name` and returns where they ended up.
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError>;
}
