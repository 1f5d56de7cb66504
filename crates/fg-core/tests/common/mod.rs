//! Scripted service and in-memory sink shared by the lifecycle tests.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use async_trait::async_trait;
use fg_core::error::{DownloadError, GenerationError};
use fg_core::request::{GenerationRequest, GridGenerationRequest};
use fg_core::result::{SingleResult, StyleMixResponse};
use fg_core::service::{DownloadSink, DownloadSource, GenerationService};

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Call {
    Single(GenerationRequest),
    Grid(GridGenerationRequest),
    Fetch(DownloadSource),
}

/// Answers each call with the next scripted response of its kind.
#[derive(Default)]
pub struct ScriptedService {
    single: Mutex<VecDeque<Result<SingleResult, GenerationError>>>,
    grid: Mutex<VecDeque<Result<StyleMixResponse, GenerationError>>>,
    bytes: Mutex<VecDeque<Result<Vec<u8>, u16>>>,
    calls: Mutex<Vec<Call>>,
}

#[allow(dead_code)]
impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_single(&self, response: Result<SingleResult, GenerationError>) -> &Self {
        self.single.lock().unwrap().push_back(response);
        self
    }

    pub fn push_grid(&self, response: Result<StyleMixResponse, GenerationError>) -> &Self {
        self.grid.lock().unwrap().push_back(response);
        self
    }

    /// `Err(status)` simulates a non-2xx download response.
    pub fn push_bytes(&self, response: Result<Vec<u8>, u16>) -> &Self {
        self.bytes.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationService for ScriptedService {
    async fn generate_single(&self, request: &GenerationRequest) -> Result<SingleResult, GenerationError> {
        self.calls.lock().unwrap().push(Call::Single(request.clone()));
        self.single
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted single response")
    }

    async fn generate_grid(&self, request: &GridGenerationRequest) -> Result<StyleMixResponse, GenerationError> {
        self.calls.lock().unwrap().push(Call::Grid(request.clone()));
        self.grid
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted grid response")
    }

    async fn fetch_bytes(&self, source: &DownloadSource) -> Result<Vec<u8>, DownloadError> {
        self.calls.lock().unwrap().push(Call::Fetch(source.clone()));
        self.bytes
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted download response")
            .map_err(DownloadError::Http)
    }
}

/// Keeps saved files in memory.
#[derive(Default)]
pub struct MemorySink {
    pub saved: Mutex<Vec<(String, Vec<u8>)>>,
}

#[async_trait]
impl DownloadSink for MemorySink {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError> {
        self.saved.lock().unwrap().push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from("memory").join(file_name))
    }
}

#[allow(dead_code)]
pub fn face(seed: u32) -> SingleResult {
    SingleResult {
        url: format!("/img/{}.png", seed),
        seed,
        truncation_psi: 0.7,
        enhancement: "on".to_string(),
        timestamp: "2024-01-01T00:00:00Z".to_string(),
        filename: None,
    }
}
