use serde::{Deserialize, Serialize};
use crate::error::FormError;

/// Pixel size of one generated face; grids add a header row and column.
pub const FACE_RESOLUTION: u32 = 1024;

/// Raw inputs of the single-face form.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleForm {
    pub seed: String,
    pub truncation: f64,
    pub enhance: bool,
}

impl Default for SingleForm {
    fn default() -> Self {
        Self {
            seed: String::new(),
            truncation: 0.5,
            enhance: true,
        }
    }
}

impl SingleForm {
    /// Coerces the form into a request. An empty seed lets the service pick one.
    pub fn parse(&self) -> Result<GenerationRequest, FormError> {
        let raw = self.seed.trim();
        let seed = if raw.is_empty() {
            None
        } else {
            Some(raw.parse::<u32>().map_err(|_| FormError::InvalidSeed(raw.to_string()))?)
        };

        Ok(GenerationRequest {
            seed,
            truncation: self.truncation,
            enhance: self.enhance,
        })
    }
}

/// Raw inputs of the grid form.
#[derive(Debug, Clone, PartialEq)]
pub struct GridForm {
    pub rows: usize,
    pub cols: usize,
    pub truncation: f64,
    /// Shown on the form but not part of the style-mix contract.
    pub enhance: bool,
}

impl Default for GridForm {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            truncation: 0.5,
            enhance: true,
        }
    }
}

impl GridForm {
    pub fn total_faces(&self) -> usize {
        self.rows * self.cols
    }

    /// Width × height of the rendered grid image, seed headers included.
    pub fn resolution(&self) -> (u32, u32) {
        (
            FACE_RESOLUTION * (self.cols as u32 + 1),
            FACE_RESOLUTION * (self.rows as u32 + 1),
        )
    }

    pub fn resolution_label(&self) -> String {
        let (w, h) = self.resolution();
        format!("{}×{}", w, h)
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(FormError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

/// Body of `POST /api/v1/generate/single`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    pub truncation: f64,
    #[serde(rename = "enhance_face")]
    pub enhance: bool,
}

/// Body of `POST /api/v1/generate/style-mix`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridGenerationRequest {
    pub row_seeds: Vec<u32>,
    pub col_seeds: Vec<u32>,
    pub truncation: f64,
}

impl GridGenerationRequest {
    pub fn rows(&self) -> usize {
        self.row_seeds.len()
    }

    pub fn cols(&self) -> usize {
        self.col_seeds.len()
    }
}
