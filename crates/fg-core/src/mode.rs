use std::fmt::Debug;
use std::time::Duration;
use async_trait::async_trait;
use chrono::Utc;
use crate::error::{FormError, GenerationError};
use crate::request::{GenerationRequest, GridForm, GridGenerationRequest, SingleForm};
use crate::result::{GridResult, SingleResult};
use crate::seeds::SeedAllocator;
use crate::service::{DownloadSource, GenerationService};
use crate::view::{format_seconds, format_time_of_day};

/// How to fetch and name the bytes of a cached result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPlan {
    pub source: DownloadSource,
    pub file_name: String,
    pub success_message: String,
}

/// One generation page: how its form becomes a request, how the request
/// reaches the service and how the answer is presented.
#[async_trait]
pub trait GenerationMode: Send + Sync + 'static {
    type Form;
    type Request: Debug + Clone + Send + Sync + 'static;
    type Output: Debug + Clone + Send + 'static;
    type Details: Debug + Clone;

    /// Prepended to the error toast.
    const FAILURE_PREFIX: &'static str;

    fn prepare(&mut self, form: &Self::Form) -> Result<Self::Request, FormError>;

    async fn execute(
        service: &dyn GenerationService,
        request: &Self::Request,
    ) -> Result<Self::Output, GenerationError>;

    fn image_url(output: &Self::Output) -> &str;

    fn details(output: &Self::Output, elapsed: Duration) -> Self::Details;

    fn download_plan(output: &Self::Output) -> DownloadPlan;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleDetails {
    pub seed: String,
    pub truncation: String,
    pub enhancement: String,
    pub time: String,
    pub elapsed: String,
}

#[derive(Debug, Default)]
pub struct SingleMode;

#[async_trait]
impl GenerationMode for SingleMode {
    type Form = SingleForm;
    type Request = GenerationRequest;
    type Output = SingleResult;
    type Details = SingleDetails;

    const FAILURE_PREFIX: &'static str = "Failed to generate face: ";

    fn prepare(&mut self, form: &SingleForm) -> Result<GenerationRequest, FormError> {
        form.parse()
    }

    async fn execute(
        service: &dyn GenerationService,
        request: &GenerationRequest,
    ) -> Result<SingleResult, GenerationError> {
        service.generate_single(request).await
    }

    fn image_url(output: &SingleResult) -> &str {
        &output.url
    }

    fn details(output: &SingleResult, elapsed: Duration) -> SingleDetails {
        SingleDetails {
            seed: output.seed.to_string(),
            truncation: output.truncation_psi.to_string(),
            enhancement: output.enhancement.clone(),
            time: format_time_of_day(&output.timestamp),
            elapsed: format_seconds(elapsed),
        }
    }

    fn download_plan(output: &SingleResult) -> DownloadPlan {
        let file_name = format!("face_{}.png", output.seed);
        DownloadPlan {
            source: DownloadSource::Seed(output.seed),
            success_message: format!("Downloaded {}", file_name),
            file_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridDetails {
    pub dimensions: String,
    pub generated_count: String,
    pub seed_listing: String,
    pub elapsed: String,
}

/// Grid page; owns the allocator that picks the row and column seeds.
#[derive(Debug, Default)]
pub struct GridMode {
    seeds: SeedAllocator,
}

impl GridMode {
    pub fn new(seeds: SeedAllocator) -> Self {
        Self { seeds }
    }
}

#[async_trait]
impl GenerationMode for GridMode {
    type Form = GridForm;
    type Request = GridGenerationRequest;
    type Output = GridResult;
    type Details = GridDetails;

    const FAILURE_PREFIX: &'static str = "Failed to generate grid: ";

    fn prepare(&mut self, form: &GridForm) -> Result<GridGenerationRequest, FormError> {
        form.validate()?;
        let seeds = self.seeds.allocate(form.rows, form.cols);

        Ok(GridGenerationRequest {
            row_seeds: seeds.row_seeds,
            col_seeds: seeds.col_seeds,
            truncation: form.truncation,
        })
    }

    async fn execute(
        service: &dyn GenerationService,
        request: &GridGenerationRequest,
    ) -> Result<GridResult, GenerationError> {
        let response = service.generate_grid(request).await?;

        Ok(GridResult {
            url: response.url,
            row_seeds: request.row_seeds.clone(),
            col_seeds: request.col_seeds.clone(),
            truncation: request.truncation,
            completed_at_ms: Utc::now().timestamp_millis(),
        })
    }

    fn image_url(output: &GridResult) -> &str {
        &output.url
    }

    fn details(output: &GridResult, elapsed: Duration) -> GridDetails {
        GridDetails {
            dimensions: format!("{}×{}", output.rows(), output.cols()),
            generated_count: (output.rows() * output.cols()).to_string(),
            seed_listing: format!(
                "Rows [{}] × Cols [{}]",
                join_seeds(&output.row_seeds),
                join_seeds(&output.col_seeds)
            ),
            elapsed: format_seconds(elapsed),
        }
    }

    fn download_plan(output: &GridResult) -> DownloadPlan {
        DownloadPlan {
            source: DownloadSource::Url(output.url.clone()),
            file_name: format!("face_grid_{}.png", output.completed_at_ms),
            success_message: "Downloaded grid image".to_string(),
        }
    }
}

fn join_seeds(seeds: &[u32]) -> String {
    seeds
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<u32>, cols: Vec<u32>) -> GridResult {
        GridResult {
            url: "/static/generated/grid.png?t=17".into(),
            row_seeds: rows,
            col_seeds: cols,
            truncation: 0.5,
            completed_at_ms: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_grid_details() {
        let details = GridMode::details(&grid(vec![1, 2], vec![10_001, 10_002, 10_003]), Duration::from_millis(4_230));
        assert_eq!(details.dimensions, "2×3");
        assert_eq!(details.generated_count, "6");
        assert_eq!(details.seed_listing, "Rows [1, 2] × Cols [10001, 10002, 10003]");
        assert_eq!(details.elapsed, "4.2");
    }

    #[test]
    fn test_grid_download_uses_raw_url() {
        let plan = GridMode::download_plan(&grid(vec![1], vec![10_000]));
        assert_eq!(plan.source, DownloadSource::Url("/static/generated/grid.png?t=17".into()));
        assert_eq!(plan.file_name, "face_grid_1700000000000.png");
    }

    #[test]
    fn test_single_download_goes_through_seed_endpoint() {
        let result = SingleResult {
            url: "/img/42.png".into(),
            seed: 42,
            truncation_psi: 0.7,
            enhancement: "on".into(),
            timestamp: "2024-01-01T00:00:00Z".into(),
            filename: None,
        };
        let plan = SingleMode::download_plan(&result);
        assert_eq!(plan.source, DownloadSource::Seed(42));
        assert_eq!(plan.file_name, "face_42.png");
        assert_eq!(plan.success_message, "Downloaded face_42.png");
    }

    #[test]
    fn test_grid_prepare_allocates_seeds() {
        let mut mode = GridMode::new(SeedAllocator::seeded(3));
        let form = GridForm { rows: 2, cols: 3, truncation: 0.6, enhance: true };
        let request = mode.prepare(&form).unwrap();
        assert_eq!(request.rows(), 2);
        assert_eq!(request.cols(), 3);
        assert_eq!(request.truncation, 0.6);
    }
}
