use std::path::PathBuf;
use std::time::{Duration, Instant};
use log::{debug, info, warn};
use crate::error::{DownloadError, FormError, GenerationError};
use crate::mode::{DownloadPlan, GenerationMode};
use crate::notify::Notifier;
use crate::result::ResultCache;
use crate::service::{DownloadSink, GenerationService};
use crate::view::{CacheBuster, Panel, UiPhase, ViewState};

/// Identifies one submission. Only the latest token of a controller is
/// ever applied; earlier responses are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone)]
pub struct Submission<R> {
    pub token: RequestToken,
    pub request: R,
    pub started_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Completion<T> {
    pub token: RequestToken,
    pub outcome: Result<T, GenerationError>,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Result,
    Error,
    /// A newer submission exists; nothing changed.
    Stale,
}

/// Everything needed to draw one generation page for one frame.
#[derive(Debug)]
pub struct PanelView<'a, D> {
    pub phase: UiPhase,
    pub panel: Panel,
    pub error: Option<&'a str>,
    /// Cache-busted URL of the displayed image.
    pub image_url: Option<&'a str>,
    pub details: Option<&'a D>,
    pub download_enabled: bool,
    pub downloading: bool,
}

/// Runs one page's requests from submission to download.
pub struct GenerationController<M: GenerationMode> {
    mode: M,
    view: ViewState,
    cache: ResultCache<M::Output>,
    details: Option<M::Details>,
    display_url: Option<String>,
    cache_buster: CacheBuster,
    last_token: u64,
    pending: Option<RequestToken>,
    downloading: bool,
}

impl<M: GenerationMode> GenerationController<M> {
    pub fn new(mode: M) -> Self {
        Self {
            mode,
            view: ViewState::default(),
            cache: ResultCache::new(),
            details: None,
            display_url: None,
            cache_buster: CacheBuster::default(),
            last_token: 0,
            pending: None,
            downloading: false,
        }
    }

    /// Validates the form and moves the page into `Loading`.
    ///
    /// A submit while another is in flight supersedes it: the older
    /// response will come back as [`Applied::Stale`].
    pub fn submit(&mut self, form: &M::Form) -> Result<Submission<M::Request>, FormError> {
        let request = self.mode.prepare(form)?;

        if let Some(previous) = self.pending {
            warn!("Superseding in-flight request {:?}", previous);
        }

        self.last_token += 1;
        let token = RequestToken(self.last_token);
        self.pending = Some(token);
        self.view.begin_loading();

        debug!("Submitting {:?}: {:?}", token, request);

        Ok(Submission {
            token,
            request,
            started_at: Instant::now(),
        })
    }

    pub fn apply(&mut self, completion: Completion<M::Output>, notifier: &mut Notifier) -> Applied {
        if self.pending != Some(completion.token) {
            debug!("Discarding stale response for {:?}", completion.token);
            return Applied::Stale;
        }
        self.pending = None;

        match completion.outcome {
            Ok(output) => {
                info!("Generation finished in {:.1}s", completion.elapsed.as_secs_f64());
                self.display_url = Some(self.cache_buster.bust(M::image_url(&output)));
                self.details = Some(M::details(&output, completion.elapsed));
                self.cache.set(output);
                self.view.show_result();
                Applied::Result
            }
            Err(err) => {
                let message = err.to_string();
                notifier.error(format!("{}{}", M::FAILURE_PREFIX, message));
                self.view.show_error(message, !self.cache.is_empty());
                Applied::Error
            }
        }
    }

    /// Submits, awaits the service and applies the answer in one go.
    pub async fn generate(
        &mut self,
        service: &dyn GenerationService,
        form: &M::Form,
        notifier: &mut Notifier,
    ) -> Result<Applied, FormError> {
        let submission = self.submit(form)?;
        let completion = dispatch::<M>(service, submission).await;
        Ok(self.apply(completion, notifier))
    }

    /// Claims the cached result for download. `None` when there is
    /// nothing to download or a download is already running.
    pub fn download_plan(&mut self) -> Option<DownloadPlan> {
        if self.downloading {
            debug!("Download already in progress");
            return None;
        }
        let plan = M::download_plan(self.cache.get()?);
        self.downloading = true;
        Some(plan)
    }

    pub fn finish_download(
        &mut self,
        plan: &DownloadPlan,
        outcome: Result<PathBuf, DownloadError>,
        notifier: &mut Notifier,
    ) {
        self.downloading = false;

        match outcome {
            Ok(path) => {
                info!("Saved {} to {}", plan.file_name, path.display());
                notifier.success(plan.success_message.clone());
            }
            Err(err) => {
                warn!("{}: {}", plan.file_name, err);
                notifier.error("Download failed. Please try again.");
            }
        }
    }

    /// Re-downloads the cached result. Does nothing if there is none.
    pub async fn download_current_result(
        &mut self,
        service: &dyn GenerationService,
        sink: &dyn DownloadSink,
        notifier: &mut Notifier,
    ) -> bool {
        let Some(plan) = self.download_plan() else {
            return false;
        };
        let outcome = fetch_download(service, sink, &plan).await;
        self.finish_download(&plan, outcome, notifier);
        true
    }

    pub fn view(&self) -> PanelView<'_, M::Details> {
        let showing_result = self.view.panel() == Panel::Result;

        PanelView {
            phase: self.view.phase(),
            panel: self.view.panel(),
            error: self.view.error(),
            image_url: self.display_url.as_deref().filter(|_| showing_result),
            details: self.details.as_ref().filter(|_| showing_result),
            download_enabled: self.view.download_enabled(),
            downloading: self.downloading,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current_result(&self) -> Option<&M::Output> {
        self.cache.get()
    }
}

/// Performs the service call for `submission` and times it.
pub async fn dispatch<M: GenerationMode>(
    service: &dyn GenerationService,
    submission: Submission<M::Request>,
) -> Completion<M::Output> {
    let outcome = M::execute(service, &submission.request).await;

    Completion {
        token: submission.token,
        outcome,
        elapsed: submission.started_at.elapsed(),
    }
}

/// Fetches the bytes described by `plan` and hands them to `sink`.
pub async fn fetch_download(
    service: &dyn GenerationService,
    sink: &dyn DownloadSink,
    plan: &DownloadPlan,
) -> Result<PathBuf, DownloadError> {
    let bytes = service.fetch_bytes(&plan.source).await?;
    sink.save(&plan.file_name, &bytes).await
}
