use std::time::{Duration, Instant};
use log::{error, info};

/// Delay before the slide-in starts.
pub const ENTER_DELAY: Duration = Duration::from_millis(10);
/// Length of both the slide-in and the slide-out.
pub const SLIDE: Duration = Duration::from_millis(300);
/// Time from creation until the slide-out starts.
pub const DISPLAY_FOR: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn icon(&self) -> &str {
        match self {
            Self::Success => "✅",
            Self::Error => "❌",
            Self::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastPhase {
    /// Sliding in; `0.0` is fully off screen, `1.0` fully shown.
    Entering(f32),
    Shown,
    /// Sliding out; `0.0` just started, `1.0` fully off screen.
    Leaving(f32),
    Expired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    created_at: Instant,
}

impl Toast {
    pub fn phase(&self, now: Instant) -> ToastPhase {
        let age = now.saturating_duration_since(self.created_at);

        if age >= DISPLAY_FOR + SLIDE {
            ToastPhase::Expired
        } else if age >= DISPLAY_FOR {
            ToastPhase::Leaving(fraction(age - DISPLAY_FOR, SLIDE))
        } else if age < ENTER_DELAY {
            ToastPhase::Entering(0.0)
        } else if age < ENTER_DELAY + SLIDE {
            ToastPhase::Entering(fraction(age - ENTER_DELAY, SLIDE))
        } else {
            ToastPhase::Shown
        }
    }

    /// How far off screen the toast sits, `0.0` to `1.0`.
    pub fn offset(&self, now: Instant) -> f32 {
        match self.phase(now) {
            ToastPhase::Entering(t) => 1.0 - t,
            ToastPhase::Shown => 0.0,
            ToastPhase::Leaving(t) => t,
            ToastPhase::Expired => 1.0,
        }
    }
}

fn fraction(elapsed: Duration, total: Duration) -> f32 {
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}

/// Transient user feedback. At most one toast is alive; a new one
/// replaces the current one instead of stacking.
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Toast>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.notify_at(message, kind, Instant::now());
    }

    pub fn notify_at(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) {
        let message = message.into();
        match kind {
            ToastKind::Error => error!("{}", message),
            _ => info!("{}", message),
        }

        self.current = Some(Toast {
            message,
            kind,
            created_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(message, ToastKind::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(message, ToastKind::Error);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notify(message, ToastKind::Info);
    }

    /// Drops the toast once its exit slide has finished.
    pub fn prune(&mut self, now: Instant) {
        if self
            .current
            .as_ref()
            .is_some_and(|t| t.phase(now) == ToastPhase::Expired)
        {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn visible_count(&self) -> usize {
        usize::from(self.current.is_some())
    }

    /// Whether a frame is needed to keep the toast animating.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.current
            .as_ref()
            .is_some_and(|t| !matches!(t.phase(now), ToastPhase::Shown))
    }

    /// When a resting toast next needs a frame: the start of its exit
    /// slide. `None` while animating or when there is no toast.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let toast = self.current.as_ref()?;
        match toast.phase(now) {
            ToastPhase::Shown => Some(toast.created_at + DISPLAY_FOR),
            _ => None,
        }
    }
}
