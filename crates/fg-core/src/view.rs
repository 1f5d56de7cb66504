use std::time::{SystemTime, UNIX_EPOCH};
use chrono::{DateTime, Local, NaiveDateTime};

/// Base panel of a generation page. Exactly one is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Empty,
    Loading,
    Result,
}

/// What the user sees, with the error overlay folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiPhase {
    Empty,
    Loading,
    Result,
    ErrorShown,
}

/// Panel plus optional error overlay.
///
/// The overlay sits on `Empty` or `Result`, never on `Loading`; every
/// transition goes through the methods below so that holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    panel: Panel,
    error: Option<String>,
}

impl ViewState {
    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> UiPhase {
        match (self.panel, &self.error) {
            (Panel::Loading, _) => UiPhase::Loading,
            (_, Some(_)) => UiPhase::ErrorShown,
            (Panel::Empty, None) => UiPhase::Empty,
            (Panel::Result, None) => UiPhase::Result,
        }
    }

    pub fn begin_loading(&mut self) {
        self.panel = Panel::Loading;
        self.error = None;
    }

    pub fn show_result(&mut self) {
        self.panel = Panel::Result;
        self.error = None;
    }

    /// Overlays `message` on whichever base is still valid.
    pub fn show_error(&mut self, message: String, has_result: bool) {
        self.panel = if has_result { Panel::Result } else { Panel::Empty };
        self.error = Some(message);
    }

    pub fn download_enabled(&self) -> bool {
        self.panel == Panel::Result
    }
}

/// Hands out strictly increasing `t` stamps for display URLs.
#[derive(Debug, Clone, Default)]
pub struct CacheBuster {
    last: u128,
}

impl CacheBuster {
    pub fn next_stamp(&mut self) -> u128 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        self.last = now.max(self.last + 1);
        self.last
    }

    pub fn bust(&mut self, url: &str) -> String {
        let stamp = self.next_stamp();
        with_stamp(url, stamp)
    }
}

pub fn with_stamp(url: &str, stamp: u128) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", url, separator, stamp)
}

/// Local wall-clock time of a service timestamp, or the raw string if it
/// is in neither RFC 3339 nor naive ISO form.
pub fn format_time_of_day(timestamp: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return parsed.with_timezone(&Local).format("%H:%M:%S").to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%H:%M:%S").to_string();
    }
    timestamp.to_string()
}

pub fn format_seconds(elapsed: std::time::Duration) -> String {
    format!("{:.1}", elapsed.as_secs_f64())
}
