//! Navigation state of the embedded web surface.
//!
//! ```text
//! Idle ──load──▶ Loading ──finish──▶ Loaded
//!                   │
//!                   └────fail──────▶ Failed
//! ```
//!
//! A load re-enters `Loading` only when the requested URL differs from the
//! surface's current URL. There is no retry and no timeout.

use serde::{Deserialize, Serialize};
use url::Url;

/// Loading state of the hosted page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A navigation is in flight.
    Loading,
    /// The last navigation finished.
    Loaded,
    /// The last navigation failed.
    Failed,
}

impl NavigationState {
    /// Whether the busy indicator should be shown.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Navigation notifications forwarded from the rendering engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Provisional navigation started.
    Started,
    /// The surface committed to a URL (possibly one the page navigated to).
    Committed(Url),
    /// Navigation finished successfully.
    Finished,
    /// Navigation or provisional navigation failed.
    Failed(String),
}

/// Tracks navigation state and the URL currently shown.
#[derive(Clone, Debug, Default)]
pub struct NavigationTracker {
    state: NavigationState,
    current_url: Option<Url>,
}

impl NavigationTracker {
    /// Create a tracker in the `Idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// URL the surface currently shows or is loading.
    pub fn current_url(&self) -> Option<&Url> {
        self.current_url.as_ref()
    }

    /// Request a load of `url`.
    ///
    /// Returns `true` when the surface must load it, `false` when it is
    /// already the current URL.
    pub fn request_load(&mut self, url: &Url) -> bool {
        if self.current_url.as_ref() == Some(url) {
            return false;
        }
        self.current_url = Some(url.clone());
        self.state = NavigationState::Loading;
        true
    }

    /// Apply a navigation event and return the new state.
    pub fn apply(&mut self, event: &NavigationEvent) -> NavigationState {
        match event {
            NavigationEvent::Started => self.state = NavigationState::Loading,
            NavigationEvent::Committed(url) => self.current_url = Some(url.clone()),
            NavigationEvent::Finished => self.state = NavigationState::Loaded,
            NavigationEvent::Failed(_) => self.state = NavigationState::Failed,
        }
        self.state
    }
}
