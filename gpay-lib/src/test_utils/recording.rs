//! Recording host and surface implementations.

use std::sync::Mutex;

use url::Url;

use crate::host::{PortalContext, PortalHost, WebSurface};
use crate::{GPayError, Result};

/// A call received by [`RecordingHost`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostCall {
    /// `on_check_payment`
    CheckPayment,
    /// `on_view_closed`
    ViewClosed,
    /// `open_external_url` with the URL
    OpenExternal(String),
    /// `on_error` with the error
    Error(GPayError),
}

/// [`PortalHost`] that records every callback.
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls in order.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of `on_check_payment` calls.
    pub fn check_payment_count(&self) -> usize {
        self.count(|c| matches!(c, HostCall::CheckPayment))
    }

    /// Number of `on_view_closed` calls.
    pub fn view_closed_count(&self) -> usize {
        self.count(|c| matches!(c, HostCall::ViewClosed))
    }

    /// URLs passed to `open_external_url`.
    pub fn opened_urls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                HostCall::OpenExternal(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    /// Errors passed to `on_error`.
    pub fn errors(&self) -> Vec<GPayError> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                HostCall::Error(err) => Some(err),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(*c)).count()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

impl PortalHost for RecordingHost {
    fn on_check_payment(&self, _portal: &PortalContext) {
        self.record(HostCall::CheckPayment);
    }

    fn on_view_closed(&self, _portal: &PortalContext) {
        self.record(HostCall::ViewClosed);
    }

    fn open_external_url(&self, _portal: &PortalContext, url: &Url) {
        self.record(HostCall::OpenExternal(url.to_string()));
    }

    fn on_error(&self, _portal: &PortalContext, error: &GPayError) {
        self.record(HostCall::Error(error.clone()));
    }
}

/// A call received by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceCall {
    /// `register_script_channel`
    RegisterChannel(String),
    /// `unregister_script_channel`
    UnregisterChannel(String),
    /// `load_url`
    Load(String),
    /// `set_busy`
    Busy(bool),
    /// `show_placeholder`
    Placeholder(String),
    /// `dismiss`
    Dismiss,
}

/// [`WebSurface`] that records every call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
    fail_registration: bool,
}

impl RecordingSurface {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose channel registration always fails.
    pub fn failing_registration() -> Self {
        Self {
            calls: Mutex::default(),
            fail_registration: true,
        }
    }

    /// All calls in order.
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// URLs passed to `load_url`.
    pub fn loads(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SurfaceCall::Load(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    /// Channels passed to `register_script_channel`.
    pub fn registered_channels(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SurfaceCall::RegisterChannel(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    /// Values passed to `set_busy`.
    pub fn busy_updates(&self) -> Vec<bool> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SurfaceCall::Busy(busy) => Some(busy),
                _ => None,
            })
            .collect()
    }

    /// Number of `dismiss` calls.
    pub fn dismiss_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Dismiss))
            .count()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

impl WebSurface for RecordingSurface {
    fn register_script_channel(&self, name: &str) -> Result<()> {
        if self.fail_registration {
            return Err(GPayError::Surface(format!("cannot register {name}")));
        }
        self.record(SurfaceCall::RegisterChannel(name.to_string()));
        Ok(())
    }

    fn unregister_script_channel(&self, name: &str) {
        self.record(SurfaceCall::UnregisterChannel(name.to_string()));
    }

    fn load_url(&self, url: &Url) {
        self.record(SurfaceCall::Load(url.to_string()));
    }

    fn set_busy(&self, busy: bool) {
        self.record(SurfaceCall::Busy(busy));
    }

    fn show_placeholder(&self, text: &str) {
        self.record(SurfaceCall::Placeholder(text.to_string()));
    }

    fn dismiss(&self) {
        self.record(SurfaceCall::Dismiss);
    }
}
