//! GPay Mobile FFI Bindings
//!
//! This crate provides UniFFI bindings for the GPay payment portal, enabling
//! integration with iOS (Swift) and Android (Kotlin) applications.
//!
//! # Architecture
//!
//! The FFI layer wraps `gpay-lib`:
//! - URL composition and bridge decoding as free functions
//! - `GPayPortalFFI`, one displayed payment page and its lifecycle
//! - Callback interfaces (`PortalHostFFI`, `WebSurfaceFFI`) implemented by
//!   the app around its web view
//!
//! # Example (Swift)
//!
//! ```swift
//! let portal = GPayPortalFfi(
//!     config: PortalConfigFfi(environment: .production, appScheme: "myshop",
//!                             baseUrlOverride: nil, platform: nil,
//!                             channelName: nil, reportErrors: true),
//!     request: PaymentRequestFfi(amount: 100, requesterUsername: "merchant",
//!                                requestId: "r1", requestTime: "2025-06-12T10:00:00Z"),
//!     host: MyPortalHost(),
//!     surface: MyWebSurface(webView: webView)
//! )
//! try portal.present()
//!
//! // WKNavigationDelegate
//! func webView(_ webView: WKWebView, didFinish navigation: WKNavigation!) {
//!     _ = try? portal.didFinishNavigation()
//! }
//!
//! // WKScriptMessageHandler
//! func userContentController(_ c: WKUserContentController, didReceive message: WKScriptMessage) {
//!     let json = try JSONSerialization.data(withJSONObject: message.body)
//!     _ = try? portal.didReceiveScriptMessage(channel: message.name,
//!                                             bodyJson: String(decoding: json, as: UTF8.self))
//! }
//! ```
//!
//! # Thread Safety
//!
//! All exposed types are thread-safe. Callbacks are invoked on the thread that
//! called into the portal, which for web view delegates is the main thread.

pub mod host_ffi;
#[cfg(feature = "logging")]
pub mod logging;

pub use host_ffi::{PortalHostBridge, PortalHostFFI, WebSurfaceBridge, WebSurfaceFFI};

use std::sync::Arc;

use gpay_lib::{GPayError, NavigationEvent};

// UniFFI scaffolding
uniffi::setup_scaffolding!();

// ============================================================================
// Error Types
// ============================================================================

/// Mobile-friendly error type.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum GPayMobileError {
    /// URL could not be parsed or built.
    #[error("Invalid URL: {msg}")]
    InvalidUrl { msg: String },

    /// Payment page failed to load.
    #[error("Navigation failed: {msg}")]
    NavigationFailed { msg: String },

    /// Bridge message was rejected.
    #[error("Bridge error: {msg}")]
    Bridge { msg: String },

    /// Operation not allowed in the portal's current phase.
    #[error("Invalid state: {msg}")]
    InvalidState { msg: String },

    /// Web surface failed an operation.
    #[error("Surface error: {msg}")]
    Surface { msg: String },

    /// Serialization/deserialization error.
    #[error("Serialization error: {msg}")]
    Serialization { msg: String },

    /// Internal error (unexpected state).
    #[error("Internal error: {msg}")]
    Internal { msg: String },
}

impl From<GPayError> for GPayMobileError {
    fn from(e: GPayError) -> Self {
        let msg = e.to_string();
        match e {
            GPayError::InvalidUrl { .. } => Self::InvalidUrl { msg },
            GPayError::NavigationFailed { .. } => Self::NavigationFailed { msg },
            GPayError::MalformedBridgeMessage { .. }
            | GPayError::UnknownChannel(_)
            | GPayError::UnsupportedEvent(_) => Self::Bridge { msg },
            GPayError::AlreadyPresented | GPayError::PortalClosed => Self::InvalidState { msg },
            GPayError::Surface(_) => Self::Surface { msg },
            GPayError::Serialization(_) => Self::Serialization { msg },
            GPayError::Internal(_) => Self::Internal { msg },
        }
    }
}

impl From<uniffi::UnexpectedUniFFICallbackError> for GPayMobileError {
    fn from(e: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::Internal { msg: e.reason }
    }
}

pub type Result<T> = std::result::Result<T, GPayMobileError>;

// ============================================================================
// Core Types (FFI-safe wrappers)
// ============================================================================

/// Deployment the payment page is served from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum SdkEnvironmentFFI {
    Staging,
    Production,
}

impl From<SdkEnvironmentFFI> for gpay_lib::SdkEnvironment {
    fn from(env: SdkEnvironmentFFI) -> Self {
        match env {
            SdkEnvironmentFFI::Staging => Self::Staging,
            SdkEnvironmentFFI::Production => Self::Production,
        }
    }
}

impl From<gpay_lib::SdkEnvironment> for SdkEnvironmentFFI {
    fn from(env: gpay_lib::SdkEnvironment) -> Self {
        match env {
            gpay_lib::SdkEnvironment::Staging => Self::Staging,
            gpay_lib::SdkEnvironment::Production => Self::Production,
        }
    }
}

/// Payment request shown in the portal.
#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct PaymentRequestFFI {
    pub amount: f64,
    pub requester_username: String,
    pub request_id: String,
    pub request_time: String,
}

impl From<PaymentRequestFFI> for gpay_lib::PaymentRequest {
    fn from(r: PaymentRequestFFI) -> Self {
        gpay_lib::PaymentRequest::new(r.amount, r.requester_username, r.request_id, r.request_time)
    }
}

impl From<gpay_lib::PaymentRequest> for PaymentRequestFFI {
    fn from(r: gpay_lib::PaymentRequest) -> Self {
        Self {
            amount: r.amount,
            requester_username: r.requester_username,
            request_id: r.request_id,
            request_time: r.request_time,
        }
    }
}

/// Portal configuration. `None` fields use the SDK defaults.
#[derive(Clone, Debug, uniffi::Record)]
pub struct PortalConfigFFI {
    pub environment: SdkEnvironmentFFI,
    /// The app's own URL scheme (first `CFBundleURLSchemes` entry on iOS).
    pub app_scheme: Option<String>,
    pub base_url_override: Option<String>,
    pub platform: Option<String>,
    pub channel_name: Option<String>,
    pub report_errors: bool,
}

impl From<PortalConfigFFI> for gpay_lib::PortalConfig {
    fn from(c: PortalConfigFFI) -> Self {
        let mut config =
            gpay_lib::PortalConfig::new(c.environment.into()).with_error_reporting(c.report_errors);
        if let Some(scheme) = c.app_scheme {
            config = config.with_app_scheme(scheme);
        }
        if let Some(url) = c.base_url_override {
            config = config.with_base_url(url);
        }
        if let Some(platform) = c.platform {
            config = config.with_platform(platform);
        }
        if let Some(name) = c.channel_name {
            config = config.with_channel_name(name);
        }
        config
    }
}

/// Snapshot of the portal handed to host callbacks.
#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct PortalContextFFI {
    pub request: PaymentRequestFFI,
    pub environment: SdkEnvironmentFFI,
    pub portal_url: Option<String>,
}

impl From<&gpay_lib::PortalContext> for PortalContextFFI {
    fn from(c: &gpay_lib::PortalContext) -> Self {
        Self {
            request: c.request.clone().into(),
            environment: c.environment.into(),
            portal_url: c.portal_url.clone(),
        }
    }
}

/// Loading state of the payment page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum NavigationStateFFI {
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl From<gpay_lib::NavigationState> for NavigationStateFFI {
    fn from(s: gpay_lib::NavigationState) -> Self {
        match s {
            gpay_lib::NavigationState::Idle => Self::Idle,
            gpay_lib::NavigationState::Loading => Self::Loading,
            gpay_lib::NavigationState::Loaded => Self::Loaded,
            gpay_lib::NavigationState::Failed => Self::Failed,
        }
    }
}

/// Payload of a `makePayment` bridge event.
#[derive(Clone, Debug, PartialEq, Eq, uniffi::Record)]
pub struct MakePaymentFFI {
    pub amount: String,
    pub request_id: String,
    pub request_time: String,
    pub requester_username: String,
    pub app_name: String,
}

impl From<gpay_lib::MakePayment> for MakePaymentFFI {
    fn from(p: gpay_lib::MakePayment) -> Self {
        Self {
            amount: p.amount,
            request_id: p.request_id,
            request_time: p.request_time,
            requester_username: p.requester_username,
            app_name: p.app_name,
        }
    }
}

impl From<MakePaymentFFI> for gpay_lib::MakePayment {
    fn from(p: MakePaymentFFI) -> Self {
        Self {
            amount: p.amount,
            request_id: p.request_id,
            request_time: p.request_time,
            requester_username: p.requester_username,
            app_name: p.app_name,
        }
    }
}

/// A decoded bridge event.
#[derive(Clone, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum BridgeEventFFI {
    ConfirmPayment,
    MakePayment { payment: MakePaymentFFI },
}

impl From<gpay_lib::BridgeEvent> for BridgeEventFFI {
    fn from(e: gpay_lib::BridgeEvent) -> Self {
        match e {
            gpay_lib::BridgeEvent::ConfirmPayment => Self::ConfirmPayment,
            gpay_lib::BridgeEvent::MakePayment(payment) => Self::MakePayment {
                payment: payment.into(),
            },
        }
    }
}

/// A failure reported to `PortalHostFFI::on_error`.
#[derive(Clone, Debug, PartialEq, Eq, uniffi::Record)]
pub struct PortalErrorFFI {
    /// Stable numeric code (see `GPayErrorCode`).
    pub code: i32,
    pub message: String,
}

impl From<&GPayError> for PortalErrorFFI {
    fn from(e: &GPayError) -> Self {
        Self {
            code: e.code() as i32,
            message: e.message(),
        }
    }
}

// ============================================================================
// Portal
// ============================================================================

/// One displayed payment page.
///
/// Forward web view delegate callbacks and script messages to this object;
/// it calls back into `PortalHostFFI` and drives `WebSurfaceFFI`.
#[derive(uniffi::Object)]
pub struct GPayPortalFFI {
    portal: gpay_lib::GPayPortal,
}

#[uniffi::export]
impl GPayPortalFFI {
    /// Create a portal. Nothing is shown until `present()`.
    #[uniffi::constructor]
    pub fn new(
        config: PortalConfigFFI,
        request: PaymentRequestFFI,
        host: Box<dyn PortalHostFFI>,
        surface: Box<dyn WebSurfaceFFI>,
    ) -> Arc<Self> {
        tracing::debug!(request_id = %request.request_id, "creating portal");
        let host = PortalHostBridge::new(Arc::from(host));
        let surface = WebSurfaceBridge::new(Arc::from(surface));
        Arc::new(Self {
            portal: gpay_lib::GPayPortal::new(
                config.into(),
                request.into(),
                Arc::new(host),
                Arc::new(surface),
            ),
        })
    }

    /// Register the script channel and load the payment page.
    ///
    /// On an invalid base URL the surface shows "Invalid URL" and this
    /// returns `InvalidUrl`.
    pub fn present(&self) -> Result<()> {
        Ok(self.portal.present()?)
    }

    /// Reload the payment page if the web view shows another URL.
    pub fn refresh(&self) -> Result<bool> {
        Ok(self.portal.refresh()?)
    }

    /// `webView(_:didStartProvisionalNavigation:)`
    pub fn did_start_provisional_navigation(&self) -> Result<NavigationStateFFI> {
        self.navigate(NavigationEvent::Started)
    }

    /// `webView(_:didCommit:)` with the web view's current URL.
    pub fn did_commit_navigation(&self, url: String) -> Result<NavigationStateFFI> {
        let url = gpay_lib::Url::parse(&url).map_err(|e| GPayError::invalid_url(&url, e))?;
        self.navigate(NavigationEvent::Committed(url))
    }

    /// `webView(_:didFinish:)`
    pub fn did_finish_navigation(&self) -> Result<NavigationStateFFI> {
        self.navigate(NavigationEvent::Finished)
    }

    /// `webView(_:didFail:withError:)` and
    /// `webView(_:didFailProvisionalNavigation:withError:)`
    pub fn did_fail_navigation(&self, error: String) -> Result<NavigationStateFFI> {
        self.navigate(NavigationEvent::Failed(error))
    }

    /// A script message from the page; `body_json` is the message body
    /// serialized as JSON.
    pub fn did_receive_script_message(
        &self,
        channel: String,
        body_json: String,
    ) -> Result<BridgeEventFFI> {
        Ok(self
            .portal
            .handle_script_message_json(&channel, &body_json)?
            .into())
    }

    /// The app is about to enter the foreground.
    pub fn will_enter_foreground(&self) -> bool {
        self.portal.will_enter_foreground()
    }

    /// The user pressed the close control.
    pub fn close(&self) -> bool {
        self.portal.close()
    }

    /// The portal was dismissed by the system or the app.
    pub fn dismissed_externally(&self) -> bool {
        self.portal.dismissed_externally()
    }

    /// Current navigation state.
    pub fn navigation_state(&self) -> NavigationStateFFI {
        self.portal.navigation_state().into()
    }

    /// Whether the busy indicator is shown.
    pub fn is_loading(&self) -> bool {
        self.portal.is_loading()
    }

    /// The composed payment page URL, `None` when the base URL is invalid.
    pub fn portal_url(&self) -> Option<String> {
        self.portal.context().portal_url.clone()
    }

    /// Context passed to host callbacks.
    pub fn context(&self) -> PortalContextFFI {
        self.portal.context().into()
    }

    /// Context serialized as JSON, for analytics or crash reports.
    pub fn context_json(&self) -> Result<String> {
        serde_json::to_string(self.portal.context())
            .map_err(|e| GPayError::from(e).into())
    }
}

impl GPayPortalFFI {
    fn navigate(&self, event: NavigationEvent) -> Result<NavigationStateFFI> {
        Ok(self.portal.handle_navigation(event)?.into())
    }
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Compose the payment page URL without creating a portal.
#[uniffi::export]
pub fn compose_portal_url(config: PortalConfigFFI, request: PaymentRequestFFI) -> Result<String> {
    let config: gpay_lib::PortalConfig = config.into();
    let request: gpay_lib::PaymentRequest = request.into();
    Ok(gpay_lib::portal_url(&config, &request)?.to_string())
}

/// Decode a bridge message body received on `channel`.
#[uniffi::export]
pub fn decode_bridge_message(
    expected_channel: String,
    channel: String,
    body_json: String,
) -> Result<BridgeEventFFI> {
    Ok(gpay_lib::decode_bridge_json(&expected_channel, &channel, &body_json)?.into())
}

/// Build the companion app deep link for a `makePayment` payload.
#[uniffi::export]
pub fn build_deep_link(payment: MakePaymentFFI) -> Result<String> {
    let payment: gpay_lib::MakePayment = payment.into();
    Ok(gpay_lib::build_deep_link(&payment, &gpay_lib::DeepLinkConfig::default())?.to_string())
}

/// Render an amount the way the payment page expects it.
#[uniffi::export]
pub fn format_amount(amount: f64) -> String {
    gpay_lib::format_amount(amount)
}

/// Get the library version.
#[uniffi::export]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
