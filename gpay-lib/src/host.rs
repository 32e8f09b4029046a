//! Host capabilities injected into a portal.
//!
//! The portal never reaches for window, scene or application globals. The
//! integrating app supplies two capabilities:
//!
//! - [`PortalHost`]: app-level callbacks (payment status, close, external
//!   app launch, error reports)
//! - [`WebSurface`]: the embedded web view and its modal container

use serde::Serialize;
use url::Url;

use crate::config::SdkEnvironment;
use crate::request::PaymentRequest;
use crate::{GPayError, Result};

/// Snapshot of the portal handed to host callbacks.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PortalContext {
    /// Request being paid.
    pub request: PaymentRequest,
    /// Environment the page is served from.
    pub environment: SdkEnvironment,
    /// Composed payment page URL, `None` when the base URL was invalid.
    pub portal_url: Option<String>,
}

/// App-level callbacks.
///
/// Called on whichever thread drives the portal (normally the main thread).
/// The portal holds no lock while calling out, so implementations may call
/// back into the portal.
pub trait PortalHost: Send + Sync {
    /// The page or an app-switch asks the host to re-check the payment status.
    fn on_check_payment(&self, portal: &PortalContext);

    /// The portal was dismissed. Called exactly once per portal.
    fn on_view_closed(&self, portal: &PortalContext);

    /// Open a deep link in the companion app. Fire-and-forget.
    fn open_external_url(&self, portal: &PortalContext, url: &Url);

    /// A failure the user does not see (failed load, bad bridge message).
    fn on_error(&self, _portal: &PortalContext, _error: &GPayError) {}
}

/// The embedded web view and its container.
pub trait WebSurface: Send + Sync {
    /// Register the script-message channel the page posts to.
    fn register_script_channel(&self, name: &str) -> Result<()>;

    /// Remove a previously registered channel.
    fn unregister_script_channel(&self, name: &str);

    /// Start loading `url`.
    fn load_url(&self, url: &Url);

    /// Show or hide the busy overlay.
    fn set_busy(&self, busy: bool);

    /// Replace the web view with a text placeholder.
    fn show_placeholder(&self, text: &str);

    /// Dismiss the modal container.
    fn dismiss(&self);
}
