//! Host FFI Bindings for Web View Integration
//!
//! The app implements `PortalHostFFI` (payment status checks, closing,
//! opening the GPay app) and `WebSurfaceFFI` (its `WKWebView` and modal
//! container) in Swift/Kotlin. `GPayPortalFFI` wraps them in
//! `PortalHostBridge` / `WebSurfaceBridge`, which provide the `gpay_lib`
//! traits.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │               Mobile App (Swift/Kotlin)              │
//! │   PortalHostFFI impl        WebSurfaceFFI impl       │
//! │   (merchant callbacks)      (WKWebView + modal)      │
//! └──────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ (UniFFI callback)
//! ┌──────────────────────────────────────────────────────┐
//! │                   Rust FFI Layer                     │
//! │   PortalHostBridge          WebSurfaceBridge         │
//! │   (gpay_lib::PortalHost)    (gpay_lib::WebSurface)   │
//! └──────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌──────────────────────────────────────────────────────┐
//! │                gpay_lib::GPayPortal                  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Example (Swift)
//!
//! ```swift
//! class CheckoutHost: PortalHostFfi {
//!     func onCheckPayment(portal: PortalContextFfi) {
//!         api.checkStatus(requestId: portal.request.requestId)
//!     }
//!     func onViewClosed(portal: PortalContextFfi) { checkout.resume() }
//!     func openExternalUrl(portal: PortalContextFfi, url: String) {
//!         if let url = URL(string: url) { UIApplication.shared.open(url) }
//!     }
//!     func onError(portal: PortalContextFfi, error: PortalErrorFfi) {
//!         log.warning("gpay \(error.code): \(error.message)")
//!     }
//! }
//! ```

use std::sync::Arc;

use gpay_lib::{GPayError, PortalContext, Url};

use crate::{GPayMobileError, PortalContextFFI, PortalErrorFFI};

// ============================================================================
// Callback Interfaces
// ============================================================================

/// Merchant-side callbacks for a payment portal.
///
/// # Thread Safety
///
/// Methods are called on the thread that drove the portal, normally the
/// main thread. The portal holds no lock while calling, so implementations
/// may call back into the portal (e.g. `close()` from `on_check_payment`).
#[uniffi::export(callback_interface)]
pub trait PortalHostFFI: Send + Sync {
    /// The page confirmed a payment, or the app returned to the foreground.
    /// Query your backend for the payment status.
    fn on_check_payment(&self, portal: PortalContextFFI);

    /// The portal was closed. Called exactly once per portal.
    fn on_view_closed(&self, portal: PortalContextFFI);

    /// Open `url` outside the web view (the `lggpay://` deep link).
    fn open_external_url(&self, portal: PortalContextFFI, url: String);

    /// A navigation failure or rejected bridge message.
    fn on_error(&self, portal: PortalContextFFI, error: PortalErrorFFI);
}

/// The web view and its container.
#[uniffi::export(callback_interface)]
pub trait WebSurfaceFFI: Send + Sync {
    /// Add a script message handler named `name`
    /// (`WKUserContentController.add(_:name:)`).
    ///
    /// # Errors
    ///
    /// Return `GPayMobileError::Surface` if the handler cannot be added;
    /// the portal then stays unpresented.
    fn register_script_channel(&self, name: String) -> Result<(), GPayMobileError>;

    /// Remove the handler added by `register_script_channel`.
    fn unregister_script_channel(&self, name: String);

    /// Load `url` in the web view.
    fn load_url(&self, url: String);

    /// Show or hide the activity indicator.
    fn set_busy(&self, busy: bool);

    /// Replace the web view with a text label.
    fn show_placeholder(&self, text: String);

    /// Dismiss the modal container.
    fn dismiss(&self);
}

// ============================================================================
// Bridges
// ============================================================================

/// Bridge from FFI callback to the `gpay_lib::PortalHost` trait.
pub struct PortalHostBridge {
    ffi: Arc<dyn PortalHostFFI>,
}

impl PortalHostBridge {
    /// Create a new bridge wrapping an FFI host.
    pub fn new(ffi: Arc<dyn PortalHostFFI>) -> Self {
        Self { ffi }
    }
}

impl std::fmt::Debug for PortalHostBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalHostBridge")
            .field("ffi", &"<PortalHostFFI>")
            .finish()
    }
}

impl gpay_lib::PortalHost for PortalHostBridge {
    fn on_check_payment(&self, portal: &PortalContext) {
        self.ffi.on_check_payment(portal.into());
    }

    fn on_view_closed(&self, portal: &PortalContext) {
        self.ffi.on_view_closed(portal.into());
    }

    fn open_external_url(&self, portal: &PortalContext, url: &Url) {
        self.ffi.open_external_url(portal.into(), url.to_string());
    }

    fn on_error(&self, portal: &PortalContext, error: &GPayError) {
        self.ffi.on_error(portal.into(), error.into());
    }
}

/// Bridge from FFI callback to the `gpay_lib::WebSurface` trait.
pub struct WebSurfaceBridge {
    ffi: Arc<dyn WebSurfaceFFI>,
}

impl WebSurfaceBridge {
    /// Create a new bridge wrapping an FFI surface.
    pub fn new(ffi: Arc<dyn WebSurfaceFFI>) -> Self {
        Self { ffi }
    }
}

impl std::fmt::Debug for WebSurfaceBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSurfaceBridge")
            .field("ffi", &"<WebSurfaceFFI>")
            .finish()
    }
}

impl gpay_lib::WebSurface for WebSurfaceBridge {
    fn register_script_channel(&self, name: &str) -> gpay_lib::Result<()> {
        self.ffi
            .register_script_channel(name.to_string())
            .map_err(|e| GPayError::Surface(e.to_string()))
    }

    fn unregister_script_channel(&self, name: &str) {
        self.ffi.unregister_script_channel(name.to_string());
    }

    fn load_url(&self, url: &Url) {
        self.ffi.load_url(url.to_string());
    }

    fn set_busy(&self, busy: bool) {
        self.ffi.set_busy(busy);
    }

    fn show_placeholder(&self, text: &str) {
        self.ffi.show_placeholder(text.to_string());
    }

    fn dismiss(&self) {
        self.ffi.dismiss();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpay_lib::test_utils::sample_request;
    use gpay_lib::{PortalHost, SdkEnvironment, WebSurface};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockHost {
        errors: Mutex<Vec<PortalErrorFFI>>,
        opened: Mutex<Vec<String>>,
    }

    impl PortalHostFFI for MockHost {
        fn on_check_payment(&self, _portal: PortalContextFFI) {}
        fn on_view_closed(&self, _portal: PortalContextFFI) {}
        fn open_external_url(&self, _portal: PortalContextFFI, url: String) {
            self.opened.lock().unwrap().push(url);
        }
        fn on_error(&self, _portal: PortalContextFFI, error: PortalErrorFFI) {
            self.errors.lock().unwrap().push(error);
        }
    }

    struct RejectingSurface;

    impl WebSurfaceFFI for RejectingSurface {
        fn register_script_channel(&self, _name: String) -> Result<(), GPayMobileError> {
            Err(GPayMobileError::Surface {
                msg: "handler exists".into(),
            })
        }
        fn unregister_script_channel(&self, _name: String) {}
        fn load_url(&self, _url: String) {}
        fn set_busy(&self, _busy: bool) {}
        fn show_placeholder(&self, _text: String) {}
        fn dismiss(&self) {}
    }

    fn context() -> PortalContext {
        PortalContext {
            request: sample_request(),
            environment: SdkEnvironment::Production,
            portal_url: None,
        }
    }

    #[test]
    fn test_host_bridge_forwards_url_and_error() {
        let ffi = Arc::new(MockHost::default());
        let bridge = PortalHostBridge::new(ffi.clone());
        let url = Url::parse("lggpay://pay-request?amount=1").unwrap();

        bridge.open_external_url(&context(), &url);
        bridge.on_error(&context(), &GPayError::UnknownChannel("other".into()));

        assert_eq!(
            *ffi.opened.lock().unwrap(),
            vec!["lggpay://pay-request?amount=1".to_string()]
        );
        let errors = ffi.errors.lock().unwrap();
        assert_eq!(errors[0].code, 3001);
    }

    #[test]
    fn test_surface_bridge_maps_registration_error() {
        let bridge = WebSurfaceBridge::new(Arc::new(RejectingSurface));
        let err = bridge.register_script_channel("iosListener").unwrap_err();
        assert!(matches!(err, GPayError::Surface(msg) if msg.contains("handler exists")));
    }

    #[test]
    fn test_bridge_debug() {
        let bridge = WebSurfaceBridge::new(Arc::new(RejectingSurface));
        assert!(format!("{bridge:?}").contains("<WebSurfaceFFI>"));
    }
}
