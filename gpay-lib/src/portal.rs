//! The payment portal: one displayed payment page and its lifecycle.
//!
//! # Lifecycle
//!
//! ```text
//! Created ──present──▶ Presented ──close / dismissed_externally──▶ Closed
//!    └──────────────close / dismissed_externally─────────────────────┘
//! ```
//!
//! While presented, the host forwards web view notifications
//! ([`GPayPortal::handle_navigation`]), script messages
//! ([`GPayPortal::handle_script_message`]) and app foreground transitions
//! ([`GPayPortal::will_enter_foreground`]). After close every input is
//! rejected with [`GPayError::PortalClosed`].
//!
//! # Example
//!
//! ```ignore
//! let portal = GPayPortal::new(
//!     PortalConfig::production().with_app_scheme("myshop"),
//!     PaymentRequest::new(100.0, "merchant", "r1", "2025-06-12T10:00:00Z"),
//!     host,
//!     surface,
//! );
//! portal.present()?;
//! portal.handle_navigation(NavigationEvent::Started)?;
//! portal.handle_script_message_json("iosListener", r#"{"event":"confirmPayment"}"#)?;
//! portal.close();
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use url::Url;

use crate::bridge::{decode_bridge_json, decode_bridge_message, BridgeEvent};
use crate::composer::portal_url;
use crate::config::PortalConfig;
use crate::host::{PortalContext, PortalHost, WebSurface};
use crate::navigation::{NavigationEvent, NavigationState, NavigationTracker};
use crate::request::PaymentRequest;
use crate::{GPayError, Result};

/// Text shown instead of the web view when the portal URL is invalid.
pub const INVALID_URL_TEXT: &str = "Invalid URL";

/// Where a portal is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortalPhase {
    /// Constructed, not yet on screen.
    Created,
    /// On screen.
    Presented,
    /// Dismissed; accepts no further input.
    Closed,
}

#[derive(Debug)]
struct PortalInner {
    phase: PortalPhase,
    channel_registered: bool,
    navigation: NavigationTracker,
}

/// A payment portal bound to one payment request.
pub struct GPayPortal {
    config: PortalConfig,
    context: PortalContext,
    url: std::result::Result<Url, GPayError>,
    host: Arc<dyn PortalHost>,
    surface: Arc<dyn WebSurface>,
    inner: Mutex<PortalInner>,
}

impl std::fmt::Debug for GPayPortal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GPayPortal")
            .field("config", &self.config)
            .field("context", &self.context)
            .field("host", &"<PortalHost>")
            .field("surface", &"<WebSurface>")
            .finish()
    }
}

impl GPayPortal {
    /// Create a portal. Nothing is shown until [`present`](Self::present).
    ///
    /// An unparsable base URL does not fail here; `present` shows the
    /// invalid-URL placeholder instead of loading.
    pub fn new(
        config: PortalConfig,
        request: PaymentRequest,
        host: Arc<dyn PortalHost>,
        surface: Arc<dyn WebSurface>,
    ) -> Self {
        let url = portal_url(&config, &request);
        let context = PortalContext {
            request,
            environment: config.environment,
            portal_url: url.as_ref().ok().map(Url::to_string),
        };

        Self {
            config,
            context,
            url,
            host,
            surface,
            inner: Mutex::new(PortalInner {
                phase: PortalPhase::Created,
                channel_registered: false,
                navigation: NavigationTracker::new(),
            }),
        }
    }

    /// Portal configuration.
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Context handed to host callbacks.
    pub fn context(&self) -> &PortalContext {
        &self.context
    }

    /// The payment request.
    pub fn request(&self) -> &PaymentRequest {
        &self.context.request
    }

    /// The composed payment page URL.
    pub fn portal_url(&self) -> Result<&Url> {
        self.url.as_ref().map_err(Clone::clone)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PortalPhase {
        self.lock().phase
    }

    /// Current navigation state.
    pub fn navigation_state(&self) -> NavigationState {
        self.lock().navigation.state()
    }

    /// Whether the busy indicator is shown.
    pub fn is_loading(&self) -> bool {
        self.navigation_state().is_busy()
    }

    /// Put the portal on screen: register the script channel and load the
    /// payment page.
    ///
    /// # Errors
    ///
    /// - [`GPayError::InvalidUrl`] after showing the placeholder text
    /// - [`GPayError::AlreadyPresented`] / [`GPayError::PortalClosed`] on
    ///   repeated calls
    /// - any error from [`WebSurface::register_script_channel`]
    /// - [`GPayError::PortalClosed`] if the portal is closed while the
    ///   channel is being registered; nothing is loaded then
    pub fn present(&self) -> Result<()> {
        {
            let mut inner = self.lock();
            match inner.phase {
                PortalPhase::Presented => return Err(GPayError::AlreadyPresented),
                PortalPhase::Closed => return Err(GPayError::PortalClosed),
                PortalPhase::Created => inner.phase = PortalPhase::Presented,
            }
        }

        let url = match &self.url {
            Ok(url) => url.clone(),
            Err(err) => {
                tracing::warn!(base_url = %self.config.base_url(), error = %err, "portal URL is invalid");
                self.surface.show_placeholder(INVALID_URL_TEXT);
                return Err(err.clone());
            }
        };

        if let Err(err) = self.surface.register_script_channel(&self.config.channel_name) {
            tracing::warn!(channel = %self.config.channel_name, error = %err, "script channel registration failed");
            let mut inner = self.lock();
            if inner.phase == PortalPhase::Presented {
                inner.phase = PortalPhase::Created;
            }
            return Err(err);
        }

        // The surface may have closed the portal while registering.
        let issued = {
            let mut inner = self.lock();
            if inner.phase == PortalPhase::Presented {
                inner.channel_registered = true;
                Some(inner.navigation.request_load(&url))
            } else {
                None
            }
        };
        let Some(issued) = issued else {
            tracing::debug!("portal closed during presentation");
            self.surface
                .unregister_script_channel(&self.config.channel_name);
            return Err(GPayError::PortalClosed);
        };

        tracing::info!(
            environment = %self.config.environment,
            request_id = %self.context.request.request_id,
            "presenting payment portal"
        );
        if issued {
            self.issue_load(&url);
        }
        Ok(())
    }

    /// Reload the payment page if the surface shows something else.
    ///
    /// Returns `true` when a load was issued.
    pub fn refresh(&self) -> Result<bool> {
        self.ensure_presented()?;
        let url = self.portal_url()?.clone();
        Ok(self.load(&url))
    }

    /// Forward a navigation notification from the web view.
    pub fn handle_navigation(&self, event: NavigationEvent) -> Result<NavigationState> {
        let (was_busy, state, current_url) = {
            let mut inner = self.lock();
            match inner.phase {
                PortalPhase::Presented => {}
                PortalPhase::Closed => {
                    tracing::debug!(?event, "ignoring navigation on closed portal");
                    return Err(GPayError::PortalClosed);
                }
                PortalPhase::Created => {
                    tracing::debug!(?event, "ignoring navigation before present");
                    return Err(not_presented());
                }
            }
            let was_busy = inner.navigation.state().is_busy();
            let state = inner.navigation.apply(&event);
            let current_url = inner.navigation.current_url().map(Url::to_string);
            (was_busy, state, current_url)
        };

        tracing::debug!(?event, ?state, "navigation");
        if was_busy != state.is_busy() {
            self.surface.set_busy(state.is_busy());
        }

        if let NavigationEvent::Failed(reason) = event {
            let err = GPayError::NavigationFailed {
                url: current_url,
                reason,
            };
            tracing::warn!(error = %err, "payment page failed to load");
            self.report(&err);
        }

        Ok(state)
    }

    /// Handle a script message from the page.
    ///
    /// `confirmPayment` calls [`PortalHost::on_check_payment`]; `makePayment`
    /// builds the companion app deep link and calls
    /// [`PortalHost::open_external_url`]. Rejected messages trigger no
    /// callback other than [`PortalHost::on_error`].
    pub fn handle_script_message(&self, channel: &str, body: &Value) -> Result<BridgeEvent> {
        self.ensure_presented()?;
        let event = decode_bridge_message(&self.config.channel_name, channel, body)
            .map_err(|err| self.reject(err))?;
        self.dispatch(&event)?;
        Ok(event)
    }

    /// Handle a script message whose body arrives as JSON text.
    pub fn handle_script_message_json(&self, channel: &str, body_json: &str) -> Result<BridgeEvent> {
        self.ensure_presented()?;
        let event = decode_bridge_json(&self.config.channel_name, channel, body_json)
            .map_err(|err| self.reject(err))?;
        self.dispatch(&event)?;
        Ok(event)
    }

    /// The app returned to the foreground (e.g. back from the GPay app).
    ///
    /// Calls [`PortalHost::on_check_payment`] while presented and returns
    /// whether it did.
    pub fn will_enter_foreground(&self) -> bool {
        if self.phase() != PortalPhase::Presented {
            return false;
        }
        tracing::debug!("app entered foreground, checking payment");
        self.host.on_check_payment(&self.context);
        true
    }

    /// The user pressed the close control.
    ///
    /// Dismisses the surface and calls [`PortalHost::on_view_closed`].
    /// Returns `false` if the portal was already closed.
    ///
    /// A portal closed before [`present`](Self::present) still reports
    /// `on_view_closed` once, so every portal handed to the host ends with
    /// exactly one close notification. The surface is not dismissed then.
    pub fn close(&self) -> bool {
        self.teardown(true)
    }

    /// The surface was dismissed by something other than the close control.
    ///
    /// Calls [`PortalHost::on_view_closed`] without dismissing the surface
    /// again. Returns `false` if the portal was already closed.
    pub fn dismissed_externally(&self) -> bool {
        self.teardown(false)
    }

    fn teardown(&self, dismiss_surface: bool) -> bool {
        let (previous, channel_registered) = {
            let mut inner = self.lock();
            let previous = std::mem::replace(&mut inner.phase, PortalPhase::Closed);
            (previous, std::mem::take(&mut inner.channel_registered))
        };

        if previous == PortalPhase::Closed {
            tracing::debug!("portal already closed");
            return false;
        }

        if channel_registered {
            self.surface
                .unregister_script_channel(&self.config.channel_name);
        }
        if dismiss_surface && previous == PortalPhase::Presented {
            self.surface.dismiss();
        }

        tracing::info!(request_id = %self.context.request.request_id, "payment portal closed");
        self.host.on_view_closed(&self.context);
        true
    }

    fn load(&self, url: &Url) -> bool {
        let issued = self.lock().navigation.request_load(url);
        if issued {
            self.issue_load(url);
        } else {
            tracing::debug!(%url, "payment page already current");
        }
        issued
    }

    fn issue_load(&self, url: &Url) {
        tracing::debug!(%url, "loading payment page");
        self.surface.load_url(url);
        self.surface.set_busy(true);
    }

    fn dispatch(&self, event: &BridgeEvent) -> Result<()> {
        match event {
            BridgeEvent::ConfirmPayment => {
                tracing::debug!("page confirmed payment, checking status");
                self.host.on_check_payment(&self.context);
            }
            BridgeEvent::MakePayment(payment) => {
                let link = payment
                    .deep_link(&self.config.deep_link)
                    .map_err(|err| self.reject(err))?;
                tracing::info!(
                    request_id = %payment.request_id,
                    "handing payment to companion app"
                );
                self.host.open_external_url(&self.context, &link);
            }
        }
        Ok(())
    }

    fn ensure_presented(&self) -> Result<()> {
        match self.phase() {
            PortalPhase::Presented => Ok(()),
            PortalPhase::Closed => Err(GPayError::PortalClosed),
            PortalPhase::Created => Err(not_presented()),
        }
    }

    fn reject(&self, err: GPayError) -> GPayError {
        tracing::warn!(error = %err, "dropping bridge message");
        self.report(&err);
        err
    }

    fn report(&self, err: &GPayError) {
        if self.config.report_errors {
            self.host.on_error(&self.context, err);
        }
    }

    fn lock(&self) -> MutexGuard<'_, PortalInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn not_presented() -> GPayError {
    GPayError::Internal("portal is not presented".into())
}

impl Drop for GPayPortal {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(|e| e.into_inner());
        if std::mem::take(&mut inner.channel_registered) {
            self.surface
                .unregister_script_channel(&self.config.channel_name);
        }
    }
}
