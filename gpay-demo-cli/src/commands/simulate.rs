//! Simulate command - replay a scripted portal session
//!
//! A script is a JSON document:
//!
//! ```json
//! {
//!   "config": { "environment": "staging", "app_scheme": "myshop" },
//!   "request": { "amount": 100, "requester_username": "u1",
//!                "request_id": "r1", "request_time": "t1" },
//!   "steps": [
//!     "present", "started", "finished",
//!     { "message": { "body": { "event": "confirmPayment" } } },
//!     "close"
//!   ]
//! }
//! ```
//!
//! Every host callback and surface call is printed and collected into a
//! transcript.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use gpay_lib::prelude::*;
use serde::Deserialize;
use serde_json::Value;

use crate::ui;

/// A scripted session.
#[derive(Clone, Debug, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: PortalConfig,
    pub request: PaymentRequest,
    pub steps: Vec<Step>,
}

/// One input to the portal, as the web view or app would deliver it.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Present,
    Started,
    Committed(String),
    Finished,
    Failed(String),
    Message {
        /// Defaults to the configured channel.
        #[serde(default)]
        channel: Option<String>,
        body: Value,
    },
    Foreground,
    Refresh,
    Close,
    Dismissed,
}

/// Shared, ordered record of every call made by the portal.
#[derive(Debug, Default)]
pub struct Transcript(Mutex<Vec<String>>);

impl Transcript {
    fn record(&self, source: &str, line: String) {
        ui::event(source, &line);
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(format!("{source}: {line}"));
    }

    /// Lines recorded so far.
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// `PortalHost` that prints every callback.
#[derive(Debug)]
pub struct ConsoleHost(Arc<Transcript>);

impl PortalHost for ConsoleHost {
    fn on_check_payment(&self, portal: &PortalContext) {
        self.0.record(
            "host",
            format!("on_check_payment {}", portal.request.request_id),
        );
    }

    fn on_view_closed(&self, portal: &PortalContext) {
        self.0
            .record("host", format!("on_view_closed {}", portal.request.request_id));
    }

    fn open_external_url(&self, _portal: &PortalContext, url: &Url) {
        self.0.record("host", format!("open_external_url {url}"));
    }

    fn on_error(&self, _portal: &PortalContext, error: &GPayError) {
        self.0
            .record("host", format!("on_error {} {}", error.code() as i32, error));
    }
}

/// `WebSurface` that prints every call.
#[derive(Debug)]
pub struct ConsoleSurface(Arc<Transcript>);

impl WebSurface for ConsoleSurface {
    fn register_script_channel(&self, name: &str) -> gpay_lib::Result<()> {
        self.0
            .record("surface", format!("register_script_channel {name}"));
        Ok(())
    }

    fn unregister_script_channel(&self, name: &str) {
        self.0
            .record("surface", format!("unregister_script_channel {name}"));
    }

    fn load_url(&self, url: &Url) {
        self.0.record("surface", format!("load_url {url}"));
    }

    fn set_busy(&self, busy: bool) {
        self.0.record("surface", format!("set_busy {busy}"));
    }

    fn show_placeholder(&self, text: &str) {
        self.0.record("surface", format!("show_placeholder {text}"));
    }

    fn dismiss(&self) {
        self.0.record("surface", "dismiss".to_string());
    }
}

/// Load a script from a JSON file.
pub fn load_script(path: &Path) -> Result<Script> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid script {}", path.display()))
}

/// Replay `script` against console implementations and return the transcript.
pub fn replay(script: Script) -> Vec<String> {
    let transcript = Arc::new(Transcript::default());
    let channel_name = script.config.channel_name.clone();
    let portal = GPayPortal::new(
        script.config,
        script.request,
        Arc::new(ConsoleHost(transcript.clone())),
        Arc::new(ConsoleSurface(transcript.clone())),
    );

    for (index, step) in script.steps.into_iter().enumerate() {
        ui::info(&format!("step {}: {}", index + 1, describe(&step)));
        match apply(&portal, step, &channel_name) {
            Ok(outcome) => tracing::debug!(step = index + 1, %outcome, "step applied"),
            Err(err) => ui::warning(&format!("{} (code {})", err, err.code() as i32)),
        }
    }

    drop(portal);
    transcript.lines()
}

fn apply(portal: &GPayPortal, step: Step, channel_name: &str) -> gpay_lib::Result<String> {
    Ok(match step {
        Step::Present => {
            portal.present()?;
            "presented".to_string()
        }
        Step::Started => format!("{:?}", portal.handle_navigation(NavigationEvent::Started)?),
        Step::Committed(url) => {
            let url = Url::parse(&url).map_err(|e| GPayError::invalid_url(&url, e))?;
            format!("{:?}", portal.handle_navigation(NavigationEvent::Committed(url))?)
        }
        Step::Finished => format!("{:?}", portal.handle_navigation(NavigationEvent::Finished)?),
        Step::Failed(reason) => {
            format!("{:?}", portal.handle_navigation(NavigationEvent::Failed(reason))?)
        }
        Step::Message { channel, body } => {
            let channel = channel.as_deref().unwrap_or(channel_name);
            portal.handle_script_message(channel, &body)?.name().to_string()
        }
        Step::Foreground => format!("checked: {}", portal.will_enter_foreground()),
        Step::Refresh => format!("reloaded: {}", portal.refresh()?),
        Step::Close => format!("closed: {}", portal.close()),
        Step::Dismissed => format!("closed: {}", portal.dismissed_externally()),
    })
}

fn describe(step: &Step) -> String {
    match step {
        Step::Committed(url) => format!("committed {url}"),
        Step::Failed(reason) => format!("failed ({reason})"),
        Step::Message { body, .. } => format!("message {body}"),
        other => format!("{other:?}").to_lowercase(),
    }
}

pub fn run(path: &Path) -> Result<()> {
    let script = load_script(path)?;

    ui::header("Simulated Session");
    ui::key_value("Environment", script.config.environment.as_str());
    ui::key_value("Request", &script.request.request_id);
    ui::key_value("Steps", &script.steps.len().to_string());
    ui::separator();

    let lines = replay(script);

    ui::separator();
    ui::success(&format!("Session replayed ({} calls)", lines.len()));
    Ok(())
}
