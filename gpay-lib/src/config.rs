//! Configuration types for the payment portal.

use serde::{Deserialize, Serialize};

/// Hosted payment page used during development.
pub const STAGING_URL: &str = "http://192.168.0.111:8080/banking/gpay_payment_page.jsp";

/// Hosted payment page used in production.
pub const PRODUCTION_URL: &str = "https://gpay.ly/banking/gpay_payment_page.jsp";

/// Platform tag sent to the payment page.
pub const DEFAULT_PLATFORM: &str = "ios";

/// Script-message channel the payment page posts to.
pub const DEFAULT_CHANNEL_NAME: &str = "iosListener";

/// URL scheme registered by the companion GPay app.
pub const DEFAULT_DEEP_LINK_SCHEME: &str = "lggpay";

/// Host component of the companion app's payment deep link.
pub const DEFAULT_DEEP_LINK_HOST: &str = "pay-request";

/// Deployment the payment page is served from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdkEnvironment {
    /// Local staging server.
    Staging,
    /// Public production server.
    #[default]
    Production,
}

impl SdkEnvironment {
    /// Get the environment name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }

    /// Base endpoint of the hosted payment page.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Staging => STAGING_URL,
            Self::Production => PRODUCTION_URL,
        }
    }
}

impl std::fmt::Display for SdkEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SdkEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// Target of the companion app deep link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLinkConfig {
    /// Custom URL scheme (e.g., `lggpay`).
    #[serde(default = "default_deep_link_scheme")]
    pub scheme: String,

    /// Host component (e.g., `pay-request`).
    #[serde(default = "default_deep_link_host")]
    pub host: String,
}

fn default_deep_link_scheme() -> String {
    DEFAULT_DEEP_LINK_SCHEME.to_string()
}

fn default_deep_link_host() -> String {
    DEFAULT_DEEP_LINK_HOST.to_string()
}

impl Default for DeepLinkConfig {
    fn default() -> Self {
        Self {
            scheme: default_deep_link_scheme(),
            host: default_deep_link_host(),
        }
    }
}

/// Configuration for a payment portal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Deployment the payment page is loaded from.
    #[serde(default)]
    pub environment: SdkEnvironment,

    /// Replaces the environment's endpoint when set.
    #[serde(default)]
    pub base_url_override: Option<String>,

    /// The host app's own registered URL scheme, sent as `app_name`.
    #[serde(default)]
    pub app_scheme: Option<String>,

    /// Platform tag sent as `platform`.
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Name of the script-message channel.
    #[serde(default = "default_channel_name")]
    pub channel_name: String,

    /// Companion app deep link target.
    #[serde(default)]
    pub deep_link: DeepLinkConfig,

    /// Deliver navigation and bridge failures to `PortalHost::on_error`.
    #[serde(default = "default_report_errors")]
    pub report_errors: bool,
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

fn default_channel_name() -> String {
    DEFAULT_CHANNEL_NAME.to_string()
}

fn default_report_errors() -> bool {
    true
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self::new(SdkEnvironment::default())
    }
}

impl PortalConfig {
    /// Create a new portal configuration for an environment.
    pub fn new(environment: SdkEnvironment) -> Self {
        Self {
            environment,
            base_url_override: None,
            app_scheme: None,
            platform: default_platform(),
            channel_name: default_channel_name(),
            deep_link: DeepLinkConfig::default(),
            report_errors: default_report_errors(),
        }
    }

    /// Create config for the staging server.
    pub fn staging() -> Self {
        Self::new(SdkEnvironment::Staging)
    }

    /// Create config for the production server.
    pub fn production() -> Self {
        Self::new(SdkEnvironment::Production)
    }

    /// Set the host app's URL scheme.
    pub fn with_app_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.app_scheme = Some(scheme.into());
        self
    }

    /// Load the page from a custom endpoint instead of the environment's.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url_override = Some(url.into());
        self
    }

    /// Set the platform tag.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Set the script-message channel name.
    pub fn with_channel_name(mut self, name: impl Into<String>) -> Self {
        self.channel_name = name.into();
        self
    }

    /// Set the deep link target.
    pub fn with_deep_link(mut self, deep_link: DeepLinkConfig) -> Self {
        self.deep_link = deep_link;
        self
    }

    /// Enable or disable error reporting to the host.
    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    /// Endpoint the portal URL is composed from.
    pub fn base_url(&self) -> &str {
        self.base_url_override
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }

    /// Value sent as `app_name`; empty when the host registered no scheme.
    pub fn app_name(&self) -> &str {
        self.app_scheme.as_deref().unwrap_or("")
    }
}
