//! Url command - compose the payment page URL for a request

use anyhow::Result;
use gpay_lib::{portal_url, PaymentRequest, PortalConfig, SdkEnvironment, Url};

use crate::ui;

/// Inputs of the `url` command.
#[derive(Clone, Debug)]
pub struct UrlArgs {
    pub environment: SdkEnvironment,
    pub amount: f64,
    pub requester: String,
    pub request_id: String,
    pub request_time: String,
    pub app_scheme: Option<String>,
    pub base_url: Option<String>,
}

impl UrlArgs {
    fn config(&self) -> PortalConfig {
        let mut config = PortalConfig::new(self.environment);
        if let Some(scheme) = &self.app_scheme {
            config = config.with_app_scheme(scheme.clone());
        }
        if let Some(base) = &self.base_url {
            config = config.with_base_url(base.clone());
        }
        config
    }

    fn request(&self) -> PaymentRequest {
        PaymentRequest::new(
            self.amount,
            self.requester.clone(),
            self.request_id.clone(),
            self.request_time.clone(),
        )
    }
}

/// Compose the URL the portal would load.
pub fn compose(args: &UrlArgs) -> gpay_lib::Result<Url> {
    portal_url(&args.config(), &args.request())
}

pub fn run(args: &UrlArgs, verbose: bool) -> Result<()> {
    tracing::debug!(?args, "composing portal URL");

    match compose(args) {
        Ok(url) => {
            if verbose {
                ui::header("Payment Page");
                ui::key_value("Environment", args.environment.as_str());
                for (key, value) in url.query_pairs() {
                    ui::key_value(&key, &value);
                }
                println!();
            }
            println!("{url}");
            Ok(())
        }
        Err(err) => {
            ui::error(&format!("{} (code {})", err, err.code() as i32));
            ui::info("The portal would show \"Invalid URL\" instead of the payment page");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> UrlArgs {
        UrlArgs {
            environment: SdkEnvironment::Production,
            amount: 100.0,
            requester: "u1".into(),
            request_id: "r1".into(),
            request_time: "t1".into(),
            app_scheme: Some("myshop".into()),
            base_url: None,
        }
    }

    #[test]
    fn test_compose_production() {
        let url = compose(&args()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://gpay.ly/banking/gpay_payment_page.jsp?amount=100.0&requester_username=u1&request_id=r1&request_time=t1&app_name=myshop&platform=ios"
        );
    }

    #[test]
    fn test_compose_base_override() {
        let mut args = args();
        args.environment = SdkEnvironment::Staging;
        args.base_url = Some("https://pay.example.com/page".into());
        let url = compose(&args).unwrap();
        assert!(url.as_str().starts_with("https://pay.example.com/page?amount="));
    }

    #[test]
    fn test_compose_invalid_base() {
        let mut args = args();
        args.base_url = Some("not a url".into());
        assert!(matches!(
            compose(&args),
            Err(gpay_lib::GPayError::InvalidUrl { .. })
        ));
        assert!(run(&args, false).is_err());
    }
}
