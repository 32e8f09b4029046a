//! Property-based tests for URL composition and deep links.

use std::collections::HashMap;

use gpay_lib::{
    build_deep_link, compose_portal_url, config::PRODUCTION_URL, format_amount, DeepLinkConfig,
    MakePayment, PaymentRequest, Url,
};
use proptest::prelude::*;

fn query_map(url: &Url) -> HashMap<String, String> {
    url.query_pairs().into_owned().collect()
}

proptest! {
    /// The composed URL carries exactly the six parameters with the inputs as values.
    #[test]
    fn test_composed_query_matches_inputs(
        amount in -1.0e9f64..1.0e9f64,
        requester in "\\PC{0,24}",
        request_id in "[A-Za-z0-9 _&=?#%+-]{0,24}",
        request_time in "\\PC{0,24}",
        app_name in "[a-z][a-z0-9.+-]{0,12}",
    ) {
        let request = PaymentRequest::new(amount, requester.clone(), request_id.clone(), request_time.clone());
        let url = compose_portal_url(PRODUCTION_URL, &request, &app_name, "ios").unwrap();
        let params = query_map(&url);

        prop_assert_eq!(params.len(), 6);
        prop_assert_eq!(&params["amount"], &format_amount(amount));
        prop_assert_eq!(&params["requester_username"], &requester);
        prop_assert_eq!(&params["request_id"], &request_id);
        prop_assert_eq!(&params["request_time"], &request_time);
        prop_assert_eq!(&params["app_name"], &app_name);
        prop_assert_eq!(&params["platform"], "ios");
    }

    /// The base endpoint's scheme, host and path survive composition.
    #[test]
    fn test_composition_keeps_endpoint(path in "[a-z]{1,8}(/[a-z]{1,8}){0,3}") {
        let base = format!("https://gpay.ly/{path}");
        let request = PaymentRequest::new(1.0, "u", "r", "t");
        let url = compose_portal_url(&base, &request, "", "ios").unwrap();

        prop_assert_eq!(url.scheme(), "https");
        prop_assert_eq!(url.host_str(), Some("gpay.ly"));
        prop_assert_eq!(url.path(), format!("/{path}"));
    }

    /// Deep link values decode back to the page-provided strings.
    #[test]
    fn test_deep_link_round_trips_values(
        amount in "[0-9]{1,6}(\\.[0-9]{1,2})?",
        request_id in "\\PC{1,16}",
        request_time in "\\PC{1,16}",
        requester in "\\PC{1,16}",
        app_name in "\\PC{0,16}",
    ) {
        let payment = MakePayment {
            amount: amount.clone(),
            request_id: request_id.clone(),
            request_time: request_time.clone(),
            requester_username: requester.clone(),
            app_name: app_name.clone(),
        };
        let link = build_deep_link(&payment, &DeepLinkConfig::default()).unwrap();
        let params = query_map(&link);

        prop_assert_eq!(link.scheme(), "lggpay");
        prop_assert_eq!(link.host_str(), Some("pay-request"));
        prop_assert_eq!(&params["amount"], &amount);
        prop_assert_eq!(&params["request_id"], &request_id);
        prop_assert_eq!(&params["request_time"], &request_time);
        prop_assert_eq!(&params["requester_username"], &requester);
        prop_assert_eq!(&params["app_name"], &app_name);
    }
}
