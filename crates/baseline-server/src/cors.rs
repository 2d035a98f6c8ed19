use baseline_config::{AnyOrList, CorsConfig};
use http::Method;
use http::header::HeaderName;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
///
/// Entries that do not parse as origins, methods or header names are skipped.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new()
        .allow_origin(match &config.origins {
            AnyOrList::Any => AllowOrigin::any(),
            AnyOrList::List(origins) => AllowOrigin::list(origins.iter().filter_map(|o| o.parse().ok())),
        })
        .allow_methods(match &config.methods {
            AnyOrList::Any => AllowMethods::any(),
            AnyOrList::List(methods) => AllowMethods::list(methods.iter().filter_map(|m| m.parse::<Method>().ok())),
        })
        .allow_headers(match &config.headers {
            AnyOrList::Any => AllowHeaders::any(),
            AnyOrList::List(headers) => {
                AllowHeaders::list(headers.iter().filter_map(|h| h.parse::<HeaderName>().ok()))
            }
        });

    if config.credentials {
        layer = layer.allow_credentials(true);
    }

    if let Some(max_age) = config.max_age_duration() {
        layer = layer.max_age(max_age);
    }

    layer
}
