use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use baseline_config::Config;
use serde::Serialize;

/// Client configuration served at `/public/config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    pub log_level: String,
    pub baseline_build_timestamp: String,
}

impl From<&Config> for ClientSettings {
    fn from(config: &Config) -> Self {
        Self {
            log_level: config.client.log_level.clone(),
            baseline_build_timestamp: config.build.baseline_timestamp.clone(),
        }
    }
}

pub fn endpoint_router() -> Router<Arc<ClientSettings>> {
    Router::new().route("/public/config", get(client_settings))
}

async fn client_settings(State(settings): State<Arc<ClientSettings>>) -> Json<ClientSettings> {
    Json(ClientSettings::clone(&settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let settings = ClientSettings {
            log_level: "INFO".to_owned(),
            baseline_build_timestamp: "2025-11-20T08:15:00Z".to_owned(),
        };

        insta::assert_snapshot!(
            serde_json::to_string(&settings).unwrap(),
            @r#"{"logLevel":"INFO","baselineBuildTimestamp":"2025-11-20T08:15:00Z"}"#
        );
    }
}
