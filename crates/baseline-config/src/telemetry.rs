pub mod exporters;
pub mod tracing;

use std::collections::HashMap;

use serde::Deserialize;

use self::{exporters::ExporterConfig, tracing::TracingConfig};

/// Telemetry configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Service name for telemetry metadata
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Additional resource attributes
    #[serde(default)]
    pub resource_attributes: HashMap<String, String>,
    /// Default trace exporter
    #[serde(default)]
    pub exporter: Option<ExporterConfig>,
    /// Tracing-specific configuration
    #[serde(default)]
    pub tracing: Option<TracingConfig>,
}

fn default_service_name() -> String {
    "baseline".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exporter_with_defaults() {
        let config: TelemetryConfig = toml::from_str(
            r#"
            [exporter]
            endpoint = "http://localhost:4317"
        "#,
        )
        .unwrap();

        insta::assert_debug_snapshot!(config, @r#"
        TelemetryConfig {
            service_name: "baseline",
            resource_attributes: {},
            exporter: Some(
                ExporterConfig {
                    endpoint: Url {
                        scheme: "http",
                        cannot_be_a_base: false,
                        username: "",
                        password: None,
                        host: Some(
                            Domain(
                                "localhost",
                            ),
                        ),
                        port: Some(
                            4317,
                        ),
                        path: "/",
                        query: None,
                        fragment: None,
                    },
                    protocol: Grpc,
                },
            ),
            tracing: None,
        }
        "#);
    }

    #[test]
    fn tracing_overrides() {
        let config: TelemetryConfig = toml::from_str(
            r#"
            service_name = "demo"

            [tracing]
            sampling_rate = 0.25
            parent_based = false

            [tracing.exporter]
            endpoint = "http://collector:4318"
            protocol = "http_proto"
        "#,
        )
        .unwrap();

        let tracing = config.tracing.unwrap();
        assert_eq!(config.service_name, "demo");
        assert!((tracing.sampling_rate - 0.25).abs() < f64::EPSILON);
        assert!(!tracing.parent_based);
        assert!(matches!(
            tracing.exporter.map(|e| e.protocol),
            Some(exporters::ExportProtocol::HttpProto)
        ));
    }
}
