use std::path::Path;
use std::str::FromStr;

use crate::{AnyOrList, CLIENT_LOG_LEVELS, Config};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        raw.parse()
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if reserved prefixes are malformed, CORS allows
    /// credentials together with a wildcard, the client log
    /// level is unknown, or the build timestamp is not an RFC 3339 UTC instant
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_spa_config()?;
        self.validate_cors_config()?;
        self.validate_client_config()?;
        self.validate_build_config()?;
        Ok(())
    }

    fn validate_spa_config(&self) -> anyhow::Result<()> {
        for prefix in &self.server.spa.reserved_prefixes {
            if prefix.len() < 2 || !prefix.starts_with('/') || !prefix.ends_with('/') {
                anyhow::bail!("reserved prefix '{prefix}' must start and end with '/' and name a path segment");
            }
        }

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_cors_config(&self) -> anyhow::Result<()> {
        let Some(ref cors) = self.server.cors else {
            return Ok(());
        };

        if cors.credentials {
            for (field, value) in [("origins", &cors.origins), ("methods", &cors.methods), ("headers", &cors.headers)] {
                if *value == AnyOrList::Any {
                    anyhow::bail!("server.cors.{field} must be an explicit list when credentials are allowed");
                }
            }
        }

        Ok(())
    }

    fn validate_client_config(&self) -> anyhow::Result<()> {
        let level = &self.client.log_level;

        if !CLIENT_LOG_LEVELS.contains(&level.as_str()) {
            anyhow::bail!(
                "client.log_level '{level}' must be one of {}",
                CLIENT_LOG_LEVELS.join(", ")
            );
        }

        Ok(())
    }

    fn validate_build_config(&self) -> anyhow::Result<()> {
        let timestamp = &self.build.baseline_timestamp;

        jiff::Timestamp::from_str(timestamp)
            .map_err(|e| anyhow::anyhow!("build.baseline_timestamp '{timestamp}' is not an RFC 3339 timestamp: {e}"))?;

        if !timestamp.ends_with('Z') {
            anyhow::bail!("build.baseline_timestamp '{timestamp}' must be in UTC (end with 'Z')");
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::Config;

    const MINIMAL: &str = r#"
        [client]
        log_level = "INFO"

        [build]
        baseline_timestamp = "2025-11-20T08:15:00Z"
    "#;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: Config = MINIMAL.parse().unwrap();

        assert!(config.server.listen_address.is_none());
        assert!(config.server.health.enabled);
        assert_eq!(config.server.health.path, "/q/health");
        assert!(config.server.spa.enabled);
        assert!(config.server.cors.is_none());
        assert!(config.server.csrf.is_none());
        assert!(config.telemetry.is_none());
        assert_eq!(config.client.log_level, "INFO");
    }

    #[test]
    fn missing_client_section_fails() {
        let err = r#"
            [build]
            baseline_timestamp = "2025-11-20T08:15:00Z"
        "#
        .parse::<Config>()
        .unwrap_err();

        assert!(err.to_string().contains("client"), "{err}");
    }

    #[test]
    fn missing_build_section_fails() {
        let err = r#"
            [client]
            log_level = "INFO"
        "#
        .parse::<Config>()
        .unwrap_err();

        assert!(err.to_string().contains("build"), "{err}");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let raw = format!("{MINIMAL}\n[server.spa]\nfallback = \"index.html\"\n");
        let err = raw.parse::<Config>().unwrap_err();
        assert!(err.to_string().contains("unknown field"), "{err}");
    }

    #[test]
    fn malformed_prefix_is_rejected() {
        let raw = format!("{MINIMAL}\n[server.spa]\nreserved_prefixes = [\"/api\"]\n");
        let err = raw.parse::<Config>().unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"reserved prefix '/api' must start and end with '/' and name a path segment");
    }

    #[test]
    fn root_prefix_is_rejected() {
        let raw = format!("{MINIMAL}\n[server.spa]\nreserved_prefixes = [\"/\"]\n");
        assert!(raw.parse::<Config>().is_err());
    }

    #[test]
    fn cors_credentials_require_explicit_lists() {
        let raw = format!("{MINIMAL}\n[server.cors]\ncredentials = true\norigins = [\"https://app.example.com\"]\n");
        let err = raw.parse::<Config>().unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"server.cors.methods must be an explicit list when credentials are allowed");

        let raw = format!(
            "{MINIMAL}\n[server.cors]\ncredentials = true\norigins = [\"https://app.example.com\"]\nmethods = [\"GET\"]\nheaders = [\"content-type\"]\n"
        );
        assert!(raw.parse::<Config>().unwrap().server.cors.unwrap().credentials);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let raw = MINIMAL.replace("\"INFO\"", "\"VERBOSE\"");
        let err = raw.parse::<Config>().unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"client.log_level 'VERBOSE' must be one of TRACE, DEBUG, INFO, WARN, ERROR");
    }

    #[test]
    fn non_utc_timestamp_is_rejected() {
        let raw = MINIMAL.replace("2025-11-20T08:15:00Z", "2025-11-20T08:15:00+01:00");
        let err = raw.parse::<Config>().unwrap_err();
        assert!(err.to_string().contains("must be in UTC"), "{err}");
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        let raw = MINIMAL.replace("2025-11-20T08:15:00Z", "yesterday");
        let err = raw.parse::<Config>().unwrap_err();
        assert!(err.to_string().contains("not an RFC 3339 timestamp"), "{err}");
    }

    #[test]
    fn env_placeholders_are_expanded() {
        let raw = MINIMAL.replace("\"INFO\"", "\"{{ env.BASELINE_TEST_LOG_LEVEL | default(\"INFO\") }}\"");

        temp_env::with_var("BASELINE_TEST_LOG_LEVEL", Some("DEBUG"), || {
            let config: Config = raw.parse().unwrap();
            assert_eq!(config.client.log_level, "DEBUG");
        });
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.build.baseline_timestamp, "2025-11-20T08:15:00Z");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(std::path::Path::new("/nonexistent/baseline.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"), "{err}");
    }
}
