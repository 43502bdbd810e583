// Logger configuration
use serde::{Deserialize, Serialize};

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Colored, human oriented lines for local development
    Pretty,
    /// One JSON object per event for log shippers
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub format: LogFormat,
    pub verbose: bool,
    pub redaction_enabled: bool,
    /// Crates whose events are enabled when `RUST_LOG` is not set
    pub crate_targets: Vec<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            verbose: false,
            redaction_enabled: true,
            crate_targets: vec![
                "line_auth_server".to_string(),
                "auth_oauth".to_string(),
                "auth_identity".to_string(),
            ],
        }
    }
}

impl LoggerConfig {
    /// Pick the output format from the deployment environment name.
    ///
    /// Anything other than `development` logs JSON.
    pub fn for_environment(environment: &str, verbose: bool) -> Self {
        let format = if environment.eq_ignore_ascii_case("development") {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        };

        Self {
            format,
            verbose,
            ..Self::default()
        }
    }

    /// Filter directive used when `RUST_LOG` is absent
    pub fn default_directive(&self) -> String {
        let level = if self.verbose { "debug" } else { "info" };
        let mut directives: Vec<String> = self
            .crate_targets
            .iter()
            .map(|target| format!("{}={}", target, level))
            .collect();
        directives.push("tower_http=info".to_string());
        directives.push("hyper=warn".to_string());
        directives.push("reqwest=info".to_string());
        directives.join(",")
    }
}
