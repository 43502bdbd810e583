use regex::Regex;
use lazy_static::lazy_static;
use sha2::{Sha256, Digest};
use base64::{Engine as _, engine::general_purpose};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
    static ref BEARER_REGEX: Regex = Regex::new(r"(?i)\bbearer\s+[A-Za-z0-9\-._~+/]+=*").unwrap();
    static ref FORM_SECRET_REGEX: Regex =
        Regex::new(r"(?i)\b(client_secret|password|access_token|refresh_token|code)=([^&\s]+)").unwrap();
    static ref JSON_SECRET_REGEX: Regex =
        Regex::new(r#"(?i)"(client_secret|password|access_token|refresh_token|apikey)"\s*:\s*"[^"]*""#).unwrap();
}

/// Redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_bearer_tokens: bool,
    pub redact_secret_fields: bool,
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_bearer_tokens: true,
            redact_secret_fields: true,
            hash_for_correlation: true,
            custom_patterns: Vec::new(),
        }
    }
}

impl RedactionConfig {
    pub fn with_custom_pattern(mut self, pattern: Regex, replacement: impl Into<String>) -> Self {
        self.custom_patterns.push((pattern, replacement.into()));
        self
    }
}

/// Redactor for log messages.
///
/// Derived account emails embed the LINE user id and derived passwords embed
/// part of the channel secret, so both must be masked before they are written.
#[derive(Debug, Clone, Default)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        // Secret fields go first: a password value may itself look like an email
        if self.config.redact_secret_fields {
            result = self.redact_secret_fields(&result);
        }

        if self.config.redact_bearer_tokens {
            result = BEARER_REGEX.replace_all(&result, "Bearer [REDACTED]").to_string();
        }

        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).to_string();
        }

        result
    }

    fn redact_secret_fields(&self, text: &str) -> String {
        let form = FORM_SECRET_REGEX.replace_all(text, "$1=[REDACTED]");
        JSON_SECRET_REGEX
            .replace_all(&form, r#""$1":"[REDACTED]""#)
            .to_string()
    }

    fn redact_emails(&self, text: &str) -> String {
        EMAIL_REGEX.replace_all(text, |caps: &regex::Captures| {
            let email = &caps[0];
            if self.config.hash_for_correlation {
                format!("EMAIL[{}]", self.hash_value(email))
            } else {
                match email.split_once('@') {
                    Some((local, domain)) => {
                        let local_head: String = local.chars().take(1).collect();
                        let domain_head: String = domain.chars().take(1).collect();
                        format!("{}***@{}***", local_head, domain_head)
                    }
                    None => "***@***".to_string(),
                }
            }
        }).to_string()
    }

    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        general_purpose::STANDARD.encode(&result[..8]) // Use first 8 bytes for shorter hash
    }
}
