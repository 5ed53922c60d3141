//! Platform configuration, loaded from TOML.

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Top-level configuration for the facrev platform.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FacrevConfig {
    /// Path to the SQLite database. `None` = in-memory (tests/dev).
    pub database_path: Option<String>,
    /// Root directory for the filesystem blob store.
    pub blob_root: Option<String>,
    pub accounts: AccountsConfig,
    pub features: FeaturesConfig,
}

/// Registration and sign-in policy.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AccountsConfig {
    /// Required email suffix for student registration.
    /// Default: "@vitstudent.ac.in".
    pub student_email_domain: Option<String>,
    /// Emails granted the admin role at registration.
    #[serde(default)]
    pub admin_allowlist: Vec<String>,
    /// Minimum password length. Default: 6.
    pub min_password_len: Option<usize>,
}

impl AccountsConfig {
    pub fn effective_student_email_domain(&self) -> &str {
        self.student_email_domain
            .as_deref()
            .unwrap_or("@vitstudent.ac.in")
    }

    pub fn effective_min_password_len(&self) -> usize {
        self.min_password_len.unwrap_or(6)
    }

    /// Allowlist match is case-insensitive, like the rest of email handling.
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_allowlist
            .iter()
            .any(|a| a.eq_ignore_ascii_case(email))
    }
}

/// Initial values for the site feature toggles on first boot. Live values
/// come from the settings singleton in the store afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Default: true.
    pub chat_enabled: Option<bool>,
    /// Default: true.
    pub about_page_enabled: Option<bool>,
}

impl FeaturesConfig {
    pub fn effective_chat_enabled(&self) -> bool {
        self.chat_enabled.unwrap_or(true)
    }

    pub fn effective_about_page_enabled(&self) -> bool {
        self.about_page_enabled.unwrap_or(true)
    }
}

impl FacrevConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ValidationError> {
        toml::from_str(s).map_err(|e| ValidationError::new("config", e.to_string()))
    }

    /// Load from a TOML file on disk.
    pub fn load(path: &std::path::Path) -> Result<Self, ValidationError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::new("config", e.to_string()))?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = FacrevConfig::from_toml_str("").unwrap();
        assert_eq!(
            cfg.accounts.effective_student_email_domain(),
            "@vitstudent.ac.in"
        );
        assert_eq!(cfg.accounts.effective_min_password_len(), 6);
        assert!(cfg.features.effective_chat_enabled());
        assert!(cfg.accounts.admin_allowlist.is_empty());
    }

    #[test]
    fn allowlist_match_is_case_insensitive() {
        let cfg = FacrevConfig::from_toml_str(
            r#"
            [accounts]
            admin_allowlist = ["dean@staff.example.edu"]
            student_email_domain = "@students.example.edu"
            "#,
        )
        .unwrap();
        assert!(cfg.accounts.is_admin_email("Dean@Staff.Example.edu"));
        assert!(!cfg.accounts.is_admin_email("other@staff.example.edu"));
        assert_eq!(
            cfg.accounts.effective_student_email_domain(),
            "@students.example.edu"
        );
    }

    #[test]
    fn malformed_toml_is_a_validation_error() {
        let err = FacrevConfig::from_toml_str("accounts = 3").unwrap_err();
        assert_eq!(err.field, "config");
    }
}
