//! Output records for derived link keys
//!
//! The CLI prints one report per install code, either as plain text or as a
//! single-line JSON object.

use serde::{Deserialize, Serialize};

use crate::error::{InstallCodeError, LinkKeyError};
use crate::install_code::{InstallCode, LinkKey};

/// Outcome of deriving one link key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Canonical code on success, the input text on failure
    pub install_code: String,
    /// Lowercase hex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl KeyReport {
    pub fn derived(label: Option<String>, code: &InstallCode, key: &LinkKey) -> Self {
        Self {
            label,
            install_code: code.to_string(),
            link_key: Some(hex::encode(key)),
            error: None,
        }
    }

    pub fn failed(label: Option<String>, raw: &str, error: &InstallCodeError) -> Self {
        Self {
            label,
            install_code: raw.to_string(),
            link_key: None,
            error: Some(error.to_string()),
        }
    }

    /// Build a report by parsing `raw` and deriving its key
    pub fn from_raw(label: Option<String>, raw: &str) -> Self {
        match InstallCode::parse(raw) {
            Ok(code) => Self::derived(label, &code, &code.link_key()),
            Err(e) => Self::failed(label, raw, &e),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Plain text line: `[label ]key` or `[label ]error: message`
    pub fn to_text(&self) -> String {
        let body = match (&self.link_key, &self.error) {
            (Some(key), _) => key.clone(),
            (None, Some(error)) => format!("error: {}", error),
            (None, None) => String::new(),
        };
        match &self.label {
            Some(label) => format!("{} {}", label, body),
            None => body,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Reports for a whole code list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub reports: Vec<KeyReport>,
    pub failed: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn succeeded(&self) -> usize {
        self.total() - self.failed
    }

    /// `Err(LinkKeyError::Batch)` if any entry failed
    pub fn status(&self) -> Result<(), LinkKeyError> {
        if self.failed > 0 {
            return Err(LinkKeyError::Batch {
                failed: self.failed,
                total: self.total(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_report() {
        let report = KeyReport::from_raw(None, "83fe-d340-7a93-9723-a5c6-39b2-6916-d505-c3b5");
        assert!(report.is_ok());
        assert_eq!(report.install_code, "83FED3407A939723A5C639B26916D505C3B5");
        assert_eq!(report.to_text(), "66b6900981e1ee3ca4206b6b861c02bb");
    }

    #[test]
    fn test_failed_report() {
        let report = KeyReport::from_raw(Some("porch".to_string()), "0011223344AA32BD");
        assert!(!report.is_ok());
        assert_eq!(report.install_code, "0011223344AA32BD");
        assert_eq!(
            report.to_text(),
            "porch error: CRC error on installation code: given = 32BD, calc = 32BC"
        );
    }

    #[test]
    fn test_batch_status() {
        let mut batch = BatchReport {
            reports: vec![
                KeyReport::from_raw(None, "0011223344AA32BC"),
                KeyReport::from_raw(None, "0011223344AA32BD"),
            ],
            failed: 1,
        };
        assert_eq!(batch.succeeded(), 1);

        let err = batch.status().unwrap_err();
        assert!(matches!(err, LinkKeyError::Batch { failed: 1, total: 2 }));
        assert_eq!(err.exit_code(), 2);

        batch.reports.pop();
        batch.failed = 0;
        assert!(batch.status().is_ok());
    }

    #[test]
    fn test_json_skips_empty_fields() {
        let report = KeyReport::from_raw(None, "0011223344AA32BC");
        let json = report.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"install_code":"0011223344AA32BC","link_key":"9758aafde967683d251516938a717f8d"}"#
        );

        let parsed: KeyReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
