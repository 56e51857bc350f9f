//! Code list file parser
//!
//! One installation code per line, optionally labelled:
//!
//! ```text
//! # front door sensor
//! front-door = 83FE D340 7A93 9723 A5C6 39B2 6916 D505 C3B5
//! 0011223344AA32BC
//! ```
//!
//! Codes are not validated here so a single bad entry doesn't hide the others.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{ConfigError, InstallCodeError};
use crate::install_code::{InstallCode, LinkKey};
use crate::report::{BatchReport, KeyReport};

/// Parsed code list
#[derive(Debug, Clone, Default)]
pub struct CodeList {
    pub entries: Vec<CodeEntry>,
}

/// A single code list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    /// 1-indexed source line
    pub line: usize,
    pub label: Option<String>,
    /// Raw code text, separators included
    pub code: String,
}

impl CodeEntry {
    /// Parse and verify this entry's installation code
    pub fn install_code(&self) -> Result<InstallCode, InstallCodeError> {
        InstallCode::parse(&self.code)
    }

    /// Derive this entry's link key
    pub fn link_key(&self) -> Result<LinkKey, InstallCodeError> {
        self.install_code().map(|code| code.link_key())
    }

    /// Label if present, otherwise `line N`
    pub fn name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("line {}", self.line),
        }
    }
}

impl CodeList {
    /// Parse a code list from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// Parse a code list from a string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut entries = Vec::new();
        let mut labels = HashSet::new();

        for (line_num, line) in content.lines().enumerate() {
            let line_num = line_num + 1; // 1-indexed
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (label, code) = match line.split_once('=') {
                Some((label, code)) => {
                    let label = label.trim();
                    if label.is_empty() {
                        return Err(ConfigError::ParseError {
                            line: line_num,
                            message: format!("Expected 'label = code', got: {}", line),
                        });
                    }
                    if !labels.insert(label.to_string()) {
                        return Err(ConfigError::ParseError {
                            line: line_num,
                            message: format!("Duplicate label: {}", label),
                        });
                    }
                    (Some(label.to_string()), code.trim())
                }
                None => (None, line),
            };

            if code.is_empty() {
                return Err(ConfigError::ParseError {
                    line: line_num,
                    message: "Missing install code".to_string(),
                });
            }

            entries.push(CodeEntry {
                line: line_num,
                label,
                code: code.to_string(),
            });
        }

        tracing::debug!("Parsed code list with {} entries", entries.len());
        Ok(CodeList { entries })
    }

    /// Derive a key for every entry, continuing past bad entries
    pub fn derive_all(&self) -> BatchReport {
        let mut batch = BatchReport::default();

        for entry in &self.entries {
            let report = KeyReport::from_raw(entry.label.clone(), &entry.code);
            if !report.is_ok() {
                batch.failed += 1;
                tracing::warn!("Install code for {} rejected", entry.name());
            }
            batch.reports.push(report);
        }

        tracing::info!(
            "Derived {} of {} link keys",
            batch.succeeded(),
            batch.total()
        );
        batch
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LinkKeyError;
    use std::io::Write;

    const TEST_LIST: &str = r#"
# Sensors commissioned on site
front-door = 83FE D340 7A93 9723 A5C6 39B2 6916 D505 C3B5

0011223344AA32BC
  hallway = 0011223344556677FC05
"#;

    #[test]
    fn test_parse_list() {
        let list = CodeList::parse(TEST_LIST).unwrap();
        assert_eq!(list.len(), 3);

        let first = &list.entries[0];
        assert_eq!(first.line, 3);
        assert_eq!(first.label.as_deref(), Some("front-door"));
        assert_eq!(first.code, "83FE D340 7A93 9723 A5C6 39B2 6916 D505 C3B5");

        let second = &list.entries[1];
        assert_eq!(second.line, 5);
        assert_eq!(second.label, None);
        assert_eq!(second.name(), "line 5");

        assert_eq!(list.entries[2].name(), "hallway");
    }

    #[test]
    fn test_entry_link_key() {
        let list = CodeList::parse(TEST_LIST).unwrap();
        let key = list.entries[0].link_key().unwrap();
        assert_eq!(hex::encode(key), "66b6900981e1ee3ca4206b6b861c02bb");
    }

    #[test]
    fn test_bad_code_is_deferred() {
        let list = CodeList::parse("broken = 1234\n").unwrap();
        assert_eq!(
            list.entries[0].link_key(),
            Err(InstallCodeError::InvalidLength { digits: 4 })
        );
    }

    #[test]
    fn test_derive_all_continues_past_bad_entries() {
        let list = CodeList::parse(
            "good = 0011223344AA32BC\nbad = 0011223344AA32BD\n0011223344556677FC05\n",
        )
        .unwrap();
        let batch = list.derive_all();

        assert_eq!(batch.total(), 3);
        assert_eq!(batch.failed, 1);
        assert_eq!(
            batch.reports[0].to_text(),
            "good 9758aafde967683d251516938a717f8d"
        );
        assert!(!batch.reports[1].is_ok());
        assert_eq!(batch.reports[1].label.as_deref(), Some("bad"));
        assert_eq!(
            batch.reports[2].link_key.as_deref(),
            Some("ad7ed6ed93a33eea104e266f36965509")
        );

        let err = batch.status().unwrap_err();
        assert!(matches!(err, LinkKeyError::Batch { failed: 1, total: 3 }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_derive_all_json_lines() {
        let list = CodeList::parse("good = 0011223344AA32BC\nbad = 1234\n").unwrap();
        let lines: Vec<String> = list
            .derive_all()
            .reports
            .iter()
            .map(|r| r.to_json().unwrap())
            .collect();

        assert_eq!(
            lines[0],
            r#"{"label":"good","install_code":"0011223344AA32BC","link_key":"9758aafde967683d251516938a717f8d"}"#
        );

        let bad: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(bad["label"], "bad");
        assert_eq!(bad["install_code"], "1234");
        assert!(bad.get("link_key").is_none());
        assert!(bad["error"].as_str().unwrap().contains("4 hex digits"));
    }

    #[test]
    fn test_derive_all_clean_list() {
        let batch = CodeList::parse(TEST_LIST).unwrap().derive_all();
        assert_eq!(batch.failed, 0);
        assert!(batch.status().is_ok());
    }

    #[test]
    fn test_empty_label() {
        let result = CodeList::parse("= 0011223344AA32BC\n");
        assert!(matches!(result, Err(ConfigError::ParseError { line: 1, .. })));
    }

    #[test]
    fn test_missing_code() {
        let result = CodeList::parse("# header\nsensor =\n");
        assert!(matches!(result, Err(ConfigError::ParseError { line: 2, .. })));
    }

    #[test]
    fn test_duplicate_label() {
        let result = CodeList::parse("a = 0011223344AA32BC\na = 0011223344556677FC05\n");
        assert!(matches!(result, Err(ConfigError::ParseError { line: 2, .. })));
    }

    #[test]
    fn test_empty_list() {
        let list = CodeList::parse("# nothing here\n\n").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEST_LIST.as_bytes()).unwrap();

        let list = CodeList::from_file(file.path()).unwrap();
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = CodeList::from_file(dir.path().join("missing.txt"));
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));

        let err: LinkKeyError = result.unwrap_err().into();
        assert_eq!(err.exit_code(), 1);
    }
}
