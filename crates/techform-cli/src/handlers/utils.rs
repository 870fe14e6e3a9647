//! Shared utilities for command handlers

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Whether a path names a YAML document
pub fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

/// Load a JSON or YAML document, chosen by file extension
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        tracing::error!("File not found: {}", path.display());
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    tracing::debug!("File read successfully, {} bytes", content.len());

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
            reason: e.to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use techform_schemas::RawCandidateRecord;

    #[test]
    fn test_yaml_detection() {
        assert!(is_yaml(Path::new("record.yaml")));
        assert!(is_yaml(Path::new("record.yml")));
        assert!(!is_yaml(Path::new("record.json")));
        assert!(!is_yaml(Path::new("record")));
    }

    #[test]
    fn test_load_yaml_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("record.yaml");
        fs::write(
            &path,
            "name: ana\nconfirmPassword: '12345678'\ntechs:\n  - title: Go\n    knowledge: 50\n",
        )
        .unwrap();

        let record: RawCandidateRecord = load_document(&path).unwrap();
        assert_eq!(record.name, "ana");
        assert_eq!(record.confirm_password, "12345678");
        assert_eq!(record.techs[0].title, "Go");
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();

        let missing = load_document::<RawCandidateRecord>(&dir.path().join("none.json"));
        assert!(matches!(missing, Err(Error::FileNotFound { .. })));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        match load_document::<RawCandidateRecord>(&broken) {
            Err(Error::InvalidFormat { path, expected, .. }) => {
                assert_eq!(path, PathBuf::from(&broken));
                assert_eq!(expected, "JSON");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
