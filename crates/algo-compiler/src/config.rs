//! Compiler configuration.
//!
//! Settings can come from an optional JSON file (`algo.json`) placed next to
//! the sources; command-line flags override what the file says.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codegen::TargetKind;
use crate::diagnostic::CompilerError;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "algo.json";

/// Configuration for the Algo compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerConfig {
    /// Language to generate.
    pub target: TargetKind,

    /// String used for one level of indentation.
    pub tab: String,

    /// C++ only: emit `using namespace std;` and drop `std::` qualifiers.
    pub using_namespace_std: bool,

    /// Where generated files go. Next to each source file when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            target: TargetKind::Pseudocode,
            tab: "\t".to_string(),
            using_namespace_std: false,
            out_dir: None,
        }
    }
}

impl CompilerConfig {
    /// Load a configuration file from disk.
    ///
    /// Returns `Ok(None)` if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Option<Self>, CompilerError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| CompilerError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| CompilerError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Some(config))
    }

    /// Save the configuration to disk.
    pub fn save(&self, path: &Path) -> Result<(), CompilerError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CompilerError::IoError {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| CompilerError::InvalidConfig {
            path: path.to_path_buf(),
            message: format!("Failed to serialize configuration: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| CompilerError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    /// Indentation made of `width` spaces, or a tab when `width` is 0.
    pub fn indent_with_spaces(width: usize) -> String {
        if width == 0 {
            "\t".to_string()
        } else {
            " ".repeat(width)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::TempDir::new().unwrap();
        let loaded = CompilerConfig::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = CompilerConfig {
            target: TargetKind::Cpp,
            tab: "    ".to_string(),
            using_namespace_std: true,
            out_dir: Some(PathBuf::from("build")),
        };
        config.save(&path).unwrap();

        assert_eq!(CompilerConfig::load(&path).unwrap(), Some(config));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{ "target": "cpp", "usingNamespaceStd": true }"#).unwrap();

        let config = CompilerConfig::load(&path).unwrap().unwrap();
        assert_eq!(config.target, TargetKind::Cpp);
        assert!(config.using_namespace_std);
        assert_eq!(config.tab, "\t");
        assert_eq!(config.out_dir, None);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{ "target": "cobol" }"#).unwrap();

        assert!(matches!(
            CompilerConfig::load(&path),
            Err(CompilerError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_indent_with_spaces() {
        assert_eq!(CompilerConfig::indent_with_spaces(0), "\t");
        assert_eq!(CompilerConfig::indent_with_spaces(2), "  ");
    }
}
