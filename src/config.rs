//! Run configuration: defaults, optional YAML file, and input resolution

use crate::error::{CheckError, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_DOC_PATTERN: &str = "docs/**/*.md";
pub const DEFAULT_CODE_PATH: &str = "src";

/// Source file extensions checked against. Not configurable.
pub const SOURCE_EXTENSIONS: [&str; 6] = ["js", "ts", "py", "java", "go", "rb"];

/// Optional config file (e.g. `.docref.yaml`)
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    pub doc_path: Option<String>,
    pub code_path: Option<String>,
    pub fail_on_error: Option<bool>,
}

impl ConfigFile {
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CheckError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&content)
            .map_err(|e| CheckError::Config(format!("{}: {}", path.display(), e)))
    }

    fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

/// Resolved, immutable configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    pub doc_pattern: String,
    pub code_path: String,
    pub fail_on_error: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            doc_pattern: DEFAULT_DOC_PATTERN.to_string(),
            code_path: DEFAULT_CODE_PATH.to_string(),
            fail_on_error: false,
        }
    }
}

impl CheckConfig {
    /// Merge raw inputs over the config file over the defaults.
    ///
    /// Inputs are trimmed and empty strings count as unset. `fail_on_error`
    /// is enabled only by the literal string `true`.
    pub fn resolve(
        doc_path: Option<&str>,
        code_path: Option<&str>,
        fail_on_error: Option<&str>,
        file: ConfigFile,
    ) -> Self {
        let defaults = Self::default();

        let doc_pattern = non_empty(doc_path)
            .map(str::to_string)
            .or_else(|| file.doc_path.filter(|s| !s.is_empty()))
            .unwrap_or(defaults.doc_pattern);

        let code_path = non_empty(code_path)
            .map(str::to_string)
            .or_else(|| file.code_path.filter(|s| !s.is_empty()))
            .unwrap_or(defaults.code_path);

        let fail_on_error = match non_empty(fail_on_error) {
            Some(raw) => raw == "true",
            None => file.fail_on_error.unwrap_or(defaults.fail_on_error),
        };

        Self {
            doc_pattern,
            code_path,
            fail_on_error,
        }
    }

    pub fn source_pattern(&self) -> String {
        source_pattern(&self.code_path)
    }
}

/// `{code_path}/**/*.{js,ts,py,java,go,rb}`
pub fn source_pattern(code_path: &str) -> String {
    format!(
        "{}/**/*.{{{}}}",
        code_path.trim_end_matches('/'),
        SOURCE_EXTENSIONS.join(",")
    )
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
