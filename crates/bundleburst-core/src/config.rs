//! Tree construction configuration.

use compact_str::CompactString;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for turning flat records into a tree.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct BuildConfig {
    /// Name of the synthetic root node.
    #[builder(default = "CompactString::const_new(\"root\")")]
    #[serde(default = "default_root_name")]
    pub root_name: CompactString,

    /// Prefix removed from every path before it is split. Off by default, so
    /// `./a/b` keeps its `.` directory.
    #[builder(default)]
    #[serde(default)]
    pub strip_prefix: Option<CompactString>,

    /// Drop records whose size is below zero.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub skip_negative_sizes: bool,

    /// Drop records whose size is infinite.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub skip_non_finite_sizes: bool,
}

fn default_true() -> bool {
    true
}

fn default_root_name() -> CompactString {
    CompactString::const_new("root")
}

impl BuildConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref name) = self.root_name {
            if name.is_empty() {
                return Err("Root name cannot be empty".to_string());
            }
            if name.contains('/') {
                return Err("Root name cannot contain '/'".to_string());
            }
        }
        Ok(())
    }
}

impl BuildConfig {
    /// Create a new build config builder.
    pub fn builder() -> BuildConfigBuilder {
        BuildConfigBuilder::default()
    }

    /// Config that accepts every numeric size, including negative and
    /// infinite ones.
    pub fn permissive() -> Self {
        Self {
            skip_negative_sizes: false,
            skip_non_finite_sizes: false,
            ..Self::default()
        }
    }

    /// Path with the configured prefix removed.
    pub fn normalize_path<'a>(&self, path: &'a str) -> &'a str {
        match &self.strip_prefix {
            Some(prefix) if !prefix.is_empty() => path.strip_prefix(prefix.as_str()).unwrap_or(path),
            _ => path,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root_name: default_root_name(),
            strip_prefix: None,
            skip_negative_sizes: true,
            skip_non_finite_sizes: true,
        }
    }
}
