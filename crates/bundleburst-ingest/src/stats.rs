//! Webpack-style build stats.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use bundleburst_core::{RawRecord, RawSize};

use crate::error::{IngestError, Result};

/// One build's stats. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildStats {
    /// Build start, milliseconds since the Unix epoch.
    pub time_stamp: Option<i64>,
    /// Build duration in milliseconds.
    pub time: Option<u64>,
    pub hash: Option<String>,
    pub errors: Vec<serde_json::Value>,
    /// Total emitted size in bytes.
    pub size: Option<f64>,
    pub assets: Vec<Asset>,
    pub chunks: Vec<Chunk>,
}

/// An emitted file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Asset {
    pub name: CompactString,
    pub chunks: Vec<serde_json::Value>,
    pub size: Option<f64>,
}

/// A chunk and the modules it contains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chunk {
    pub size: Option<f64>,
    pub files: Vec<CompactString>,
    pub modules: Vec<Module>,
}

/// A module entry inside a chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Module path, e.g. `./client/App.jsx`.
    pub name: CompactString,
    /// Module size, a number or a numeric string. Anything else is kept as an
    /// invalid size so the tree builder skips just this module.
    #[serde(default, deserialize_with = "lenient_size")]
    pub size: RawSize,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

/// Accept any JSON value as a module size.
fn lenient_size<'de, D>(deserializer: D) -> std::result::Result<RawSize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => RawSize::Missing,
        Some(Value::Number(n)) => n.as_f64().map_or(RawSize::Missing, RawSize::Number),
        Some(Value::String(text)) => RawSize::Text(text),
        Some(other) => RawSize::Text(other.to_string()),
    })
}

impl BuildStats {
    /// When the build ran, if the timestamp is present and in range.
    pub fn built_at(&self) -> Option<DateTime<Utc>> {
        self.time_stamp.and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// Number of modules across all chunks.
    pub fn module_count(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.modules.len()).sum()
    }

    /// Every module of every chunk, as builder input.
    pub fn records(&self) -> Vec<RawRecord> {
        self.chunks
            .iter()
            .flat_map(|chunk| &chunk.modules)
            .map(|module| RawRecord::new(module.name.clone(), module.size.clone()))
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatsDocument {
    Many(Vec<BuildStats>),
    One(Box<BuildStats>),
}

/// Parse stats holding either one build or an array of builds.
pub fn parse_stats(input: &str) -> Result<Vec<BuildStats>> {
    let builds = match serde_json::from_str::<StatsDocument>(input) {
        Ok(StatsDocument::Many(builds)) => builds,
        Ok(StatsDocument::One(build)) => vec![*build],
        // Re-parse as a single build for a precise error location.
        Err(_) => vec![serde_json::from_str::<BuildStats>(input)?],
    };
    if builds.is_empty() {
        return Err(IngestError::Empty);
    }
    debug!(builds = builds.len(), "parsed stats");
    Ok(builds)
}

/// Read and parse a stats file.
pub fn read_stats(path: impl AsRef<Path>) -> Result<Vec<BuildStats>> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let builds = parse_stats(&input)?;
    info!(path = %path.display(), builds = builds.len(), "loaded stats");
    Ok(builds)
}

/// Pick a build by its 1-based position.
pub fn select_build(builds: &[BuildStats], index: usize) -> Result<&BuildStats> {
    if builds.is_empty() {
        return Err(IngestError::Empty);
    }
    index
        .checked_sub(1)
        .and_then(|i| builds.get(i))
        .ok_or(IngestError::NoSuchBuild {
            index,
            available: builds.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: &str = r#"{
        "timeStamp": 1575426090404,
        "time": 1439,
        "hash": "546142ce1b49a6ba7d6f",
        "errors": [],
        "size": 1172113,
        "assets": [{ "name": "bundle.js", "chunks": ["main"], "size": 1172113 }],
        "chunks": [{
            "size": 1118609,
            "files": ["bundle.js"],
            "modules": [
                { "name": "./client/App.jsx", "size": 6375, "id": "./client/App.jsx" },
                { "name": "./client/index.js", "size": "120", "id": 7 }
            ]
        }],
        "treeStats": { "csj": [], "esm": [], "both": [] }
    }"#;

    #[test]
    fn test_parse_single_build() {
        let builds = parse_stats(SINGLE).unwrap();
        assert_eq!(builds.len(), 1);

        let build = &builds[0];
        assert_eq!(build.hash.as_deref(), Some("546142ce1b49a6ba7d6f"));
        assert_eq!(build.time, Some(1439));
        assert_eq!(build.assets[0].name, "bundle.js");
        assert_eq!(build.module_count(), 2);
    }

    #[test]
    fn test_built_at() {
        let build = &parse_stats(SINGLE).unwrap()[0];
        let built_at = build.built_at().unwrap();
        assert_eq!(built_at.timestamp_millis(), 1575426090404);
        assert_eq!(BuildStats::default().built_at(), None);
    }

    #[test]
    fn test_records_keep_raw_sizes() {
        let build = &parse_stats(SINGLE).unwrap()[0];
        let records = build.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path, "./client/App.jsx");
        assert_eq!(records[0].size, RawSize::Number(6375.0));
        assert_eq!(records[1].size, RawSize::Text("120".to_string()));
    }

    #[test]
    fn test_malformed_module_sizes_do_not_reject_build() {
        let input = r#"{ "chunks": [{ "modules": [
            { "name": "./a.js", "size": 10 },
            { "name": "./b.js", "size": null },
            { "name": "./c.js" },
            { "name": "./d.js", "size": [1] }
        ] }] }"#;
        let builds = parse_stats(input).unwrap();
        let records = builds[0].records();

        assert_eq!(records.len(), 4);
        assert_eq!(records[1].size, RawSize::Missing);
        assert_eq!(records[2].size, RawSize::Missing);
        assert_eq!(records[3].size, RawSize::Text("[1]".to_string()));
        assert!(records[1..].iter().all(|r| r.size.as_number().is_none()));
    }

    #[test]
    fn test_parse_array() {
        let input = format!("[{SINGLE}, {{\"hash\": \"b\"}}]");
        let builds = parse_stats(&input).unwrap();
        assert_eq!(builds.len(), 2);
        assert_eq!(builds[1].hash.as_deref(), Some("b"));
        assert!(builds[1].chunks.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_stats("[]"), Err(IngestError::Empty)));
        assert!(matches!(parse_stats("not json"), Err(IngestError::Json(_))));
    }

    #[test]
    fn test_select_build_is_one_based() {
        let builds = parse_stats(&format!("[{SINGLE}, {{\"hash\": \"b\"}}]")).unwrap();
        assert_eq!(select_build(&builds, 2).unwrap().hash.as_deref(), Some("b"));
        assert!(matches!(
            select_build(&builds, 0),
            Err(IngestError::NoSuchBuild { index: 0, available: 2 })
        ));
        assert!(matches!(
            select_build(&builds, 3),
            Err(IngestError::NoSuchBuild { index: 3, .. })
        ));
        assert!(matches!(select_build(&[], 1), Err(IngestError::Empty)));
    }
}
