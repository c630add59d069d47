use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::CliError;
use crate::model::NodeId;

/// tunable behavior for a pipeline run. `serde`-(de)serializable from TOML
/// or JSON, following the same file-extension dispatch the rest of this
/// codebase uses for its configuration types.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub highway_include: HashSet<String>,
    pub excluded_conditions: Vec<String>,
    pub ignore_oneway: bool,
    pub prefer_right_turns: bool,
    pub start_node: Option<i64>,
    pub average_speed_kmh: f64,
}

impl PipelineConfig {
    pub fn start_node_id(&self) -> Option<NodeId> {
        self.start_node.map(NodeId)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let highway_include = [
            "residential",
            "unclassified",
            "service",
            "tertiary",
            "secondary",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let excluded_conditions = vec![
            "service=parking_aisle".to_string(),
            "service=parking".to_string(),
            "access=private".to_string(),
            "access=no".to_string(),
            "access=restricted".to_string(),
        ];

        PipelineConfig {
            highway_include,
            excluded_conditions,
            ignore_oneway: true,
            prefer_right_turns: true,
            start_node: None,
            average_speed_kmh: 30.0,
        }
    }
}

impl TryFrom<&str> for PipelineConfig {
    type Error = CliError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        if path.ends_with(".toml") {
            let s = std::fs::read_to_string(path).map_err(|e| CliError::Io(path.to_string(), e))?;
            toml::from_str(&s).map_err(|e| CliError::ConfigDecode(path.to_string(), e.to_string()))
        } else if path.ends_with(".json") {
            let s = std::fs::read_to_string(path).map_err(|e| CliError::Io(path.to_string(), e))?;
            serde_json::from_str(&s)
                .map_err(|e| CliError::ConfigDecode(path.to_string(), e.to_string()))
        } else {
            Err(CliError::UnsupportedConfigFormat(path.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_highway_include_matches_reference() {
        let conf = PipelineConfig::default();
        assert!(conf.highway_include.contains("residential"));
        assert!(conf.highway_include.contains("secondary"));
        assert_eq!(conf.highway_include.len(), 5);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = PipelineConfig::try_from("settings.yaml");
        assert!(err.is_err());
    }
}
