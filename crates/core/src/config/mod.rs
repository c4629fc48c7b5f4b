use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{animation::DEFAULT_SPEED_MS, Result};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub animation: AnimationConfig,
    pub samples: SampleData,
}

impl AppConfig {
    /// Reads a JSON configuration file. Missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        tracing::debug!(?path, "loaded configuration");
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}

/// Playback settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Default delay between steps in milliseconds.
    pub speed_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed_ms: DEFAULT_SPEED_MS,
        }
    }
}

/// Structures each visualizer starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleData {
    pub array: Vec<i64>,
    pub stack: Vec<i64>,
    pub queue: Vec<i64>,
    pub list: Vec<i64>,
    /// Values inserted, in order, to build the starting search tree.
    pub tree: Vec<i64>,
    pub graph: GraphConfig,
}

impl Default for SampleData {
    fn default() -> Self {
        Self {
            array: vec![64, 34, 25, 12, 22, 11, 90],
            stack: vec![90, 11, 22, 12],
            queue: vec![90, 11, 22, 12],
            list: vec![10, 20, 30, 40],
            tree: vec![10, 5, 15, 3, 7, 12, 20],
            graph: GraphConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub nodes: Vec<String>,
    pub edges: Vec<EdgeConfig>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        let edge = |from: &str, to: &str, weight| EdgeConfig {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        };

        Self {
            nodes: ["A", "B", "C", "D", "E", "F"].map(String::from).to_vec(),
            edges: vec![
                edge("A", "B", 4),
                edge("A", "D", 2),
                edge("B", "C", 3),
                edge("B", "E", 1),
                edge("C", "F", 2),
                edge("D", "E", 3),
                edge("E", "F", 1),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    pub from: String,
    pub to: String,
    pub weight: u32,
}
