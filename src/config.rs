use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable constants of the label discovery and placement heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// A word earns a label only with strictly more occurrences than this.
    pub min_occurrences: usize,
    /// Occurrence count at which the large-cluster threshold policy applies.
    pub large_cluster_count: usize,
    /// Max spread is `viewport_width / spread_fraction`.
    pub spread_fraction: f32,
    /// Multiplier loosening the max spread for large clusters. Large clusters
    /// use a stricter percentile but a looser bound, keeping loosely bounded
    /// topical clusters visible while rejecting truly diffuse usages.
    pub large_cluster_slack: f32,
    /// The cluster core keeps `ceil(count / core_divisor)` occurrences.
    pub core_divisor: usize,
    /// Label font size is `min(sqrt(count) * font_scale, font_cap)`.
    pub font_scale: f32,
    pub font_cap: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_occurrences: 5,
            large_cluster_count: 20,
            spread_fraction: 20.0,
            large_cluster_slack: 1.5,
            core_divisor: 8,
            font_scale: 10.0,
            font_cap: 50.0,
        }
    }
}

/// The on-screen frame the per-layer normalization maps coordinates into.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Reserved horizontal space for side panels; the point frame starts
    /// right of it.
    pub right_offset: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            margin: 40.0,
            right_offset: 200.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub frame: FrameConfig,
    pub theme: Theme,
}

/// Load a config file (JSON or JSON5), falling back to defaults when no path
/// is given. Missing fields take their default values.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config: Config = json5::from_str(&contents)?;
    Ok(config)
}
