use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub font_family: String,
    pub background: String,
    /// Fill for points no description label has claimed.
    pub default_dot_color: String,
    pub dot_stroke: String,
    pub highlight_stroke: String,
    /// Label text colors, indexed by the label's position in the current
    /// label list.
    pub label_palette: Vec<String>,
    /// Matching lighter fills for the points a label claims.
    pub dot_palette: Vec<String>,
}

impl Theme {
    pub fn atlas_default() -> Self {
        Self {
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            background: "#FFFFFF".to_string(),
            default_dot_color: "rgb(230, 230, 230)".to_string(),
            dot_stroke: "#777777".to_string(),
            highlight_stroke: "#000000".to_string(),
            label_palette: vec![
                "#1b9e77".to_string(),
                "#d95f02".to_string(),
                "#7570b3".to_string(),
                "#e7298a".to_string(),
                "#66a61e".to_string(),
                "#e6ab02".to_string(),
                "#a6761d".to_string(),
                "#666666".to_string(),
            ],
            dot_palette: vec![
                "#66c2a5".to_string(),
                "#fc8d62".to_string(),
                "#8da0cb".to_string(),
                "#e78ac9".to_string(),
                "#a6d854".to_string(),
                "#ffd92f".to_string(),
                "#e5c494".to_string(),
                "#b3b3b3".to_string(),
            ],
        }
    }

    /// Label text color for the word at `palette_idx` in the label list.
    pub fn label_color(&self, palette_idx: usize) -> &str {
        &self.label_palette[palette_idx % self.label_palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::atlas_default()
    }
}
