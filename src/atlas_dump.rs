use crate::engine::{font_size, AtlasSession};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Machine-readable snapshot of a session's labels and point states.
#[derive(Debug, Serialize)]
pub struct AtlasDump {
    pub word: String,
    pub layer: usize,
    pub transform: TransformDump,
    pub labels: Vec<LabelDump>,
    pub points: Vec<PointDump>,
}

#[derive(Debug, Serialize)]
pub struct TransformDump {
    pub k: f32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Serialize)]
pub struct LabelDump {
    pub word: String,
    pub count: usize,
    pub x: f32,
    pub y: f32,
    pub visible: bool,
    pub font_size: f32,
}

#[derive(Debug, Serialize)]
pub struct PointDump {
    pub sentence: String,
    pub pos: String,
    pub x: f32,
    pub y: f32,
    pub color: Option<String>,
    pub current_label_word: Option<String>,
    pub highlighted: bool,
    pub selected: bool,
}

impl AtlasDump {
    pub fn from_session(session: &AtlasSession) -> Self {
        let labels = session
            .labels
            .iter()
            .map(|label| LabelDump {
                word: label.word.clone(),
                count: label.count,
                x: label.anchor.0,
                y: label.anchor.1,
                visible: label.visible,
                font_size: font_size(label, &session.config),
            })
            .collect();
        let points = session
            .points
            .iter()
            .map(|point| {
                let (x, y) = point.coord(session.current_layer);
                PointDump {
                    sentence: point.sentence.clone(),
                    pos: point.pos.clone(),
                    x,
                    y,
                    color: point.color.clone(),
                    current_label_word: point.current_label_word.clone(),
                    highlighted: point.highlighted,
                    selected: point.selected,
                }
            })
            .collect();
        Self {
            word: session.query_word.clone(),
            layer: session.current_layer,
            transform: TransformDump {
                k: session.transform.k,
                x: session.transform.x,
                y: session.transform.y,
            },
            labels,
            points,
        }
    }

    pub fn write_json(&self, output: Option<&Path>) -> anyhow::Result<()> {
        match output {
            Some(path) => {
                let writer = BufWriter::new(File::create(path)?);
                serde_json::to_writer_pretty(writer, self)?;
            }
            None => {
                let json = serde_json::to_string_pretty(self)?;
                println!("{json}");
            }
        }
        Ok(())
    }
}
