use crate::config::FrameConfig;
use crate::engine::{font_size, AtlasSession};
use crate::pos::pos_color;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Render the current session state: one dot per point, one text element per
/// visible description label, all under the session's view transform.
pub fn render_svg(session: &AtlasSession, frame: &FrameConfig, color_by_pos: bool) -> String {
    let theme = &session.theme;
    let mut svg = String::new();
    let width = frame.width.max(200.0);
    let height = frame.height.max(200.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    let dot_opacity = if color_by_pos { 0.5 } else { 0.8 };
    for point in &session.points {
        let (x, y) = session.transform.apply(point.coord(session.current_layer));
        let fill = if color_by_pos {
            pos_color(&point.pos)
        } else {
            point.color.as_deref().unwrap_or(&theme.default_dot_color)
        };
        let radius = if point.selected { 6.0 } else { 4.0 };
        let stroke_width = if point.selected {
            2.0
        } else if point.highlighted {
            1.0
        } else {
            0.5
        };
        let stroke = if point.highlighted {
            &theme.highlight_stroke
        } else {
            &theme.dot_stroke
        };
        svg.push_str(&format!(
            "<circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{radius}\" fill=\"{fill}\" opacity=\"{dot_opacity}\" stroke=\"{stroke}\" stroke-width=\"{stroke_width}\"/>",
        ));
    }

    for (idx, label) in session.labels.iter().enumerate() {
        if !label.visible {
            continue;
        }
        let (x, y) = session.transform.apply(label.anchor);
        let size = font_size(label, &session.config);
        let fill = if color_by_pos {
            "black"
        } else {
            theme.label_color(idx)
        };
        svg.push_str(&format!(
            "<text x=\"{x:.2}\" y=\"{y:.2}\" font-family=\"{}\" font-size=\"{size:.1}\" fill=\"{fill}\">{}</text>",
            theme.font_family,
            escape_xml(&label.word)
        ));
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{svg}");
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, frame: &FrameConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .unwrap_or("sans-serif")
        .trim()
        .to_string();
    opt.default_size = usvg::Size::from_wh(frame.width, frame.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
