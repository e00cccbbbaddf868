use crate::element::{Canvas2d, Element};
use std::fmt::Write as _;

#[derive(Debug, Clone)]
struct SvgText {
    text: String,
    x: f64,
    y: f64,
    rotation: f64,
    fill: String,
    font: String,
}

/// A canvas that keeps every `fill_text` as an SVG `<text>` node.
///
/// Each node carries a `data-label` attribute so page scripts can map clicks back to topics.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    id: Option<String>,
    background: Option<String>,
    fill_style: String,
    font: String,
    nodes: Vec<SvgText>,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            id: None,
            background: None,
            fill_style: "black".to_string(),
            font: "normal 10px sans-serif".to_string(),
            nodes: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn text_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let w = fmt(self.width);
        let h = fmt(self.height);
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
        if let Some(id) = self.id.as_deref() {
            let _ = write!(&mut out, r#" id="{}""#, escape_xml(id));
        }
        let _ = write!(
            &mut out,
            r#" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img">"#
        );
        if let Some(bg) = self.background.as_deref() {
            let _ = write!(
                &mut out,
                r#"<rect width="100%" height="100%" fill="{}"/>"#,
                escape_xml(bg)
            );
        }
        out.push_str("<g>");
        for node in &self.nodes {
            let x = fmt(node.x);
            let y = fmt(node.y);
            let label = escape_xml(&node.text);
            let _ = write!(
                &mut out,
                r#"<text x="{x}" y="{y}" text-anchor="middle" dominant-baseline="central" fill="{fill}" style="font: {font};" data-label="{label}""#,
                fill = escape_xml(&node.fill),
                font = escape_xml(&node.font),
            );
            if node.rotation != 0.0 {
                let _ = write!(
                    &mut out,
                    r#" transform="rotate({deg} {x} {y})""#,
                    deg = fmt(node.rotation.to_degrees())
                );
            }
            let _ = write!(&mut out, ">{label}</text>");
        }
        out.push_str("</g></svg>");
        out
    }
}

impl Canvas2d for SvgCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }

    fn set_fill_style(&mut self, color: &str) {
        self.fill_style = color.to_string();
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, rotation: f64) {
        self.nodes.push(SvgText {
            text: text.to_string(),
            x,
            y,
            rotation,
            fill: self.fill_style.clone(),
            font: self.font.clone(),
        });
    }
}

impl Element for SvgCanvas {
    fn tag_name(&self) -> &str {
        "svg"
    }

    fn canvas(&self) -> Option<&dyn Canvas2d> {
        Some(self)
    }

    fn canvas_mut(&mut self) -> Option<&mut dyn Canvas2d> {
        Some(self)
    }
}

/// Stringifies a number the way JS `Number#toString()` does, without `-0` or float noise.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == -0.0 {
        v = 0.0;
    }
    let mut buf = ryu_js::Buffer::new();
    buf.format_finite(v).to_string()
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
