use crate::element::{Canvas2d, Element};
use serde::Serialize;
use serde_json::{Value, json};

/// One entry of a [`RecordingCanvas`] log: either a context attribute write or a method call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Instruction {
    Attr { attr: String, val: String },
    Call { method: String, arguments: Vec<Value> },
}

impl Instruction {
    pub fn is_call(&self, name: &str) -> bool {
        matches!(self, Self::Call { method, .. } if method == name)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        match self {
            Self::Attr { attr, val } if attr == name => Some(val),
            _ => None,
        }
    }
}

/// A canvas that draws nothing and logs every context operation instead.
///
/// Rotated text is logged as `save`/`translate`/`rotate`/`fillText(text, 0, 0)`/`restore`.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    log: Vec<Instruction>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            log: Vec::new(),
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.log
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(&self.log).unwrap_or(Value::Null)
    }

    /// `(text, fillStyle, font)` for every `fillText`, using the most recent attribute writes.
    pub fn painted_words(&self) -> Vec<(String, String, String)> {
        let mut fill = String::new();
        let mut font = String::new();
        let mut out = Vec::new();
        for ins in &self.log {
            match ins {
                Instruction::Attr { attr, val } if attr == "fillStyle" => fill = val.clone(),
                Instruction::Attr { attr, val } if attr == "font" => font = val.clone(),
                Instruction::Call { method, arguments } if method == "fillText" => {
                    let text = arguments
                        .first()
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    out.push((text, fill.clone(), font.clone()));
                }
                _ => {}
            }
        }
        out
    }

    fn call(&mut self, method: &str, arguments: Vec<Value>) {
        self.log.push(Instruction::Call {
            method: method.to_string(),
            arguments,
        });
    }

    fn attr(&mut self, attr: &str, val: &str) {
        self.log.push(Instruction::Attr {
            attr: attr.to_string(),
            val: val.to_string(),
        });
    }
}

impl Canvas2d for RecordingCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.log.clear();
        let (w, h) = (self.width, self.height);
        self.call("clearRect", vec![json!(0), json!(0), json!(w), json!(h)]);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.attr("fillStyle", color);
    }

    fn set_font(&mut self, font: &str) {
        self.attr("font", font);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, rotation: f64) {
        if rotation == 0.0 {
            self.call("fillText", vec![json!(text), json!(x), json!(y)]);
            return;
        }
        self.call("save", Vec::new());
        self.call("translate", vec![json!(x), json!(y)]);
        self.call("rotate", vec![json!(rotation)]);
        self.call("fillText", vec![json!(text), json!(0), json!(0)]);
        self.call("restore", Vec::new());
    }
}

impl Element for RecordingCanvas {
    fn tag_name(&self) -> &str {
        "canvas"
    }

    fn canvas(&self) -> Option<&dyn Canvas2d> {
        Some(self)
    }

    fn canvas_mut(&mut self) -> Option<&mut dyn Canvas2d> {
        Some(self)
    }
}
