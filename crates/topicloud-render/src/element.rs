//! Drawing targets.
//!
//! An [`Element`] is whatever the cloud is attached to; only elements that expose a
//! [`Canvas2d`] can be drawn on.

pub trait Element {
    /// Lower-case element name, used in error messages (`canvas`, `svg`, `div`, ...).
    fn tag_name(&self) -> &str;

    fn canvas(&self) -> Option<&dyn Canvas2d>;

    fn canvas_mut(&mut self) -> Option<&mut dyn Canvas2d>;
}

/// The subset of a 2-D drawing context the layout needs.
///
/// Text is positioned by its center; `rotation` is in radians, applied around that center.
pub trait Canvas2d {
    fn width(&self) -> f64;

    fn height(&self) -> f64;

    fn clear(&mut self);

    fn set_fill_style(&mut self, color: &str);

    /// CSS font shorthand, e.g. `normal 60px Comic Sans MS, sans-serif`.
    fn set_font(&mut self, font: &str);

    fn fill_text(&mut self, text: &str, x: f64, y: f64, rotation: f64);
}
