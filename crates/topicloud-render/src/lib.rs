#![forbid(unsafe_code)]

//! Headless topic-cloud rendering.
//!
//! [`TopicCloud`] validates a topic mapping against a target [`Element`], orders its labels, and
//! hands the word list to a [`WordCloudLayout`] together with a color provider (sentiment bands)
//! and a size provider (six font-size tiers). The default layout is [`SpiralLayout`]; drawing
//! goes through the [`Canvas2d`] trait, implemented by [`SvgCanvas`] and [`RecordingCanvas`].

pub mod cloud;
pub mod element;
pub mod layout;
pub mod probe;
pub mod recording;
pub mod svg;
pub mod text;

pub use cloud::{CloudConfig, LabelOrder, MAX_CANVAS_SIDE, TopicCloud};
pub use element::{Canvas2d, Element};
pub use layout::{PlacedWord, SpiralLayout, WordCloudLayout, WordCloudRequest};
pub use probe::{CapabilityProbe, HeadlessProbe};
pub use recording::{Instruction, RecordingCanvas};
pub use svg::SvgCanvas;

use topicloud_core::ShapeViolation;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("topic cloud rendering is not supported in this environment")]
    UnsupportedEnvironment,
    #[error("invalid surface: {reason}")]
    InvalidSurface { reason: String },
    #[error(transparent)]
    InvalidTopicShape(#[from] ShapeViolation),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
