#![forbid(unsafe_code)]

//! Topic-sentiment model for topic clouds (headless).
//!
//! This crate owns everything that does not need a drawing surface:
//! - [`aggregate`]: merge raw topic records by label into a [`TopicMapping`]
//! - [`schema`]: validate untyped topic JSON before it reaches a renderer
//! - [`sentiment`]: the tri-color sentiment bands and the six font-size tiers

pub mod aggregate;
pub mod error;
pub mod model;
pub mod schema;
pub mod sentiment;

pub use aggregate::{aggregate, parse_source, read_source};
pub use error::{Error, Result, ShapeViolation};
pub use model::{MetricField, Sentiment, TopicDetail, TopicMapping, TopicMetrics, TopicRecord, TopicSource};
pub use sentiment::{
    SIZE_TIERS, SentimentColor, max_mentions, scaled_tier, sentiment_color, size_tier,
    weight_tier,
};
