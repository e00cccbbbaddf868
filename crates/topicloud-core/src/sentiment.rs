//! Sentiment colors and font-size tiers.
//!
//! Both functions are pure and independent of any renderer so they can be checked on their own.

use crate::model::TopicMapping;
use serde::{Deserialize, Serialize};

/// Number of discrete font sizes a cloud uses, regardless of how many topics it holds.
pub const SIZE_TIERS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentColor {
    Green,
    Red,
    Grey,
}

impl SentimentColor {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Red => "red",
            Self::Grey => "grey",
        }
    }
}

impl std::fmt::Display for SentimentColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_css())
    }
}

/// `> 60` is green, `< 40` is red, and the closed band `[40, 60]` is grey.
pub fn sentiment_color(score: f64) -> SentimentColor {
    if score > 60.0 {
        SentimentColor::Green
    } else if score < 40.0 {
        SentimentColor::Red
    } else {
        SentimentColor::Grey
    }
}

/// The highest `positive + negative + neutral` across all topics (0 for an empty mapping).
pub fn max_mentions(topics: &TopicMapping) -> f64 {
    topics
        .values()
        .map(|t| t.total_mentions())
        .fold(0.0, f64::max)
}

/// Which of the [`SIZE_TIERS`] buckets the word at `index` falls into (1 = smallest).
///
/// Index 0 is the first (highest-priority) position of the ordered label list and lands in the
/// top tier. Each tier spans `label_count / min(6, label_count)` positions; the span is kept
/// fractional so that every cloud with at least six words uses all six tiers. Returns 0 when
/// `index` is out of range.
///
/// This differs from an integer span of `ceil(label_count / 6)` unless `label_count <= 6` or
/// `label_count` is a multiple of 6. With 7 labels the integer span of 2 gives tiers
/// `[4, 3, 3, 2, 2, 1, 1]` (four sizes, none above tier 4); this function gives
/// `[6, 6, 5, 4, 3, 2, 1]`.
pub fn size_tier(index: usize, label_count: usize) -> u32 {
    if index >= label_count {
        return 0;
    }
    let tiers = label_count.min(SIZE_TIERS);
    ((label_count - index) * tiers).div_ceil(label_count) as u32
}

/// Font size for the word at `index` of `ordered_labels`.
///
/// The tier is scaled by `max_mentions / 6` and normalized by `max_mentions`, then multiplied by
/// `weight_factor`. When every topic has zero mentions, all words get the smallest tier
/// (`weight_factor / 6`). Out-of-range indices and labels missing from `topics` yield 0, which
/// layout treats as "do not draw".
pub fn weight_tier(
    index: usize,
    ordered_labels: &[String],
    topics: &TopicMapping,
    weight_factor: f64,
) -> f64 {
    let Some(label) = ordered_labels.get(index) else {
        return 0.0;
    };
    if !topics.contains_key(label.as_str()) {
        return 0.0;
    }

    scaled_tier(
        size_tier(index, ordered_labels.len()),
        max_mentions(topics),
        weight_factor,
    )
}

/// Font size for an already computed `tier`, given the cloud's [`max_mentions`].
///
/// [`weight_tier`] scans the whole mapping for its maximum on every call; a renderer sizing
/// every word of a cloud computes the maximum once and calls this instead. Tier 0 yields 0.
pub fn scaled_tier(tier: u32, max: f64, weight_factor: f64) -> f64 {
    if tier == 0 {
        return 0.0;
    }
    if !(max.is_finite() && max > 0.0) {
        return weight_factor / SIZE_TIERS as f64;
    }

    let size_unit = max / SIZE_TIERS as f64;
    (tier as f64 * size_unit / max) * weight_factor
}
