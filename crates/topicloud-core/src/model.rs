use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label -> aggregated metrics, in first-seen order.
pub type TopicMapping = IndexMap<String, TopicMetrics>;

/// The on-disk source document: `{ "topics": [ ... ] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicSource {
    pub topics: Vec<TopicRecord>,
}

/// One raw topic record, before labels are merged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRecord {
    pub label: String,
    pub sentiment_score: f64,
    #[serde(default)]
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Sentiment {
    #[serde(default)]
    pub positive: Option<f64>,
    #[serde(default)]
    pub negative: Option<f64>,
    #[serde(default)]
    pub neutral: Option<f64>,
}

/// Aggregated metrics for one label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicMetrics {
    #[serde(serialize_with = "js_number::serialize")]
    pub score: f64,
    #[serde(serialize_with = "js_number::serialize")]
    pub positive: f64,
    #[serde(serialize_with = "js_number::serialize")]
    pub negative: f64,
    #[serde(serialize_with = "js_number::serialize")]
    pub neutral: f64,
}

impl TopicMetrics {
    pub fn from_record(record: &TopicRecord) -> Self {
        Self {
            score: record.sentiment_score,
            positive: record.sentiment.positive.unwrap_or(0.0),
            negative: record.sentiment.negative.unwrap_or(0.0),
            neutral: record.sentiment.neutral.unwrap_or(0.0),
        }
    }

    /// Adds another record's values onto these totals. Missing sentiment fields count as zero.
    pub fn absorb(&mut self, record: &TopicRecord) {
        self.score += record.sentiment_score;
        self.positive += record.sentiment.positive.unwrap_or(0.0);
        self.negative += record.sentiment.negative.unwrap_or(0.0);
        self.neutral += record.sentiment.neutral.unwrap_or(0.0);
    }

    pub fn total_mentions(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }

    pub fn get(&self, field: MetricField) -> f64 {
        match field {
            MetricField::Score => self.score,
            MetricField::Positive => self.positive,
            MetricField::Negative => self.negative,
            MetricField::Neutral => self.neutral,
        }
    }
}

/// The four numeric fields every topic must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricField {
    Positive,
    Negative,
    Neutral,
    Score,
}

impl MetricField {
    /// Validation order.
    pub const ALL: [MetricField; 4] = [
        MetricField::Positive,
        MetricField::Negative,
        MetricField::Neutral,
        MetricField::Score,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Score => "score",
        }
    }
}

impl std::fmt::Display for MetricField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a click on a rendered topic reports: the topic's metrics merged with its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicDetail {
    pub label: String,
    #[serde(flatten)]
    pub metrics: TopicMetrics,
    #[serde(rename = "totalMentions", serialize_with = "js_number::serialize")]
    pub total_mentions: f64,
}

impl TopicDetail {
    pub fn new(label: impl Into<String>, metrics: TopicMetrics) -> Self {
        Self {
            label: label.into(),
            total_mentions: metrics.total_mentions(),
            metrics,
        }
    }
}

pub(crate) mod js_number {
    use serde::Serializer;

    // JS `JSON.stringify` prints whole numbers without a `.0` suffix; keep the API output in
    // that shape so browser clients see `80` rather than `80.0`.
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    pub(crate) fn serialize<S: Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        let v = *v;
        if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER {
            serializer.serialize_i64(v as i64)
        } else {
            serializer.serialize_f64(v)
        }
    }
}
