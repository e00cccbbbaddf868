//! Schema checks for topic mappings that arrive as untyped JSON (e.g. from `/api/topics`).

use crate::error::ShapeViolation;
use crate::model::{MetricField, TopicMapping, TopicMetrics};
use serde_json::Value;

/// Validates `{ label: { positive, negative, neutral, score } }` and converts it to a mapping.
///
/// Every field must be present and a finite number; the first violation (in document order,
/// fields checked as `positive`, `negative`, `neutral`, `score`) is reported. Extra fields are
/// ignored.
pub fn validate_topics(value: &Value) -> Result<TopicMapping, ShapeViolation> {
    let Value::Object(entries) = value else {
        return Err(ShapeViolation::NotAMapping);
    };

    let mut topics = TopicMapping::with_capacity(entries.len());
    for (label, entry) in entries {
        let Value::Object(fields) = entry else {
            return Err(ShapeViolation::NotAnObject {
                label: label.clone(),
            });
        };

        let mut metrics = TopicMetrics::default();
        for field in MetricField::ALL {
            let Some(v) = fields
                .get(field.as_str())
                .and_then(Value::as_f64)
                .filter(|v| v.is_finite())
            else {
                return Err(ShapeViolation::NotANumber {
                    label: label.clone(),
                    field,
                });
            };
            match field {
                MetricField::Positive => metrics.positive = v,
                MetricField::Negative => metrics.negative = v,
                MetricField::Neutral => metrics.neutral = v,
                MetricField::Score => metrics.score = v,
            }
        }
        topics.insert(label.clone(), metrics);
    }
    Ok(topics)
}

/// The typed counterpart of [`validate_topics`]: rejects NaN and infinite metrics.
pub fn check_mapping(topics: &TopicMapping) -> Result<(), ShapeViolation> {
    for (label, metrics) in topics {
        for field in MetricField::ALL {
            if !metrics.get(field).is_finite() {
                return Err(ShapeViolation::NotANumber {
                    label: label.clone(),
                    field,
                });
            }
        }
    }
    Ok(())
}
