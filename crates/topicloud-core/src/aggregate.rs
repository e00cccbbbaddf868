use crate::model::{TopicMapping, TopicMetrics, TopicRecord, TopicSource};
use crate::{Error, Result};
use std::path::Path;

/// Merges raw records by label.
///
/// The first record for a label fixes its position in the mapping; later records with the same
/// label add their score and sentiment counts onto it. Sums are order-independent, so only the
/// iteration order (not the totals) depends on the input order.
pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a TopicRecord>) -> TopicMapping {
    let mut topics = TopicMapping::new();
    let mut seen = 0usize;
    for record in records {
        seen += 1;
        match topics.get_mut(record.label.as_str()) {
            Some(metrics) => metrics.absorb(record),
            None => {
                topics.insert(record.label.clone(), TopicMetrics::from_record(record));
            }
        }
    }
    tracing::debug!(records = seen, labels = topics.len(), "aggregated topic records");
    topics
}

/// Parses a `{ "topics": [...] }` document and aggregates it.
pub fn parse_source(bytes: &[u8]) -> Result<TopicMapping> {
    let source: TopicSource =
        serde_json::from_slice(bytes).map_err(|err| Error::MalformedSource {
            message: err.to_string(),
        })?;
    Ok(aggregate(&source.topics))
}

/// Blocking read + parse of a topic source file.
pub fn read_source(path: impl AsRef<Path>) -> Result<TopicMapping> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(&bytes)
}
