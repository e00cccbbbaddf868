use crate::element::Element;
use crate::layout::{PlacedWord, SpiralLayout, WordCloudLayout, WordCloudRequest};
use crate::probe::{CapabilityProbe, HeadlessProbe};
use crate::{Error, Result};
use serde_json::Value;
use topicloud_core::schema::{check_mapping, validate_topics};
use topicloud_core::{
    TopicDetail, TopicMapping, max_mentions, scaled_tier, sentiment_color, size_tier,
};

/// Largest canvas side, in pixels, a cloud accepts.
pub const MAX_CANVAS_SIDE: f64 = 32_767.0;

type ClickCallback = Box<dyn FnMut(&TopicDetail)>;
type FinishCallback = Box<dyn FnMut()>;

/// How labels are ranked before index assignment. Index 0 gets the largest font tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelOrder {
    /// Descending total mentions; ties broken by label.
    #[default]
    ByMentions,
    /// The mapping's own iteration order.
    Insertion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloudConfig {
    pub font_family: String,
    pub weight_factor: f64,
    pub allow_rotation: bool,
    pub shuffle: bool,
    pub draw_out_of_bound: bool,
    pub label_order: LabelOrder,
    pub seed: u64,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            font_family: "Comic Sans MS, sans-serif".to_string(),
            weight_factor: 60.0,
            allow_rotation: false,
            shuffle: false,
            draw_out_of_bound: false,
            label_order: LabelOrder::default(),
            seed: 0,
        }
    }
}

impl CloudConfig {
    pub fn rotate_ratio(&self) -> f64 {
        if self.allow_rotation { 0.5 } else { 0.0 }
    }
}

/// A word cloud of topics bound to one drawing element.
///
/// Construction validates everything up front (layout support, the element, the topic shape);
/// a cloud that exists can always be drawn.
pub struct TopicCloud<E: Element> {
    element: E,
    labels: Vec<String>,
    topics: TopicMapping,
    config: CloudConfig,
    layout: Box<dyn WordCloudLayout>,
    on_clicked_topic: Option<ClickCallback>,
    on_finished_draw: Option<FinishCallback>,
    placements: Vec<PlacedWord>,
}

impl<E: Element> std::fmt::Debug for TopicCloud<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicCloud")
            .field("element", &self.element.tag_name())
            .field("labels", &self.labels)
            .field("config", &self.config)
            .field("placements", &self.placements.len())
            .finish_non_exhaustive()
    }
}

impl<E: Element> TopicCloud<E> {
    /// Builds a cloud from untyped topic JSON (`{ label: { score, positive, negative, neutral } }`).
    pub fn new(element: Option<E>, topics: &Value) -> Result<Self> {
        Self::with_probe(&HeadlessProbe, element, topics)
    }

    pub fn with_probe(
        probe: &dyn CapabilityProbe,
        element: Option<E>,
        topics: &Value,
    ) -> Result<Self> {
        ensure_supported(probe)?;
        let element = ensure_surface(element)?;
        let topics = validate_topics(topics)?;
        Ok(Self::assemble(element, topics))
    }

    pub fn from_mapping(element: Option<E>, topics: TopicMapping) -> Result<Self> {
        Self::from_mapping_with_probe(&HeadlessProbe, element, topics)
    }

    pub fn from_mapping_with_probe(
        probe: &dyn CapabilityProbe,
        element: Option<E>,
        topics: TopicMapping,
    ) -> Result<Self> {
        ensure_supported(probe)?;
        let element = ensure_surface(element)?;
        check_mapping(&topics)?;
        Ok(Self::assemble(element, topics))
    }

    pub fn is_supported(probe: &dyn CapabilityProbe) -> bool {
        probe.is_supported()
    }

    fn assemble(element: E, topics: TopicMapping) -> Self {
        let config = CloudConfig::default();
        let labels = ordered_labels(&topics, config.label_order);
        Self {
            element,
            labels,
            topics,
            config,
            layout: Box::new(SpiralLayout::default()),
            on_clicked_topic: None,
            on_finished_draw: None,
            placements: Vec::new(),
        }
    }

    /// Swaps the layout routine used by [`generate`](Self::generate).
    pub fn with_layout(mut self, layout: impl WordCloudLayout + 'static) -> Self {
        self.layout = Box::new(layout);
        self
    }

    pub fn set_font_family(&mut self, font_family: impl Into<String>) {
        self.config.font_family = font_family.into();
    }

    pub fn set_weight_factor(&mut self, weight_factor: f64) {
        self.config.weight_factor = weight_factor;
    }

    pub fn set_allow_rotation(&mut self, allow: bool) {
        self.config.allow_rotation = allow;
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.config.shuffle = shuffle;
    }

    pub fn set_draw_out_of_bound(&mut self, draw: bool) {
        self.config.draw_out_of_bound = draw;
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.config.seed = seed;
    }

    pub fn set_label_order(&mut self, order: LabelOrder) {
        self.config.label_order = order;
        self.labels = ordered_labels(&self.topics, order);
    }

    pub fn set_config(&mut self, config: CloudConfig) {
        if config.label_order != self.config.label_order {
            self.labels = ordered_labels(&self.topics, config.label_order);
        }
        self.config = config;
    }

    /// Replaces the click callback. Only the most recent callback is kept.
    pub fn on_clicked_topic(&mut self, callback: impl FnMut(&TopicDetail) + 'static) {
        self.on_clicked_topic = Some(Box::new(callback));
    }

    /// Replaces the finish-of-draw callback. Only the most recent callback fires.
    pub fn on_finished_draw(&mut self, callback: impl FnMut() + 'static) {
        self.on_finished_draw = Some(Box::new(callback));
    }

    /// Clears the element and draws every topic, then fires the finish callback.
    ///
    /// Each call is a full redraw; the returned placements replace the previous ones and are
    /// what [`click_at`](Self::click_at) hit-tests against.
    pub fn generate(&mut self) -> Result<&[PlacedWord]> {
        let Self {
            element,
            labels,
            topics,
            config,
            layout,
            ..
        } = self;

        let Some(canvas) = element.canvas_mut() else {
            return Err(Error::InvalidSurface {
                reason: "element no longer exposes a 2-D canvas".to_string(),
            });
        };

        let labels: &[String] = labels;
        let topics: &TopicMapping = topics;
        let weight_factor = config.weight_factor;
        let color = |label: &str| {
            topics
                .get(label)
                .map(|t| sentiment_color(t.score))
                .unwrap_or(topicloud_core::SentimentColor::Grey)
                .as_css()
                .to_string()
        };
        // `labels` are exactly the keys of `topics`, so the tier alone decides the size.
        let max = max_mentions(topics);
        let size = |index: usize| scaled_tier(size_tier(index, labels.len()), max, weight_factor);

        let request = WordCloudRequest {
            list: labels
                .iter()
                .enumerate()
                .map(|(index, label)| (label.clone(), index))
                .collect(),
            color: &color,
            size: &size,
            font_family: &config.font_family,
            shuffle: config.shuffle,
            rotate_ratio: config.rotate_ratio(),
            draw_out_of_bound: config.draw_out_of_bound,
            seed: config.seed,
        };

        canvas.clear();
        let placements = layout.draw(canvas, &request);
        tracing::debug!(
            topics = labels.len(),
            drawn = placements.len(),
            "topic cloud drawn"
        );
        self.placements = placements;

        if let Some(finished) = self.on_finished_draw.as_mut() {
            finished();
        }
        Ok(&self.placements)
    }

    /// Reports a click at canvas coordinates. On a drawn topic, the click callback receives the
    /// topic's detail, which is also returned.
    pub fn click_at(&mut self, x: f64, y: f64) -> Option<TopicDetail> {
        let label = self
            .placements
            .iter()
            .find(|p| p.contains(x, y))
            .map(|p| p.label.clone())?;
        let metrics = *self.topics.get(label.as_str())?;
        let detail = TopicDetail::new(label, metrics);
        if let Some(clicked) = self.on_clicked_topic.as_mut() {
            clicked(&detail);
        }
        Some(detail)
    }

    pub fn topic_count(&self) -> usize {
        self.labels.len()
    }

    /// Labels in index order (index 0 first).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn topics(&self) -> &TopicMapping {
        &self.topics
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    pub fn placements(&self) -> &[PlacedWord] {
        &self.placements
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    pub fn into_element(self) -> E {
        self.element
    }
}

fn ensure_supported(probe: &dyn CapabilityProbe) -> Result<()> {
    if probe.is_supported() {
        Ok(())
    } else {
        Err(Error::UnsupportedEnvironment)
    }
}

fn ensure_surface<E: Element>(element: Option<E>) -> Result<E> {
    let Some(element) = element else {
        return Err(Error::InvalidSurface {
            reason: "no element given".to_string(),
        });
    };
    let Some(canvas) = element.canvas() else {
        return Err(Error::InvalidSurface {
            reason: format!("`<{}>` is not a 2-D canvas", element.tag_name()),
        });
    };
    let (w, h) = (canvas.width(), canvas.height());
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(Error::InvalidSurface {
            reason: format!("canvas has no drawable area ({w}x{h})"),
        });
    }
    if w > MAX_CANVAS_SIDE || h > MAX_CANVAS_SIDE {
        return Err(Error::InvalidSurface {
            reason: format!("canvas is larger than {MAX_CANVAS_SIDE}px on a side ({w}x{h})"),
        });
    }
    Ok(element)
}

fn ordered_labels(topics: &TopicMapping, order: LabelOrder) -> Vec<String> {
    let mut labels: Vec<String> = topics.keys().cloned().collect();
    if order == LabelOrder::ByMentions {
        labels.sort_by(|a, b| {
            let ma = topics[a.as_str()].total_mentions();
            let mb = topics[b.as_str()].total_mentions();
            mb.total_cmp(&ma).then_with(|| a.cmp(b))
        });
    }
    labels
}
