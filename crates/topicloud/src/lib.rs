#![forbid(unsafe_code)]

//! `topicloud` turns topic-sentiment records into word clouds.
//!
//! Records sharing a label are merged into one entry per topic; each topic is then drawn with
//! one of six font-size tiers (by total mentions) and a sentiment color band (by score).
//!
//! # Features
//!
//! - `render`: enable headless layout + SVG rendering (`topicloud::render`)

pub use topicloud_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use topicloud_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use topicloud_render::{
        CapabilityProbe, CloudConfig, HeadlessProbe, LabelOrder, PlacedWord, RecordingCanvas,
        SpiralLayout, SvgCanvas, TopicCloud, WordCloudLayout,
    };

    use std::path::Path;
    use topicloud_core::TopicMapping;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Source(#[from] topicloud_core::Error),
        #[error(transparent)]
        Render(#[from] topicloud_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Canvas and cloud settings for one headless render.
    #[derive(Debug, Clone, PartialEq)]
    pub struct CloudOptions {
        pub width: f64,
        pub height: f64,
        /// Root `<svg id="...">`, for pages that embed the cloud and script against it.
        pub id: Option<String>,
        pub background: Option<String>,
        pub cloud: CloudConfig,
    }

    impl Default for CloudOptions {
        fn default() -> Self {
            Self {
                width: 800.0,
                height: 600.0,
                id: None,
                background: None,
                cloud: CloudConfig::default(),
            }
        }
    }

    impl CloudOptions {
        fn canvas(&self) -> SvgCanvas {
            let mut canvas = SvgCanvas::new(self.width, self.height);
            if let Some(id) = self.id.as_deref() {
                canvas = canvas.with_id(id);
            }
            if let Some(bg) = self.background.as_deref() {
                canvas = canvas.with_background(bg);
            }
            canvas
        }
    }

    fn draw(mut cloud: TopicCloud<SvgCanvas>, options: &CloudOptions) -> Result<String> {
        cloud.set_config(options.cloud.clone());
        cloud.generate()?;
        Ok(cloud.element().to_svg())
    }

    /// Synchronous SVG render helper (executor-free).
    pub fn render_svg_sync(topics: &TopicMapping, options: &CloudOptions) -> Result<String> {
        let cloud = TopicCloud::from_mapping(Some(options.canvas()), topics.clone())?;
        draw(cloud, options)
    }

    pub async fn render_svg(topics: &TopicMapping, options: &CloudOptions) -> Result<String> {
        render_svg_sync(topics, options)
    }

    /// Renders untyped topic JSON, validating its shape first.
    pub fn render_json_svg_sync(
        topics: &serde_json::Value,
        options: &CloudOptions,
    ) -> Result<String> {
        let cloud = TopicCloud::new(Some(options.canvas()), topics)?;
        draw(cloud, options)
    }

    /// Reads a topic-record source file, aggregates it and renders the result.
    pub fn render_source_svg_sync(path: impl AsRef<Path>, options: &CloudOptions) -> Result<String> {
        let topics = topicloud_core::read_source(path)?;
        render_svg_sync(&topics, options)
    }

    /// Convenience wrapper that keeps one set of [`CloudOptions`] for repeated renders.
    ///
    /// It stays runtime-agnostic: rendering is CPU-bound and only
    /// [`render_source_svg_sync`](Self::render_source_svg_sync) touches the filesystem.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessCloudRenderer {
        pub options: CloudOptions,
    }

    impl HeadlessCloudRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_options(mut self, options: CloudOptions) -> Self {
            self.options = options;
            self
        }

        pub fn render_svg_sync(&self, topics: &TopicMapping) -> Result<String> {
            render_svg_sync(topics, &self.options)
        }

        pub fn render_json_svg_sync(&self, topics: &serde_json::Value) -> Result<String> {
            render_json_svg_sync(topics, &self.options)
        }

        pub fn render_source_svg_sync(&self, path: impl AsRef<Path>) -> Result<String> {
            render_source_svg_sync(path, &self.options)
        }

        pub async fn render_svg(&self, topics: &TopicMapping) -> Result<String> {
            self.render_svg_sync(topics)
        }
    }
}
