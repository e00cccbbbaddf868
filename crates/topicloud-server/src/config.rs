//! Command-line and environment configuration.

use clap::{Args, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use topicloud::render::{CloudConfig, CloudOptions, LabelOrder};

/// Deployment environment, as in `NODE_ENV`-style setups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    /// Request logs are written everywhere except under test.
    pub fn logs_requests(self) -> bool {
        self != Self::Test
    }

    /// Pretty-print data embedded in pages while developing.
    pub fn pretty_pages(self) -> bool {
        self == Self::Development
    }
}

#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Topic-record source file (`{ "topics": [...] }`).
    #[arg(long, env = "TOPICLOUD_TOPICS", default_value = "resources/topics.json")]
    pub topics: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct CloudArgs {
    #[arg(long, default_value_t = 800.0)]
    pub width: f64,
    #[arg(long, default_value_t = 600.0)]
    pub height: f64,
    #[arg(long, default_value = "Comic Sans MS, sans-serif")]
    pub font_family: String,
    /// Font size of the top tier, in pixels.
    #[arg(long, default_value_t = 60.0)]
    pub weight_factor: f64,
    /// Turn about half of the words a quarter turn.
    #[arg(long)]
    pub rotate: bool,
    #[arg(long)]
    pub shuffle: bool,
    /// Seed for shuffle and rotation.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Keep the source order instead of ranking labels by mentions.
    #[arg(long)]
    pub insertion_order: bool,
}

impl CloudArgs {
    pub fn options(&self, id: Option<&str>) -> CloudOptions {
        CloudOptions {
            width: self.width,
            height: self.height,
            id: id.map(str::to_string),
            background: None,
            cloud: CloudConfig {
                font_family: self.font_family.clone(),
                weight_factor: self.weight_factor,
                allow_rotation: self.rotate,
                shuffle: self.shuffle,
                label_order: if self.insertion_order {
                    LabelOrder::Insertion
                } else {
                    LabelOrder::ByMentions
                },
                seed: self.seed,
                ..CloudConfig::default()
            },
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, env = "TOPICLOUD_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,
    #[command(flatten)]
    pub source: SourceArgs,
    /// Directory of static assets served for unmatched paths.
    #[arg(long, env = "TOPICLOUD_PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,
    #[arg(long, env = "TOPICLOUD_ENV", value_enum, default_value_t = Environment::Development)]
    pub env: Environment,
    #[command(flatten)]
    pub cloud: CloudArgs,
}

#[derive(Debug, Clone, Args)]
pub struct AggregateArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Write the SVG here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Root `<svg>` id.
    #[arg(long)]
    pub id: Option<String>,
    #[command(flatten)]
    pub cloud: CloudArgs,
}
