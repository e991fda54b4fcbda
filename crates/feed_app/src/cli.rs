use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use feed_core::{ContentType, DateWindow, TermFilter};
use feed_logging::LogDestination;
use log::LevelFilter;

/// Browse a remote content source from the terminal
#[derive(Parser, Debug, Default)]
#[command(name = "feed")]
#[command(about = "Page through posts, pages or custom records of a content API", long_about = None)]
pub struct Cli {
    /// RON configuration file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the content source, e.g. https://news.example.com
    #[arg(long)]
    pub base_url: Option<String>,

    /// Collection to browse: posts, pages or custom
    #[arg(long = "type")]
    pub content_type: Option<ContentType>,

    /// Category id or "all" (posts only)
    #[arg(long)]
    pub category: Option<TermFilter>,

    /// Tag id or "all" (posts only)
    #[arg(long)]
    pub tag: Option<TermFilter>,

    /// Free-text search (posts only)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Date window: all, day, week, month or year (posts only)
    #[arg(long)]
    pub date: Option<DateWindow>,

    /// Endpoint path appended verbatim to the base URL in custom mode
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Reject custom mode without an endpoint instead of falling back to posts
    #[arg(long)]
    pub strict_endpoint: bool,

    /// Page to open once the page count is known
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Auto-refresh interval in milliseconds (0 disables)
    #[arg(long)]
    pub refresh_ms: Option<u64>,

    /// Number of auto-refreshes to show before exiting
    #[arg(long, default_value_t = 3)]
    pub refreshes: u32,

    /// Hide the filter and facet summary
    #[arg(long)]
    pub hide_filters: bool,

    /// Heading shown above the listing
    #[arg(long)]
    pub title: Option<String>,

    /// Line shown below the heading
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Where to write logs
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogTarget {
    #[default]
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }
}
