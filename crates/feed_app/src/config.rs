use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use feed_core::{ContentType, DateWindow, Msg, TermFilter, ViewConfig};
use feed_engine::FetchSettings;
use feed_logging::feed_info;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
    #[error("a base URL is required (--base-url or base_url in the config file)")]
    MissingBaseUrl,
    #[error("invalid base URL {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("custom content type requires an endpoint")]
    EmptyCustomEndpoint,
}

/// On-disk configuration. Every field is optional; flags take precedence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub content_type: Option<String>,
    pub page_size: Option<u32>,
    pub show_filters: Option<bool>,
    pub custom_endpoint: Option<String>,
    pub auto_refresh_ms: Option<u64>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub date_window: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

/// Filters applied before the view is mounted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InitialFilters {
    pub category: TermFilter,
    pub tag: TermFilter,
    pub search: String,
    pub date_window: DateWindow,
}

impl InitialFilters {
    pub fn messages(&self) -> Vec<Msg> {
        vec![
            Msg::CategorySelected(self.category),
            Msg::TagSelected(self.tag),
            Msg::SearchChanged(self.search.clone()),
            Msg::DateWindowChanged(self.date_window),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub view: ViewConfig,
    pub filters: InitialFilters,
    pub start_page: u32,
    pub refreshes: u32,
    pub fetch: FetchSettings,
}

pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: FileConfig = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    feed_info!("Loaded configuration from {:?}", path);
    Ok(file)
}

/// Merges the optional config file with command-line flags and validates the result.
pub fn resolve(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let file = match &cli.config {
        Some(path) => load_file(path)?,
        None => FileConfig::default(),
    };
    merge(cli, file)
}

fn merge(cli: &Cli, file: FileConfig) -> Result<AppConfig, ConfigError> {
    let defaults = ViewConfig::default();

    let base_url = cli
        .base_url
        .clone()
        .or(file.base_url)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or(ConfigError::MissingBaseUrl)?;
    url::Url::parse(&base_url).map_err(|err| ConfigError::InvalidBaseUrl {
        url: base_url.clone(),
        message: err.to_string(),
    })?;

    let content_type = match cli.content_type {
        Some(content_type) => content_type,
        None => parse_field("content_type", file.content_type)?.unwrap_or(defaults.content_type),
    };
    let custom_endpoint = cli
        .endpoint
        .clone()
        .or(file.custom_endpoint)
        .unwrap_or_default();
    if cli.strict_endpoint
        && content_type == ContentType::Custom
        && custom_endpoint.trim().is_empty()
    {
        return Err(ConfigError::EmptyCustomEndpoint);
    }

    let page_size = cli
        .page_size
        .or(file.page_size)
        .unwrap_or(defaults.page_size);
    if page_size == 0 {
        return Err(ConfigError::InvalidValue {
            field: "page_size",
            message: "must be at least 1".to_string(),
        });
    }

    let filters = InitialFilters {
        category: match cli.category {
            Some(category) => category,
            None => parse_field("category", file.category)?.unwrap_or_default(),
        },
        tag: match cli.tag {
            Some(tag) => tag,
            None => parse_field("tag", file.tag)?.unwrap_or_default(),
        },
        search: cli.search.clone().or(file.search).unwrap_or_default(),
        date_window: match cli.date {
            Some(window) => window,
            None => parse_field("date_window", file.date_window)?.unwrap_or_default(),
        },
    };

    let mut fetch = FetchSettings::default();
    if let Some(secs) = cli.timeout_secs.or(file.request_timeout_secs) {
        fetch.request_timeout = Duration::from_secs(secs.max(1));
    }

    Ok(AppConfig {
        view: ViewConfig {
            base_url,
            content_type,
            page_size,
            show_filters: !cli.hide_filters && file.show_filters.unwrap_or(defaults.show_filters),
            custom_endpoint,
            auto_refresh_ms: cli
                .refresh_ms
                .or(file.auto_refresh_ms)
                .unwrap_or(defaults.auto_refresh_ms),
            title: cli.title.clone().or(file.title).unwrap_or(defaults.title),
            subtitle: cli
                .subtitle
                .clone()
                .or(file.subtitle)
                .unwrap_or(defaults.subtitle),
        },
        filters,
        start_page: cli.page.unwrap_or(1).max(1),
        refreshes: cli.refreshes,
        fetch,
    })
}

fn parse_field<T>(field: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr<Err = String>,
{
    raw.map(|value| value.parse::<T>())
        .transpose()
        .map_err(|message| ConfigError::InvalidValue { field, message })
}
