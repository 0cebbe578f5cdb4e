//! Custom filter list ingestion
//!
//! Filter text is loaded from a local file or fetched by the background
//! from a URL, then validated by the background parser. Each attempt
//! resolves to exactly one [`IngestOutcome`].

use quell_channel::MessageChannel;
use quell_core::{
    ClientConfig, CustomFilter, FilterContent, FilterFormatError, FilterInfo,
};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Result of one ingestion attempt
pub type IngestOutcome = Result<CustomFilter, FilterFormatError>;

/// Loads and validates user-supplied filter lists
pub struct CustomFilterLoader {
    channel: Rc<dyn MessageChannel>,
    extensions: Vec<String>,
}

impl CustomFilterLoader {
    pub fn new(channel: Rc<dyn MessageChannel>) -> Self {
        Self::with_config(channel, &ClientConfig::default())
    }

    pub fn with_config(channel: Rc<dyn MessageChannel>, config: &ClientConfig) -> Self {
        Self {
            channel,
            extensions: config.filter_file_extensions.clone(),
        }
    }

    /// Whether the file picker should offer `path`
    pub fn accepts_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// Ingest the first file of a picker selection.
    ///
    /// An empty selection is logged and yields `None`.
    pub async fn add_from_file(&self, selection: &[PathBuf]) -> Option<IngestOutcome> {
        let Some(path) = selection.first() else {
            log::error!("No files provided");
            return None;
        };

        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        // Undecodable bytes become U+FFFD; the background parser decides
        let outcome = match tokio::fs::read(path).await {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes).into_owned();
                self.parse(FilterContent::from(text), &label).await
            }
            Err(e) => Err(FilterFormatError::rejected(e)),
        };
        Some(log_failure(outcome))
    }

    /// Have the background download `url`, then validate the content
    pub async fn add_from_url(&self, url: &str) -> IngestOutcome {
        let outcome = match self.channel.get_filter_content_by_url(url).await {
            Ok(content) => self.parse(content, url).await,
            Err(e) => Err(FilterFormatError::rejected(e)),
        };
        log_failure(outcome)
    }

    async fn parse(&self, content: FilterContent, label: &str) -> IngestOutcome {
        match self.channel.get_filter_info_by_content(&content, label).await {
            Ok(Some(info)) => {
                log::debug!("Parsed custom filter {} ({} rules)", label, info.rules_count);
                Ok(CustomFilter { info, content })
            }
            Ok(None) => Err(FilterFormatError::Broken),
            Err(e) => Err(FilterFormatError::rejected(e)),
        }
    }
}

fn log_failure(outcome: IngestOutcome) -> IngestOutcome {
    if let Err(ref e) = outcome {
        log::error!("{}", e);
    }
    outcome
}

/// Receiver of ingestion outcomes for callback-driven views
pub trait OutcomeHandler {
    fn on_success(&self, info: FilterInfo, content: FilterContent);
    fn on_error(&self, message: String);
}

/// [`OutcomeHandler`] built from a pair of closures
pub struct Callbacks<S, E> {
    pub on_success: S,
    pub on_error: E,
}

impl<S, E> OutcomeHandler for Callbacks<S, E>
where
    S: Fn(FilterInfo, FilterContent),
    E: Fn(String),
{
    fn on_success(&self, info: FilterInfo, content: FilterContent) {
        (self.on_success)(info, content)
    }

    fn on_error(&self, message: String) {
        (self.on_error)(message)
    }
}

/// Hand `outcome` to exactly one of the handler's callbacks
pub fn report(outcome: IngestOutcome, handler: &dyn OutcomeHandler) {
    match outcome {
        Ok(filter) => handler.on_success(filter.info, filter.content),
        Err(e) => handler.on_error(e.to_string()),
    }
}
