use std::path::PathBuf;
use std::sync::Arc;

use cardlist_logging::{engine_debug, engine_info, engine_warn};

use crate::decode::decode_html;
use crate::extract::{ClassTableExtractor, ExtractError, TableExtractor, DEFAULT_TABLE_CLASS};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::persist::{AtomicFileWriter, PersistError};
use crate::serialize::{to_csv_bytes, SerializeError};
use crate::{CardTable, FetchError, RunSummary, Stage};

pub const DEFAULT_URL: &str = "https://wiki.dominionstrategy.com/index.php/List_of_cards";
pub const DEFAULT_OUTPUT: &str = "src/lib/data/cards.csv";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("table extraction failed: {0}")]
    Extract(#[from] ExtractError),
    #[error("csv serialization failed: {0}")]
    Serialize(#[from] SerializeError),
    #[error("writing output failed: {0}")]
    Persist(#[from] PersistError),
    #[error("failed to start async runtime: {0}")]
    Runtime(std::io::Error),
}

impl PipelineError {
    /// Stage at which the run stopped.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Fetch(_) | PipelineError::Runtime(_) => Stage::Fetching,
            PipelineError::Extract(_) => Stage::Extracting,
            PipelineError::Serialize(_) | PipelineError::Persist(_) => Stage::Writing,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub url: String,
    pub table_class: String,
    pub output: PathBuf,
    pub create_dirs: bool,
    pub fetch: FetchSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            table_class: DEFAULT_TABLE_CLASS.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            create_dirs: false,
            fetch: FetchSettings::default(),
        }
    }
}

/// Locate, extract and normalize the table in an already decoded page.
pub fn build_table(html: &str, extractor: &dyn TableExtractor) -> Result<CardTable, ExtractError> {
    let mut table = extractor.extract(html)?;
    engine_debug!("raw headers: {:?}", table.headers);
    table.normalize_headers();
    Ok(table)
}

/// fetch -> decode -> extract -> normalize -> write, each stage once.
pub struct CardListPipeline {
    config: PipelineConfig,
    fetcher: Arc<dyn Fetcher>,
    extractor: Box<dyn TableExtractor>,
}

impl CardListPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        let extractor = Box::new(ClassTableExtractor::new(config.table_class.clone()));
        Self {
            config,
            fetcher,
            extractor,
        }
    }

    pub fn with_parts(
        config: PipelineConfig,
        fetcher: Arc<dyn Fetcher>,
        extractor: Box<dyn TableExtractor>,
    ) -> Self {
        Self {
            config,
            fetcher,
            extractor,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        engine_info!("[{}] {}", Stage::Fetching, self.config.url);
        let fetched = self.fetcher.fetch(&self.config.url).await?;
        engine_info!(
            "fetched {} bytes from {} ({} redirects)",
            fetched.metadata.byte_len,
            fetched.metadata.final_url,
            fetched.metadata.redirect_count
        );

        engine_info!("[{}]", Stage::Decoding);
        let decoded = decode_html(&fetched.bytes, fetched.metadata.content_type.as_deref());
        drop(fetched.bytes);
        engine_debug!("decoded page as {}", decoded.encoding_label);

        engine_info!("[{}] table class `{}`", Stage::Extracting, self.config.table_class);
        let table = build_table(&decoded.html, self.extractor.as_ref())?;
        engine_info!(
            "[{}] columns {:?}, {} rows",
            Stage::Normalizing,
            table.headers,
            table.rows.len()
        );
        let ragged = table.ragged_row_count();
        if ragged > 0 {
            engine_warn!(
                "{} rows differ in length from the {} headers; writing them as-is",
                ragged,
                table.headers.len()
            );
        }

        engine_info!("[{}] {}", Stage::Writing, self.config.output.display());
        let csv = to_csv_bytes(&table)?;
        let writer =
            AtomicFileWriter::new(self.config.output.clone()).create_dirs(self.config.create_dirs);
        let bytes_written = writer.write(&csv)?;

        engine_info!("[{}] wrote {} bytes", Stage::Done, bytes_written);
        Ok(RunSummary {
            final_url: fetched.metadata.final_url,
            encoding_label: decoded.encoding_label,
            row_count: table.rows.len(),
            headers: table.headers,
            bytes_written,
            output_path: self.config.output.clone(),
        })
    }

    /// Drive [`CardListPipeline::run`] on a fresh tokio runtime.
    ///
    /// Must not be called from inside an async context.
    pub fn run_blocking(&self) -> Result<RunSummary, PipelineError> {
        let runtime = tokio::runtime::Runtime::new().map_err(PipelineError::Runtime)?;
        runtime.block_on(self.run())
    }
}
