//! Cardlist engine: fetch a wiki page, pull one table out of it, write CSV.
mod catalog;
mod decode;
mod engine;
mod extract;
mod fetch;
mod normalize;
mod persist;
mod serialize;
mod types;

pub use catalog::{
    load_cards, read_cards, summarize, supply_cards, Card, CatalogError, CatalogSummary,
    MULTI_STACK_TYPES, NON_SUPPLY_CARDS, NON_SUPPLY_CATEGORIES,
};
pub use decode::{decode_html, DecodedHtml};
pub use engine::{
    build_table, CardListPipeline, PipelineConfig, PipelineError, DEFAULT_OUTPUT, DEFAULT_URL,
};
pub use extract::{
    ClassTableExtractor, ExtractError, TableExtractor, DEFAULT_TABLE_CLASS, SORT_VALUE_ATTR,
    SORT_VALUE_COLUMN, SORT_VALUE_HEADER,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use normalize::{normalize_header, normalize_headers};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use serialize::{to_csv_bytes, SerializeError};
pub use types::{CardTable, FailureKind, FetchError, FetchMetadata, FetchOutput, RunSummary, Stage};
