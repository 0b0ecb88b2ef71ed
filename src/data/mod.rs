//! Data module - raw CSV ingestion, normalization and the canonical snapshot

mod dataset;
mod error;
mod loader;
mod pipeline;
mod processor;
pub mod record;

pub use dataset::Dataset;
pub use error::{DatasetError, IngestError};
pub use loader::{DataLoader, RawTable};
pub use pipeline::{write_csv_atomically, IngestPipeline, IngestReport};
pub use processor::{
    canonical_fee, canonical_league, canonical_movement, season_years, PipelineOptions,
    TransferProcessor, FREE_TRANSFER, INBOUND, LOAN_TRANSFER, OUTBOUND,
};
pub use record::{TransferMovement, TransferRecord, AGE_SENTINEL};
