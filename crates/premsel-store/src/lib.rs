//! # premsel-store
//!
//! Persistence for prover results: one JSON object per line.
//!
//! Batch runs stream records through a single [`JsonlAppender`]; whole
//! datasets are read back with [`read_records_from_path`] and summarised with
//! [`DatasetSummary`].

pub mod jsonl;
pub mod record;
pub mod summary;

pub use jsonl::{
    JsonlAppender, JsonlError, StoreError, read_records, read_records_from_path, write_records,
    write_records_to_path,
};
pub use record::ResultRecord;
pub use summary::{DatasetSummary, SolvedSample};
