//! Agent activity records: raw CSV rows, loading, and normalisation

mod raw;
mod normalize;
pub mod loader;

pub use raw::{RawRecord, RawValue};
pub use normalize::{normalize, parse_period, prepare_training_data, NormalizedRecord};
pub use loader::{load_dataset, load_dataset_from_reader, load_datasets, Datasets};
