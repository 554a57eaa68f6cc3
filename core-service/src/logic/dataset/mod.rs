//! Dataset Module - labeled training data
//!
//! CSV files → labeled samples, plus the deterministic train/test split
//! shared by both training pipelines.

pub mod record;
pub mod loader;
pub mod split;


pub use loader::{load_email_dataset, load_url_dataset, parse_binary_label, parse_email_label, read_table, Table};
pub use record::{LabeledText, NumericDataset, UrlDataset};
pub use split::{class_counts, require_both_classes, train_test_split};
