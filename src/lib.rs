//! PASCAL VOC data set preparation tools.
//!
//! Curates an object-detection image/annotation corpus into the canonical
//! VOC layout: collision-free file names, JPEG-normalized images with
//! synchronized annotations, synthetic negative injection, and
//! train/val/test/trainval manifests.

pub mod annotate;
pub mod collect;
pub mod config;
pub mod error;
pub mod labels;
pub mod naming;
pub mod negatives;
pub mod normalize;
pub mod splits;
pub mod utils;

// Re-export commonly used types and functions
pub use annotate::rewrite_fields;
pub use collect::collect;
pub use error::{Error, Result};
pub use labels::{count_labels, read_labels_file};
pub use naming::{mint, mint_with, NameRegistry};
pub use negatives::{inject, synthesize};
pub use normalize::normalize;
pub use splits::generate_splits;
