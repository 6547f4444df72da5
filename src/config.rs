use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::Result;
use crate::utils;

/// Command-line arguments for the VOC data set preparation tool.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Convert a Dark Label export into the canonical VOC layout
    #[arg(long = "prepare-dataset")]
    pub prepare_dataset: bool,

    /// Generate negatives from background images and inject them into the data set
    #[arg(long = "inject-negatives")]
    pub inject_negatives: bool,

    /// Directory containing the current data set (images and XML annotations)
    #[arg(long = "input", default_value = "input")]
    pub input_dir: PathBuf,

    /// Directory containing background images without annotations
    #[arg(long = "negatives-input", default_value = "negativesInput")]
    pub negatives_input_dir: PathBuf,

    /// Staging directory for the synthesized negative data set
    #[arg(long = "negatives-staging", default_value = "negativeDataSet")]
    pub negatives_staging_dir: PathBuf,

    /// Annotation template used for synthesized negatives
    #[arg(long = "negative-template", default_value = "negative.xml")]
    pub negative_template: PathBuf,

    /// Root of the canonical VOC output tree
    #[arg(long = "output", default_value = "output")]
    pub output_dir: PathBuf,

    /// Percentage of the corpus held out for the test and validation sets
    #[arg(long = "test-val-percent", default_value_t = 20)]
    pub test_val_percent: u32,

    /// Seed for split shuffling
    #[arg(long = "seed", default_value_t = 42)]
    pub seed: u64,
}

/// Canonical VOC output layout rooted at `--output`.
pub struct Layout {
    pub images_dir: PathBuf,
    pub annotations_dir: PathBuf,
    pub manifests_dir: PathBuf,
    pub labels_file: PathBuf,
}

impl Layout {
    pub fn new(root: &Path) -> Self {
        Self {
            images_dir: root.join("JPEGImages"),
            annotations_dir: root.join("Annotations"),
            manifests_dir: root.join("ImageSets/Main"),
            labels_file: root.join("labels.txt"),
        }
    }

    /// Creates the output directories if they do not exist yet.
    pub fn ensure(&self) -> Result<()> {
        for dir in [&self.images_dir, &self.annotations_dir, &self.manifests_dir] {
            utils::ensure_dir(dir)?;
        }
        Ok(())
    }
}
