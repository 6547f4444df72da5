use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::naming::NameRegistry;
use crate::utils::{self, ANNOTATION_EXT, CANONICAL_IMAGE_EXTS};

/// Copies the existing corpus into the canonical output directories, pairing
/// every image with its sibling annotation by stem, and returns the registry
/// of stems already in use.
///
/// The corpus is assumed pre-annotated: an image without a sibling
/// annotation indicates upstream corruption and aborts the run, since
/// skipping it would leave the split manifests inconsistent with the
/// annotation count.
pub fn collect(
    source_root: &Path,
    image_out: &Path,
    annotation_out: &Path,
) -> Result<NameRegistry> {
    info!("collecting current data set from {}", source_root.display());

    let images = utils::find_files(source_root, CANONICAL_IMAGE_EXTS, true)?;
    let pb = utils::create_progress_bar(images.len() as u64, "Collect");
    let mut registry = NameRegistry::new();

    for image_path in images {
        pb.inc(1);
        let stem = utils::stem_of(&image_path)?;
        let annotation_path = image_path.with_extension(ANNOTATION_EXT);
        if !annotation_path.is_file() {
            return Err(Error::MissingAnnotation {
                image: image_path,
                annotation: annotation_path,
            });
        }

        let image_name = utils::file_name_of(&image_path)?;
        utils::copy_file(
            &image_path,
            &image_out.join(&image_name),
            "failed to copy image",
        )?;
        utils::copy_file(
            &annotation_path,
            &annotation_out.join(format!("{stem}.{ANNOTATION_EXT}")),
            "failed to copy annotation",
        )?;

        registry.claim(stem);
    }

    pb.finish_and_clear();
    info!("collected {} image/annotation pairs", registry.len());
    Ok(registry)
}
