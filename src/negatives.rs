use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};

use crate::annotate;
use crate::error::{Error, Result};
use crate::naming::{self, NameRegistry};
use crate::utils::{self, ANNOTATION_EXT, CANONICAL_IMAGE_EXTS};

/// Manufactures an annotated negative example for every background image
/// under `negative_images_dir`.
///
/// Each image is copied to `output_dir` under a freshly minted name together
/// with a copy of the template annotation, whose `filename`/`path` are
/// rewritten to the new image name and whose `width`/`height`/`xmax`/`ymax`
/// become the image dimensions. The template's single placeholder box thus
/// covers the full frame (min extents stay at 0), keeping every negative
/// annotation structurally valid despite containing no real object.
pub fn synthesize(
    registry: &mut NameRegistry,
    negative_images_dir: &Path,
    output_dir: &Path,
    template_path: &Path,
) -> Result<()> {
    info!("generating negative data set...");

    let images = utils::find_files(negative_images_dir, CANONICAL_IMAGE_EXTS, true)?;
    let pb = utils::create_progress_bar(images.len() as u64, "Negatives");

    for image_path in images {
        pb.inc(1);
        let (width, height) =
            image::image_dimensions(&image_path).map_err(|e| Error::ImageDecodeFailure {
                path: image_path.clone(),
                source: e,
            })?;

        let id = naming::mint(registry)?;
        let ext = utils::ext_of(&image_path)?;
        let image_name = format!("{id}.{ext}");

        utils::copy_file(
            &image_path,
            &output_dir.join(&image_name),
            "failed to copy negative image",
        )?;
        let annotation_dest = output_dir.join(format!("{id}.{ANNOTATION_EXT}"));
        utils::copy_file(
            template_path,
            &annotation_dest,
            "failed to copy annotation template",
        )?;

        let updates = HashMap::from([
            ("filename".to_string(), image_name.clone()),
            ("path".to_string(), image_name),
            ("width".to_string(), width.to_string()),
            ("height".to_string(), height.to_string()),
            ("xmax".to_string(), width.to_string()),
            ("ymax".to_string(), height.to_string()),
        ]);
        annotate::rewrite_fields(&annotation_dest, &updates)?;

        // Claimed before the next mint so negatives in the same run cannot
        // collide.
        registry.claim(id);
    }

    pb.finish_and_clear();
    info!(
        "negative data set generated in {} directory",
        output_dir.display()
    );
    Ok(())
}

/// Moves a staged negative data set into the canonical directories: images
/// to `image_out`, annotations to `annotation_out`. Files that are neither
/// are logged and left behind.
pub fn inject(staging_dir: &Path, image_out: &Path, annotation_out: &Path) -> Result<()> {
    info!("injecting negative data set...");

    for path in utils::find_all_files(staging_dir)? {
        let ext = utils::ext_of(&path).unwrap_or_default();
        let file_name = utils::file_name_of(&path)?;
        let dest = if CANONICAL_IMAGE_EXTS.contains(&ext.as_str()) {
            image_out.join(&file_name)
        } else if ext == ANNOTATION_EXT {
            annotation_out.join(&file_name)
        } else {
            warn!("file is neither an image nor an annotation: {}", path.display());
            continue;
        };
        utils::copy_file(&path, &dest, "failed to inject staged file")?;
    }

    info!("finished injecting negative data set");
    Ok(())
}
