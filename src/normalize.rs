use std::collections::HashMap;
use std::io;
use std::path::Path;

use log::{debug, info, warn};

use crate::annotate;
use crate::error::{Error, Result};
use crate::naming::{self, NameRegistry};
use crate::utils::{self, ANNOTATION_EXT, CANONICAL_IMAGE_EXT, CONVERTIBLE_IMAGE_EXTS};

/// Re-encodes every convertible image under `input_root` into the canonical
/// format under a freshly minted name, keeping the annotation's embedded
/// `filename`/`path` fields in sync.
///
/// Images without a same-stem annotation are unlabeled stragglers and are
/// skipped. Stems already present in `registry` were handled by a previous
/// stage of this run and are skipped too; the registry, not file existence,
/// is the idempotency check. A decode failure aborts the run, since a
/// partially-converted corpus is worse than no conversion.
pub fn normalize(
    input_root: &Path,
    image_out: &Path,
    annotation_out: &Path,
    registry: &mut NameRegistry,
) -> Result<()> {
    info!("normalizing raw images under {}", input_root.display());

    let candidates = utils::find_files(input_root, CONVERTIBLE_IMAGE_EXTS, true)?;
    let pb = utils::create_progress_bar(candidates.len() as u64, "Normalize");
    let mut converted = 0usize;

    for image_path in candidates {
        pb.inc(1);
        let stem = utils::stem_of(&image_path)?;
        let annotation_path = image_path.with_extension(ANNOTATION_EXT);
        if !annotation_path.is_file() {
            warn!("no annotation for {}, skipping", image_path.display());
            continue;
        }
        if registry.contains(&stem) {
            debug!("{stem} already processed, skipping");
            continue;
        }

        let id = naming::mint(registry)?;
        let canonical_name = format!("{id}.{CANONICAL_IMAGE_EXT}");

        let img = image::open(&image_path).map_err(|e| Error::ImageDecodeFailure {
            path: image_path.clone(),
            source: e,
        })?;
        let image_dest = image_out.join(&canonical_name);
        img.to_rgb8()
            .save(&image_dest)
            .map_err(|e| Error::io("failed to encode canonical image", &image_dest, io::Error::other(e)))?;

        // Copy first, then rewrite the copy, so the input tree is never
        // mutated.
        let annotation_dest = annotation_out.join(format!("{id}.{ANNOTATION_EXT}"));
        utils::copy_file(&annotation_path, &annotation_dest, "failed to copy annotation")?;
        let updates = HashMap::from([
            ("filename".to_string(), canonical_name.clone()),
            ("path".to_string(), canonical_name),
        ]);
        annotate::rewrite_fields(&annotation_dest, &updates)?;

        registry.claim(id);
        registry.claim(stem);
        converted += 1;
    }

    pb.finish_and_clear();
    info!("normalized {converted} images");
    Ok(())
}
