use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Error, Result};
use crate::utils::{self, CANONICAL_IMAGE_EXTS};

/// Partitions the canonical image set and writes the four split manifests
/// (`train.txt`, `test.txt`, `val.txt`, `trainval.txt`) into `manifest_dir`,
/// one extension-less stem per line.
///
/// `test_val_percent` of the (seeded-shuffle) image list is held out and
/// split at its midpoint: the first half becomes test, the second half val,
/// so val receives the odd element. `trainval.txt` is written fresh with the
/// train slice and then appended with the val slice, in that order.
pub fn generate_splits(
    image_dir: &Path,
    manifest_dir: &Path,
    test_val_percent: u32,
    seed: u64,
) -> Result<()> {
    if test_val_percent > 100 {
        return Err(Error::InvalidConfiguration(format!(
            "test/val percentage must be between 0 and 100, got {test_val_percent}"
        )));
    }

    let names = utils::find_files(image_dir, CANONICAL_IMAGE_EXTS, false)?
        .iter()
        .map(|path| utils::stem_of(path))
        .collect::<Result<Vec<String>>>()?;

    let mut rng = StdRng::seed_from_u64(seed);
    let (held_out, train) = partition_list(names, test_val_percent, &mut rng);
    let (test, val) = split_in_half(held_out);
    info!(
        "train: {}, test: {}, val: {}",
        train.len(),
        test.len(),
        val.len()
    );

    // An ordered list of write jobs, not a map keyed by file name: the two
    // trainval entries must both run, fresh write first, append second.
    let jobs: [(&str, &[String], bool); 5] = [
        ("train.txt", &train, false),
        ("test.txt", &test, false),
        ("val.txt", &val, false),
        ("trainval.txt", &train, false),
        ("trainval.txt", &val, true),
    ];
    for (file_name, names, append) in jobs {
        write_manifest(&manifest_dir.join(file_name), names, append)?;
    }

    info!("all manifests saved in {}", manifest_dir.display());
    Ok(())
}

/// Shuffles `list` and splits it into a held-out slice of `percent` percent
/// (rounded) and the remainder.
fn partition_list(
    mut list: Vec<String>,
    percent: u32,
    rng: &mut StdRng,
) -> (Vec<String>, Vec<String>) {
    list.shuffle(rng);
    let split_index = (list.len() as f64 * (percent as f64 / 100.0)).round() as usize;
    let rest = list.split_off(split_index);
    (list, rest)
}

fn split_in_half(mut list: Vec<String>) -> (Vec<String>, Vec<String>) {
    let middle = list.len() / 2;
    let second = list.split_off(middle);
    (list, second)
}

fn write_manifest(path: &Path, names: &[String], append: bool) -> Result<()> {
    let file = if append {
        OpenOptions::new().append(true).create(true).open(path)
    } else {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
    }
    .map_err(|e| Error::io("failed to open manifest", path, e))?;

    let mut writer = BufWriter::new(file);
    for name in names {
        writeln!(writer, "{name}").map_err(|e| Error::io("failed to write manifest", path, e))?;
    }
    writer
        .flush()
        .map_err(|e| Error::io("failed to write manifest", path, e))
}
