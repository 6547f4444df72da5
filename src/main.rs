use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use vocprep::config::{Args, Layout};
use vocprep::{collect, labels, negatives, normalize, splits, utils, Result};

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    if !args.prepare_dataset && !args.inject_negatives {
        info!("no action selected, exiting");
        return Ok(());
    }

    let layout = Layout::new(&args.output_dir);
    layout.ensure()?;

    if args.prepare_dataset {
        let mut registry = collect::collect(
            &args.input_dir,
            &layout.images_dir,
            &layout.annotations_dir,
        )?;
        normalize::normalize(
            &args.input_dir,
            &layout.images_dir,
            &layout.annotations_dir,
            &mut registry,
        )?;
        splits::generate_splits(
            &layout.images_dir,
            &layout.manifests_dir,
            args.test_val_percent,
            args.seed,
        )?;
    }

    if args.inject_negatives {
        utils::ensure_dir(&args.negatives_staging_dir)?;
        let mut registry = collect::collect(
            &args.input_dir,
            &layout.images_dir,
            &layout.annotations_dir,
        )?;
        negatives::synthesize(
            &mut registry,
            &args.negatives_input_dir,
            &args.negatives_staging_dir,
            &args.negative_template,
        )?;
        negatives::inject(
            &args.negatives_staging_dir,
            &layout.images_dir,
            &layout.annotations_dir,
        )?;
        splits::generate_splits(
            &layout.images_dir,
            &layout.manifests_dir,
            args.test_val_percent,
            args.seed,
        )?;
    }

    if let Some(label_names) = labels::read_labels_file(&layout.labels_file) {
        let counts = labels::count_labels(&layout.annotations_dir, &label_names)?;
        let mut sorted: Vec<_> = counts.into_iter().collect();
        sorted.sort();
        for (label, count) in sorted {
            info!("{label}: {count}");
        }
    }

    Ok(())
}
