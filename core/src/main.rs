use clap::Parser;
use log::{error, info};
use segselect_core::cli::report::write_selection;
use segselect_core::cli::Cli;
use segselect_core::export::{copy_segmentation_files, tabulate};
use segselect_core::{MpReviewParser, Result, SegmentationRecordsFilter};
use std::io;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let records = MpReviewParser::new(&cli.dir).segmentation_records()?;
    let conditions = cli.conditions_parser().filter_conditions()?;

    let mut filter = SegmentationRecordsFilter::new(records);
    filter.add_conditions(&conditions);
    let selected = filter.results();
    info!(
        "Selected {} of {} segmentations",
        selected.len(),
        filter.records().len()
    );

    match &cli.tabulate {
        Some(path) => {
            println!("Total segs: {}", selected.len());
            tabulate(&selected, path)?;
        }
        None => {
            let stdout = io::stdout();
            write_selection(&selected, &cli.format, stdout.lock())?;
        }
    }

    if let Some(dest_dir) = &cli.copy_to {
        let written = copy_segmentation_files(&selected, dest_dir)?;
        info!("Copied {} files to {}", written.len(), dest_dir.display());
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}
