use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use overlap_core::error::OverlapError;

use super::layout::{build_session, LayoutArgs};
use crate::summary::{print_layout_summary, print_result_set};

#[derive(Args)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Directory for crop_<id>.png and inverted_<id>.png
    #[arg(short, long, default_value = "overlap-results")]
    pub output: PathBuf,
}

pub fn run(args: &ProcessArgs) -> Result<()> {
    let mut session = build_session(&args.layout)?;
    print_layout_summary(&session);

    if !session.processing_enabled() {
        bail!("At least two images are needed to compute an overlap");
    }

    let results = match session.process() {
        Ok(results) => results,
        Err(OverlapError::InsufficientOverlap { .. }) => {
            bail!("Images do not overlap sufficiently.")
        }
        Err(e) => return Err(e.into()),
    };

    print_result_set("Crops", &results.plain);
    print_result_set("Inverted", &results.inverted);

    let written = results.save_all(&args.output)?;
    println!();
    println!(
        "Saved {} image(s) to {}",
        written.len(),
        args.output.display()
    );
    Ok(())
}
