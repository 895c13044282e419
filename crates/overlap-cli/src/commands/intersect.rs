use anyhow::Result;
use clap::Args;

use super::layout::{build_session, LayoutArgs};
use crate::summary::print_layout_summary;

#[derive(Args)]
pub struct IntersectArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,
}

pub fn run(args: &IntersectArgs) -> Result<()> {
    let session = build_session(&args.layout)?;
    print_layout_summary(&session);
    Ok(())
}
