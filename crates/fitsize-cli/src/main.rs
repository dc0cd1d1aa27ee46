//! fitsize - compress JPEG/PNG images to fit under a target size.
//!
//! ```text
//! fitsize photos/ -s 200 -o compressed
//! ```

use std::fs;
use std::io;

use anyhow::Context;
use clap::Parser;
use fitsize_core::{QualityRange, TargetSize};
use tracing::debug;

mod batch;
mod cli;
mod logging;
mod report;

use batch::Batch;
use cli::CliOptions;

fn main() -> anyhow::Result<()> {
    let args = CliOptions::parse();

    logging::init(args.verbose)?;
    debug!(?args, "arguments");

    fs::create_dir_all(&args.output).with_context(|| {
        format!("cannot create output directory {}", args.output.display())
    })?;

    let inputs = batch::discover_inputs(&args.input)
        .with_context(|| format!("cannot read input {}", args.input.display()))?;
    debug!(count = inputs.len(), "discovered inputs");

    let batch = Batch::new(
        args.output.clone(),
        TargetSize::from(args.size),
        QualityRange::DEFAULT,
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    batch.run(&inputs, &mut out, args.json)?;

    Ok(())
}
