//! File discovery, per-file compression and report emission.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fitsize_core::{compress, is_supported_extension, QualityRange, TargetSize};
use tracing::{debug, info, warn};

use crate::report::{CompressionReport, Outcome};

/// Collect the images to process.
///
/// A directory is listed non-recursively and its supported files are
/// returned in path order. A single file is returned as-is if its extension
/// is supported, otherwise nothing is returned.
///
/// # Errors
///
/// Fails if `input` does not exist or the directory cannot be listed.
pub fn discover_inputs(input: &Path) -> io::Result<Vec<PathBuf>> {
    let metadata = fs::metadata(input)?;

    if !metadata.is_dir() {
        return Ok(if is_supported_extension(input) {
            vec![input.to_path_buf()]
        } else {
            debug!(path = %input.display(), "unsupported extension, skipping");
            Vec::new()
        });
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        if path.is_file() && is_supported_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Where the output for `input` goes: same file name, inside `output_dir`.
pub fn output_path(output_dir: &Path, input: &Path) -> Option<PathBuf> {
    input.file_name().map(|name| output_dir.join(name))
}

/// Counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub compressed: usize,
    pub unreachable: usize,
    pub errors: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Compressed => self.compressed += 1,
            Outcome::NoQualityMeetsTarget => self.unreachable += 1,
            Outcome::Error => self.errors += 1,
        }
    }
}

/// Settings shared by every file in a run.
#[derive(Debug, Clone)]
pub struct Batch {
    output_dir: PathBuf,
    target: TargetSize,
    range: QualityRange,
}

impl Batch {
    pub fn new(output_dir: PathBuf, target: TargetSize, range: QualityRange) -> Self {
        Self {
            output_dir,
            target,
            range,
        }
    }

    /// Compress one file and write the result if it fits.
    ///
    /// Never fails: problems with this file end up in the report so the
    /// rest of the batch can continue.
    pub fn process_file(&self, input: &Path) -> CompressionReport {
        let error = |reason: &dyn std::fmt::Display| {
            warn!(path = %input.display(), %reason, "skipping file");
            CompressionReport::error(input.to_path_buf(), self.target, self.range, reason)
        };

        let Some(output) = output_path(&self.output_dir, input) else {
            return error(&"input has no file name");
        };

        let bytes = match fs::read(input) {
            Ok(bytes) => bytes,
            Err(e) => return error(&e),
        };

        let compressed = match compress(&bytes, self.target, self.range) {
            Ok(compressed) => compressed,
            Err(e) => return error(&e),
        };

        if let Some(encoded) = compressed.result.bytes() {
            if let Err(e) = fs::write(&output, encoded) {
                return error(&e);
            }
            debug!(path = %output.display(), "wrote output");
        }

        CompressionReport::from_result(
            input.to_path_buf(),
            output,
            compressed.format,
            self.target,
            self.range,
            &compressed.result,
        )
    }

    /// Process `inputs` in order, writing one line (or JSON object) per
    /// file to `out`.
    ///
    /// # Errors
    ///
    /// Only fails if writing to `out` fails.
    pub fn run<W: Write>(
        &self,
        inputs: &[PathBuf],
        out: &mut W,
        json: bool,
    ) -> anyhow::Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for input in inputs {
            let report = self.process_file(input);
            summary.record(report.outcome);

            if json {
                writeln!(out, "{}", serde_json::to_string(&report)?)?;
            } else if let Some(line) = report.summary_line() {
                writeln!(out, "{line}")?;
            }
        }

        info!(
            compressed = summary.compressed,
            unreachable = summary.unreachable,
            errors = summary.errors,
            "batch finished"
        );
        Ok(summary)
    }
}
