//! Per-file compression reports for stdout.

use std::path::{Path, PathBuf};

use fitsize_core::{CompressionResult, EncodingFormat, QualityRange, TargetSize};
use serde::{Serialize, Serializer};

/// What happened to one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A fitting encoding was written.
    Compressed,
    /// Every quality overshot the target; nothing was written.
    NoQualityMeetsTarget,
    /// The file could not be read, decoded, encoded or written.
    Error,
}

/// Per-file summary, printed as a line of text or as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct CompressionReport {
    #[serde(serialize_with = "lossy_path")]
    pub input: PathBuf,
    #[serde(serialize_with = "lossy_optional_path")]
    pub output: Option<PathBuf>,
    pub outcome: Outcome,
    pub format: Option<EncodingFormat>,
    pub target_kb: TargetSize,
    pub range: QualityRange,
    pub quality: Option<u8>,
    pub size_bytes: Option<usize>,
    pub size_kb: Option<f64>,
    pub reason: Option<String>,
}

impl CompressionReport {
    /// Report for a finished search. `output` is where the bytes were (or
    /// would have been) written.
    pub fn from_result(
        input: PathBuf,
        output: PathBuf,
        format: EncodingFormat,
        target: TargetSize,
        range: QualityRange,
        result: &CompressionResult,
    ) -> Self {
        let mut report = Self::new(input, target, range);
        report.format = Some(format);
        match result {
            CompressionResult::Success {
                quality,
                size_bytes,
                ..
            } => {
                report.outcome = Outcome::Compressed;
                report.output = Some(output);
                report.quality = Some(*quality);
                report.size_bytes = Some(*size_bytes);
                report.size_kb = result.size_kb();
            }
            CompressionResult::Failure { reason } => {
                report.outcome = Outcome::NoQualityMeetsTarget;
                report.reason = Some((*reason).to_string());
            }
        }
        report
    }

    /// Report for a file that never reached a result.
    pub fn error(
        input: PathBuf,
        target: TargetSize,
        range: QualityRange,
        reason: impl ToString,
    ) -> Self {
        let mut report = Self::new(input, target, range);
        report.reason = Some(reason.to_string());
        report
    }

    fn new(input: PathBuf, target: TargetSize, range: QualityRange) -> Self {
        Self {
            input,
            output: None,
            outcome: Outcome::Error,
            format: None,
            target_kb: target,
            range,
            quality: None,
            size_bytes: None,
            size_kb: None,
            reason: None,
        }
    }

    /// Human-readable stdout line. Errors have none; they are logged instead.
    pub fn summary_line(&self) -> Option<String> {
        match (self.outcome, &self.output, self.quality, self.size_kb) {
            (Outcome::Compressed, Some(output), Some(quality), Some(size_kb)) => Some(format!(
                "Compressed to {} (Quality={}, Size={:.1}KB)",
                output.display(),
                quality,
                size_kb,
            )),
            (Outcome::NoQualityMeetsTarget, ..) => Some(format!(
                "Could not compress {} below {}KB",
                self.input.display(),
                self.target_kb.kb(),
            )),
            _ => None,
        }
    }
}

// Paths are not guaranteed to be UTF-8; replace invalid sequences rather than
// failing the whole report.
fn lossy_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

fn lossy_optional_path<S: Serializer>(
    path: &Option<PathBuf>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match path {
        Some(path) => lossy_path(path, serializer),
        None => serializer.serialize_none(),
    }
}
