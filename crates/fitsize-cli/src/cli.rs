//! Command-line arguments.

use std::num::NonZeroU64;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Compress images to a target size in KB.
#[derive(Debug, Parser)]
#[command(name = "fitsize", version)]
pub struct CliOptions {
    /// Input image or folder
    pub input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "compressed")]
    pub output: PathBuf,

    /// Target max size in KB (e.g. 200 for 200KB)
    #[arg(short, long)]
    pub size: NonZeroU64,

    /// Print one JSON report per file instead of a summary line
    #[arg(long)]
    pub json: bool,

    /// Logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        CliOptions::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = CliOptions::try_parse_from(["fitsize", "photos", "-s", "200"]).unwrap();
        assert_eq!(args.input, PathBuf::from("photos"));
        assert_eq!(args.output, PathBuf::from("compressed"));
        assert_eq!(args.size.get(), 200);
        assert!(!args.json);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_long_flags() {
        let args = CliOptions::try_parse_from([
            "fitsize", "a.jpg", "--output", "out", "--size", "50", "--json", "-vv",
        ])
        .unwrap();
        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.size.get(), 50);
        assert!(args.json);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_size_is_required() {
        assert!(CliOptions::try_parse_from(["fitsize", "a.jpg"]).is_err());
    }

    #[test]
    fn test_size_must_be_positive() {
        assert!(CliOptions::try_parse_from(["fitsize", "a.jpg", "-s", "0"]).is_err());
        assert!(CliOptions::try_parse_from(["fitsize", "a.jpg", "-s", "-5"]).is_err());
        assert!(CliOptions::try_parse_from(["fitsize", "a.jpg", "-s", "abc"]).is_err());
    }
}
