use std::path::PathBuf;

use clap::Parser;

/// Render a page of a PDF document to a PNG image, or analyze its
/// content stream.
#[derive(Debug, Parser)]
#[command(name = "pdfraster", about, version)]
pub struct Cli {
    /// Path to the input PDF file
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Write the rendered page to this PNG path
    #[arg(short = 'o', value_name = "PATH", conflicts_with_all = ["temp_name", "test_output"])]
    pub output: Option<PathBuf>,

    /// 1-based page number to process
    #[arg(short = 'p', default_value_t = 1, value_name = "PAGE")]
    pub page: u32,

    /// Raster resolution in DPI
    #[arg(short = 'r', default_value_t = 72, value_name = "DPI")]
    pub dpi: u32,

    /// Verbose trace output
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Tally operator frequencies instead of rendering
    #[arg(long)]
    pub analyze: bool,

    /// Output directory for generated filenames (with -t)
    #[arg(short = 'd', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Generate a randomized output filename in the -d directory
    #[arg(short = 't', requires = "output_dir", conflicts_with = "test_output")]
    pub temp_name: bool,

    /// Generate a randomized filename in testfiles/renderer-output
    #[arg(short = 'T')]
    pub test_output: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn minimal_invocation_parses() {
        let cli = Cli::try_parse_from(["pdfraster", "in.pdf", "-o", "out.png"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.pdf"));
        assert_eq!(cli.output, Some(PathBuf::from("out.png")));
        assert_eq!(cli.page, 1);
        assert_eq!(cli.dpi, 72);
        assert!(!cli.verbose);
        assert!(!cli.analyze);
    }

    #[test]
    fn page_and_dpi_flags() {
        let cli =
            Cli::try_parse_from(["pdfraster", "in.pdf", "-o", "x.png", "-p", "3", "-r", "150"])
                .unwrap();
        assert_eq!(cli.page, 3);
        assert_eq!(cli.dpi, 150);
    }

    #[test]
    fn analyze_mode_needs_no_output() {
        let cli = Cli::try_parse_from(["pdfraster", "in.pdf", "--analyze"]).unwrap();
        assert!(cli.analyze);
        assert!(cli.output.is_none());
    }

    #[test]
    fn temp_name_requires_directory() {
        let err = Cli::try_parse_from(["pdfraster", "in.pdf", "-t"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from(["pdfraster", "in.pdf", "-t", "-d", "/tmp"]).unwrap();
        assert!(cli.temp_name);
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn output_options_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["pdfraster", "in.pdf", "-o", "x.png", "-T"]).is_err());
        assert!(
            Cli::try_parse_from(["pdfraster", "in.pdf", "-o", "x.png", "-t", "-d", "/tmp"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["pdfraster", "in.pdf", "-t", "-d", "/tmp", "-T"]).is_err());
    }

    #[test]
    fn missing_input_is_an_error() {
        assert!(Cli::try_parse_from(["pdfraster"]).is_err());
    }
}
