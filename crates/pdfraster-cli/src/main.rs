mod cli;

use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use clap::error::ErrorKind;
use pdfraster::{PdfFile, RenderError, RenderOptions, analyze_operators, render_page};
use tracing::Level;

use cli::Cli;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are successful exits; anything else is
            // an invocation error.
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            process::exit(code);
        }
    };

    let level = if cli.verbose { Level::TRACE } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), RenderError> {
    let pdf = PdfFile::open(&cli.input)?;

    if cli.analyze {
        return analyze(cli, &pdf);
    }

    let output = resolve_output_path(cli)?;
    println!(
        "Rendering page {} of '{}' to '{}' at {} DPI...",
        cli.page,
        cli.input.display(),
        output.display(),
        cli.dpi
    );

    let device = render_page(&pdf, cli.page, &RenderOptions { dpi: cli.dpi })?;
    device.save_png(&output)?;
    Ok(())
}

fn analyze(cli: &Cli, pdf: &PdfFile) -> Result<(), RenderError> {
    let page_id = pdf.page(cli.page)?;
    let content = pdf.content(page_id)?;

    println!("Analyzing page {} of '{}'...", cli.page, cli.input.display());
    println!("--- Operator analysis summary ---");
    for (operator, count) in analyze_operators(&content) {
        println!("{operator:>8}  {count}");
    }
    Ok(())
}

/// Pick the output path from `-o`, `-t -d <dir>`, or `-T`.
fn resolve_output_path(cli: &Cli) -> Result<PathBuf, RenderError> {
    if let Some(path) = &cli.output {
        return Ok(path.clone());
    }

    let dir = if cli.temp_name {
        cli.output_dir.clone().ok_or_else(|| {
            invocation_error("the -t option requires the -d <directory> option")
        })?
    } else if cli.test_output {
        PathBuf::from("testfiles/renderer-output")
    } else {
        return Err(invocation_error(
            "missing output filename: use -o, -t with -d, or -T",
        ));
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir.join(generated_name(&cli.input)))
}

/// `"{input stem}Result{NNN}.png"` with a pseudo-random three-digit tag.
fn generated_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());
    let tag = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() % 1000)
        .unwrap_or(0);
    format!("{stem}Result{tag:03}.png")
}

fn invocation_error(message: &str) -> RenderError {
    RenderError::Io(io::Error::new(io::ErrorKind::InvalidInput, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_name_uses_input_stem() {
        let name = generated_name(Path::new("/docs/report.pdf"));
        assert!(name.starts_with("reportResult"));
        assert!(name.ends_with(".png"));
        // stem + "Result" + 3 digits + ".png"
        assert_eq!(name.len(), "report".len() + "Result".len() + 3 + ".png".len());
    }

    #[test]
    fn generated_name_without_extension() {
        let name = generated_name(Path::new("scan"));
        assert!(name.starts_with("scanResult"));
    }
}
