//! lawpdf CLI - legal and tax PDF conversion tool

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use lawpdf::convert::{convert_dir_with, list_pdfs};
use lawpdf::{convert_file, ConvertOptions, JsonFormat, OutputFormat, PageSelection, ParseOptions};

#[derive(Parser)]
#[command(name = "lawpdf")]
#[command(version)]
#[command(about = "Convert legal and tax PDFs to HTML, JSON, and text reports", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "PDF")]
    input: Option<PathBuf>,

    /// Output HTML file (defaults to the input name with .html)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// HTML title (derived from the file name if not specified)
    #[arg(short, long)]
    title: Option<String>,

    /// Also write the classified blocks to <name>_debug.json
    #[arg(long)]
    debug: bool,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long, value_name = "RANGE")]
    pages: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert PDF to an HTML article
    Html {
        /// Input PDF file
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// HTML title
        #[arg(short, long)]
        title: Option<String>,

        /// Also write the classified blocks to <name>_debug.json
        #[arg(long)]
        debug: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long, value_name = "RANGE")]
        pages: Option<String>,
    },

    /// Convert PDF to JSON (sections, tables, footnotes, TOC)
    Json {
        /// Input PDF file
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Compact JSON (no pretty printing)
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long, value_name = "RANGE")]
        pages: Option<String>,
    },

    /// Write a plain-text extraction summary
    Report {
        /// Input PDF file
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long, value_name = "RANGE")]
        pages: Option<String>,
    },

    /// Convert every PDF in a folder
    Batch {
        /// Folder containing PDF files
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,

        /// Folder for the converted files
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: Format,

        /// Also write debug block dumps
        #[arg(long)]
        debug: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// HTML article
    Html,
    /// JSON document structure
    Json,
    /// Plain-text summary report
    Report,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Html => OutputFormat::Html,
            Format::Json => OutputFormat::Json,
            Format::Report => OutputFormat::Report,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Html {
            input,
            output,
            title,
            debug,
            pages,
        }) => cmd_html(&input, output.as_deref(), title, debug, pages.as_deref()),
        Some(Commands::Json {
            input,
            output,
            compact,
            pages,
        }) => cmd_json(&input, output.as_deref(), compact, pages.as_deref()),
        Some(Commands::Report {
            input,
            output,
            pages,
        }) => cmd_report(&input, output.as_deref(), pages.as_deref()),
        Some(Commands::Batch {
            input_dir,
            output_dir,
            format,
            debug,
        }) => cmd_batch(&input_dir, &output_dir, format, debug),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: HTML conversion if input is provided
            if let Some(input) = cli.input {
                cmd_html(
                    &input,
                    cli.output.as_deref(),
                    cli.title,
                    cli.debug,
                    cli.pages.as_deref(),
                )
            } else {
                println!("{}", "Usage: lawpdf <PDF> [-o OUTPUT] [-t TITLE]".yellow());
                println!("       lawpdf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_options(pages: Option<&str>) -> Result<ParseOptions, Box<dyn std::error::Error>> {
    let page_selection = if let Some(p) = pages {
        PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?
    } else {
        PageSelection::All
    };
    Ok(ParseOptions::new().with_pages(page_selection))
}

fn run_single(
    input: &Path,
    output: Option<&Path>,
    options: ConvertOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = convert_file(input, output, &options)?;

    println!("{} {}", "Saved to".green(), outcome.output.display());
    if let Some(debug) = &outcome.debug_output {
        println!("{} {}", "Debug info saved to".green(), debug.display());
    }
    if outcome.block_count == 0 {
        println!("{}", "Warning: no text content was extracted".yellow());
    }

    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    title: Option<String>,
    debug: bool,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ConvertOptions::new()
        .with_format(OutputFormat::Html)
        .with_debug(debug)
        .with_parse_options(parse_options(pages)?);
    if let Some(title) = title {
        options = options.with_title(title);
    }

    run_single(input, output, options)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let options = ConvertOptions::new()
        .with_format(OutputFormat::Json)
        .with_json_format(format)
        .with_parse_options(parse_options(pages)?);

    run_single(input, output, options)
}

fn cmd_report(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ConvertOptions::new()
        .with_format(OutputFormat::Report)
        .with_parse_options(parse_options(pages)?);

    run_single(input, output, options)
}

fn cmd_batch(
    input_dir: &Path,
    output_dir: &Path,
    format: Format,
    debug: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let total = list_pdfs(input_dir)?.len();
    if total == 0 {
        println!(
            "{} {}",
            "No PDF files found in".yellow(),
            input_dir.display()
        );
        return Ok(());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let options = ConvertOptions::new()
        .with_format(format.into())
        .with_debug(debug);
    let report = convert_dir_with(input_dir, output_dir, &options, |input, _| {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        pb.set_message(name);
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} files",
        "Converted".green().bold(),
        report.converted.len(),
        report.total()
    );
    for (input, error) in &report.failed {
        println!("  {} {}: {}", "✗".red(), input.display(), error);
    }

    if !report.is_success() {
        return Err(format!("{} file(s) failed to convert", report.failed.len()).into());
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "lawpdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Legal and tax PDF conversion tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_invocation() {
        let cli = Cli::try_parse_from(["lawpdf", "guide.pdf", "-o", "out.html", "--debug"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("guide.pdf")));
        assert_eq!(cli.output, Some(PathBuf::from("out.html")));
        assert!(cli.debug);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_batch_format() {
        let cli = Cli::try_parse_from(["lawpdf", "batch", "in", "out", "--format", "json"]).unwrap();
        match cli.command {
            Some(Commands::Batch { format, .. }) => {
                assert_eq!(OutputFormat::from(format), OutputFormat::Json)
            }
            _ => panic!("expected batch command"),
        }
    }

    #[test]
    fn test_parse_options_pages() {
        let options = parse_options(Some("2-4")).unwrap();
        assert_eq!(options.pages, PageSelection::Range(2..=4));
        assert!(parse_options(Some("abc")).is_err());
        assert_eq!(parse_options(None).unwrap().pages, PageSelection::All);
    }
}
