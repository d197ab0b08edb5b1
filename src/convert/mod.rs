//! File conversion driver.
//!
//! Converts one PDF, or every PDF in a folder, to HTML, JSON or a text
//! report. All configuration travels in [`ConvertOptions`]; nothing is read
//! from process-wide state.
//!
//! # Example
//!
//! ```no_run
//! use lawpdf::convert::{convert_dir, ConvertOptions, OutputFormat};
//!
//! fn main() -> lawpdf::Result<()> {
//!     let options = ConvertOptions::new().with_format(OutputFormat::Json);
//!     let report = convert_dir("input", "output", &options)?;
//!     println!("{} converted, {} failed", report.converted.len(), report.failed.len());
//!     Ok(())
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::Metadata;
use crate::parser::{Extractor, ParseOptions};
use crate::render::{self, JsonFormat};

/// Suffix of the block dump written in debug mode.
const DEBUG_SUFFIX: &str = "_debug.json";

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Output format
    pub format: OutputFormat,

    /// HTML title; derived from the file name when unset
    pub title: Option<String>,

    /// Also write the raw block list next to the output
    pub debug: bool,

    /// Extraction options
    pub parse: ParseOptions,

    /// JSON layout for JSON output and the debug dump
    pub json_format: JsonFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the HTML title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable the debug block dump.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set extraction options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// HTML article
    #[default]
    Html,

    /// JSON document structure
    Json,

    /// Plain-text summary report
    Report,
}

impl OutputFormat {
    /// File extension for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Report => "txt",
        }
    }
}

/// What a single-file conversion produced.
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    /// Input file
    pub input: PathBuf,

    /// Written output file
    pub output: PathBuf,

    /// Written debug dump, in debug mode
    pub debug_output: Option<PathBuf>,

    /// Number of classified blocks
    pub block_count: usize,

    /// Document metadata
    pub metadata: Metadata,
}

/// Result of a folder conversion.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successful conversions, in file name order
    pub converted: Vec<ConvertOutcome>,

    /// Failed inputs with their error messages, in file name order
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// Number of PDF files found.
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    /// Check if every file converted.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Title derived from a file stem: `-` and `_` become spaces and every
/// word is capitalized.
///
/// ```
/// assert_eq!(lawpdf::default_title("corporate_tax-guide"), "Corporate Tax Guide");
/// ```
pub fn default_title(stem: &str) -> String {
    stem.replace(&['-', '_'][..], " ")
        .split(' ')
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_word_start = true;
    for c in word.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !c.is_alphabetic();
    }
    out
}

/// Default output path: the input's directory and stem with the format's
/// extension.
pub fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    input.with_extension(format.extension())
}

/// Convert one PDF file.
///
/// `output` defaults to [`default_output_path`]. Parent directories of the
/// output are created. A missing input is [`Error::FileNotFound`].
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<ConvertOutcome> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, options.format));
    let stem = file_stem(input);

    let extracted = Extractor::new(options.parse.clone()).extract_path(input)?;
    let source = input.file_name().map(|n| n.to_string_lossy().to_string());
    let document = crate::assemble(&extracted, source.as_deref());

    let content = match options.format {
        OutputFormat::Html => {
            let title = options
                .title
                .clone()
                .unwrap_or_else(|| default_title(&stem));
            render::render_html(&extracted.blocks, &title)
        }
        OutputFormat::Json => render::to_json(&document, options.json_format)?,
        OutputFormat::Report => render::to_report(&document),
    };

    write_output(&output, &content)?;
    log::info!("Saved {} to {}", options.format.extension(), output.display());

    let debug_output = if options.debug {
        let dir = output.parent().unwrap_or_else(|| Path::new(""));
        let path = dir.join(format!("{}{}", stem, DEBUG_SUFFIX));
        let json = render::blocks_to_json(&extracted.blocks, options.json_format)?;
        write_output(&path, &json)?;
        log::info!("Debug info saved to {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(ConvertOutcome {
        input: input.to_path_buf(),
        output,
        debug_output,
        block_count: extracted.blocks.len(),
        metadata: document.metadata,
    })
}

/// Convert every `*.pdf` file in `input_dir` into `output_dir`.
///
/// Failures are recorded per file and never abort the batch.
pub fn convert_dir<P, Q>(input_dir: P, output_dir: Q, options: &ConvertOptions) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    convert_dir_with(input_dir, output_dir, options, |_, _| {})
}

/// Like [`convert_dir`], calling `on_done` after each file.
///
/// Files are converted in parallel, so `on_done` may run on any thread.
pub fn convert_dir_with<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    options: &ConvertOptions,
    on_done: F,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&Path, &Result<ConvertOutcome>) + Sync,
{
    let output_dir = output_dir.as_ref();
    let inputs = list_pdfs(input_dir.as_ref())?;
    if inputs.is_empty() {
        log::warn!("No PDF files found in {}", input_dir.as_ref().display());
    }
    fs::create_dir_all(output_dir)?;

    // Inputs whose stems differ only in case would write the same output.
    // The first one in name order wins, the rest fail.
    let mut claimed: HashMap<String, PathBuf> = HashMap::new();
    let mut unique = Vec::with_capacity(inputs.len());
    let mut collisions = Vec::new();
    for input in inputs {
        let key = file_stem(&input).to_lowercase();
        match claimed.get(&key) {
            Some(first) => {
                let result = Err(Error::Other(format!(
                    "Output name collides with {}",
                    first.display()
                )));
                log::warn!("Skipping {}: output name already taken", input.display());
                on_done(&input, &result);
                collisions.push((input, result));
            }
            None => {
                claimed.insert(key, input.clone());
                unique.push(input);
            }
        }
    }

    let mut results: Vec<(PathBuf, Result<ConvertOutcome>)> = unique
        .into_par_iter()
        .map(|input| {
            let output = output_dir.join(format!("{}.{}", file_stem(&input), options.format.extension()));
            let result = convert_file(&input, Some(&output), options);
            if let Err(e) = &result {
                log::warn!("Failed to convert {}: {}", input.display(), e);
            }
            on_done(&input, &result);
            (input, result)
        })
        .collect();
    results.extend(collisions);
    results.sort_by(|a, b| a.0.cmp(&b.0));

    let mut report = BatchReport::default();
    for (input, result) in results {
        match result {
            Ok(outcome) => report.converted.push(outcome),
            Err(e) => report.failed.push((input, e.to_string())),
        }
    }
    log::info!(
        "Batch finished: {} converted, {} failed",
        report.converted.len(),
        report.failed.len()
    );
    Ok(report)
}

/// PDF files directly inside `dir`, sorted by name.
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::Other(format!("Not a directory: {}", dir.display())));
    }

    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
