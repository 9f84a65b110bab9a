//! Scan command - extract data from a single receipt.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use receipt_core::{
    create_engine_from_dir, validate_image_path, PureOcrEngine, ReceiptScanner, ScanConfig,
    ScanResult,
};

use super::config;
use super::output::{format_result, OutputFormat};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input file: an image, a .txt file of OCR text, or - for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Leave the raw OCR text out of text reports
    #[arg(long)]
    no_raw: bool,

    /// List fields that could not be extracted
    #[arg(long)]
    show_missing: bool,
}

/// What kind of input a path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// OCR text on stdin.
    Stdin,
    /// A file of already recognized text.
    Text,
    /// An image that needs OCR.
    Image,
}

/// Decide how to read an input path.
pub fn classify_input(path: &Path) -> anyhow::Result<InputKind> {
    if path.as_os_str() == "-" {
        return Ok(InputKind::Stdin);
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if extension == "txt" {
        return Ok(InputKind::Text);
    }

    validate_image_path(path)
        .map_err(|e| anyhow::anyhow!("Please select an image or text file: {}", e))?;
    Ok(InputKind::Image)
}

/// Load the OCR engine and wrap it in a scanner.
pub fn load_scanner(
    config: &ScanConfig,
    model_dir: Option<&Path>,
) -> anyhow::Result<ReceiptScanner<PureOcrEngine>> {
    let model_dir = model_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.models.model_dir.clone());

    if !config.has_models_in(&model_dir) {
        anyhow::bail!(
            "OCR models not found at {}.\n\n\
             Place {}, {} and {} there, or pass --model-dir.",
            model_dir.display(),
            config.models.detection_model,
            config.models.recognition_model,
            config.models.dictionary
        );
    }

    debug!("Using OCR models from {}", model_dir.display());
    let engine = create_engine_from_dir(&model_dir, config)
        .map_err(|e| anyhow::anyhow!("Failed to load OCR models: {}", e))?;

    Ok(ReceiptScanner::new(engine))
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = config::load(config_path)?;

    let kind = classify_input(&args.input)?;
    if kind != InputKind::Stdin && !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Scanning {}", args.input.display());

    let result = match kind {
        InputKind::Stdin => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            ScanResult::from_text(&text)
        }
        InputKind::Text => ScanResult::from_text(&fs::read_to_string(&args.input)?),
        InputKind::Image => scan_image(&args, &config)?,
    };

    let include_raw = config.output.include_raw_text && !args.no_raw;
    let output = format_result(&result, args.format, include_raw)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_missing {
        let missing = result.record.missing_fields();
        if missing.is_empty() {
            eprintln!("{} All fields extracted", style("ℹ").blue());
        } else {
            eprintln!("{} Not found: {}", style("ℹ").yellow(), missing.join(", "));
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn scan_image(args: &ScanArgs, config: &ScanConfig) -> anyhow::Result<ScanResult> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Loading OCR models...");
    let scanner = load_scanner(config, args.model_dir.as_deref())?;

    pb.set_message("Scanning receipt...");
    let result = scanner.scan_path(&args.input);

    pb.finish_and_clear();
    Ok(result?)
}
