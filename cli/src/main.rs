//! specmark CLI - convert specification PDFs to Markdown

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use specmark::render::RenderOptions;
use specmark::{
    convert_file, discover_inputs, run_batch, ConvertOptions, ExtractMode, RowOptions, Vocabulary,
};

#[derive(Parser)]
#[command(name = "specmark")]
#[command(version)]
#[command(about = "Convert specification PDFs to structured Markdown", long_about = None)]
struct Cli {
    /// Directory scanned for PDFs when no command is given
    #[arg(long, value_name = "DIR", env = "SPECMARK_INPUT_DIR", default_value = "specifications")]
    input_dir: PathBuf,

    /// Output directory for batch mode (defaults to the input directory)
    #[arg(long, value_name = "DIR", env = "SPECMARK_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    flags: ConvertFlags,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single PDF to Markdown
    Convert {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory (defaults to the input's directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        flags: ConvertFlags,
    },

    /// Convert every PDF in a directory
    Batch {
        /// Directory to scan
        #[arg(value_name = "DIR", env = "SPECMARK_INPUT_DIR", default_value = "specifications")]
        dir: PathBuf,

        /// Output directory (defaults to the scanned directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        flags: ConvertFlags,
    },

    /// Show page count and metadata
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct ConvertFlags {
    /// Use plain text lines instead of rebuilding rows from positions
    #[arg(long)]
    simple: bool,

    /// JSON file with heading keywords, bold terms and list lead-ins
    #[arg(long, value_name = "FILE", env = "SPECMARK_VOCABULARY")]
    vocabulary: Option<PathBuf>,

    /// Also write a <name>-review-notes.md file
    #[arg(long)]
    review_notes: bool,

    /// Add a conversion timestamp to the document header
    #[arg(long)]
    conversion_date: bool,

    /// Vertical distance that separates rows, in points
    #[arg(long, value_name = "POINTS", default_value_t = 1.0)]
    row_granularity: f32,
}

impl ConvertFlags {
    fn to_options(&self) -> Result<ConvertOptions, Box<dyn std::error::Error>> {
        let vocabulary = match self.vocabulary {
            Some(ref path) => Vocabulary::from_json_file(path)?,
            None => Vocabulary::default(),
        };
        let mode = if self.simple {
            ExtractMode::Simple
        } else {
            ExtractMode::Layout
        };
        log::debug!("mode {:?}, row granularity {}", mode, self.row_granularity);

        Ok(ConvertOptions::new()
            .with_mode(mode)
            .with_vocabulary(vocabulary)
            .with_row_options(RowOptions::new().with_granularity(self.row_granularity))
            .with_render_options(RenderOptions::new().with_conversion_date(self.conversion_date))
            .with_review_notes(self.review_notes))
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            flags,
        }) => cmd_convert(&input, output.as_deref(), &flags),
        Some(Commands::Batch { dir, output, flags }) => cmd_batch(&dir, output.as_deref(), &flags),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_batch(&cli.input_dir, cli.output_dir.as_deref(), &cli.flags),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    flags: &ConvertFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = flags.to_options()?;

    println!("{} {}", "Converting".cyan(), input.display());
    let result = convert_file(input, output, &options)?;

    println!(
        "{} {} ({} pages, {} headings, {} list items)",
        "Saved to".green(),
        result.output_path.display(),
        result.page_count,
        result.stats.heading_count,
        result.stats.list_item_count
    );
    if let Some(ref notes) = result.review_notes_path {
        println!("{} {}", "Review notes".green(), notes.display());
    }

    Ok(())
}

fn cmd_batch(
    dir: &Path,
    output: Option<&Path>,
    flags: &ConvertFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = flags.to_options()?;
    let inputs = discover_inputs(dir)?;

    println!(
        "{} {} PDF files in {}",
        "Found".cyan().bold(),
        inputs.len(),
        dir.display()
    );

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = run_batch(&inputs, output, &options, |path, outcome| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match outcome {
            Ok(result) => pb.println(format!(
                "  {} {} -> {}",
                "✓".green(),
                name,
                result.output_path.display()
            )),
            Err(e) => pb.println(format!("  {} {}: {}", "✗".red(), name, e)),
        }
        pb.inc(1);
    });

    pb.finish_and_clear();

    println!(
        "\n{} {} converted, {} failed",
        "Done!".green().bold(),
        report.converted.len(),
        report.failed.len()
    );

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (page_count, metadata) = specmark::inspect(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), page_count);
    for (key, value) in metadata.iter() {
        println!("{}: {}", key.bold(), value);
    }
    if let Some(created) = metadata.creation_date() {
        println!(
            "{}: {}",
            "Created (parsed)".bold(),
            specmark::model::display_pdf_date(created)
        );
    }

    println!();
    println!("{}: {}", "Output name".bold(), specmark::convert::output_file_name(input));

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "specmark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Specification PDF to Markdown converter");
}
