//! PDF Page Tools CLI
//!
//! A command-line tool for page-level PDF manipulation: 2-in-1 layout,
//! page deletion, merging, and splitting.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use pdf_pagetools::pages::parse_page_spec;
use pdf_pagetools::pdf::{
    delete_pages, expand_globs, merge_pdfs, split_chunks, split_pages, two_up, MergeOptions,
};

/// PDF Page Tools - 2-in-1 layout, page deletion, merging, and splitting
#[derive(Parser)]
#[command(name = "pdf-pagetools")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Two slides per page
    pdf-pagetools 2in1 -i slides.pdf -o handout.pdf

    # Drop the cover page and pages 3 through 5
    pdf-pagetools delpages -i report.pdf -p \"1,3-5\" -o trimmed.pdf

    # Merge chapters in order
    pdf-pagetools merge -i \"chapter_*.pdf\" -o book.pdf

    # One file per page, next to the input
    pdf-pagetools split -i scan.pdf

    # 10-page chunks into a directory
    pdf-pagetools split_by_pages -i manual.pdf -n 10 -o chunks/")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine consecutive page pairs side by side onto double-width pages
    #[command(name = "2in1")]
    TwoInOne {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long, default_value = "out.pdf")]
        output: PathBuf,
    },

    /// Delete pages from a PDF
    Delpages {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Pages to delete (1-based): comma/space separated, ranges like 2-4
        #[arg(short = 'p', long = "del_pages")]
        del_pages: String,

        /// Output PDF file path
        #[arg(short, long, default_value = "out.pdf")]
        output: PathBuf,
    },

    /// Merge multiple PDF files into one
    Merge {
        /// Input PDF files (in order). Supports glob patterns like "*.pdf"
        #[arg(short, long, num_args = 1.., required = true)]
        input: Vec<String>,

        /// Output PDF file path
        #[arg(short, long, default_value = "out.pdf")]
        output: PathBuf,
    },

    /// Split a PDF into single-page PDFs
    Split {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (default: same as input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Split a PDF every N pages
    #[command(name = "split_by_pages")]
    SplitByPages {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Pages per output PDF
        #[arg(short, long, default_value_t = 10)]
        npages: usize,

        /// Output directory (default: same as input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::TwoInOne { input, output } => cmd_two_in_one(input, output),
        Commands::Delpages {
            input,
            del_pages,
            output,
        } => cmd_delpages(input, del_pages, output),
        Commands::Merge { input, output } => cmd_merge(input, output),
        Commands::Split { input, output } => cmd_split(input, output),
        Commands::SplitByPages {
            input,
            npages,
            output,
        } => cmd_split_by_pages(input, npages, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn cmd_two_in_one(input: PathBuf, output: PathBuf) -> Result<()> {
    eprintln!("Building 2-in-1 layout...");
    two_up(input.into(), &output).context("2-in-1 conversion failed")?;
    eprintln!("Saved: {}", output.display());
    Ok(())
}

fn cmd_delpages(input: PathBuf, del_pages: String, output: PathBuf) -> Result<()> {
    let pages = parse_page_spec(&del_pages)?;

    eprintln!("Deleting {} page(s)...", pages.len());
    delete_pages(input.into(), &pages, &output).context("Page deletion failed")?;
    eprintln!("Saved: {}", output.display());
    Ok(())
}

fn cmd_merge(inputs: Vec<String>, output: PathBuf) -> Result<()> {
    let inputs = expand_globs(&inputs)?;

    eprintln!("Merging {} PDF files...", inputs.len());

    let options = MergeOptions {
        input_paths: inputs,
        output_path: output.clone(),
    };
    merge_pdfs(&options).context("Merge failed")?;

    eprintln!("Saved: {}", output.display());
    Ok(())
}

fn cmd_split(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let written = split_pages(&input, output.as_deref()).context("Split failed")?;

    for (i, path) in written.iter().enumerate() {
        eprintln!("  {}/{}  Saved: {}", i + 1, written.len(), path.display());
    }
    Ok(())
}

fn cmd_split_by_pages(input: PathBuf, npages: usize, output: Option<PathBuf>) -> Result<()> {
    let written = split_chunks(&input, npages, output.as_deref()).context("Split failed")?;

    for (i, path) in written.iter().enumerate() {
        eprintln!("  Chunk {}: Saved: {}", i + 1, path.display());
    }
    Ok(())
}
