pub mod backend;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::backend::assembler::{Constants, RecordGrid};
use crate::backend::error::PipelineError;
use crate::backend::pipeline::{self, AI_PROMPT};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the raw lead text; reads stdin when omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// JSON file with the batch constants
    #[arg(short, long)]
    constants: Option<PathBuf>,

    /// BNI Chapter name
    #[arg(long)]
    chapter: Option<String>,

    /// Meeting address
    #[arg(long)]
    address: Option<String>,

    /// Contact date as YYYY-MM-DD; defaults to today
    #[arg(long)]
    contact_date: Option<NaiveDate>,

    /// Sales executive name
    #[arg(long)]
    sales_executive: Option<String>,

    /// SDR owner name
    #[arg(long)]
    sdr_owner: Option<String>,

    /// Omit the trailing empty Status column
    #[arg(long)]
    no_status: bool,

    /// Write the TSV here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print an aligned preview table to stderr
    #[arg(long)]
    preview: bool,

    /// Print the prompt to give the AI assistant, then exit
    #[arg(long)]
    prompt: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.prompt {
        println!("{}", AI_PROMPT);
        return Ok(());
    }

    let mut constants = match &args.constants {
        Some(path) => Constants::load(path)?,
        None => Constants::default(),
    };
    if let Some(chapter) = args.chapter {
        constants.bni_chapter = chapter;
    }
    if let Some(address) = args.address {
        constants.address = address;
    }
    if let Some(date) = args.contact_date {
        constants.contact_date = date;
    }
    if let Some(sales_executive) = args.sales_executive {
        constants.sales_executive = sales_executive;
    }
    if let Some(sdr_owner) = args.sdr_owner {
        constants.sdr_owner = sdr_owner;
    }
    if args.no_status {
        constants.include_status = false;
    }

    let input = read_input(args.file.as_deref())?;
    let output = pipeline::process(&input, &constants).context("failed to process leads")?;

    if args.preview {
        eprintln!("{}", render_preview(&output.grid));
    }

    match &args.output {
        Some(path) => std::fs::write(path, &output.tsv)
            .with_context(|| format!("failed to write output file {:?}", path))?,
        None => print!("{}", output.tsv),
    }
    eprintln!("{} leads processed", output.count);

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let bytes = match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read input file {:?}", path))?,
        None => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };
    let text = String::from_utf8(bytes)
        .map_err(|_| PipelineError::Parse("input is not valid UTF-8 text".to_string()))?;
    Ok(text)
}

/// Space-padded rendering of the preview grid for the terminal.
fn render_preview(grid: &RecordGrid) -> String {
    let mut widths: Vec<usize> = grid.headers.iter().map(|h| h.chars().count()).collect();
    for row in &grid.rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{:<width$}", cell))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = render_row(&grid.headers);
    for row in &grid.rows {
        out.push('\n');
        out.push_str(&render_row(row));
    }
    out
}
