//! One-shot processing run: parse, sanitize, assemble, serialize.
//!
//! Each run is independent and stateless apart from the caller-supplied
//! constants. The first parse or assembly failure aborts the whole run;
//! there is never partial output.

use super::assembler::{Constants, RecordGrid, assemble, to_tsv};
use super::error::Result;
use super::parser::{LeadParser, RawRecord};

/// The prompt the user gives the AI assistant so its output matches
/// what the parser expects.
pub const AI_PROMPT: &str = "\
Organize the data below.
Format: CSV.
Separator: SEMICOLON (;).
Do NOT include a header row.
Field order: Name; Company; Profession; Phone.
If a value is missing, use \"N/A\".
List:";

/// Everything one run produces.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Ordered headers + rows, for on-screen display.
    pub grid: RecordGrid,
    /// Tab-separated text ready to paste into the spreadsheet.
    pub tsv: String,
    /// Number of leads processed.
    pub count: usize,
}

/// Run the full pipeline over one raw text blob.
pub fn process(input: &str, constants: &Constants) -> Result<PipelineOutput> {
    let raw = LeadParser::sniff(input).parse(input)?;
    let sanitized: Vec<RawRecord> = raw.iter().map(RawRecord::sanitized).collect();

    let records = assemble(&sanitized, constants)?;
    let tsv = to_tsv(&records, constants.include_status);
    let grid = RecordGrid::from_records(&records, constants.include_status);

    Ok(PipelineOutput {
        count: records.len(),
        grid,
        tsv,
    })
}
