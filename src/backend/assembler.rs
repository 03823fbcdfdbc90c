use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::{PipelineError, Result};
use super::parser::RawRecord;
use super::sanitize::sanitize_cell;

/// Output column headers, in spreadsheet order. The trailing "Status"
/// column is optional (see [`Constants::include_status`]).
pub const COLUMNS: [&str; 10] = [
    "BNI Chapter",
    "Address",
    "Member Name",
    "Company",
    "Profession",
    "Phone",
    "Contact",
    "Sales Executive",
    "SDR",
    "Status",
];

/// Batch-level values that repeat on every output row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Constants {
    pub bni_chapter: String,
    pub address: String,
    pub contact_date: NaiveDate,
    pub sales_executive: String,
    pub sdr_owner: String,
    /// Whether to emit the trailing always-empty Status column.
    #[serde(default = "default_include_status")]
    pub include_status: bool,
}

fn default_include_status() -> bool {
    true
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            bni_chapter: String::new(),
            address: String::new(),
            contact_date: Local::now().date_naive(),
            sales_executive: String::new(),
            sdr_owner: String::new(),
            include_status: true,
        }
    }
}

impl Constants {
    /// Load a saved constants set from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Io(format!("failed to read constants file {:?}: {}", path, e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            PipelineError::Configuration(format!("invalid constants file {:?}: {}", path, e))
        })
    }

    /// Fail if any required value is blank. Assembly never proceeds
    /// with a partial constants set.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("BNI Chapter", &self.bni_chapter),
            ("Address", &self.address),
            ("Sales Executive", &self.sales_executive),
            ("SDR Owner", &self.sdr_owner),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(PipelineError::Configuration(format!(
                    "missing required constant: {}",
                    label
                )));
            }
        }
        Ok(())
    }

    /// A copy with every string value passed through the cell sanitizer.
    /// Constants land in the same spreadsheet row as parsed data, so
    /// they get the same defense.
    pub fn sanitized(&self) -> Self {
        Self {
            bni_chapter: sanitize_cell(&self.bni_chapter),
            address: sanitize_cell(&self.address),
            contact_date: self.contact_date,
            sales_executive: sanitize_cell(&self.sales_executive),
            sdr_owner: sanitize_cell(&self.sdr_owner),
            include_status: self.include_status,
        }
    }
}

/// One assembled CRM row: a sanitized lead merged with the batch
/// constants. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputRecord {
    pub bni_chapter: String,
    pub address: String,
    pub member_name: String,
    pub company: String,
    pub profession: String,
    pub phone: String,
    pub contact: String,
    pub sales_executive: String,
    pub sdr_owner: String,
}

impl OutputRecord {
    /// Fields in output column order. Appends the empty Status cell
    /// when requested.
    pub fn fields(&self, include_status: bool) -> Vec<String> {
        let mut fields = vec![
            self.bni_chapter.clone(),
            self.address.clone(),
            self.member_name.clone(),
            self.company.clone(),
            self.profession.clone(),
            self.phone.clone(),
            self.contact.clone(),
            self.sales_executive.clone(),
            self.sdr_owner.clone(),
        ];
        if include_status {
            fields.push(String::new());
        }
        fields
    }
}

/// Headers + rows view of the assembled batch, for on-screen display.
#[derive(Clone, Debug)]
pub struct RecordGrid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecordGrid {
    pub fn from_records(records: &[OutputRecord], include_status: bool) -> Self {
        let column_count = if include_status {
            COLUMNS.len()
        } else {
            COLUMNS.len() - 1
        };
        Self {
            headers: COLUMNS[..column_count]
                .iter()
                .map(|h| h.to_string())
                .collect(),
            rows: records
                .iter()
                .map(|record| record.fields(include_status))
                .collect(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Merge sanitized records with the batch constants. The constants are
/// validated and sanitized here; the records are expected to already be
/// sanitized by the pipeline.
pub fn assemble(records: &[RawRecord], constants: &Constants) -> Result<Vec<OutputRecord>> {
    constants.validate()?;
    let constants = constants.sanitized();
    let contact = constants.contact_date.format("%m/%d/%Y").to_string();

    Ok(records
        .iter()
        .map(|record| OutputRecord {
            bni_chapter: constants.bni_chapter.clone(),
            address: constants.address.clone(),
            member_name: record.name.clone(),
            company: record.company.clone(),
            profession: record.profession.clone(),
            phone: record.phone.clone(),
            contact: contact.clone(),
            sales_executive: constants.sales_executive.clone(),
            sdr_owner: constants.sdr_owner.clone(),
        })
        .collect())
}

/// Serialize assembled records as tab-separated text: one line per
/// record, no header, no index column, no quoting. Sanitization already
/// removed embedded tabs/newlines/quotes, so a raw join is safe.
pub fn to_tsv(records: &[OutputRecord], include_status: bool) -> String {
    let mut output = String::new();
    for record in records {
        output.push_str(&record.fields(include_status).join("\t"));
        output.push('\n');
    }
    output
}
