use csv::{ReaderBuilder, Trim};

use super::error::{PipelineError, Result};
use super::sanitize::{SENTINEL, sanitize_cell};

/// Every parsed row is normalized to exactly this many fields.
pub const FIELD_COUNT: usize = 4;

/// First-field labels that mark a row as a header to be discarded.
const HEADER_LABELS: [&str; 3] = ["name", "nome", "member name"];

const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// How many lines the delimiter sniffer samples.
const SNIFF_LINES: usize = 10;

/// One lead row as pasted by the user, normalized to four fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRecord {
    pub name: String,
    pub company: String,
    pub profession: String,
    pub phone: String,
}

impl RawRecord {
    /// Build a record from however many fields a row produced.
    /// Missing trailing fields are filled with `"N/A"`; extras beyond
    /// the fourth are discarded.
    pub fn from_fields(mut fields: Vec<String>) -> Self {
        fields.resize_with(FIELD_COUNT, || SENTINEL.to_string());
        let mut fields = fields.into_iter();
        let mut next = move || fields.next().unwrap_or_default();
        Self {
            name: next(),
            company: next(),
            profession: next(),
            phone: next(),
        }
    }

    /// A copy with every field passed through the cell sanitizer.
    pub fn sanitized(&self) -> Self {
        Self {
            name: sanitize_cell(&self.name),
            company: sanitize_cell(&self.company),
            profession: sanitize_cell(&self.profession),
            phone: sanitize_cell(&self.phone),
        }
    }
}

/// Parser for the raw delimited blob an AI assistant produces.
pub struct LeadParser {
    delimiter: u8,
}

impl LeadParser {
    /// Create a parser with the delimiter sniffed from the input.
    pub fn sniff(input: &str) -> Self {
        Self {
            delimiter: detect_delimiter(input),
        }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Parse the blob into normalized records, dropping a leading
    /// header row when one is present. Empty input yields an empty Vec.
    pub fn parse(&self, input: &str) -> Result<Vec<RawRecord>> {
        if input.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input.as_bytes());

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                PipelineError::Parse(format!("failed to split row {}: {}", index + 1, e))
            })?;
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }

        if rows
            .first()
            .and_then(|row| row.first())
            .is_some_and(|field| is_header_label(field))
        {
            rows.remove(0);
        }

        Ok(rows.into_iter().map(RawRecord::from_fields).collect())
    }
}

fn is_header_label(field: &str) -> bool {
    let field = field.trim();
    HEADER_LABELS
        .iter()
        .any(|label| field.eq_ignore_ascii_case(label))
}

/// Pick the most plausible field delimiter by scoring each candidate on
/// how consistently it appears across the first few non-blank lines
/// (mean count divided by one plus the standard deviation). Comma wins
/// ties and degenerate input.
pub fn detect_delimiter(input: &str) -> u8 {
    let sample: Vec<&str> = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();

    let mut best_delimiter = b',';
    let mut best_score = 0.0f32;

    for &candidate in &DELIMITER_CANDIDATES {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| line.bytes().filter(|&b| b == candidate).count())
            .collect();
        if counts.is_empty() {
            continue;
        }

        let avg = counts.iter().sum::<usize>() as f32 / counts.len() as f32;
        let variance = counts
            .iter()
            .map(|&c| (c as f32 - avg).powi(2))
            .sum::<f32>()
            / counts.len() as f32;
        let score = avg / (1.0 + variance.sqrt());

        if score > best_score {
            best_score = score;
            best_delimiter = candidate;
        }
    }

    best_delimiter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(detect_delimiter("a\tb\tc"), b'\t');
        assert_eq!(detect_delimiter("a|b|c\nd|e|f"), b'|');
    }

    #[test]
    fn test_detect_delimiter_defaults_to_comma() {
        assert_eq!(detect_delimiter(""), b',');
        assert_eq!(detect_delimiter("just one plain line"), b',');
    }

    #[test]
    fn test_detect_delimiter_prefers_consistency() {
        // one stray comma, but semicolons split every line the same way
        let input = "Alice;Acme, Inc;Lawyer;555\nBob;Beta;Doctor;556";
        assert_eq!(detect_delimiter(input), b';');
    }

    #[test]
    fn test_parse_semicolon_rows() {
        let input = "Alice;Acme;Lawyer;555-0100\nBob;Beta;Doctor;555-0101";
        let parser = LeadParser::sniff(input);
        assert_eq!(parser.delimiter(), b';');
        let records = parser.parse(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Alice");
        assert_eq!(records[0].phone, "555-0100");
        assert_eq!(records[1].company, "Beta");
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let input = "Alice;Acme";
        let records = LeadParser::with_delimiter(b';').parse(input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].profession, "N/A");
        assert_eq!(records[0].phone, "N/A");
    }

    #[test]
    fn test_parse_truncates_long_rows() {
        let input = "Alice;Acme;Lawyer;555-0100;extra;more";
        let records = LeadParser::with_delimiter(b';').parse(input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].phone, "555-0100");
    }

    #[test]
    fn test_parse_drops_header_row() {
        for header in ["Name", "name", "NOME", "Member Name", " member name "] {
            let input = format!("{};Company;Profession;Phone\nAlice;Acme;Lawyer;555", header);
            let records = LeadParser::with_delimiter(b';').parse(&input).unwrap();
            assert_eq!(records.len(), 1, "header: {:?}", header);
            assert_eq!(records[0].name, "Alice");
        }
    }

    #[test]
    fn test_parse_keeps_non_header_first_row() {
        let input = "Nora;Acme;Lawyer;555";
        let records = LeadParser::with_delimiter(b';').parse(input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Nora");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(LeadParser::sniff("").parse("").unwrap().is_empty());
        assert!(LeadParser::sniff("  \n  ").parse("  \n  ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_quoted_field_with_delimiter() {
        let input = "\"Jones, Alice\",Acme,Lawyer,555";
        let records = LeadParser::with_delimiter(b',').parse(input).unwrap();
        assert_eq!(records[0].name, "Jones, Alice");
    }

    #[test]
    fn test_sanitized_record() {
        let record = RawRecord::from_fields(vec![
            "  Alice ".to_string(),
            "=Acme".to_string(),
            "".to_string(),
            "+1-555".to_string(),
        ]);
        let clean = record.sanitized();
        assert_eq!(clean.name, "Alice");
        assert_eq!(clean.company, "Acme");
        assert_eq!(clean.profession, "N/A");
        assert_eq!(clean.phone, "'+1-555");
    }
}
