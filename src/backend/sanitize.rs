//! Defensive cell cleaning for spreadsheet paste targets.
//!
//! Every value that ends up in the output grid passes through
//! [`sanitize_cell`]. The transform neutralizes formula injection
//! (a leading `=`, `+`, `-` or `@` makes Sheets/Excel evaluate the
//! cell) and strips the characters that would break a raw tab-join:
//! tabs, newlines and double quotes.

/// Canonical placeholder for missing or blank data.
pub const SENTINEL: &str = "N/A";

/// Spellings of "no data" that collapse to the sentinel. Case-sensitive
/// on purpose: "None" and "nan"/"NaN" are what Python-based assistants
/// actually emit, while e.g. "none" is a plausible profession fragment.
const SENTINEL_ALIASES: [&str; 5] = ["nan", "None", "N/A", "null", "NaN"];

/// Leading characters a spreadsheet treats as a formula/number trigger.
const FORMULA_TRIGGERS: [char; 3] = ['+', '-', '@'];

/// Sanitize one cell value. Pure and deterministic.
///
/// Steps, in order: trim, collapse blank/alias values to `"N/A"`,
/// replace CR/LF/TAB with spaces, strip one leading `=`, prefix an
/// apostrophe when the value still starts with `+`/`-`/`@`, and drop
/// every double quote.
///
/// Idempotent with one known exception: a value that gained the
/// apostrophe prefix no longer starts with a trigger character, so a
/// second pass leaves it unchanged rather than double-prefixing.
pub fn sanitize_cell(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() || SENTINEL_ALIASES.contains(&trimmed) {
        return SENTINEL.to_string();
    }

    let mut cleaned: String = trimmed
        .chars()
        .map(|c| if matches!(c, '\r' | '\n' | '\t') { ' ' } else { c })
        .collect();

    if let Some(rest) = cleaned.strip_prefix('=') {
        cleaned = rest.trim().to_string();
    }

    if cleaned.starts_with(FORMULA_TRIGGERS) {
        cleaned.insert(0, '\'');
    }

    cleaned.retain(|c| c != '"');
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(sanitize_cell("  Alice Jones  "), "Alice Jones");
    }

    #[test]
    fn test_blank_and_aliases_become_sentinel() {
        for input in ["", "   ", "nan", "None", "N/A", "null", "NaN"] {
            assert_eq!(sanitize_cell(input), "N/A", "input: {:?}", input);
        }
    }

    #[test]
    fn test_alias_match_is_case_sensitive() {
        // "none" is not in the alias list, only "None" is
        assert_eq!(sanitize_cell("none"), "none");
        assert_eq!(sanitize_cell("NULL"), "NULL");
    }

    #[test]
    fn test_strips_leading_equals() {
        assert_eq!(sanitize_cell("=SUM(A1)"), "SUM(A1)");
        assert_eq!(sanitize_cell("=  HYPERLINK(B2)"), "HYPERLINK(B2)");
    }

    #[test]
    fn test_prefixes_apostrophe_on_triggers() {
        assert_eq!(sanitize_cell("+1-555-1234"), "'+1-555-1234");
        assert_eq!(sanitize_cell("-42"), "'-42");
        assert_eq!(sanitize_cell("@handle"), "'@handle");
    }

    #[test]
    fn test_equals_then_trigger_gets_apostrophe() {
        // "=+1" -> strip "=" -> "+1" -> still a trigger -> "'+1"
        assert_eq!(sanitize_cell("=+1"), "'+1");
    }

    #[test]
    fn test_replaces_tabs_and_newlines() {
        assert_eq!(sanitize_cell("Acme\tCorp"), "Acme Corp");
        assert_eq!(sanitize_cell("line1\nline2"), "line1 line2");
        assert_eq!(sanitize_cell("a\r\nb"), "a  b");
        let out = sanitize_cell("x\ty\nz\r");
        assert!(!out.contains('\t') && !out.contains('\n') && !out.contains('\r'));
    }

    #[test]
    fn test_removes_double_quotes() {
        assert_eq!(sanitize_cell("\"Quoted\" Name"), "Quoted Name");
    }

    #[test]
    fn test_idempotent_on_plain_values() {
        for input in ["Alice", "Acme Corp", "555-0100 ext 2", "N/A"] {
            let once = sanitize_cell(input);
            assert_eq!(sanitize_cell(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_apostrophe_prefix_is_stable_on_second_pass() {
        let once = sanitize_cell("+1-555-1234");
        assert_eq!(once, "'+1-555-1234");
        // the apostrophe masks the "+", so a second pass changes nothing
        assert_eq!(sanitize_cell(&once), once);
    }
}
