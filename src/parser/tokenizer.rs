//! Line-level tokenizing of the trend CSV.
//!
//! The dataset is not RFC 4180: cells carry loose quotes and bracketed
//! citation groups like `[3, 4]`, so a comma only ends a cell when the
//! quotes seen so far are balanced and no bracket is open.

use once_cell::sync::Lazy;
use regex::Regex;

static INDUSTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^,]+),").expect("industry pattern is valid"));

/// Year labels from the header row: every `"` removed, split on commas,
/// first column (the row-label column) skipped.
pub fn parse_header(line: &str) -> Vec<String> {
    let cleaned = line.replace('"', "");
    cleaned.split(',').skip(1).map(str::to_string).collect()
}

/// A data row split into its label and raw cells
#[derive(Debug, Clone, PartialEq)]
pub struct RowTokens {
    pub industry: String,
    pub cells: Vec<String>,
}

/// Splits one data row. Returns `None` when the row has no `label,` prefix.
pub fn tokenize_row(line: &str) -> Option<RowTokens> {
    let line = strip_outer_quote(line);
    let captures = INDUSTRY_RE.captures(line)?;
    let label = captures.get(1)?;
    let industry = label.as_str().trim().to_string();

    // Skip the label and the comma that ended it
    let content = &line[label.end() + 1..];

    Some(RowTokens {
        industry,
        cells: split_cells(content),
    })
}

/// Removes at most one `"` from each end of the line.
fn strip_outer_quote(line: &str) -> &str {
    let line = line.strip_prefix('"').unwrap_or(line);
    line.strip_suffix('"').unwrap_or(line)
}

#[derive(Debug, Default)]
struct CellScanner {
    quote_count: usize,
    bracket_depth: i32,
    buffer: String,
    cells: Vec<String>,
}

impl CellScanner {
    fn feed(&mut self, ch: char) {
        match ch {
            '"' => self.quote_count += 1,
            '[' => self.bracket_depth += 1,
            ']' => self.bracket_depth -= 1,
            ',' if self.at_top_level() => {
                self.cells.push(self.buffer.trim().to_string());
                self.buffer.clear();
                return;
            }
            _ => {}
        }
        self.buffer.push(ch);
    }

    fn at_top_level(&self) -> bool {
        self.quote_count % 2 == 0 && self.bracket_depth == 0
    }

    fn finish(mut self) -> Vec<String> {
        let last = self.buffer.trim();
        if !last.is_empty() {
            self.cells.push(last.to_string());
        }
        self.cells
    }
}

/// Splits the cell section of a row on top-level commas. Interior empty
/// cells are kept so later cells stay aligned with their years.
pub fn split_cells(content: &str) -> Vec<String> {
    let mut scanner = CellScanner::default();
    for ch in content.chars() {
        scanner.feed(ch);
    }
    scanner.finish()
}
