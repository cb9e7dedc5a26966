use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Column separator for stream detection: runs of 2+ spaces, or tabs
    static ref COLUMN_SEPARATOR: Regex = Regex::new(r"\s{2,}|\t+").unwrap();

    // Lines built entirely from ruling characters
    static ref RULE_CHARS: Regex = Regex::new(r"^[-=+|\s]+$").unwrap();
}

/// A detected table: rectangular grid of optional cell text (None = blank)
pub type Grid = Vec<Vec<Option<String>>>;

/// Table detection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Border-based detection: cells delimited by ruling lines (`|`, `+--+`)
    #[default]
    Lattice,
    /// Heuristic detection: cell boundaries inferred from text alignment
    Stream,
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lattice" => Ok(Strategy::Lattice),
            "stream" => Ok(Strategy::Stream),
            other => Err(format!("unknown extraction strategy: {other}")),
        }
    }
}

/// Is this line a horizontal rule (`----`, `+----+----+`, `===`)?
fn is_rule_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && RULE_CHARS.is_match(trimmed)
        && trimmed.chars().filter(|c| matches!(c, '-' | '=')).count() >= 3
}

pub struct TableDetector {
    strategy: Strategy,
    min_rows: usize,
    min_cols: usize,
}

impl Default for TableDetector {
    fn default() -> Self {
        Self::new(Strategy::default(), 2, 2)
    }
}

impl TableDetector {
    pub fn new(strategy: Strategy, min_rows: usize, min_cols: usize) -> Self {
        Self {
            strategy,
            min_rows,
            min_cols,
        }
    }

    /// Detect all tables in a page's text layer, in reading order
    pub fn detect_tables(&self, text: &str) -> Vec<Grid> {
        let lines: Vec<&str> = text.lines().collect();
        let mut tables = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            if let Some((rows, end_line)) = self.extract_table_at(&lines, i) {
                i = end_line + 1;
                tables.push(rows);
            } else {
                i += 1;
            }
        }

        tables
    }

    fn extract_table_at(&self, lines: &[&str], start: usize) -> Option<(Grid, usize)> {
        let mut rows: Grid = Vec::new();
        let mut expected_cols = None;
        let mut end_line = start;

        for (idx, line) in lines.iter().enumerate().skip(start) {
            let line = line.trim_end();

            if line.trim().is_empty() {
                if rows.is_empty() {
                    // Not inside a table yet, skip ahead
                    continue;
                }
                // Blank line ends the table
                break;
            }

            if is_rule_line(line) {
                // Ruling lines above, below, or between rows
                continue;
            }

            match self.parse_row(line) {
                Some(cells) => {
                    match expected_cols {
                        // Column count changed, table ends here
                        Some(expected) if cells.len() != expected => break,
                        None => expected_cols = Some(cells.len()),
                        _ => {}
                    }
                    rows.push(cells);
                    end_line = idx;
                }
                None => {
                    if rows.is_empty() {
                        return None;
                    }
                    break;
                }
            }
        }

        if rows.len() >= self.min_rows {
            Some((rows, end_line))
        } else {
            None
        }
    }

    fn parse_row(&self, line: &str) -> Option<Vec<Option<String>>> {
        match self.strategy {
            Strategy::Lattice => self.parse_lattice_row(line),
            Strategy::Stream => self.parse_stream_row(line),
        }
    }

    /// Parse a row delimited by `|` cell borders. Blank cells are preserved.
    fn parse_lattice_row(&self, line: &str) -> Option<Vec<Option<String>>> {
        let trimmed = line.trim();
        if !trimmed.contains('|') {
            return None;
        }

        let mut parts: Vec<&str> = trimmed.split('|').collect();
        // Boundary pipes produce empty leading/trailing segments
        if trimmed.starts_with('|') {
            parts.remove(0);
        }
        if trimmed.ends_with('|') && !parts.is_empty() {
            parts.pop();
        }

        let cells: Vec<Option<String>> = parts
            .iter()
            .map(|s| {
                let cell = s.trim();
                if cell.is_empty() {
                    None
                } else {
                    Some(cell.to_string())
                }
            })
            .collect();

        if cells.len() >= self.min_cols {
            Some(cells)
        } else {
            None
        }
    }

    /// Parse a row whose columns are separated by whitespace alignment.
    fn parse_stream_row(&self, line: &str) -> Option<Vec<Option<String>>> {
        let parts: Vec<&str> = COLUMN_SEPARATOR
            .split(line.trim())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() >= self.min_cols {
            Some(parts.iter().map(|s| Some((*s).to_string())).collect())
        } else {
            None
        }
    }
}
