//! Listing line format: `<fullPath>\t<sizeBytes>\t<signature>`

use crate::error::LoadError;

/// One parsed listing line, borrowing from the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLine<'a> {
    pub path: &'a str,
    pub size: u64,
    pub signature: &'a str,
}

impl<'a> ListingLine<'a> {
    /// Parse a line that has already been trimmed. `line_no` is 1-based.
    pub fn parse(line_no: usize, line: &'a str) -> Result<Self, LoadError> {
        let parts: Vec<&str> = line.split('\t').collect();
        let [path, size, signature] = parts.as_slice() else {
            return Err(LoadError::BadColumnCount {
                line: line_no,
                columns: parts.len(),
                text: line.to_string(),
            });
        };
        let size = size.parse::<u64>().map_err(|source| LoadError::BadSize {
            line: line_no,
            value: size.to_string(),
            source,
        })?;
        Ok(Self {
            path: *path,
            size,
            signature: *signature,
        })
    }
}

/// Render a listing line (without the trailing newline)
pub fn format_line(path: &str, size: u64, signature: &str) -> String {
    format!("{}\t{}\t{}", path, size, signature)
}

/// Trim the characters a listing line may carry around its content
pub(crate) fn trim_line(line: &str) -> &str {
    line.trim_matches(|c| c == ' ' || c == '\r' || c == '\n')
}
