// src/data_input/reference_path.rs

use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{Result, TraceError};

/// Commanded path the robot was asked to follow, in meters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferencePath {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl ReferencePath {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// First point in the XY plane, if any.
    pub fn origin_xy(&self) -> Option<(f64, f64)> {
        Some((*self.x.first()?, *self.y.first()?))
    }

    pub fn xy_points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.y.iter().copied()).collect()
    }
}

/// Parses a whitespace-separated numeric table. Columns 0-2 are x, y, z; extra columns are ignored.
/// Blank lines and `#` comments are skipped.
pub fn parse_reference_path(content: &str) -> Result<ReferencePath> {
    let mut path = ReferencePath::default();

    for (line_index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let line_number = line_index + 1;
        let columns: Vec<f64> = trimmed
            .split_whitespace()
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|e| TraceError::parse(line_number, format!("'{field}': {e}")))
            })
            .collect::<Result<_>>()?;

        if columns.len() < 3 {
            return Err(TraceError::parse(
                line_number,
                format!("expected 3 columns (x y z), found {}", columns.len()),
            ));
        }

        path.x.push(columns[0]);
        path.y.push(columns[1]);
        path.z.push(columns[2]);
    }

    if path.is_empty() {
        return Err(TraceError::EmptyReferencePath);
    }
    Ok(path)
}

/// Loads the reference path file at `path`.
pub fn load_reference_path(path: &Path) -> Result<ReferencePath> {
    let content = fs::read_to_string(path).map_err(|e| TraceError::from_io(path, e))?;
    let reference = parse_reference_path(&content)?;
    info!(points = reference.len(), "Loaded reference path {}", path.display());
    Ok(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_columns_and_skips_comments() {
        let content = "# x y z\n0.0 0.5 0.1\n\n  0.1\t0.6   0.1  9.9\n";
        let path = parse_reference_path(content).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.x, vec![0.0, 0.1]);
        assert_eq!(path.y, vec![0.5, 0.6]);
        assert_eq!(path.z, vec![0.1, 0.1]);
        assert_eq!(path.origin_xy(), Some((0.0, 0.5)));
    }

    #[test]
    fn short_row_is_rejected_with_line_number() {
        let err = parse_reference_path("0 0 0\n1 2\n").unwrap_err();
        assert!(matches!(err, TraceError::Parse { line: 2, .. }));
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let err = parse_reference_path("0 abc 0\n").unwrap_err();
        assert!(matches!(err, TraceError::Parse { line: 1, .. }));
    }

    #[test]
    fn empty_table_is_an_error() {
        let err = parse_reference_path("# nothing\n\n").unwrap_err();
        assert!(matches!(err, TraceError::EmptyReferencePath));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_reference_path(Path::new("/nonexistent/simplePath.txt")).unwrap_err();
        assert!(matches!(err, TraceError::FileNotFound { .. }));
    }
}
