// 📋 Table - in-memory columnar view of the source file
// Ordered named columns over row-aligned cells, loaded once from CSV

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use csv::StringRecord;
use serde::de::DeserializeOwned;
use std::path::Path;

// ============================================================================
// CELL
// ============================================================================

/// Cell - one value in a table
///
/// Everything starts as `Text`; the cleaning steps turn some columns into
/// booleans, dates or missing values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    /// Absent value, written as an empty field
    Missing,
}

impl Cell {
    /// Text content, if this cell still holds raw text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Render the cell as a CSV field
    pub fn to_field(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Bool(b) => b.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Missing => String::new(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

// ============================================================================
// TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    /// Source file line of each row (header is line 1)
    lines: Vec<usize>,
}

impl Table {
    /// Create an empty table with the given header
    pub fn new(headers: Vec<String>) -> Self {
        Table {
            headers,
            rows: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Build a table from text rows (handy for tests and small fixtures)
    pub fn from_text_rows(headers: &[&str], rows: &[&[&str]]) -> Result<Self> {
        let mut table = Table::new(headers.iter().map(|h| h.to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|v| Cell::from(*v)).collect())?;
        }
        Ok(table)
    }

    /// Append a row as if it sat on the line after the previous one
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        let line = self.lines.last().map_or(2, |l| l + 1);
        self.push_row_at(line, row)
    }

    /// Append a row read from `line` of the source file
    pub fn push_row_at(&mut self, line: usize, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.headers.len() {
            return Err(anyhow!(
                "Row has {} cells but the table has {} columns",
                row.len(),
                self.headers.len()
            ));
        }
        self.rows.push(row);
        self.lines.push(line);
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Source line of the row at `index`
    pub fn line(&self, index: usize) -> usize {
        self.lines[index]
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Position of a named column; a missing column is a schema error
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!("Column '{}' not found (available: {})", name, self.headers.join(", ")))
    }

    /// All cells of a named column, top to bottom
    #[cfg(test)]
    pub fn column(&self, name: &str) -> Result<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Projection onto `columns`, in that order, preserving row order
    pub fn select(&self, columns: &[&str]) -> Result<Table> {
        let indices = columns
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>>>()
            .context("Failed to project source columns")?;

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Table {
            headers: columns.iter().map(|c| c.to_string()).collect(),
            rows,
            lines: self.lines.clone(),
        })
    }

    /// Keep only the rows for which `keep` returns true
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Cell]) -> bool,
    {
        let mut kept_lines = Vec::with_capacity(self.lines.len());
        let mut lines = std::mem::take(&mut self.lines).into_iter();
        self.rows.retain(|row| {
            let line = lines.next();
            let kept = keep(row);
            if kept {
                kept_lines.extend(line);
            }
            kept
        });
        self.lines = kept_lines;
    }

    /// Apply `f` to every cell of a named column in place
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&mut Cell),
    {
        let idx = self.column_index(name)?;
        for row in &mut self.rows {
            f(&mut row[idx]);
        }
        Ok(())
    }

    pub fn drop_columns(&mut self, names: &[&str]) -> Result<()> {
        let mut indices = names
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>>>()?;
        indices.sort_unstable();
        indices.dedup();

        // Highest index first so earlier positions stay valid
        for &idx in indices.iter().rev() {
            self.headers.remove(idx);
            for row in &mut self.rows {
                row.remove(idx);
            }
        }
        Ok(())
    }

    /// Append a column at the end; `values` must have one cell per row
    pub fn push_column(&mut self, name: &str, values: Vec<Cell>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(anyhow!(
                "Column '{}' has {} values but the table has {} rows",
                name,
                values.len(),
                self.rows.len()
            ));
        }
        if self.headers.iter().any(|h| h == name) {
            return Err(anyhow!("Column '{}' already exists", name));
        }

        self.headers.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    pub fn header_record(&self) -> StringRecord {
        StringRecord::from(self.headers.clone())
    }

    fn row_record(row: &[Cell]) -> StringRecord {
        row.iter().map(Cell::to_field).collect()
    }

    /// Deserialize every row into a typed record, matching fields by header name.
    ///
    /// This is where numeric columns get checked: a value that does not parse
    /// as the record's field type fails the whole conversion.
    pub fn to_records<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let headers = self.header_record();
        let mut records = Vec::with_capacity(self.rows.len());

        for (index, row) in self.rows.iter().enumerate() {
            let record = Self::row_record(row);
            match record.deserialize(Some(&headers)) {
                Ok(typed) => records.push(typed),
                Err(err) => return Err(self.describe_type_error(index, err)),
            }
        }

        Ok(records)
    }

    /// Turn a csv deserialize error into one naming the source line and column
    fn describe_type_error(&self, index: usize, err: csv::Error) -> anyhow::Error {
        let line = self.lines[index];

        if let csv::ErrorKind::Deserialize { err: de, .. } = err.kind() {
            let column = de.field().map(|i| i as usize).filter(|&i| i < self.headers.len());
            if let Some(idx) = column {
                return anyhow!(
                    "Line {}: column '{}' has invalid value {:?}: {}",
                    line,
                    self.headers[idx],
                    self.rows[index][idx].to_field(),
                    de.kind()
                );
            }
        }

        anyhow::Error::new(err).context(format!("Line {} has a value of the wrong type", line))
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load a comma-separated file with a header row; every cell is read as text
pub fn load_csv(csv_path: &Path) -> Result<Table> {
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read header of {}", csv_path.display()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut table = Table::new(headers);

    for (line_num, result) in rdr.records().enumerate() {
        let record = result.with_context(|| {
            format!("Failed to parse CSV line {} in {}", line_num + 2, csv_path.display())
        })?;
        let line = record
            .position()
            .map_or(line_num + 2, |pos| pos.line() as usize);
        table.push_row_at(line, record.iter().map(Cell::from).collect())?;
    }

    Ok(table)
}
