// 🧹 Cleaning primitives
// Column-wise steps shared by the table builders: sentinel filtering,
// text normalization and categorical → boolean mapping.

use crate::config::NA_SENTINEL;
use crate::table::{Cell, Table};
use anyhow::Result;
use tracing::debug;

// ============================================================================
// NULL FILTER
// ============================================================================

/// Drop every row holding the "N/A" sentinel in any of `columns`.
///
/// Columns are applied one after another, so the result is the same for any
/// column order. Returns the number of rows dropped.
pub fn clean_na(table: &mut Table, columns: &[&str]) -> Result<usize> {
    let before = table.height();

    for column in columns {
        let idx = table.column_index(column)?;
        let height = table.height();

        table.retain_rows(|row| row[idx].as_text() != Some(NA_SENTINEL));

        debug!(column, dropped = height - table.height(), "sentinel filter");
    }

    Ok(before - table.height())
}

// ============================================================================
// VALUE NORMALIZER
// ============================================================================

/// Replace every literal "." with "_" in the text of `columns`
pub fn dot_to_underscore(table: &mut Table, columns: &[&str]) -> Result<()> {
    for column in columns {
        table.map_column(column, |cell| {
            if let Cell::Text(s) = cell {
                if s.contains('.') {
                    *s = s.replace('.', "_");
                }
            }
        })?;
    }
    Ok(())
}

/// Turn cells exactly equal to `value` into missing values.
/// Returns how many cells were replaced.
pub fn replace_with_missing(table: &mut Table, column: &str, value: &str) -> Result<usize> {
    let mut replaced = 0;
    table.map_column(column, |cell| {
        if cell.as_text() == Some(value) {
            *cell = Cell::Missing;
            replaced += 1;
        }
    })?;

    debug!(column, value, replaced, "replaced with missing");
    Ok(replaced)
}

// ============================================================================
// BOOLEAN MAPPER
// ============================================================================

/// true only on an exact match; there is no third state
pub fn bool_value(value: &str, ground_truth: &str) -> bool {
    value == ground_truth
}

/// Map each `(column, ground_truth)` pair to a boolean column.
///
/// Anything other than the ground truth, unexpected categories included,
/// becomes false.
pub fn value_to_boolean(table: &mut Table, pairs: &[(&str, &str)]) -> Result<()> {
    for &(column, ground_truth) in pairs {
        table.map_column(column, |cell| {
            let flag = cell
                .as_text()
                .map(|v| bool_value(v, ground_truth))
                .unwrap_or(false);
            *cell = Cell::Bool(flag);
        })?;
    }
    Ok(())
}
