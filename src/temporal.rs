// ⏰ Date reconstruction
// The source splits the last contact into `day` and `month` text fields with
// no year. These helpers rebuild a single date in an assumed year.

use crate::config::CONTACT_DATE_FORMAT;
use crate::table::{Cell, Table};
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

/// "may" / "MAY" / "mAy" → "May"
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Day of month from an integer ("15") or whole numeric ("15.0") string
fn parse_day(day: &str) -> Result<u32> {
    let day = day.trim();
    if let Ok(n) = day.parse::<u32>() {
        return Ok(n);
    }

    match day.parse::<f64>() {
        Ok(n) if n.fract() == 0.0 && n >= 0.0 && n <= u32::MAX as f64 => Ok(n as u32),
        _ => Err(anyhow!("'{}' is not a day of month", day)),
    }
}

/// Build the date `<Month> <day> <year>` from raw day and month text.
///
/// Month may be a three-letter abbreviation or a full name, in any case.
/// Fails when the month is not recognised or the day does not exist in it.
pub fn contact_date(day: &str, month: &str, year: i32) -> Result<NaiveDate> {
    let day = parse_day(day)?;
    let text = format!("{} {} {}", title_case(month.trim()), day, year);

    NaiveDate::parse_from_str(&text, CONTACT_DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}'", text))
}

/// Add `target` as a date column computed from the `day` and `month` columns.
///
/// The source columns are left in place; callers drop them once the date exists.
/// The first bad row aborts the whole table.
pub fn reconstruct_dates(
    table: &mut Table,
    day_column: &str,
    month_column: &str,
    target: &str,
    year: i32,
) -> Result<()> {
    let day_idx = table.column_index(day_column)?;
    let month_idx = table.column_index(month_column)?;

    let mut dates = Vec::with_capacity(table.height());
    for (index, row) in table.rows().iter().enumerate() {
        let day = row[day_idx].to_field();
        let month = row[month_idx].to_field();

        let date = contact_date(&day, &month, year).with_context(|| {
            format!(
                "Failed to build {} from line {} ({}={:?}, {}={:?})",
                target,
                table.line(index),
                day_column,
                day,
                month_column,
                month
            )
        })?;
        dates.push(Cell::Date(date));
    }

    table.push_column(target, dates)
}
