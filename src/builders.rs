// 🏗️ Table builders
// Each builder projects the source onto its columns and runs the cleaning
// steps for that table.

use crate::cleaning::{clean_na, dot_to_underscore, replace_with_missing, value_to_boolean};
use crate::config::{
    TableSpec, ASSUMED_CAMPAIGN_YEAR, CAMPAIGN, CLIENT, ECONOMICS, SUCCESS, UNKNOWN_EDUCATION, YES,
};
use crate::records::{CampaignRecord, ClientRecord, EconomicsRecord};
use crate::table::Table;
use crate::temporal::reconstruct_dates;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

// ============================================================================
// CORE TRAIT
// ============================================================================

/// TableBuilder - turns the raw source table into one cleaned output table
pub trait TableBuilder {
    /// Typed row of the output table
    type Record: Serialize + DeserializeOwned;

    /// Name, output file and source columns of this table
    fn spec(&self) -> TableSpec;

    /// Run the cleaning steps on a fresh projection of `source`
    fn build(&self, source: &Table) -> Result<Table>;

    /// Build the table and type-check every row
    fn records(&self, source: &Table) -> Result<(Table, Vec<Self::Record>)> {
        let spec = self.spec();
        let table = self
            .build(source)
            .with_context(|| format!("Failed to build {} table", spec.name))?;
        let records = table
            .to_records()
            .with_context(|| format!("Invalid value in {} table", spec.name))?;

        info!(
            table = spec.name,
            rows_in = source.height(),
            rows_out = table.height(),
            dropped = source.height() - table.height(),
            "table built"
        );
        Ok((table, records))
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

/// Client demographics
pub struct ClientBuilder;

impl TableBuilder for ClientBuilder {
    type Record = ClientRecord;

    fn spec(&self) -> TableSpec {
        CLIENT
    }

    fn build(&self, source: &Table) -> Result<Table> {
        let mut table = source.select(CLIENT.columns)?;
        clean_na(&mut table, &["client_id", "age", "marital"])?;
        dot_to_underscore(&mut table, &["job", "education"])?;
        value_to_boolean(&mut table, &[("credit_default", YES), ("mortgage", YES)])?;
        replace_with_missing(&mut table, "education", UNKNOWN_EDUCATION)?;
        Ok(table)
    }
}

/// Campaign contacts and outcomes
pub struct CampaignBuilder;

impl TableBuilder for CampaignBuilder {
    type Record = CampaignRecord;

    fn spec(&self) -> TableSpec {
        CAMPAIGN
    }

    fn build(&self, source: &Table) -> Result<Table> {
        let mut table = source.select(CAMPAIGN.columns)?;
        clean_na(
            &mut table,
            &[
                "client_id",
                "number_contacts",
                "contact_duration",
                "previous_campaign_contacts",
            ],
        )?;
        value_to_boolean(
            &mut table,
            &[("previous_outcome", SUCCESS), ("campaign_outcome", YES)],
        )?;
        reconstruct_dates(&mut table, "day", "month", "last_contact_date", ASSUMED_CAMPAIGN_YEAR)?;
        table.drop_columns(&["day", "month"])?;
        Ok(table)
    }
}

/// Economic indicators
pub struct EconomicsBuilder;

impl TableBuilder for EconomicsBuilder {
    type Record = EconomicsRecord;

    fn spec(&self) -> TableSpec {
        ECONOMICS
    }

    fn build(&self, source: &Table) -> Result<Table> {
        let mut table = source.select(ECONOMICS.columns)?;
        clean_na(&mut table, &["client_id", "cons_price_idx", "euribor_three_months"])?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use chrono::{Datelike, NaiveDate};

    const HEADER: &[&str] = &[
        "client_id",
        "age",
        "job",
        "marital",
        "education",
        "credit_default",
        "mortgage",
        "month",
        "day",
        "contact_duration",
        "number_contacts",
        "previous_campaign_contacts",
        "previous_outcome",
        "cons_price_idx",
        "euribor_three_months",
        "campaign_outcome",
    ];

    fn source(rows: &[&[&str]]) -> Table {
        Table::from_text_rows(HEADER, rows).unwrap()
    }

    #[test]
    fn test_client_scenario() {
        let table = source(&[&[
            "1", "35", "admin.", "married", "unknown", "yes", "no", "may", "15", "261", "1", "0",
            "nonexistent", "93.994", "4.857", "no",
        ]]);

        let (built, records) = ClientBuilder.records(&table).unwrap();

        assert_eq!(built.headers(), CLIENT.columns);
        assert_eq!(
            records,
            vec![ClientRecord {
                client_id: 1,
                age: 35,
                job: "admin_".to_string(),
                marital: "married".to_string(),
                education: None,
                credit_default: true,
                mortgage: false,
            }]
        );
    }

    #[test]
    fn test_client_drops_sentinel_rows() {
        let table = source(&[
            &[
                "1", "N/A", "technician", "single", "high.school", "no", "yes", "jun", "3", "120",
                "2", "0", "failure", "94.1", "1.2", "no",
            ],
            &[
                "2", "44", "services", "N/A", "basic.9y", "no", "no", "jun", "4", "90", "1", "1",
                "success", "94.1", "1.2", "yes",
            ],
            &[
                "3", "29", "student", "single", "university.degree", "unknown", "yes", "jul",
                "5", "300", "3", "0", "nonexistent", "93.9", "4.9", "yes",
            ],
        ]);

        let (built, records) = ClientBuilder.records(&table).unwrap();

        assert_eq!(built.height(), 1);
        assert_eq!(records[0].client_id, 3);
        assert_eq!(records[0].education.as_deref(), Some("university_degree"));
        // "unknown" is not the ground truth
        assert!(!records[0].credit_default);
        assert!(records[0].mortgage);
    }

    #[test]
    fn test_campaign_builds_date_and_drops_parts() {
        let table = source(&[&[
            "7", "35", "admin.", "married", "unknown", "no", "no", "may", "15", "261", "2", "1",
            "success", "93.994", "4.857", "yes",
        ]]);

        let (built, records) = CampaignBuilder.records(&table).unwrap();

        assert!(!built.headers().iter().any(|h| h == "day" || h == "month"));
        assert_eq!(built.headers().last().unwrap(), "last_contact_date");

        let record = &records[0];
        assert_eq!(record.client_id, 7);
        assert_eq!(record.number_contacts, 2);
        assert_eq!(record.contact_duration, 261);
        assert_eq!(record.previous_campaign_contacts, 1);
        assert!(record.previous_outcome);
        assert!(record.campaign_outcome);
        assert_eq!(
            record.last_contact_date,
            NaiveDate::from_ymd_opt(2022, 5, 15).unwrap()
        );
        assert_eq!(record.last_contact_date.year(), ASSUMED_CAMPAIGN_YEAR);
    }

    #[test]
    fn test_campaign_bad_month_fails() {
        let table = source(&[&[
            "7", "35", "admin.", "married", "unknown", "no", "no", "xyz", "15", "261", "2", "1",
            "success", "93.994", "4.857", "yes",
        ]]);

        let err = CampaignBuilder.records(&table).unwrap_err();
        assert!(format!("{:#}", err).contains("campaign"));
    }

    #[test]
    fn test_campaign_sentinel_row_skips_date_parsing() {
        // Row is filtered before its month is ever parsed
        let table = source(&[&[
            "N/A", "35", "admin.", "married", "unknown", "no", "no", "xyz", "15", "261", "2", "1",
            "success", "93.994", "4.857", "yes",
        ]]);

        let (built, records) = CampaignBuilder.records(&table).unwrap();
        assert_eq!(built.height(), 0);
        assert!(records.is_empty());
    }

    #[test]
    fn test_economics_excludes_sentinel() {
        let table = source(&[
            &[
                "1", "35", "admin.", "married", "unknown", "no", "no", "may", "15", "261", "2",
                "1", "success", "N/A", "4.857", "yes",
            ],
            &[
                "2", "35", "admin.", "married", "unknown", "no", "no", "may", "15", "261", "2",
                "1", "success", "92.893", "1.313", "yes",
            ],
        ]);

        let (built, records) = EconomicsBuilder.records(&table).unwrap();

        assert_eq!(built.height(), 1);
        assert_eq!(records[0].client_id, 2);
        assert!((records[0].cons_price_idx - 92.893).abs() < 1e-9);
        assert!((records[0].euribor_three_months - 1.313).abs() < 1e-9);
    }

    #[test]
    fn test_builders_leave_source_untouched() {
        let table = source(&[&[
            "1", "35", "admin.", "married", "unknown", "yes", "no", "may", "15", "261", "1", "0",
            "nonexistent", "93.994", "4.857", "no",
        ]]);
        let before = table.clone();

        ClientBuilder.build(&table).unwrap();
        CampaignBuilder.build(&table).unwrap();

        assert_eq!(table, before);
        assert_eq!(table.rows()[0][2], Cell::from("admin."));
    }

    #[test]
    fn test_missing_source_column_is_fatal() {
        let table = Table::from_text_rows(&["client_id", "age"], &[&["1", "35"]]).unwrap();
        assert!(EconomicsBuilder.build(&table).is_err());
    }
}
