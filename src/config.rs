// ⚙️ Configuration - fixed pipeline constants
// Every file name, marker and column grouping the pipeline uses lives here.

// ============================================================================
// FILES
// ============================================================================

/// Source file, read once per run
pub const SOURCE_FILE: &str = "bank_marketing.csv";

/// Directory holding the source file and receiving the outputs
pub const DATA_DIR: &str = env!("CARGO_MANIFEST_DIR");

// ============================================================================
// MARKERS
// ============================================================================

/// Literal "not applicable" marker; rows carrying it in a monitored column are dropped
pub const NA_SENTINEL: &str = "N/A";

/// Education category that becomes a missing value instead of being dropped
pub const UNKNOWN_EDUCATION: &str = "unknown";

/// Ground truth for yes/no columns
pub const YES: &str = "yes";

/// Ground truth for previous_outcome
pub const SUCCESS: &str = "success";

// ============================================================================
// DATES
// ============================================================================

/// The source has no year column, so every last contact is placed in this year.
/// Unverified against the source data.
pub const ASSUMED_CAMPAIGN_YEAR: i32 = 2022;

/// chrono pattern for "<Month> <day> <year>"; %b takes "Mar" as well as "March"
pub const CONTACT_DATE_FORMAT: &str = "%b %d %Y";

// ============================================================================
// TABLE SPECS
// ============================================================================

/// TableSpec - one output table: its display name, output file and source columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    /// Short name used in the confirmation line and logs
    pub name: &'static str,
    pub file_name: &'static str,
    /// Columns projected out of the source, in output order
    pub columns: &'static [&'static str],
}

pub const CLIENT: TableSpec = TableSpec {
    name: "client",
    file_name: "client.csv",
    columns: &[
        "client_id",
        "age",
        "job",
        "marital",
        "education",
        "credit_default",
        "mortgage",
    ],
};

pub const CAMPAIGN: TableSpec = TableSpec {
    name: "campaign",
    file_name: "campaign.csv",
    columns: &[
        "client_id",
        "number_contacts",
        "contact_duration",
        "previous_campaign_contacts",
        "previous_outcome",
        "campaign_outcome",
        "day",
        "month",
    ],
};

pub const ECONOMICS: TableSpec = TableSpec {
    name: "economics",
    file_name: "economics.csv",
    columns: &["client_id", "cons_price_idx", "euribor_three_months"],
};

/// Output tables in the order they are produced
pub const ALL_TABLES: [TableSpec; 3] = [CLIENT, CAMPAIGN, ECONOMICS];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_keys_on_client_id() {
        for spec in ALL_TABLES {
            assert_eq!(spec.columns[0], "client_id", "{} must start with client_id", spec.name);
        }
    }

    #[test]
    fn test_output_files_are_distinct() {
        assert_ne!(CLIENT.file_name, CAMPAIGN.file_name);
        assert_ne!(CAMPAIGN.file_name, ECONOMICS.file_name);
        assert_ne!(CLIENT.file_name, SOURCE_FILE);
    }
}
