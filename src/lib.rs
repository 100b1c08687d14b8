// Bank Marketing Splitter - Core Library
// Splits the flat bank marketing export into client, campaign and economics tables

pub mod config;
pub mod table;
pub mod cleaning;
pub mod temporal;
pub mod records;
pub mod builders;
pub mod pipeline;
pub mod logging;

// Re-export commonly used types
pub use config::{TableSpec, ALL_TABLES, CAMPAIGN, CLIENT, ECONOMICS};
pub use table::{load_csv, Cell, Table};
pub use cleaning::{bool_value, clean_na, dot_to_underscore, replace_with_missing, value_to_boolean};
pub use temporal::{contact_date, reconstruct_dates, title_case};
pub use records::{CampaignRecord, ClientRecord, EconomicsRecord};
pub use builders::{CampaignBuilder, ClientBuilder, EconomicsBuilder, TableBuilder};
pub use pipeline::{run, run_in, write_table, WrittenTable};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
