// 🗂️ Output records
// Typed rows of the three output tables. Field order is column order in the
// written files, so keep it in sync with `config`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ClientRecord - one client's demographics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub client_id: i64,
    pub age: i64,
    pub job: String,
    pub marital: String,
    /// None when the source said "unknown"
    pub education: Option<String>,
    #[serde(with = "bool_field")]
    pub credit_default: bool,
    #[serde(with = "bool_field")]
    pub mortgage: bool,
}

/// CampaignRecord - contact history for one client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub client_id: i64,
    pub number_contacts: i64,
    /// Seconds
    pub contact_duration: i64,
    pub previous_campaign_contacts: i64,
    #[serde(with = "bool_field")]
    pub previous_outcome: bool,
    #[serde(with = "bool_field")]
    pub campaign_outcome: bool,
    pub last_contact_date: NaiveDate,
}

/// EconomicsRecord - macro indicators at the time of contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicsRecord {
    pub client_id: i64,
    pub cons_price_idx: f64,
    pub euribor_three_months: f64,
}

/// Boolean columns are written `True` / `False`; either spelling is read back
pub mod bool_field {
    use serde::de::{self, Deserialize, Deserializer};
    use serde::Serializer;

    pub const TRUE: &str = "True";
    pub const FALSE: &str = "False";

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { TRUE } else { FALSE })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let text = String::deserialize(deserializer)?;
        match text.as_str() {
            TRUE | "true" => Ok(true),
            FALSE | "false" => Ok(false),
            other => Err(de::Error::custom(format!("expected True or False, got {:?}", other))),
        }
    }
}
