use serde::{Deserialize, Deserializer, Serialize};

const NOT_AVAILABLE: &str = "N/A";

/// Reads an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Contract summary record as returned by `search/contractSummary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    #[serde(default, deserialize_with = "null_as_default")]
    pub contract_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    pub end_date: Option<String>,
    pub bill_to_name: Option<String>,
    pub service_level: Option<String>,
    pub contract_type: Option<String>,
}

impl Contract {
    pub fn is_active(&self) -> bool {
        self.status == "ACTIVE"
    }

    pub fn end_date_display(&self) -> &str {
        self.end_date.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn bill_to_name_display(&self) -> &str {
        self.bill_to_name.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn service_level_display(&self) -> &str {
        self.service_level.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// Covered product line as returned by `search/lines`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Line {
    #[serde(deserialize_with = "null_as_default")]
    pub serial_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub contract_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub coverage_end_date: String,
}

impl Line {
    pub fn is_covered(&self) -> bool {
        self.status == "COVERED"
    }
}

/// Request body for `search/contractSummary`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSummaryQuery {
    pub bill_to_id: Vec<String>,
}

/// Request body for `search/lines`; serialized as `{"contractNumber": [..]}`
/// or `{"serialNumber": [..]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineQuery {
    ContractNumber(Vec<String>),
    SerialNumber(Vec<String>),
}

/// A missing or `null` `contracts` field decodes as an empty list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractSummaryResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub contracts: Vec<Contract>,
}

/// A missing or `null` `lines` field decodes as an empty list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineSearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub lines: Vec<Line>,
}
