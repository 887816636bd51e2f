//! Calculation list view model.
//!
//! The list is always replaced wholesale; there is no diffing and no paging.

use calc_api_types::Calculation;
use chrono::{DateTime, NaiveDateTime};

use crate::api::ApiClient;
use crate::transport::HttpTransport;

pub const LOADING_MESSAGE: &str = "Loading calculations...";
pub const EMPTY_MESSAGE: &str = "No calculations yet. Add your first calculation above!";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this calculation?";
pub const DELETED_MESSAGE: &str = "Calculation deleted successfully!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Empty,
    Items(Vec<CalculationRow>),
    Failed(String),
}

impl ListView {
    pub fn from_calculations(calculations: &[Calculation]) -> Self {
        if calculations.is_empty() {
            ListView::Empty
        } else {
            ListView::Items(calculations.iter().map(CalculationRow::from).collect())
        }
    }

    /// Placeholder text for every state except `Items`.
    pub fn message(&self) -> Option<String> {
        match self {
            ListView::Loading => Some(LOADING_MESSAGE.to_string()),
            ListView::Empty => Some(EMPTY_MESSAGE.to_string()),
            ListView::Failed(message) => Some(format!("Failed to load calculations: {message}")),
            ListView::Items(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationRow {
    pub id: i64,
    /// `operand1 <symbol> operand2`
    pub expression: String,
    pub result: String,
    pub created: String,
    /// Present only when the record was modified after creation.
    pub updated: Option<String>,
}

impl CalculationRow {
    /// `Created: ... | Updated: ...`
    pub fn meta(&self) -> String {
        match &self.updated {
            Some(updated) => format!("Created: {} | Updated: {}", self.created, updated),
            None => format!("Created: {}", self.created),
        }
    }
}

impl From<&Calculation> for CalculationRow {
    fn from(calc: &Calculation) -> Self {
        Self {
            id: calc.id,
            expression: format!(
                "{} {} {}",
                format_number(calc.operand1),
                calc.operation.symbol(),
                format_number(calc.operand2)
            ),
            result: format_number(calc.result),
            created: format_timestamp(&calc.created_at),
            updated: calc
                .was_updated()
                .then(|| format_timestamp(&calc.updated_at)),
        }
    }
}

/// Fetch the whole collection for the signed-in user.
pub async fn load<T: HttpTransport>(api: &ApiClient<T>) -> ListView {
    match api.list_calculations().await {
        Ok(calculations) => ListView::from_calculations(&calculations),
        Err(err) => ListView::Failed(err.to_string()),
    }
}

/// Browser number formatting: integral values print without a fractional
/// part (`15`, not `15.0`), and magnitudes at or above `1e21` or below `1e-6`
/// switch to exponent notation (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{value:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{mantissa}e+{power}")
            }
            _ => exp,
        };
    }
    format!("{value}")
}

/// Server timestamps are naive ISO-8601 (`2024-05-01T10:00:00.123456`) or
/// RFC 3339. Anything else is shown verbatim.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}
