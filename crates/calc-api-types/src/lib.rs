use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// Display symbol used when rendering `operand1 <symbol> operand2`.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "\u{00d7}",
            Operation::Divide => "\u{00f7}",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == lowered)
            .ok_or_else(|| UnknownOperation(s.to_owned()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Calculation {
    pub id: i64,
    pub operand1: f64,
    pub operand2: f64,
    pub operation: Operation,
    pub result: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl Calculation {
    pub fn was_updated(&self) -> bool {
        self.updated_at != self.created_at
    }
}

/// Body for both `POST /calculations` and `PUT /calculations/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationRequest {
    pub operand1: f64,
    pub operand2: f64,
    pub operation: Operation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default)]
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error payload returned by the service on non-2xx responses.
///
/// `detail` is usually a string; request validation failures carry a list of
/// `{ "msg": ... }` objects instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join("; "))
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_symbols_cover_every_variant() {
        let symbols: Vec<&str> = Operation::ALL.iter().map(|op| op.symbol()).collect();
        assert_eq!(symbols, vec!["+", "-", "×", "÷"]);
    }

    #[test]
    fn operation_parses_case_insensitively() {
        assert_eq!("Divide".parse::<Operation>(), Ok(Operation::Divide));
        assert_eq!(" add ".parse::<Operation>(), Ok(Operation::Add));
        assert!("modulo".parse::<Operation>().is_err());
        assert!("".parse::<Operation>().is_err());
    }

    #[test]
    fn unknown_operation_names_the_input() {
        let err = "Modulo".parse::<Operation>().unwrap_err();
        assert_eq!(err, UnknownOperation("Modulo".to_string()));
        assert_eq!(err.to_string(), "unknown operation: Modulo");
    }

    #[test]
    fn calculation_decodes_service_payload() {
        let raw = r#"{
            "id": 3,
            "operand1": 20.0,
            "operand2": 3.0,
            "operation": "multiply",
            "result": 60.0,
            "user_id": 1,
            "created_at": "2024-05-01T10:00:00",
            "updated_at": "2024-05-01T10:05:00"
        }"#;
        let calc: Calculation = serde_json::from_str(raw).unwrap();
        assert_eq!(calc.operation, Operation::Multiply);
        assert_eq!(calc.result, 60.0);
        assert!(calc.was_updated());
    }

    #[test]
    fn request_body_serializes_lowercase_operation() {
        let body = CalculationRequest {
            operand1: 6.0,
            operand2: 2.0,
            operation: Operation::Divide,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "operand1": 6.0, "operand2": 2.0, "operation": "divide" })
        );
    }

    #[test]
    fn error_body_prefers_string_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":"Calculation not found"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("Calculation not found"));
    }

    #[test]
    fn error_body_joins_validation_messages() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail":[{"loc":["body","operand2"],"msg":"Cannot divide by zero"},{"msg":"field required"}]}"#,
        )
        .unwrap();
        assert_eq!(
            body.message().as_deref(),
            Some("Cannot divide by zero; field required")
        );
    }

    #[test]
    fn error_body_without_detail_has_no_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(body.message(), None);
    }
}
