//! Calculation form state machine.
//!
//! `Create` ⇄ `Editing(id)`. Validation runs before any request is built, so a
//! rejected submit never reaches the network.

use calc_api_types::{Calculation, CalculationRequest, Operation};
use std::cell::RefCell;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::list::format_number;
use crate::transport::HttpTransport;

pub const MISSING_OPERATION: &str = "Please select an operation";
pub const INVALID_NUMBER: &str = "Please enter valid numbers";
pub const DIVIDE_BY_ZERO: &str = "Cannot divide by zero";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Editing(i64),
}

/// Raw field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub operand1: String,
    pub operand2: String,
    pub operation: String,
}

impl FormInput {
    pub fn new(operand1: &str, operand2: &str, operation: &str) -> Self {
        Self {
            operand1: operand1.to_string(),
            operand2: operand2.to_string(),
            operation: operation.to_string(),
        }
    }

    fn from_calculation(calc: &Calculation) -> Self {
        Self {
            operand1: format_number(calc.operand1),
            operand2: format_number(calc.operand2),
            operation: calc.operation.as_str().to_string(),
        }
    }

    /// Turns the raw fields into a request body or the first validation
    /// failure.
    pub fn validate(&self) -> Result<CalculationRequest, ClientError> {
        if self.operation.trim().is_empty() {
            return Err(ClientError::validation(MISSING_OPERATION));
        }
        let operation: Operation = self
            .operation
            .parse()
            .map_err(|_| ClientError::validation(MISSING_OPERATION))?;

        let operand1 = parse_operand(&self.operand1)?;
        let operand2 = parse_operand(&self.operand2)?;

        if operation == Operation::Divide && operand2 == 0.0 {
            return Err(ClientError::validation(DIVIDE_BY_ZERO));
        }

        Ok(CalculationRequest {
            operand1,
            operand2,
            operation,
        })
    }
}

fn parse_operand(raw: &str) -> Result<f64, ClientError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ClientError::validation(INVALID_NUMBER))
}

/// Everything a frontend needs to draw the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub mode: FormMode,
    /// Hidden id field; empty in `Create`.
    pub id: String,
    pub title: &'static str,
    pub submit_label: &'static str,
    pub cancel_visible: bool,
    pub fields: FormInput,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Calculation),
    Updated(Calculation),
}

impl SubmitOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SubmitOutcome::Created(_) => "Calculation added successfully!",
            SubmitOutcome::Updated(_) => "Calculation updated successfully!",
        }
    }
}

#[derive(Debug, Default)]
struct FormState {
    mode: FormMode,
    fields: FormInput,
}

#[derive(Debug, Default)]
pub struct FormController {
    state: RefCell<FormState>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.state.borrow().mode
    }

    pub fn view(&self) -> FormView {
        let state = self.state.borrow();
        let (id, title, submit_label, cancel_visible) = match state.mode {
            FormMode::Create => (String::new(), "Add New Calculation", "Add Calculation", false),
            FormMode::Editing(id) => (
                id.to_string(),
                "Edit Calculation",
                "Update Calculation",
                true,
            ),
        };
        FormView {
            mode: state.mode,
            id,
            title,
            submit_label,
            cancel_visible,
            fields: state.fields.clone(),
        }
    }

    /// Fetch the record and switch to `Editing(id)`. On failure the form is
    /// left as it was.
    pub async fn begin_edit<T: HttpTransport>(
        &self,
        api: &ApiClient<T>,
        id: i64,
    ) -> Result<FormView, ClientError> {
        let calc = api.get_calculation(id).await?;
        {
            let mut state = self.state.borrow_mut();
            state.mode = FormMode::Editing(calc.id);
            state.fields = FormInput::from_calculation(&calc);
        }
        Ok(self.view())
    }

    /// Validate, then create or update depending on the current mode.
    ///
    /// Only a successful request resets the form to `Create`.
    pub async fn submit<T: HttpTransport>(
        &self,
        api: &ApiClient<T>,
        input: FormInput,
    ) -> Result<SubmitOutcome, ClientError> {
        let mode = {
            let mut state = self.state.borrow_mut();
            state.fields = input;
            state.mode
        };
        let request = self.state.borrow().fields.validate()?;

        let outcome = match mode {
            FormMode::Create => SubmitOutcome::Created(api.create_calculation(&request).await?),
            FormMode::Editing(id) => {
                SubmitOutcome::Updated(api.update_calculation(id, &request).await?)
            }
        };

        self.reset();
        Ok(outcome)
    }

    pub fn cancel(&self) -> FormView {
        self.reset();
        self.view()
    }

    pub fn reset(&self) {
        *self.state.borrow_mut() = FormState::default();
    }
}
