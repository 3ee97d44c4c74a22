use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// One logged work session.
///
/// Numeric fields that are absent from a persisted blob or a request body
/// deserialize to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    /// A v4 uuid for shifts created here; imported records keep their own ids.
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub hours_worked: f64,
    #[serde(default)]
    pub cash_tips: f64,
    #[serde(default)]
    pub credit_tips: f64,
    #[serde(default, alias = "tipOutAmount")]
    pub tip_out: f64,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Shift {
    pub fn total_tips(&self) -> f64 {
        self.cash_tips + self.credit_tips
    }

    /// May be negative when the tip-out exceeds the tips received.
    pub fn net_tips(&self) -> f64 {
        self.total_tips() - self.tip_out
    }

    /// Amount checks for records that arrive whole, such as an import.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_amounts(&[
            ("hoursWorked", Some(self.hours_worked)),
            ("cashTips", Some(self.cash_tips)),
            ("creditTips", Some(self.credit_tips)),
            ("tipOut", Some(self.tip_out)),
        ])
        .map_err(|e| match e {
            AppError::BadRequest(message) => {
                AppError::BadRequest(format!("Shift on {}: {}", self.date, message))
            }
            other => other,
        })
    }

    pub(crate) fn from_input(input: ShiftInput, now: DateTime<Utc>) -> Self {
        Shift {
            id: Uuid::new_v4().to_string(),
            date: input.date,
            hours_worked: input.hours_worked,
            cash_tips: input.cash_tips,
            credit_tips: input.credit_tips,
            tip_out: input.tip_out,
            notes: normalize_notes(input.notes),
            created_at: now,
            updated_at: Some(now),
        }
    }

    /// Merge the provided fields into this shift. `id` and `created_at` never change.
    pub(crate) fn apply(&mut self, update: ShiftUpdate, now: DateTime<Utc>) {
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(hours_worked) = update.hours_worked {
            self.hours_worked = hours_worked;
        }
        if let Some(cash_tips) = update.cash_tips {
            self.cash_tips = cash_tips;
        }
        if let Some(credit_tips) = update.credit_tips {
            self.credit_tips = credit_tips;
        }
        if let Some(tip_out) = update.tip_out {
            self.tip_out = tip_out;
        }
        if update.notes.is_some() {
            self.notes = normalize_notes(update.notes);
        }
        self.updated_at = Some(now);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftInput {
    pub date: NaiveDate,
    #[serde(default)]
    pub hours_worked: f64,
    #[serde(default)]
    pub cash_tips: f64,
    #[serde(default)]
    pub credit_tips: f64,
    #[serde(default, alias = "tipOutAmount")]
    pub tip_out: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ShiftInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.hours_worked > 0.0) {
            return Err(AppError::BadRequest(
                "Please enter hours worked".to_string(),
            ));
        }
        validate_amounts(&[
            ("hoursWorked", Some(self.hours_worked)),
            ("cashTips", Some(self.cash_tips)),
            ("creditTips", Some(self.credit_tips)),
            ("tipOut", Some(self.tip_out)),
        ])
    }
}

/// Partial edit of a shift; only the provided fields are replaced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftUpdate {
    pub date: Option<NaiveDate>,
    pub hours_worked: Option<f64>,
    pub cash_tips: Option<f64>,
    pub credit_tips: Option<f64>,
    #[serde(alias = "tipOutAmount")]
    pub tip_out: Option<f64>,
    pub notes: Option<String>,
}

impl ShiftUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_amounts(&[
            ("hoursWorked", self.hours_worked),
            ("cashTips", self.cash_tips),
            ("creditTips", self.credit_tips),
            ("tipOut", self.tip_out),
        ])
    }
}

fn validate_amounts(fields: &[(&str, Option<f64>)]) -> Result<(), AppError> {
    for (name, value) in fields {
        if let Some(value) = value {
            if !value.is_finite() || *value < 0.0 {
                return Err(AppError::BadRequest(format!(
                    "{} must be a non-negative number",
                    name
                )));
            }
        }
    }
    Ok(())
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShiftQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}
