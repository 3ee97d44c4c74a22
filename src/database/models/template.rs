use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    #[serde(alias = "name")]
    pub role: String,
    #[serde(default)]
    pub percentage: f64,
}

impl Recipient {
    pub fn new(role: impl Into<String>, percentage: f64) -> Self {
        Self {
            role: role.into(),
            percentage,
        }
    }
}

/// A named, reusable tip-out split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipOutTemplate {
    pub id: String,
    pub name: String,
    #[serde(alias = "roles")]
    pub recipients: Vec<Recipient>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TipOutTemplate {
    pub(crate) fn from_input(input: TemplateInput, now: DateTime<Utc>) -> Self {
        TipOutTemplate {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            recipients: input.recipients,
            created_at: Some(now),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_template(&self.name, &self.recipients).map_err(|e| match e {
            AppError::BadRequest(message) => {
                AppError::BadRequest(format!("Template '{}': {}", self.name, message))
            }
            other => other,
        })
    }

    /// Presets offered until the user saves templates of their own.
    pub fn builtin_presets() -> Vec<TipOutTemplate> {
        vec![
            TipOutTemplate {
                id: "1".to_string(),
                name: "Standard".to_string(),
                recipients: vec![
                    Recipient::new("Busser", 15.0),
                    Recipient::new("Bartender", 10.0),
                    Recipient::new("Host", 5.0),
                ],
                created_at: None,
            },
            TipOutTemplate {
                id: "2".to_string(),
                name: "Fine Dining".to_string(),
                recipients: vec![
                    Recipient::new("Busser", 20.0),
                    Recipient::new("Bartender", 15.0),
                    Recipient::new("Food Runner", 10.0),
                    Recipient::new("Host", 5.0),
                ],
                created_at: None,
            },
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInput {
    pub name: String,
    pub recipients: Vec<Recipient>,
}

impl TemplateInput {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_template(&self.name, &self.recipients)
    }
}

fn validate_template(name: &str, recipients: &[Recipient]) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Template name is required".to_string(),
        ));
    }
    validate_recipients(recipients)
}

/// At least one recipient, each with a finite percentage.
pub fn validate_recipients(recipients: &[Recipient]) -> Result<(), AppError> {
    if recipients.is_empty() {
        return Err(AppError::BadRequest(
            "You need at least one recipient".to_string(),
        ));
    }
    if let Some(bad) = recipients.iter().find(|r| !r.percentage.is_finite()) {
        return Err(AppError::BadRequest(format!(
            "Invalid percentage for recipient '{}'",
            bad.role
        )));
    }
    Ok(())
}
