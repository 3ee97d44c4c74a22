use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Settings, Shift, TipOutTemplate};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub shifts: Vec<Shift>,
    pub settings: Settings,
    #[serde(alias = "tipOutPresets")]
    pub templates: Vec<TipOutTemplate>,
    pub exported_at: DateTime<Utc>,
}

/// Each present section replaces what is stored; absent sections are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBundle {
    pub shifts: Option<Vec<Shift>>,
    pub settings: Option<Settings>,
    #[serde(alias = "tipOutPresets")]
    pub templates: Option<Vec<TipOutTemplate>>,
}

impl ImportBundle {
    /// Applies the same amount and recipient rules as the regular write paths.
    pub fn validate(&self) -> Result<(), AppError> {
        for shift in self.shifts.iter().flatten() {
            shift.validate()?;
        }
        for template in self.templates.iter().flatten() {
            template.validate()?;
        }
        if let Some(settings) = &self.settings {
            if !settings.hourly_wage.is_finite() || settings.hourly_wage < 0.0 {
                return Err(AppError::BadRequest(
                    "hourlyWage must be a non-negative number".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub shifts_imported: Option<usize>,
    pub settings_imported: bool,
    pub templates_imported: Option<usize>,
}
