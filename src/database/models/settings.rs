use chrono::Weekday;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOURLY_WAGE: f64 = 2.13;
pub const DEFAULT_FEDERAL_TAX_RATE: f64 = 12.0;
pub const DEFAULT_STATE_TAX_RATE: f64 = 5.0;
pub const DEFAULT_FICA_RATE: f64 = 7.65;
pub const DEFAULT_TIP_OUT_PERCENTAGE: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Server,
    Bartender,
    Barback,
    Busser,
    Host,
    Runner,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// The single settings record of an installation.
///
/// Every field falls back to its default when missing from the stored blob,
/// so records written by older versions keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub onboarding_complete: bool,
    pub role: Role,
    pub hourly_wage: f64,
    pub federal_tax_rate: f64,
    pub state_tax_rate: f64,
    pub fica_rate: f64,
    pub default_tip_out_percentage: f64,
    pub currency: String,
    /// 0 = Sunday ... 6 = Saturday
    pub week_starts_on: u8,
    pub theme: Theme,
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            onboarding_complete: false,
            role: Role::Server,
            hourly_wage: DEFAULT_HOURLY_WAGE,
            federal_tax_rate: DEFAULT_FEDERAL_TAX_RATE,
            state_tax_rate: DEFAULT_STATE_TAX_RATE,
            fica_rate: DEFAULT_FICA_RATE,
            default_tip_out_percentage: DEFAULT_TIP_OUT_PERCENTAGE,
            currency: "USD".to_string(),
            week_starts_on: 0,
            theme: Theme::Dark,
            notifications: true,
        }
    }
}

impl Settings {
    pub fn week_start(&self) -> Weekday {
        match self.week_starts_on % 7 {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    pub(crate) fn apply(&mut self, update: SettingsUpdate) {
        if let Some(onboarding_complete) = update.onboarding_complete {
            self.onboarding_complete = onboarding_complete;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(hourly_wage) = update.hourly_wage {
            self.hourly_wage = hourly_wage;
        }
        if let Some(federal_tax_rate) = update.federal_tax_rate {
            self.federal_tax_rate = federal_tax_rate;
        }
        if let Some(state_tax_rate) = update.state_tax_rate {
            self.state_tax_rate = state_tax_rate;
        }
        if let Some(fica_rate) = update.fica_rate {
            self.fica_rate = fica_rate;
        }
        if let Some(default_tip_out_percentage) = update.default_tip_out_percentage {
            self.default_tip_out_percentage = default_tip_out_percentage;
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(week_starts_on) = update.week_starts_on {
            self.week_starts_on = week_starts_on % 7;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(notifications) = update.notifications {
            self.notifications = notifications;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub onboarding_complete: Option<bool>,
    pub role: Option<Role>,
    pub hourly_wage: Option<f64>,
    pub federal_tax_rate: Option<f64>,
    pub state_tax_rate: Option<f64>,
    pub fica_rate: Option<f64>,
    pub default_tip_out_percentage: Option<f64>,
    pub currency: Option<String>,
    pub week_starts_on: Option<u8>,
    pub theme: Option<Theme>,
    pub notifications: Option<bool>,
}

/// Answers collected by the onboarding wizard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingInput {
    pub role: Option<Role>,
    pub hourly_wage: Option<f64>,
    pub federal_tax_rate: Option<f64>,
    pub state_tax_rate: Option<f64>,
}

impl OnboardingInput {
    /// Blank or zero answers fall back to the stock defaults.
    pub fn into_settings(self) -> Settings {
        let or_default = |value: Option<f64>, default: f64| {
            value.filter(|v| v.is_finite() && *v != 0.0).unwrap_or(default)
        };

        Settings {
            onboarding_complete: true,
            role: self.role.unwrap_or_default(),
            hourly_wage: or_default(self.hourly_wage, DEFAULT_HOURLY_WAGE),
            federal_tax_rate: or_default(self.federal_tax_rate, DEFAULT_FEDERAL_TAX_RATE),
            state_tax_rate: or_default(self.state_tax_rate, DEFAULT_STATE_TAX_RATE),
            ..Settings::default()
        }
    }
}
