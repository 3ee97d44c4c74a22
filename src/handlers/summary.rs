use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::database::models::{Settings, Shift, ShiftQuery};
use crate::database::repositories::{SettingsRepository, ShiftRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::calculation::{PaycheckPreview, ShiftEarnings, Trends, WeeklySummary};
use crate::services::format::{format_currency, format_hours, format_percentage};
use crate::services::week::{self, WeekRange};
use crate::services::{
    calculate_paycheck_preview, calculate_shift_earnings, calculate_trends,
    calculate_weekly_summary,
};

const RECENT_SHIFT_COUNT: usize = 5;

#[derive(Debug, Default, Deserialize)]
pub struct WeekQuery {
    /// Reference date, today when absent.
    pub date: Option<NaiveDate>,
    /// 0 = the week containing `date`, -1 = the week before, ...
    pub offset: Option<i64>,
}

impl WeekQuery {
    fn range(&self, settings: &Settings) -> Result<WeekRange, AppError> {
        let offset = self.offset.unwrap_or(0);
        if offset > 0 {
            return Err(AppError::BadRequest(
                "Cannot look at future weeks".to_string(),
            ));
        }
        let reference = self.date.unwrap_or_else(local_today);
        week::week_bounds_with_offset(reference, settings.week_start(), offset)
            .ok_or_else(date_out_of_range)
    }
}

fn date_out_of_range() -> AppError {
    AppError::BadRequest("Date out of range".to_string())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummaryResponse {
    pub week: WeekRange,
    pub summary: WeeklySummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsResponse {
    pub current_week: WeekRange,
    pub previous_week: WeekRange,
    pub trends: Trends,
}

/// Pre-formatted figures for this week's headline numbers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlights {
    pub take_home: String,
    pub net_tips: String,
    pub hours: String,
    pub hourly_rate: String,
    pub tax_rate: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub today: NaiveDate,
    pub today_shift: Option<Shift>,
    pub today_earnings: Option<ShiftEarnings>,
    pub recent_shifts: Vec<Shift>,
    pub week: WeekRange,
    pub week_summary: WeeklySummary,
    pub all_time: PaycheckPreview,
    pub highlights: Highlights,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn week_highlights(preview: &PaycheckPreview, currency: &str) -> Highlights {
    Highlights {
        take_home: format_currency(preview.breakdown.total_take_home, currency),
        net_tips: format_currency(preview.summary.net_tips, currency),
        hours: format_hours(preview.summary.total_hours),
        hourly_rate: format_currency(preview.averages.effective_hourly_rate, currency),
        tax_rate: format_percentage(preview.taxes.effective_tax_rate, 1),
    }
}

async fn load(
    shift_repo: &ShiftRepository,
    settings_repo: &SettingsRepository,
) -> Result<(Vec<Shift>, Settings), AppError> {
    let shifts = shift_repo.get_shifts().await?;
    let settings = settings_repo.get_settings().await?;
    Ok((shifts, settings))
}

pub async fn get_dashboard(
    shift_repo: web::Data<ShiftRepository>,
    settings_repo: web::Data<SettingsRepository>,
    query: web::Query<WeekQuery>,
) -> Result<HttpResponse, AppError> {
    let (shifts, settings) = load(&shift_repo, &settings_repo).await?;
    let today = query.date.unwrap_or_else(local_today);

    let today_shift = shifts.iter().find(|s| s.date == today).cloned();
    let today_earnings = today_shift
        .as_ref()
        .map(|s| calculate_shift_earnings(s, &settings));

    // Stable sort keeps newest-created first among shifts on the same date
    let mut recent_shifts = shifts.clone();
    recent_shifts.sort_by(|a, b| b.date.cmp(&a.date));
    recent_shifts.truncate(RECENT_SHIFT_COUNT);

    let week_range =
        week::week_bounds(today, settings.week_start()).ok_or_else(date_out_of_range)?;
    let week_summary =
        calculate_weekly_summary(&week::filter_shifts(&shifts, week_range), &settings);
    let all_time = calculate_paycheck_preview(&shifts, &settings);
    let highlights = week_highlights(&week_summary.preview, &settings.currency);

    Ok(ApiResponse::ok(DashboardResponse {
        today,
        today_shift,
        today_earnings,
        recent_shifts,
        week: week_range,
        week_summary,
        all_time,
        highlights,
    }))
}

pub async fn get_paycheck_preview(
    shift_repo: web::Data<ShiftRepository>,
    settings_repo: web::Data<SettingsRepository>,
    query: web::Query<ShiftQuery>,
) -> Result<HttpResponse, AppError> {
    let (shifts, settings) = load(&shift_repo, &settings_repo).await?;

    let shifts: Vec<Shift> = shifts
        .into_iter()
        .filter(|s| {
            query.start.is_none_or(|d| s.date >= d) && query.end.is_none_or(|d| s.date <= d)
        })
        .collect();

    Ok(ApiResponse::ok(calculate_paycheck_preview(&shifts, &settings)))
}

pub async fn get_week_summary(
    shift_repo: web::Data<ShiftRepository>,
    settings_repo: web::Data<SettingsRepository>,
    query: web::Query<WeekQuery>,
) -> Result<HttpResponse, AppError> {
    let (shifts, settings) = load(&shift_repo, &settings_repo).await?;
    let week_range = query.range(&settings)?;

    let summary = calculate_weekly_summary(&week::filter_shifts(&shifts, week_range), &settings);

    Ok(ApiResponse::ok(WeekSummaryResponse {
        week: week_range,
        summary,
    }))
}

/// The selected week compared with the week before it.
pub async fn get_trends(
    shift_repo: web::Data<ShiftRepository>,
    settings_repo: web::Data<SettingsRepository>,
    query: web::Query<WeekQuery>,
) -> Result<HttpResponse, AppError> {
    let (shifts, settings) = load(&shift_repo, &settings_repo).await?;
    let current_week = query.range(&settings)?;
    let previous_week = current_week.previous().ok_or_else(date_out_of_range)?;

    let trends = calculate_trends(
        &week::filter_shifts(&shifts, current_week),
        &week::filter_shifts(&shifts, previous_week),
        &settings,
    );

    Ok(ApiResponse::ok(TrendsResponse {
        current_week,
        previous_week,
        trends,
    }))
}
