use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::database::models::{Shift, ShiftInput, ShiftQuery, ShiftUpdate};
use crate::database::repositories::{SettingsRepository, ShiftRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::calculation::{ShiftEarnings, TaxBreakdown};
use crate::services::{calculate_shift_earnings, calculate_taxes};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftEarningsResponse {
    pub shift: Shift,
    pub earnings: ShiftEarnings,
    pub taxes: TaxBreakdown,
}

pub async fn create_shift(
    repo: web::Data<ShiftRepository>,
    input: web::Json<ShiftInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();
    input.validate()?;

    let shift = repo.save_shift(input).await.map_err(|e| {
        log::error!("Failed to save shift: {}", e);
        AppError::from(e)
    })?;

    Ok(ApiResponse::created(shift))
}

pub async fn get_shifts(
    repo: web::Data<ShiftRepository>,
    query: web::Query<ShiftQuery>,
) -> Result<HttpResponse, AppError> {
    let shifts = match (query.start, query.end) {
        (Some(start), Some(end)) => {
            if end < start {
                return Err(AppError::BadRequest(
                    "end must not be before start".to_string(),
                ));
            }
            repo.get_shifts_by_date_range(start, end).await?
        }
        (start, end) => repo
            .get_shifts()
            .await?
            .into_iter()
            .filter(|s| start.is_none_or(|d| s.date >= d) && end.is_none_or(|d| s.date <= d))
            .collect(),
    };

    Ok(ApiResponse::ok(shifts))
}

pub async fn get_shift(
    repo: web::Data<ShiftRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let shift_id = path.into_inner();

    let shift = repo
        .find_by_id(&shift_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Shift not found".to_string()))?;

    Ok(ApiResponse::ok(shift))
}

pub async fn update_shift(
    repo: web::Data<ShiftRepository>,
    path: web::Path<String>,
    input: web::Json<ShiftUpdate>,
) -> Result<HttpResponse, AppError> {
    let shift_id = path.into_inner();
    let update = input.into_inner();
    update.validate()?;

    let shift = repo
        .update_shift(&shift_id, update)
        .await
        .map_err(|e| {
            log::error!("Failed to update shift {}: {}", shift_id, e);
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::NotFound("Shift not found".to_string()))?;

    Ok(ApiResponse::ok(shift))
}

pub async fn delete_shift(
    repo: web::Data<ShiftRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let shift_id = path.into_inner();

    if !repo.delete_shift(&shift_id).await? {
        return Err(AppError::NotFound("Shift not found".to_string()));
    }

    log::info!("Deleted shift {}", shift_id);
    Ok(ApiResponse::message("Shift deleted"))
}

/// Earnings and taxes for a single shift under the current settings.
pub async fn get_shift_earnings(
    repo: web::Data<ShiftRepository>,
    settings_repo: web::Data<SettingsRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let shift_id = path.into_inner();

    let shift = repo
        .find_by_id(&shift_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Shift not found".to_string()))?;
    let settings = settings_repo.get_settings().await?;

    let earnings = calculate_shift_earnings(&shift, &settings);
    let taxes = calculate_taxes(earnings.gross_earnings, &settings);

    Ok(ApiResponse::ok(ShiftEarningsResponse {
        shift,
        earnings,
        taxes,
    }))
}
