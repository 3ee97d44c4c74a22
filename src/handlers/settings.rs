use actix_web::{HttpResponse, web};

use crate::database::models::{OnboardingInput, Settings, SettingsUpdate};
use crate::database::repositories::SettingsRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

fn validate_wage(hourly_wage: Option<f64>) -> Result<(), AppError> {
    match hourly_wage {
        Some(wage) if !wage.is_finite() || wage < 0.0 => Err(AppError::BadRequest(
            "hourlyWage must be a non-negative number".to_string(),
        )),
        _ => Ok(()),
    }
}

pub async fn get_settings(repo: web::Data<SettingsRepository>) -> Result<HttpResponse, AppError> {
    let settings = repo.get_settings().await?;
    Ok(ApiResponse::ok(settings))
}

/// Overwrites the whole settings record.
pub async fn save_settings(
    repo: web::Data<SettingsRepository>,
    input: web::Json<Settings>,
) -> Result<HttpResponse, AppError> {
    let mut settings = input.into_inner();
    validate_wage(Some(settings.hourly_wage))?;
    settings.week_starts_on %= 7;

    let settings = repo.save_settings(settings).await?;
    Ok(ApiResponse::ok(settings))
}

/// Merges the provided fields into the stored settings.
pub async fn update_settings(
    repo: web::Data<SettingsRepository>,
    input: web::Json<SettingsUpdate>,
) -> Result<HttpResponse, AppError> {
    let update = input.into_inner();
    validate_wage(update.hourly_wage)?;

    let settings = repo.update_settings(update).await?;
    Ok(ApiResponse::ok(settings))
}

pub async fn complete_onboarding(
    repo: web::Data<SettingsRepository>,
    input: web::Json<OnboardingInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();
    validate_wage(input.hourly_wage)?;

    let settings = repo.complete_onboarding(input).await?;
    Ok(ApiResponse::ok(settings))
}
