use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::database::models::{Recipient, TemplateInput, validate_recipients};
use crate::database::repositories::TemplateRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::tip_out::SplitResult;
use crate::services::{TipOutCalculator, calculate_tip_out, split_tip_out};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRequest {
    #[serde(default)]
    pub total_tips: f64,
    pub recipients: Vec<Recipient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSplitRequest {
    #[serde(default)]
    pub total_tips: f64,
}

/// One edit applied to the calculator state sent by the client.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum CalculatorAction {
    Add {
        role: String,
        #[serde(default)]
        percentage: f64,
    },
    Remove {
        id: String,
    },
    Update {
        id: String,
        role: Option<String>,
        percentage: Option<f64>,
    },
    Recompute,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorRequest {
    pub calculator: TipOutCalculator,
    #[serde(flatten)]
    pub action: CalculatorAction,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCalculatorRequest {
    pub calculator: TipOutCalculator,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorResponse {
    pub calculator: TipOutCalculator,
    pub total_percentage: f64,
    pub result: SplitResult,
}

fn recomputed(mut calculator: TipOutCalculator) -> CalculatorResponse {
    let result = calculator.recompute();
    CalculatorResponse {
        total_percentage: calculator.total_percentage(),
        calculator,
        result,
    }
}

fn validate_total(total_tips: f64) -> Result<(), AppError> {
    if !total_tips.is_finite() || total_tips < 0.0 {
        return Err(AppError::BadRequest(
            "totalTips must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

pub async fn split(input: web::Json<SplitRequest>) -> Result<HttpResponse, AppError> {
    validate_total(input.total_tips)?;
    validate_recipients(&input.recipients)?;

    let result = split_tip_out(input.total_tips, &input.recipients);
    if result.over_allocated {
        log::warn!(
            "Tip-out percentages total {:.1}%, leaving {:.2} remaining",
            result.percentage_given,
            result.remaining
        );
    }

    Ok(ApiResponse::ok(result))
}

pub async fn get_templates(repo: web::Data<TemplateRepository>) -> Result<HttpResponse, AppError> {
    let templates = repo.get_templates().await?;
    Ok(ApiResponse::ok(templates))
}

pub async fn create_template(
    repo: web::Data<TemplateRepository>,
    input: web::Json<TemplateInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();
    input.validate()?;

    let template = repo.save_template(input).await?;
    log::info!("Saved tip-out template '{}'", template.name);

    Ok(ApiResponse::created(template))
}

pub async fn delete_template(
    repo: web::Data<TemplateRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let template_id = path.into_inner();

    if !repo.delete_template(&template_id).await? {
        return Err(AppError::NotFound("Template not found".to_string()));
    }

    Ok(ApiResponse::message("Template deleted"))
}

pub async fn split_with_template(
    repo: web::Data<TemplateRepository>,
    path: web::Path<String>,
    input: web::Json<TemplateSplitRequest>,
) -> Result<HttpResponse, AppError> {
    validate_total(input.total_tips)?;

    let template = repo
        .find_by_id(&path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Template not found".to_string()))?;

    Ok(ApiResponse::ok(calculate_tip_out(input.total_tips, &template)))
}

/// Calculator state after loading a template: percentages copied, amounts zeroed.
pub async fn load_template(
    repo: web::Data<TemplateRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let template = repo
        .find_by_id(&path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Template not found".to_string()))?;

    Ok(ApiResponse::ok(TipOutCalculator::from_template(&template)))
}

/// A fresh calculator with the default recipient lines.
pub async fn new_calculator() -> Result<HttpResponse, AppError> {
    Ok(ApiResponse::ok(recomputed(TipOutCalculator::new())))
}

/// Applies one edit to the posted calculator state and recomputes every amount.
pub async fn update_calculator(
    input: web::Json<CalculatorRequest>,
) -> Result<HttpResponse, AppError> {
    let CalculatorRequest {
        mut calculator,
        action,
    } = input.into_inner();
    validate_total(calculator.total_tips)?;

    match action {
        CalculatorAction::Add { role, percentage } => {
            calculator.add_recipient(role, percentage);
        }
        CalculatorAction::Remove { id } => {
            calculator.remove_recipient(&id)?;
        }
        CalculatorAction::Update {
            id,
            role,
            percentage,
        } => calculator.update_recipient(&id, role, percentage)?,
        CalculatorAction::Recompute => {}
    }

    Ok(ApiResponse::ok(recomputed(calculator)))
}

/// Saves the calculator's current recipient lines as a named template.
pub async fn save_calculator(
    repo: web::Data<TemplateRepository>,
    input: web::Json<SaveCalculatorRequest>,
) -> Result<HttpResponse, AppError> {
    let template_input = input.calculator.to_template(input.name.as_str());
    template_input.validate()?;

    let template = repo.save_template(template_input).await?;
    log::info!("Saved calculator as template '{}'", template.name);

    Ok(ApiResponse::created(template))
}
