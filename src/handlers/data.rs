use actix_web::{HttpRequest, HttpResponse, web};

use crate::database::models::ImportBundle;
use crate::database::repositories::BackupRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::middleware::RequestIdExt;

pub async fn export_data(repo: web::Data<BackupRepository>) -> Result<HttpResponse, AppError> {
    let bundle = repo.export_data().await?;
    Ok(ApiResponse::ok(bundle))
}

pub async fn import_data(
    repo: web::Data<BackupRepository>,
    input: web::Json<ImportBundle>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let bundle = input.into_inner();
    bundle.validate()?;

    let summary = repo.import_data(bundle).await.map_err(|e| {
        log::error!(
            "Import failed (correlation_id={}): {}",
            req.correlation_id(),
            e
        );
        AppError::from(e)
    })?;

    Ok(ApiResponse::ok(summary))
}

pub async fn clear_all_data(
    repo: web::Data<BackupRepository>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    repo.clear_all_data().await?;
    log::info!("All data cleared (correlation_id={})", req.correlation_id());

    Ok(ApiResponse::message("All data has been cleared"))
}
