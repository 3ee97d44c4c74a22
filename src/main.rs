use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger};
use anyhow::Result;

use tiptrack::database::init_database;
use tiptrack::middleware::RequestId;
use tiptrack::{AppState, Config};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("TipTrack API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (reads .env when present)
    let config = Config::from_env()?;

    env_logger::init();

    log::info!(
        "Starting TipTrack API server (environment: {})",
        config.environment
    );

    let pool = init_database(&config.database_url).await?;
    log::info!("Store ready at {}", config.database_url);

    let app_state = AppState::new(pool);

    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    let client_base_url = config.client_base_url.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allowed_origin(&client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Correlation-ID",
                    ])
                    .max_age(3600),
            )
            .wrap(RequestId)
            .wrap(Logger::new(
                r#"%a "%r" %s %b %T correlation_id=%{x-correlation-id}o"#,
            ))
            .service(hello)
            .service(health)
            .configure(|cfg| app_state.configure(cfg))
    })
    .bind(&server_address)?
    .run()
    .await?;

    Ok(())
}
