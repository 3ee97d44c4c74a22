use actix_web::web;

use crate::handlers::summary;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/summary")
            .route("/dashboard", web::get().to(summary::get_dashboard))
            .route("/paycheck", web::get().to(summary::get_paycheck_preview))
            .route("/week", web::get().to(summary::get_week_summary))
            .route("/trends", web::get().to(summary::get_trends)),
    );
}
