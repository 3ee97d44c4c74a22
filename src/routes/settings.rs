use actix_web::web;

use crate::handlers::settings;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .route("", web::get().to(settings::get_settings))
            .route("", web::put().to(settings::save_settings))
            .route("", web::patch().to(settings::update_settings))
            .route("/onboarding", web::post().to(settings::complete_onboarding)),
    );
}
