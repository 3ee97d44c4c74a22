use actix_web::web;

pub mod data;
pub mod settings;
pub mod shifts;
pub mod summary;
pub mod tip_out;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(shifts::configure)
            .configure(settings::configure)
            .configure(summary::configure)
            .configure(tip_out::configure)
            .configure(data::configure),
    );
}
