use actix_web::web;

use crate::handlers::data;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/data")
            .route("", web::delete().to(data::clear_all_data))
            .route("/export", web::get().to(data::export_data))
            .route("/import", web::post().to(data::import_data)),
    );
}
