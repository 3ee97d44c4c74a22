use actix_web::web;

use crate::handlers::tip_out;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tip-out")
            .route("/split", web::post().to(tip_out::split))
            .route("/templates", web::get().to(tip_out::get_templates))
            .route("/templates", web::post().to(tip_out::create_template))
            .route("/templates/{id}", web::delete().to(tip_out::delete_template))
            .route(
                "/templates/{id}/split",
                web::post().to(tip_out::split_with_template),
            )
            .route("/templates/{id}/load", web::get().to(tip_out::load_template))
            .route("/calculator", web::get().to(tip_out::new_calculator))
            .route("/calculator", web::post().to(tip_out::update_calculator))
            .route("/calculator/save", web::post().to(tip_out::save_calculator)),
    );
}
