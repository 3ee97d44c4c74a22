use actix_web::web;

use crate::handlers::shifts;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/shifts")
            .route("", web::post().to(shifts::create_shift))
            .route("", web::get().to(shifts::get_shifts))
            .route("/{id}", web::get().to(shifts::get_shift))
            .route("/{id}", web::put().to(shifts::update_shift))
            .route("/{id}", web::delete().to(shifts::delete_shift))
            .route("/{id}/earnings", web::get().to(shifts::get_shift_earnings)),
    );
}
