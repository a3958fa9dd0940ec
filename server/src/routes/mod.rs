use actix_web::{web, HttpResponse};

use crate::template::RenderError;

pub mod analysis;
pub mod pages;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::index)
        .service(pages::main_page)
        .service(analysis::attack_type::attack_type_analysis)
        .service(analysis::packet::packet_analysis)
        .service(analysis::protocol::protocol_analysis);
}

/// Render failures are not degraded; they surface as a 500.
pub(crate) fn html_response(rendered: Result<String, RenderError>) -> HttpResponse {
    match rendered {
        Ok(html) => HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html),
        Err(e) => {
            log::error!("render error: {}", e.0);
            HttpResponse::InternalServerError().body(e.0)
        }
    }
}
