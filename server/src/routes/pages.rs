use actix_session::Session;
use actix_web::{get, web, Responder};

use super::html_response;
use crate::{flash, template, AppState};

#[get("/")]
pub async fn index(session: Session, data: web::Data<AppState>) -> impl Responder {
    let flashes = flash::take(&session);
    html_response(template::index_page(&data.tera, &flashes))
}

#[get("/main")]
pub async fn main_page(session: Session, data: web::Data<AppState>) -> impl Responder {
    let flashes = flash::take(&session);
    html_response(template::main_page(&data.tera, &flashes))
}
