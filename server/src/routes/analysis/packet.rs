use actix_session::Session;
use actix_web::{get, web, Responder};

use super::flashes_for;
use crate::routes::html_response;
use crate::dataset::Dataset;
use crate::{template, AppState};

#[get("/packet-analysis")]
pub async fn packet_analysis(session: Session, data: web::Data<AppState>) -> impl Responder {
    let dataset = Dataset::from_result(data.source.packet_length_averages().await);
    let flashes = flashes_for(&session, "packet-analysis", &dataset);
    html_response(template::packet_page(&data.tera, &dataset, &flashes))
}
