use actix_session::Session;
use actix_web::{get, web, Responder};

use super::flashes_for;
use crate::routes::html_response;
use crate::dataset::Dataset;
use crate::{template, AppState};

#[get("/protocol-analysis")]
pub async fn protocol_analysis(session: Session, data: web::Data<AppState>) -> impl Responder {
    let dataset = Dataset::from_result(data.source.protocol_counts().await);
    let flashes = flashes_for(&session, "protocol-analysis", &dataset);
    html_response(template::protocol_page(&data.tera, &dataset, &flashes))
}
