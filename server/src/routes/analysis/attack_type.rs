use actix_session::Session;
use actix_web::{get, web, Responder};

use super::flashes_for;
use crate::dataset::Dataset;
use crate::routes::html_response;
use crate::{template, AppState};

pub const DEFAULT_START_DATE: &str = "2021-02-01";
pub const DEFAULT_END_DATE: &str = "2023-01-10";

/// Date bounds as typed by the user. Passed to the database unvalidated.
#[derive(Debug, PartialEq)]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl DateRange {
    /// First value per key wins; unknown keys are ignored and absent keys take
    /// the defaults.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        DateRange {
            start_date: first("start_date").unwrap_or_else(|| DEFAULT_START_DATE.to_string()),
            end_date: first("end_date").unwrap_or_else(|| DEFAULT_END_DATE.to_string()),
        }
    }
}

#[get("/attack-type-analysis")]
pub async fn attack_type_analysis(
    session: Session,
    data: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> impl Responder {
    let range = DateRange::from_pairs(&query);

    let dataset = Dataset::from_result(
        data.source
            .attack_type_counts(&range.start_date, &range.end_date)
            .await,
    );

    // a failed filter falls back to the default bounds, not the attempted ones
    let (start_date, end_date) = if dataset.is_failed() {
        (DEFAULT_START_DATE, DEFAULT_END_DATE)
    } else {
        (range.start_date.as_str(), range.end_date.as_str())
    };

    let flashes = flashes_for(&session, "attack-type-analysis", &dataset);
    html_response(template::attack_type_page(
        &data.tera,
        &dataset,
        start_date,
        end_date,
        &flashes,
    ))
}
