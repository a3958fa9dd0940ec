use actix_session::Session;

use crate::dataset::Dataset;
use crate::flash::{self, Flash};

pub mod attack_type;
pub mod packet;
pub mod protocol;

/// Surface a failed query as a `danger` flash, then drain everything pending
/// for this render.
pub(crate) fn flashes_for<T>(session: &Session, route: &str, data: &Dataset<T>) -> Vec<Flash> {
    if let Some(message) = data.error() {
        log::warn!("{route}: {message}");
        flash::push(session, "danger", format!("Error: {message}"));
    }
    flash::take(session)
}
