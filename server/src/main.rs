use actix_web::{middleware::Logger, web, App, HttpServer};
use std::{io, sync::Arc};
use tera::Tera;

mod config;
mod dataset;
mod db;
mod flash;
mod routes;
mod template;
mod templates;
#[cfg(test)]
mod testing;

use config::Settings;
use db::{PgTrafficSource, TrafficSource};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn TrafficSource>,
    pub tera: Tera,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // .env is optional; deployed environments set variables directly
    let _ = dotenv::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            log::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };
    log::info!("database {:?}", settings.db);

    let tera = template::load().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.0))?;

    let data = web::Data::new(AppState {
        source: Arc::new(PgTrafficSource::new(settings.db.clone())),
        tera,
    });
    let session_key = settings.session_key.clone();

    log::info!("listening on {}:{}", settings.host, settings.port);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(flash::session_middleware(session_key.clone()))
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
