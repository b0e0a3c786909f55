use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

mod ai_tasks;
mod attendance;
mod config;
mod csv_table;
mod error;
mod models;
mod notify;
mod routes;
mod schedule;
mod state;
mod store;

use config::Config;
use notify::ConsoleNotifier;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    let server_address = config.server_address.clone();
    let state = web::Data::new(AppState::new(config, Arc::new(ConsoleNotifier)));
    info!("Server running at http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::routes::configure)
    })
    .bind(server_address)?
    .run()
    .await
}
