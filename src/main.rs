use crate::config::config::Config;
use crate::controller::handler::not_found;
use crate::repository::database::Database;
use crate::service::pipeline::Pipeline;
use crate::transport::build_transport;
use crate::util::real_ip_key_extractor::RealIpKeyExtractor;
use crate::util::run_guard::RunGuard;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{web, App, HttpServer};
use log::info;
use std::net::IpAddr;
use std::sync::Arc;

mod config;
mod controller;
mod models;
mod repository;
mod service;
mod transport;
mod util;

pub struct AppState {
    pipeline: Arc<Pipeline>,
    run_guard: RunGuard,
    trusted_proxy_ip: Option<IpAddr>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    log4rs::init_file("./log-config.yml", Default::default()).expect("Log config file not found.");
    let config = Config::init();

    let fetcher = build_transport(&config.transport_config()).expect("Failed to build transport.");
    let store = Arc::new(Database::new(config.clone()));
    let pipeline = Pipeline::new(
        fetcher,
        store,
        config.retry_config(),
        config.pipeline_config(),
    );

    let app_data = web::Data::new(AppState {
        pipeline: Arc::new(pipeline),
        run_guard: RunGuard::new(),
        trusted_proxy_ip: config.trusted_proxy_ip,
    });

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(5)
        .key_extractor(RealIpKeyExtractor)
        .finish()
        .expect("Invalid rate limit configuration.");

    info!("Listening on {}:{}", config.server_host, config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .configure(controller::handler::config)
            .default_service(web::route().to(not_found))
            .wrap(actix_web::middleware::Logger::default())
            .wrap(Governor::new(&governor_conf))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
