use crate::models::response::ProcessDataResponse;
use crate::AppState;
use actix_web::{web::Data, HttpResponse, Responder};
use log::{info, warn};

pub const STARTED_MESSAGE: &str = "Processing started in background";
pub const ALREADY_RUNNING_MESSAGE: &str = "Processing already running in background";

/// Detaches a pipeline run and answers right away. Failures inside the run only surface in the
/// logs and the request audit tables.
pub async fn process_data_service(data: Data<AppState>) -> impl Responder {
    let Some(token) = data.run_guard.try_acquire() else {
        warn!("Processing requested while a run is active, ignoring");
        return HttpResponse::Ok().json(ProcessDataResponse::new(ALREADY_RUNNING_MESSAGE));
    };

    let pipeline = data.pipeline.clone();
    actix_web::rt::spawn(async move {
        let _token = token;
        pipeline.run().await;
    });

    info!("Processing started in background");
    HttpResponse::Ok().json(ProcessDataResponse::new(STARTED_MESSAGE))
}
