use crate::service::trigger::process_data_service;
use crate::AppState;
use actix_web::web::Data;
use actix_web::{get, web, HttpResponse, Responder};

#[get("/process-data")]
async fn process_data_handler(data: Data<AppState>) -> impl Responder {
    process_data_service(data).await
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/plain")
        .body("Not Found")
}

pub fn config(conf: &mut web::ServiceConfig) {
    conf.service(process_data_handler);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::response::ProcessDataResponse;
    use crate::repository::memory::MemoryStore;
    use crate::service::pipeline::{Pipeline, PipelineConfig};
    use crate::service::retry::RetryConfig;
    use crate::service::trigger::{ALREADY_RUNNING_MESSAGE, STARTED_MESSAGE};
    use crate::transport::mock::MockFetcher;
    use crate::util::run_guard::RunGuard;
    use actix_web::{http::StatusCode, test, App};
    use std::sync::Arc;
    use std::time::Duration;

    fn app_state(run_guard: RunGuard) -> Data<AppState> {
        let pipeline = Pipeline::new(
            Arc::new(MockFetcher::new()),
            Arc::new(MemoryStore::new()),
            RetryConfig {
                max_retries: 0,
                backoff: Duration::ZERO,
                request_timeout: Duration::from_secs(1),
            },
            PipelineConfig {
                api_base_url: "http://api.test".to_string(),
                statistics_page_limit: 10,
                seed_club_ids: vec![],
                seed_league_id: 1,
                crawl_rounds: 1,
            },
        );
        Data::new(AppState {
            pipeline: Arc::new(pipeline),
            run_guard,
            trusted_proxy_ip: None,
        })
    }

    #[actix_web::test]
    async fn process_data_starts_a_run() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(RunGuard::new()))
                .configure(config)
                .default_service(web::route().to(not_found)),
        )
        .await;

        let req = test::TestRequest::get().uri("/process-data").to_request();
        let body: ProcessDataResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, ProcessDataResponse::new(STARTED_MESSAGE));
    }

    #[actix_web::test]
    async fn process_data_does_not_overlap_runs() {
        let run_guard = RunGuard::new();
        let _active = run_guard.try_acquire().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(app_state(run_guard.clone()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/process-data").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: ProcessDataResponse = test::read_body_json(resp).await;

        assert_eq!(body.status_code, 200);
        assert_eq!(body.message, ALREADY_RUNNING_MESSAGE);
    }

    #[actix_web::test]
    async fn unknown_routes_are_plain_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(app_state(RunGuard::new()))
                .configure(config)
                .default_service(web::route().to(not_found)),
        )
        .await;

        for req in [
            test::TestRequest::get().uri("/health").to_request(),
            test::TestRequest::post().uri("/process-data").to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            assert_eq!(
                resp.headers().get("content-type").unwrap(),
                "text/plain"
            );
            assert_eq!(test::read_body(resp).await, "Not Found");
        }
    }
}
