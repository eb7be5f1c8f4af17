//! Error report endpoint.
//!
//! ```text
//! GET /api/v1/report/{id}
//! ```
//!
//! Non-integer ids never reach the handler: path extraction fails first and
//! Actix answers `404 Not Found`.

use actix_web::{get, web};
use tracing::info;

use crate::domain::ReportId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Fetch the acknowledgement for one error report.
#[utoipa::path(
    get,
    path = "/api/v1/report/{id}",
    description = "Acknowledge an error report after a simulated upstream delay. Example request: GET /api/v1/report/42",
    params(("id" = i32, Path, description = "Report identifier; any 32-bit integer")),
    responses(
        (
            status = 200,
            description = "Report acknowledgement",
            body = String,
            example = json!("Error report with ID: 42")
        ),
        (status = 404, description = "Identifier is not an integer"),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["reports"],
    operation_id = "getErrorReport"
)]
#[get("/api/v1/report/{id}")]
pub async fn get_error_report(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<String>> {
    let id = ReportId::new(path.into_inner());
    info!(id = id.get(), "handling error report request");
    let report = state.error_reports.fetch_report(id).await?;
    Ok(web::Json(report.into_message()))
}

/// Register the report endpoints.
pub fn configure(cfg: &mut web::ServiceConfig) {
    info!(group = "error_reports", "configuring endpoints");
    cfg.service(get_error_report);
    info!(group = "error_reports", "configured endpoints");
}

#[cfg(test)]
mod tests {
    //! Handler-level coverage with fixture and mocked ports.

    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{FixtureBackendApi, MockErrorReportQuery};
    use crate::domain::{Error, ErrorReport};

    fn app_state(query: MockErrorReportQuery) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(Arc::new(query), Arc::new(FixtureBackendApi)))
    }

    #[rstest]
    #[case::positive(42, "Error report with ID: 42")]
    #[case::negative(-1, "Error report with ID: -1")]
    #[case::min(i32::MIN, "Error report with ID: -2147483648")]
    #[actix_web::test]
    async fn returns_the_acknowledgement_as_a_json_string(
        #[case] id: i32,
        #[case] expected: &str,
    ) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::fixture()))
                .configure(configure),
        )
        .await;

        let request = test::TestRequest::get()
            .uri(&format!("/api/v1/report/{id}"))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: String = test::read_body_json(response).await;
        assert_eq!(body, expected);
    }

    #[rstest]
    #[case::word("abc")]
    #[case::decimal("1.5")]
    #[case::overflow("2147483648")]
    #[actix_web::test]
    async fn non_integer_ids_are_not_found(#[case] raw: &str) {
        let mut query = MockErrorReportQuery::new();
        query.expect_fetch_report().never();
        let app =
            test::init_service(App::new().app_data(app_state(query)).configure(configure)).await;

        let request = test::TestRequest::get()
            .uri(&format!("/api/v1/report/{raw}"))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn passes_the_path_id_to_the_query_port() {
        let mut query = MockErrorReportQuery::new();
        query
            .expect_fetch_report()
            .withf(|id| id.get() == 7)
            .times(1)
            .returning(|id| Ok(ErrorReport::for_id(id)));
        let app =
            test::init_service(App::new().app_data(app_state(query)).configure(configure)).await;

        let request = test::TestRequest::get().uri("/api/v1/report/7").to_request();
        let body: String = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body, "Error report with ID: 7");
    }

    #[actix_web::test]
    async fn port_failures_map_to_error_responses() {
        let mut query = MockErrorReportQuery::new();
        query
            .expect_fetch_report()
            .returning(|_| Err(Error::service_unavailable("backend api is unavailable")));
        let app =
            test::init_service(App::new().app_data(app_state(query)).configure(configure)).await;

        let request = test::TestRequest::get().uri("/api/v1/report/7").to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let payload: Error = test::read_body_json(response).await;
        assert_eq!(payload.message(), "backend api is unavailable");
    }
}
