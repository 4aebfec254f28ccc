use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use super::Grader;
use crate::workbook::{SheetKind, Workbook};

/// Router exposing workbook grading and the active rule set.
pub fn grading_router(grader: Arc<Grader>) -> Router {
    Router::new()
        .route("/api/v1/grade", post(grade_handler))
        .route("/api/v1/rules", get(rules_handler))
        .with_state(grader)
}

pub(crate) async fn grade_handler(
    State(grader): State<Arc<Grader>>,
    Json(workbook): Json<Workbook>,
) -> Response {
    if workbook.sheet(SheetKind::Main).is_none() {
        let payload = json!({
            "error": "workbook has no main sheet",
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    let result = grader.grade(&workbook);
    let report = result.report(workbook.name.as_deref(), Utc::now());
    (StatusCode::OK, Json(report)).into_response()
}

pub(crate) async fn rules_handler(State(grader): State<Arc<Grader>>) -> Response {
    (StatusCode::OK, Json(grader.rules().clone())).into_response()
}
