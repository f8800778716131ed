use crate::core::error::DashboardError;
use crate::core::state::AppState;
use crate::handlers::table_state;
use crate::models::api::{SuccessResponse, TableParams};
use crate::models::course::{Course, CourseForm};
use crate::table::query::{run_query, Page};
use crate::validation::validate_course;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::info;

/// Courses table, rows in backend order
///
/// GET /courses?search=<term>&credits=<n>&page=<n>
pub async fn list_courses_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TableParams>, QueryRejection>,
) -> Result<Json<Page<Course>>, DashboardError> {
    let Query(params) = params?;
    let courses = state.repo.courses().await?;
    let page = run_query(
        courses.as_slice(),
        &table_state(&params),
        None::<fn(&Course, &Course) -> Ordering>,
        state.paging(),
    );

    Ok(Json(page))
}

/// GET /courses/{id}
pub async fn get_course_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<Course>, DashboardError> {
    let Path(id) = id?;
    Ok(Json(state.repo.course(id).await?))
}

/// POST /courses
pub async fn create_course_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Json<CourseForm>, JsonRejection>,
) -> Result<Response, DashboardError> {
    let Json(form) = form?;
    let form = validate_course(&form)?;
    let course = state.repo.create_course(&form).await?;

    Ok((StatusCode::CREATED, Json(course)).into_response())
}

/// PUT /courses/{id}
pub async fn update_course_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u32>, PathRejection>,
    form: Result<Json<CourseForm>, JsonRejection>,
) -> Result<Json<Course>, DashboardError> {
    let Path(id) = id?;
    let Json(form) = form?;
    let form = validate_course(&form)?;
    let course = state.repo.update_course(id, &form).await?;

    Ok(Json(course))
}

/// DELETE /courses/{id}
pub async fn delete_course_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<SuccessResponse>, DashboardError> {
    let Path(id) = id?;
    state.repo.delete_course(id).await?;
    info!(course_id = id, "Course removed from catalog");

    Ok(Json(SuccessResponse {
        success: true,
        message: format!("Curso {} eliminado", id),
    }))
}
