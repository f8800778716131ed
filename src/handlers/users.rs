use crate::core::error::DashboardError;
use crate::core::state::AppState;
use crate::handlers::table_state;
use crate::models::api::TableParams;
use crate::models::user::User;
use crate::table::query::{run_query, Page};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use std::cmp::Ordering;
use std::sync::Arc;

/// Users table, rows in backend order
///
/// GET /users?search=<term>&role=<role>&status=<active|inactive|pending>&page=<n>
pub async fn users_table_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TableParams>, QueryRejection>,
) -> Result<Json<Page<User>>, DashboardError> {
    let Query(params) = params?;
    let users = state.repo.users().await?;
    let page = run_query(
        users.as_slice(),
        &table_state(&params),
        None::<fn(&User, &User) -> Ordering>,
        state.paging(),
    );

    Ok(Json(page))
}
