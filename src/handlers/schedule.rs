use crate::core::error::DashboardError;
use crate::core::state::AppState;
use crate::dashboard::scope::{all_scheduled_sections, my_sections};
use crate::handlers::table_state;
use crate::models::api::TableParams;
use crate::models::section::EnrichedSection;
use crate::schedule::grid::WeeklyGrid;
use crate::table::query::{run_query, Page};
use crate::table::tables::schedule_order;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Serialize)]
pub struct MySchedule {
    pub grid: WeeklyGrid,
    pub sections: Vec<EnrichedSection>,
}

/// Schedule table over every scheduled section
///
/// GET /schedule?search=<term>&day=<day>&block=<block>&period=<period>&page=<n>
pub async fn schedule_table_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TableParams>, QueryRejection>,
) -> Result<Json<Page<EnrichedSection>>, DashboardError> {
    let Query(params) = params?;
    let sections = all_scheduled_sections(&state.repo).await?;
    let page = run_query(&sections, &table_state(&params), Some(schedule_order), state.paging());

    Ok(Json(page))
}

/// GET /schedule/grid
pub async fn schedule_grid_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WeeklyGrid>, DashboardError> {
    let sections = all_scheduled_sections(&state.repo).await?;
    let grid = WeeklyGrid::build(&sections);
    debug!(
        placed = grid.placed_ids().len(),
        unplaced = grid.unplaced.len(),
        conflicts = grid.conflict_count(),
        "Weekly grid built"
    );

    Ok(Json(grid))
}

/// Weekly schedule of the signed-in user
///
/// GET /me/schedule
pub async fn my_schedule_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MySchedule>, DashboardError> {
    let user = state.repo.profile().await?;
    let sections = my_sections(&state.repo, &user).await?;

    Ok(Json(MySchedule {
        grid: WeeklyGrid::build(&sections),
        sections,
    }))
}
