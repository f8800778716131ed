pub mod courses;
pub mod dashboard;
pub mod fallback;
pub mod health;
pub mod live;
pub mod profile;
pub mod schedule;
pub mod users;

use crate::models::api::TableParams;
use crate::table::query::TableState;

/// Table state for one request. A missing page means page 1.
pub(crate) fn table_state(params: &TableParams) -> TableState {
    TableState::with(
        params.search.as_deref().unwrap_or(""),
        params.facets(),
        params.page.unwrap_or(1),
    )
}
