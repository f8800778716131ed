use anyhow::{Context, Result};
use tracing::info;

use crate::core::state::AppState;

/// Pre-load the lists every dashboard needs, so the first request is
/// served from cache. Users are left out: listing them needs an
/// administrator token.
pub async fn warm_caches(state: &AppState) -> Result<()> {
    let repo = &state.repo;

    let (courses, sections, schedules) =
        tokio::try_join!(repo.courses(), repo.sections(), repo.schedules())
            .context("Failed to fetch catalog from backend")?;

    let unscheduled = sections.iter().filter(|s| !s.is_scheduled()).count();

    info!(
        courses = courses.len(),
        sections = sections.len(),
        unscheduled_sections = unscheduled,
        schedule_slots = schedules.len(),
        "Caches warmed from backend"
    );

    Ok(())
}
