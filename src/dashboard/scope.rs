use crate::core::error::ApiError;
use crate::models::section::{EnrichedSection, Section};
use crate::models::user::{Role, User};
use crate::schedule::aggregate::{enrich_sections, UnscheduledPolicy};
use crate::stores::repository::Repository;
use crate::table::tables::schedule_order;

/// Whether `section` belongs on `user`'s own dashboard.
///
/// Professors own the sections they teach; students see the sections
/// offered to their program.
pub fn is_assigned(user: &User, section: &Section) -> bool {
    match user.role {
        Role::Professor => section.teacher_id == Some(user.id),
        Role::Student => {
            let program = user.program.trim();
            !program.is_empty() && section.program.trim().eq_ignore_ascii_case(program)
        }
        Role::Administrator | Role::Unknown => false,
    }
}

/// The user's sections, enriched and in weekly order. Unscheduled sections
/// are kept and sort last.
pub async fn my_sections(repo: &Repository, user: &User) -> Result<Vec<EnrichedSection>, ApiError> {
    let (sections, schedules, courses) =
        tokio::try_join!(repo.sections(), repo.schedules(), repo.courses())?;

    let mine: Vec<Section> = sections
        .iter()
        .filter(|section| is_assigned(user, section))
        .cloned()
        .collect();

    let mut enriched = enrich_sections(&mine, &schedules, &courses, UnscheduledPolicy::Keep);
    enriched.sort_by(schedule_order);
    Ok(enriched)
}

/// All scheduled sections, enriched and in weekly order
pub async fn all_scheduled_sections(repo: &Repository) -> Result<Vec<EnrichedSection>, ApiError> {
    let (sections, schedules, courses) =
        tokio::try_join!(repo.sections(), repo.schedules(), repo.courses())?;

    let mut enriched = enrich_sections(&sections, &schedules, &courses, UnscheduledPolicy::Exclude);
    enriched.sort_by(schedule_order);
    Ok(enriched)
}
