use crate::models::user::Role;
use crate::stores::repository::Entity;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    Welcome,
    MySections,
    MyCredits,
    TeachingSections,
    TotalCapacity,
    WeeklySchedule,
    SectionList,
    TotalCourses,
    TotalUsers,
    PendingVerifications,
    UnscheduledSections,
    Placeholder,
}

impl WidgetKind {
    /// Entities whose invalidation makes this widget stale
    pub fn entities(self) -> &'static [Entity] {
        use WidgetKind::*;

        match self {
            Welcome | Placeholder => &[],
            MySections | MyCredits | TeachingSections | TotalCapacity | WeeklySchedule
            | SectionList => &[Entity::Sections, Entity::Schedules, Entity::Courses],
            TotalCourses => &[Entity::Courses],
            TotalUsers | PendingVerifications => &[Entity::Users],
            UnscheduledSections => &[Entity::Sections],
        }
    }

    /// Widgets that render without any backend data
    pub fn is_static(self) -> bool {
        self.entities().is_empty()
    }
}

/// Widgets shown to `role`, in display order
pub fn compose(role: Role) -> Vec<WidgetKind> {
    use WidgetKind::*;

    match role {
        Role::Student => vec![Welcome, MySections, MyCredits, WeeklySchedule, SectionList],
        Role::Professor => vec![Welcome, TeachingSections, TotalCapacity, WeeklySchedule, SectionList],
        Role::Administrator => vec![
            Welcome,
            TotalCourses,
            TotalUsers,
            PendingVerifications,
            UnscheduledSections,
        ],
        Role::Unknown => vec![Placeholder],
    }
}
