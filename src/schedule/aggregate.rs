use crate::models::course::Course;
use crate::models::schedule::ScheduleSlot;
use crate::models::section::{EnrichedSection, Section};
use std::collections::HashMap;

/// What to do with sections that have no schedule
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnscheduledPolicy {
    /// Drop them (admin schedule view)
    Exclude,
    /// Keep them with a "Sin horario" schedule (role dashboards)
    Keep,
}

/// Join sections with their schedule slot and course.
///
/// Missing references become placeholders; this never fails. Output keeps
/// the input order of `sections`.
pub fn enrich_sections(
    sections: &[Section],
    schedules: &[ScheduleSlot],
    courses: &[Course],
    policy: UnscheduledPolicy,
) -> Vec<EnrichedSection> {
    let schedules_by_id: HashMap<u32, &ScheduleSlot> =
        schedules.iter().map(|s| (s.id, s)).collect();
    let courses_by_id: HashMap<u32, &Course> = courses.iter().map(|c| (c.id, c)).collect();

    sections
        .iter()
        .filter(|section| policy == UnscheduledPolicy::Keep || section.is_scheduled())
        .map(|section| {
            let (schedule, schedule_resolved) = match section.schedule_id {
                Some(id) => match schedules_by_id.get(&id) {
                    Some(slot) => ((*slot).clone(), true),
                    None => (ScheduleSlot::placeholder(id), false),
                },
                None => (ScheduleSlot::unscheduled(), false),
            };

            let (course, course_resolved) = match courses_by_id.get(&section.course_id) {
                Some(course) => ((*course).clone(), true),
                None => (Course::placeholder(section.course_id), false),
            };

            EnrichedSection {
                section: section.clone(),
                course,
                schedule,
                course_resolved,
                schedule_resolved,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::{UNASSIGNED_DAY, UNSCHEDULED_DAY};

    fn section(id: u32, course_id: u32, schedule_id: Option<u32>) -> Section {
        Section {
            id,
            course_id,
            schedule_id,
            group: "01".to_string(),
            period: "2025-I".to_string(),
            program: "Ingeniería".to_string(),
            capacity: 30,
            teacher_id: Some(100),
        }
    }

    #[test]
    fn test_joins_by_foreign_key() {
        let sections = vec![section(1, 10, Some(20))];
        let schedules = vec![ScheduleSlot::new(20, "Lunes", "08:00:00", "11:20:00")];
        let courses = vec![Course::new(10, "MAT101", "Cálculo I", 4)];

        let enriched = enrich_sections(&sections, &schedules, &courses, UnscheduledPolicy::Exclude);
        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].course.code, "MAT101");
        assert_eq!(enriched[0].schedule.day, "Lunes");
        assert!(enriched[0].course_resolved && enriched[0].schedule_resolved);
    }

    #[test]
    fn test_missing_course_uses_placeholder() {
        let sections = vec![section(1, 77, Some(20))];
        let schedules = vec![ScheduleSlot::new(20, "Lunes", "08:00:00", "11:20:00")];

        let enriched = enrich_sections(&sections, &schedules, &[], UnscheduledPolicy::Exclude);
        assert_eq!(enriched[0].course.name, "Curso 77");
        assert_eq!(enriched[0].course.code, "C77");
        assert!(!enriched[0].course_resolved);
    }

    #[test]
    fn test_missing_schedule_uses_placeholder() {
        let sections = vec![section(1, 10, Some(99))];
        let courses = vec![Course::new(10, "MAT101", "Cálculo I", 4)];

        let enriched = enrich_sections(&sections, &[], &courses, UnscheduledPolicy::Exclude);
        assert_eq!(enriched[0].schedule.day, UNASSIGNED_DAY);
        assert!(!enriched[0].schedule_resolved);
    }

    #[test]
    fn test_unscheduled_policy() {
        let sections = vec![section(1, 10, None), section(2, 10, Some(20)), section(3, 10, None)];
        let schedules = vec![ScheduleSlot::new(20, "Martes", "13:00:00", "16:20:00")];

        let admin = enrich_sections(&sections, &schedules, &[], UnscheduledPolicy::Exclude);
        assert_eq!(admin.iter().map(|e| e.id()).collect::<Vec<_>>(), vec![2]);

        let dashboard = enrich_sections(&sections, &schedules, &[], UnscheduledPolicy::Keep);
        assert_eq!(dashboard.iter().map(|e| e.id()).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(dashboard[0].schedule.day, UNSCHEDULED_DAY);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(enrich_sections(&[], &[], &[], UnscheduledPolicy::Keep).is_empty());
    }
}
