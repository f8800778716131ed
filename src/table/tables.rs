//! Row adapters for the course, schedule and user tables.

use crate::models::course::Course;
use crate::models::schedule::day_order;
use crate::models::section::EnrichedSection;
use crate::models::user::User;
use crate::schedule::grid::block_label;
use crate::table::query::Searchable;
use std::borrow::Cow;
use std::cmp::Ordering;

impl Searchable for Course {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.code), Cow::Borrowed(&self.name)]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "credits" => Some(Cow::Owned(self.credits.to_string())),
            _ => None,
        }
    }
}

impl Searchable for EnrichedSection {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(&self.course.code),
            Cow::Borrowed(&self.course.name),
            Cow::Borrowed(&self.section.group),
            Cow::Borrowed(&self.section.program),
            Cow::Borrowed(&self.section.period),
            Cow::Borrowed(&self.schedule.day),
        ]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "day" => Some(match self.schedule.weekday() {
                Some(day) => Cow::Borrowed(day.label()),
                None => Cow::Borrowed(&self.schedule.day),
            }),
            // sections outside every block never match a block filter
            "block" => Some(Cow::Borrowed(block_label(&self.schedule).unwrap_or(""))),
            "period" => Some(Cow::Borrowed(&self.section.period)),
            "program" => Some(Cow::Borrowed(&self.section.program)),
            _ => None,
        }
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Owned(self.full_name()),
            Cow::Borrowed(&self.email),
            Cow::Borrowed(&self.identification),
            Cow::Borrowed(self.role.label()),
            Cow::Borrowed(&self.program),
        ]
    }

    fn facet(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "role" => Some(Cow::Borrowed(self.role.label())),
            "status" => Some(Cow::Borrowed(self.status())),
            _ => None,
        }
    }
}

/// Monday first, then by start time, then by course code
pub fn schedule_order(a: &EnrichedSection, b: &EnrichedSection) -> Ordering {
    day_order(&a.schedule.day)
        .cmp(&day_order(&b.schedule.day))
        .then_with(|| a.schedule.start_time.cmp(&b.schedule.start_time))
        .then_with(|| a.course.code.cmp(&b.course.code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::ScheduleSlot;
    use crate::models::section::Section;
    use crate::models::user::Role;
    use crate::table::query::{run_query, Paging, TableState};
    use std::collections::BTreeMap;

    type CourseOrder = fn(&Course, &Course) -> Ordering;
    type UserOrder = fn(&User, &User) -> Ordering;

    fn catalog() -> Vec<Course> {
        (101..=112)
            .map(|n| Course::new(n, &format!("MAT{}", n), &format!("Matemática {}", n), 4))
            .collect()
    }

    fn enriched(id: u32, code: &str, day: &str, start: &str, end: &str) -> EnrichedSection {
        EnrichedSection {
            section: Section {
                id,
                course_id: id,
                schedule_id: Some(id),
                group: "01".to_string(),
                period: "2025-I".to_string(),
                program: "Ingeniería".to_string(),
                capacity: 30,
                teacher_id: None,
            },
            course: Course::new(id, code, "Curso", 4),
            schedule: ScheduleSlot::new(id, day, start, end),
            course_resolved: true,
            schedule_resolved: true,
        }
    }

    fn user(id: u32, first: &str, last: &str, role: Role, pending: bool) -> User {
        User {
            id,
            first_name: first.to_string(),
            last_name1: last.to_string(),
            last_name2: None,
            email: format!("{}@uni.edu", first.to_lowercase()),
            identification: format!("ID-{}", id),
            role,
            program: "Ingeniería".to_string(),
            active: true,
            pending_verification: pending,
        }
    }

    #[test]
    fn test_course_search_by_code_prefix() {
        let state = TableState::with("MAT10", BTreeMap::new(), 1);
        let page = run_query(&catalog(), &state, None::<CourseOrder>, Paging::default());

        assert_eq!(page.filtered_count, 9);
        assert_eq!(page.items.first().map(|c| c.code.as_str()), Some("MAT101"));
        assert_eq!(page.items.last().map(|c| c.code.as_str()), Some("MAT109"));
    }

    #[test]
    fn test_course_search_matches_name() {
        let state = TableState::with("matemática 112", BTreeMap::new(), 1);
        let page = run_query(&catalog(), &state, None::<CourseOrder>, Paging::default());
        assert_eq!(page.filtered_count, 1);
    }

    #[test]
    fn test_catalog_pages() {
        let state = TableState::with("", BTreeMap::new(), 2);
        let page = run_query(&catalog(), &state, None::<CourseOrder>, Paging::default());
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page_window, vec![1, 2]);
    }

    #[test]
    fn test_schedule_order_by_day_then_time() {
        let mut rows = vec![
            enriched(1, "FIS101", "Miércoles", "08:00:00", "11:20:00"),
            enriched(2, "MAT101", "Lunes", "13:00:00", "16:20:00"),
            enriched(3, "QUI101", "Lunes", "08:00:00", "11:20:00"),
            enriched(4, "BIO101", "Sin horario", "", ""),
        ];
        rows.sort_by(schedule_order);
        let ids: Vec<u32> = rows.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_schedule_facets() {
        let rows = vec![
            enriched(1, "FIS101", "Miercoles", "08:00:00", "11:20:00"),
            enriched(2, "MAT101", "Lunes", "13:00:00", "16:20:00"),
            enriched(3, "QUI101", "Lunes", "09:00:00", "11:00:00"),
        ];

        let mut facets = BTreeMap::new();
        facets.insert("day".to_string(), "Miércoles".to_string());
        let page = run_query(&rows, &TableState::with("", facets, 1), Some(schedule_order), Paging::default());
        assert_eq!(page.items.iter().map(|r| r.id()).collect::<Vec<_>>(), vec![1]);

        let mut facets = BTreeMap::new();
        facets.insert("block".to_string(), "13:00 - 16:20".to_string());
        let page = run_query(&rows, &TableState::with("", facets, 1), Some(schedule_order), Paging::default());
        assert_eq!(page.items.iter().map(|r| r.id()).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_user_search_and_facets() {
        let users = vec![
            user(1, "Ana", "Rojas", Role::Student, false),
            user(2, "Luis", "Mora", Role::Professor, true),
            user(3, "Eva", "Solís", Role::Student, true),
        ];

        let state = TableState::with("profesor", BTreeMap::new(), 1);
        let page = run_query(&users, &state, None::<UserOrder>, Paging::default());
        assert_eq!(page.items.iter().map(|u| u.id).collect::<Vec<_>>(), vec![2]);

        let mut facets = BTreeMap::new();
        facets.insert("role".to_string(), "estudiante".to_string());
        facets.insert("status".to_string(), "pending".to_string());
        let page = run_query(&users, &TableState::with("", facets, 1), None::<UserOrder>, Paging::default());
        assert_eq!(page.items.iter().map(|u| u.id).collect::<Vec<_>>(), vec![3]);

        let state = TableState::with("ana rojas", BTreeMap::new(), 1);
        let page = run_query(&users, &state, None::<UserOrder>, Paging::default());
        assert_eq!(page.filtered_count, 1);
    }
}
