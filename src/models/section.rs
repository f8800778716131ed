use crate::models::course::Course;
use crate::models::schedule::ScheduleSlot;
use serde::{Deserialize, Serialize};

/// A scheduled offering of a course for a group, period and program
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: u32,
    pub course_id: u32,
    /// None means the section is unscheduled
    #[serde(default)]
    pub schedule_id: Option<u32>,
    #[serde(default)]
    pub group: String,
    /// Academic term, e.g. "2025-I"
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub teacher_id: Option<u32>,
}

impl Section {
    pub fn is_scheduled(&self) -> bool {
        self.schedule_id.is_some()
    }
}

/// A section with its course and schedule resolved inline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedSection {
    pub section: Section,
    pub course: Course,
    pub schedule: ScheduleSlot,
    /// False when `course` is a placeholder
    pub course_resolved: bool,
    /// False when `schedule` is a placeholder
    pub schedule_resolved: bool,
}

impl EnrichedSection {
    pub fn id(&self) -> u32 {
        self.section.id
    }
}
