use crate::utils::time::parse_clock;
use serde::{Deserialize, Serialize};

/// Day label used when a section points at a schedule the backend did not return
pub const UNASSIGNED_DAY: &str = "Sin asignar";

/// Day label used when a section has no schedule at all
pub const UNSCHEDULED_DAY: &str = "Sin horario";

/// Days of the week, Monday first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Parse a day label as sent by the backend.
    /// Accepts the Spanish labels with or without accents and English names.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "lunes" | "monday" | "mon" => Some(Weekday::Monday),
            "martes" | "tuesday" | "tue" => Some(Weekday::Tuesday),
            "miércoles" | "miercoles" | "wednesday" | "wed" => Some(Weekday::Wednesday),
            "jueves" | "thursday" | "thu" => Some(Weekday::Thursday),
            "viernes" | "friday" | "fri" => Some(Weekday::Friday),
            "sábado" | "sabado" | "saturday" | "sat" => Some(Weekday::Saturday),
            "domingo" | "sunday" | "sun" => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// Monday = 0 .. Sunday = 6
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Lunes",
            Weekday::Tuesday => "Martes",
            Weekday::Wednesday => "Miércoles",
            Weekday::Thursday => "Jueves",
            Weekday::Friday => "Viernes",
            Weekday::Saturday => "Sábado",
            Weekday::Sunday => "Domingo",
        }
    }
}

/// Sort key for a day label; unknown labels sort after Sunday
pub fn day_order(label: &str) -> usize {
    Weekday::from_label(label)
        .map(Weekday::index)
        .unwrap_or(Weekday::ALL.len())
}

/// A (day, start, end) triple a section can be bound to.
///
/// Times are fixed-width `HH:MM:SS` strings, so they order correctly
/// with a plain string comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub id: u32,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

impl ScheduleSlot {
    pub fn new(id: u32, day: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            id,
            day: day.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }

    /// Stand-in for a schedule id the backend did not return
    pub fn placeholder(id: u32) -> Self {
        Self::new(id, UNASSIGNED_DAY, "", "")
    }

    /// Stand-in for a section with no schedule
    pub fn unscheduled() -> Self {
        Self::new(0, UNSCHEDULED_DAY, "", "")
    }

    pub fn weekday(&self) -> Option<Weekday> {
        Weekday::from_label(&self.day)
    }

    /// Known day, parseable times and start strictly before end
    pub fn is_well_formed(&self) -> bool {
        match (parse_clock(&self.start_time), parse_clock(&self.end_time)) {
            (Some(start), Some(end)) => self.weekday().is_some() && start < end,
            _ => false,
        }
    }
}
