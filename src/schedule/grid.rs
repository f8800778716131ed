use crate::models::schedule::{ScheduleSlot, Weekday};
use crate::models::section::EnrichedSection;
use crate::utils::time::{hour_minute, parse_clock};
use serde::Serialize;
use tracing::warn;

/// One of the fixed teaching blocks of a day
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TimeBlock {
    pub label: &'static str,
    pub start: &'static str,
    pub end: &'static str,
}

pub const TIME_BLOCKS: [TimeBlock; 3] = [
    TimeBlock { label: "08:00 - 11:20", start: "08:00", end: "11:20" },
    TimeBlock { label: "13:00 - 16:20", start: "13:00", end: "16:20" },
    TimeBlock { label: "17:00 - 20:20", start: "17:00", end: "20:20" },
];

/// Course colors, indexed by course id
pub const PALETTE: [&str; 8] = [
    "#4f46e5", "#059669", "#d97706", "#dc2626",
    "#0891b2", "#7c3aed", "#db2777", "#65a30d",
];

pub fn course_color(course_id: u32) -> &'static str {
    PALETTE[course_id as usize % PALETTE.len()]
}

/// Index of the block whose start and end match the slot exactly
/// (compared on `HH:MM`). Times that do not parse match no block.
pub fn block_index(slot: &ScheduleSlot) -> Option<usize> {
    parse_clock(&slot.start_time)?;
    parse_clock(&slot.end_time)?;
    let start = hour_minute(&slot.start_time);
    let end = hour_minute(&slot.end_time);
    TIME_BLOCKS
        .iter()
        .position(|block| block.start == start && block.end == end)
}

pub fn block_label(slot: &ScheduleSlot) -> Option<&'static str> {
    block_index(slot).map(|i| TIME_BLOCKS[i].label)
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub section: EnrichedSection,
    pub color: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct GridDay {
    pub day: &'static str,
    /// One entry per time block, in `TIME_BLOCKS` order
    pub cells: Vec<Option<GridCell>>,
}

/// Two sections competing for the same cell; the later one was kept
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConflict {
    pub day: &'static str,
    pub block: &'static str,
    pub kept_section_id: u32,
    pub displaced_section_id: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub course_id: u32,
    pub code: String,
    pub name: String,
    pub color: &'static str,
    pub section_ids: Vec<u32>,
}

/// Day × block matrix of sections, plus everything that did not fit in it
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGrid {
    pub blocks: Vec<&'static str>,
    pub days: Vec<GridDay>,
    pub legend: Vec<LegendEntry>,
    pub conflicts: Vec<GridConflict>,
    /// Sections whose day or times match no cell
    pub unplaced: Vec<u32>,
}

impl WeeklyGrid {
    pub fn build(sections: &[EnrichedSection]) -> Self {
        let mut days: Vec<GridDay> = Weekday::ALL
            .iter()
            .map(|day| GridDay {
                day: day.label(),
                cells: vec![None; TIME_BLOCKS.len()],
            })
            .collect();
        let mut conflicts = Vec::new();
        let mut unplaced = Vec::new();
        let mut legend: Vec<LegendEntry> = Vec::new();

        for enriched in sections {
            let course = &enriched.course;
            match legend.iter_mut().find(|entry| entry.course_id == course.id) {
                Some(entry) => entry.section_ids.push(enriched.id()),
                None => legend.push(LegendEntry {
                    course_id: course.id,
                    code: course.code.clone(),
                    name: course.name.clone(),
                    color: course_color(course.id),
                    section_ids: vec![enriched.id()],
                }),
            }

            if !enriched.schedule.is_well_formed() {
                if enriched.schedule_resolved {
                    warn!(
                        section = enriched.id(),
                        day = %enriched.schedule.day,
                        start = %enriched.schedule.start_time,
                        end = %enriched.schedule.end_time,
                        "Malformed schedule slot left out of weekly grid"
                    );
                }
                unplaced.push(enriched.id());
                continue;
            }

            let position = enriched
                .schedule
                .weekday()
                .zip(block_index(&enriched.schedule));
            let Some((weekday, block)) = position else {
                unplaced.push(enriched.id());
                continue;
            };

            let cell = &mut days[weekday.index()].cells[block];
            if let Some(previous) = cell.as_ref() {
                // last write wins, but the overwrite is reported
                let conflict = GridConflict {
                    day: weekday.label(),
                    block: TIME_BLOCKS[block].label,
                    kept_section_id: enriched.id(),
                    displaced_section_id: previous.section.id(),
                };
                warn!(
                    day = conflict.day,
                    block = conflict.block,
                    kept = conflict.kept_section_id,
                    displaced = conflict.displaced_section_id,
                    "Schedule conflict in weekly grid"
                );
                conflicts.push(conflict);
            }
            *cell = Some(GridCell {
                section: enriched.clone(),
                color: course_color(course.id),
            });
        }

        Self {
            blocks: TIME_BLOCKS.iter().map(|b| b.label).collect(),
            days,
            legend,
            conflicts,
            unplaced,
        }
    }

    pub fn cell(&self, day: Weekday, block: usize) -> Option<&EnrichedSection> {
        self.days
            .get(day.index())
            .and_then(|d| d.cells.get(block))
            .and_then(|c| c.as_ref())
            .map(|c| &c.section)
    }

    /// Ids of every section placed in the matrix
    pub fn placed_ids(&self) -> Vec<u32> {
        self.days
            .iter()
            .flat_map(|d| d.cells.iter().flatten())
            .map(|c| c.section.id())
            .collect()
    }

    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }
}
