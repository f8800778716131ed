//! Table state of one live connection.
//!
//! Keystrokes go through a `Debouncer`; facet and page commands apply at
//! once. `changed` resolves when a debounced term commits or the table's
//! entity is invalidated, so the caller knows when to re-query.

use crate::core::config::TableConfig;
use crate::models::api::canonical_facet;
use crate::table::debounce::{CommittedTerm, Debouncer};
use crate::table::query::TableState;
use serde::Deserialize;
use tokio::sync::watch;
use tracing::debug;

/// Client message on a live table connection
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableCommand {
    /// Search box content after a keystroke
    Input { text: String },
    /// Enter pressed: commit without waiting for the quiet period
    Submit { text: String },
    /// Search box emptied with its clear button
    Clear,
    /// Set a facet, or clear it when `value` is missing or blank
    Facet {
        name: String,
        #[serde(default)]
        value: Option<String>,
    },
    Page { page: usize },
}

/// Why the table has to be queried again
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Term,
    Data,
}

pub struct LiveTable {
    state: TableState,
    debouncer: Debouncer,
    terms: watch::Receiver<CommittedTerm>,
    data: watch::Receiver<u64>,
}

impl LiveTable {
    /// `data` is the revision receiver of the entity the table shows
    pub fn new(table: &TableConfig, data: watch::Receiver<u64>) -> Self {
        let debouncer = Debouncer::from_config(table);
        let terms = debouncer.subscribe();

        Self {
            state: TableState::new(),
            debouncer,
            terms,
            data,
        }
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Apply a client command. Returns true when the table must be queried
    /// right away; search text shows up later through `changed`.
    pub fn apply(&mut self, command: TableCommand) -> bool {
        match command {
            TableCommand::Input { text } => {
                self.debouncer.input(&text);
                false
            }
            TableCommand::Submit { text } => {
                self.debouncer.submit(&text);
                false
            }
            TableCommand::Clear => {
                self.debouncer.clear();
                false
            }
            TableCommand::Facet { name, value } => {
                let value = value.map(|v| canonical_facet(&name, v.trim()));
                self.state.set_facet(&name, value.as_deref());
                true
            }
            TableCommand::Page { page } => {
                self.state.set_page(page);
                true
            }
        }
    }

    /// Wait for a committed search term or a data invalidation.
    /// Returns None once both sources are closed.
    pub async fn changed(&mut self) -> Option<Change> {
        tokio::select! {
            Ok(()) = self.terms.changed() => {
                let term = self.terms.borrow().term.clone();
                debug!(term = %term, "Live table search committed");
                self.state.commit_term(&term);
                Some(Change::Term)
            }
            Ok(()) = self.data.changed() => Some(Change::Data),
            else => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn live() -> (watch::Sender<u64>, LiveTable) {
        let (tx, rx) = watch::channel(0);
        (tx, LiveTable::new(&TableConfig::default(), rx))
    }

    fn input(text: &str) -> TableCommand {
        TableCommand::Input {
            text: text.to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_keystrokes_commit_last_value_once() {
        let (tx, mut live) = live();
        assert!(live.apply(TableCommand::Page { page: 3 }));

        for text in ["m", "ma", "mat"] {
            assert!(!live.apply(input(text)));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        assert_eq!(live.changed().await, Some(Change::Term));
        assert_eq!(live.state().term(), "mat");
        assert_eq!(live.state().page(), 1);

        // no second commit is pending; the next wake-up is the data change
        tx.send_modify(|rev| *rev += 1);
        assert_eq!(live.changed().await, Some(Change::Data));
        assert_eq!(live.state().term(), "mat");
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_commits_without_quiet_period() {
        let (_tx, mut live) = live();
        live.apply(TableCommand::Submit {
            text: " fis ".to_string(),
        });

        let change = tokio::time::timeout(Duration::from_millis(1), live.changed()).await;
        assert_eq!(change.unwrap(), Some(Change::Term));
        assert_eq!(live.state().term(), "fis");
    }

    #[tokio::test(start_paused = true)]
    async fn test_facets_are_canonical_and_reset_page() {
        let (_tx, mut live) = live();
        live.apply(TableCommand::Page { page: 2 });

        let command: TableCommand =
            serde_json::from_str(r#"{"type":"facet","name":"role","value":"Student"}"#).unwrap();
        assert!(live.apply(command));
        assert_eq!(live.state().facets().get("role").map(String::as_str), Some("Estudiante"));
        assert_eq!(live.state().page(), 1);

        let command: TableCommand = serde_json::from_str(r#"{"type":"facet","name":"role"}"#).unwrap();
        live.apply(command);
        assert!(live.state().facets().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_empties_committed_term() {
        let (_tx, mut live) = live();
        live.apply(TableCommand::Submit {
            text: "mat".to_string(),
        });
        live.changed().await;

        let command: TableCommand = serde_json::from_str(r#"{"type":"clear"}"#).unwrap();
        live.apply(command);
        assert_eq!(live.changed().await, Some(Change::Term));
        assert_eq!(live.state().term(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_data_source_still_commits_terms() {
        let (tx, mut live) = live();
        drop(tx);

        live.apply(input("qui"));
        assert_eq!(live.changed().await, Some(Change::Term));
    }
}
