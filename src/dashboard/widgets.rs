use crate::core::error::ApiError;
use crate::dashboard::composer::{compose, WidgetKind};
use crate::dashboard::scope::my_sections;
use crate::models::section::EnrichedSection;
use crate::models::user::User;
use crate::schedule::grid::WeeklyGrid;
use crate::stores::repository::Repository;
use crate::stores::task::FetchTask;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetData {
    Welcome { name: String, role: &'static str },
    Stat { label: &'static str, value: u64 },
    WeeklySchedule { grid: WeeklyGrid },
    SectionList { sections: Vec<EnrichedSection> },
    Placeholder { message: &'static str },
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WidgetState {
    Ready { data: WidgetData },
    /// Only this widget failed; the rest of the dashboard still renders
    Failed { error: String, retryable: bool },
}

impl WidgetState {
    pub fn is_ready(&self) -> bool {
        matches!(self, WidgetState::Ready { .. })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Widget {
    pub kind: WidgetKind,
    #[serde(flatten)]
    pub state: WidgetState,
}

#[derive(Clone, Debug, Serialize)]
pub struct DashboardView {
    pub user: User,
    pub role: &'static str,
    pub widgets: Vec<Widget>,
}

impl DashboardView {
    pub fn widget(&self, kind: WidgetKind) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.kind == kind)
    }
}

/// Compose and load the signed-in user's dashboard.
///
/// Fails only if the profile itself cannot be loaded. Every data widget is
/// fetched on its own task; dropping the returned future aborts the ones
/// still running. A widget whose entities are invalidated while the
/// dashboard loads is loaded once more, so it never shows data older than
/// a write that finished before the response.
pub async fn load_dashboard(repo: &Arc<Repository>) -> Result<DashboardView, ApiError> {
    let user = Arc::new(repo.profile().await?);
    let kinds = compose(user.role);
    debug!(user_id = user.id, role = user.role.label(), widgets = kinds.len(), "Composing dashboard");

    // subscribe before the first fetch starts
    let changes: Vec<Vec<watch::Receiver<u64>>> = kinds
        .iter()
        .map(|kind| kind.entities().iter().map(|entity| repo.subscribe(*entity)).collect())
        .collect();

    let mut states = load_widgets(repo, &user, &kinds).await;

    let stale: Vec<usize> = changes
        .iter()
        .enumerate()
        .filter(|(_, receivers)| receivers.iter().any(|rx| rx.has_changed().unwrap_or(false)))
        .map(|(i, _)| i)
        .collect();
    if !stale.is_empty() {
        debug!(widgets = stale.len(), "Reloading widgets invalidated during load");
        let stale_kinds: Vec<WidgetKind> = stale.iter().map(|&i| kinds[i]).collect();
        let reloaded = load_widgets(repo, &user, &stale_kinds).await;
        for (i, state) in stale.into_iter().zip(reloaded) {
            states[i] = state;
        }
    }

    let widgets: Vec<Widget> = kinds
        .into_iter()
        .zip(states)
        .map(|(kind, state)| Widget { kind, state })
        .collect();
    let failed = widgets.iter().filter(|w| !w.state.is_ready()).count();
    if failed > 0 {
        warn!(user_id = user.id, failed, "Dashboard rendered with failed widgets");
    }

    Ok(DashboardView {
        role: user.role.label(),
        user: User::clone(&user),
        widgets,
    })
}

/// Load `kinds` concurrently and return their states in the same order.
/// Static widgets are built in place without a task.
async fn load_widgets(repo: &Arc<Repository>, user: &Arc<User>, kinds: &[WidgetKind]) -> Vec<WidgetState> {
    let tasks: Vec<(WidgetKind, Option<FetchTask<WidgetData>>)> = kinds
        .iter()
        .map(|&kind| {
            if kind.is_static() {
                return (kind, None);
            }
            let repo = Arc::clone(repo);
            let user = Arc::clone(user);
            let task = FetchTask::spawn(async move { load_widget(kind, &repo, &user).await });
            (kind, Some(task))
        })
        .collect();

    let mut states = Vec::with_capacity(tasks.len());
    for (kind, task) in tasks {
        let result = match task {
            Some(task) => task.join().await,
            None => load_widget(kind, repo, user).await,
        };
        states.push(match result {
            Ok(data) => WidgetState::Ready { data },
            Err(e) => {
                warn!(widget = ?kind, error = %e, "Dashboard widget failed");
                WidgetState::Failed {
                    error: e.to_string(),
                    retryable: e.is_retryable(),
                }
            }
        });
    }
    states
}

pub async fn load_widget(kind: WidgetKind, repo: &Repository, user: &User) -> Result<WidgetData, ApiError> {
    let data = match kind {
        WidgetKind::Welcome => WidgetData::Welcome {
            name: user.full_name(),
            role: user.role.label(),
        },
        WidgetKind::Placeholder => WidgetData::Placeholder {
            message: "No hay contenido disponible para este rol",
        },

        WidgetKind::MySections => stat("Mis secciones", my_sections(repo, user).await?.len()),
        WidgetKind::MyCredits => stat("Mis créditos", total_credits(&my_sections(repo, user).await?)),
        WidgetKind::TeachingSections => {
            stat("Secciones a cargo", my_sections(repo, user).await?.len())
        }
        WidgetKind::TotalCapacity => {
            let capacity: u64 = my_sections(repo, user)
                .await?
                .iter()
                .map(|s| u64::from(s.section.capacity))
                .sum();
            WidgetData::Stat {
                label: "Cupo total",
                value: capacity,
            }
        }
        WidgetKind::WeeklySchedule => WidgetData::WeeklySchedule {
            grid: WeeklyGrid::build(&my_sections(repo, user).await?),
        },
        WidgetKind::SectionList => WidgetData::SectionList {
            sections: my_sections(repo, user).await?,
        },

        WidgetKind::TotalCourses => stat("Cursos", repo.courses().await?.len()),
        WidgetKind::TotalUsers => stat("Usuarios", repo.users().await?.len()),
        WidgetKind::PendingVerifications => stat(
            "Verificaciones pendientes",
            repo.users().await?.iter().filter(|u| u.pending_verification).count(),
        ),
        WidgetKind::UnscheduledSections => stat(
            "Secciones sin horario",
            repo.sections().await?.iter().filter(|s| !s.is_scheduled()).count(),
        ),
    };

    Ok(data)
}

fn stat(label: &'static str, count: usize) -> WidgetData {
    WidgetData::Stat {
        label,
        value: count as u64,
    }
}

/// Credits of the distinct courses among `sections`
pub fn total_credits(sections: &[EnrichedSection]) -> usize {
    let per_course: BTreeMap<u32, u8> = sections
        .iter()
        .map(|s| (s.course.id, s.course.credits))
        .collect();
    per_course.values().map(|c| usize::from(*c)).sum()
}
