pub mod composer;
pub mod scope;
pub mod widgets;

pub use composer::{compose, WidgetKind};
pub use widgets::{load_dashboard, DashboardView, WidgetState};
