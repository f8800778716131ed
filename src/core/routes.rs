// HTTP routes configuration

use crate::core::state::AppState;
use crate::handlers::{courses, dashboard, fallback, health, live, profile, schedule, users};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/dashboard", get(dashboard::dashboard_handler))
        .route("/refresh", post(dashboard::refresh_handler))

        // Course catalog
        .route(
            "/courses",
            get(courses::list_courses_handler).post(courses::create_course_handler),
        )
        .route(
            "/courses/{id}",
            get(courses::get_course_handler)
                .put(courses::update_course_handler)
                .delete(courses::delete_course_handler),
        )
        .route("/courses/live", get(live::live_courses_handler))

        // Schedules
        .route("/schedule", get(schedule::schedule_table_handler))
        .route("/schedule/grid", get(schedule::schedule_grid_handler))
        .route("/me/schedule", get(schedule::my_schedule_handler))

        // Users and the signed-in profile
        .route("/users", get(users::users_table_handler))
        .route("/users/live", get(live::live_users_handler))
        .route(
            "/me",
            get(profile::get_profile_handler).put(profile::update_profile_handler),
        )
        .route("/me/password", post(profile::change_password_handler))

        // JSON 404 for all unmatched routes
        .fallback(fallback::fallback_handler)

        .with_state(state)
}
