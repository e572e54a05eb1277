use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/nav/prev", post(handlers::nav_prev))
        .route("/nav/next", post(handlers::nav_next))
        .route("/nav/today", post(handlers::nav_today))
        .route("/date", get(handlers::pick_date))
        .route("/calendar/toggle", post(handlers::calendar_toggle))
        .route("/calendar/month", post(handlers::calendar_month))
        .route("/calendar/select", post(handlers::calendar_select))
        .route("/calendar/dismiss", post(handlers::calendar_dismiss))
        .route("/subscribe", post(handlers::subscribe))
        .route("/api/state", get(handlers::get_state))
        .with_state(state)
}
