use axum::Router;
use axum::routing::{get, post};
use request_history::Route;

use crate::AppState;

pub mod between;
pub mod current_age;
pub(crate) mod errors;
pub mod history;
pub mod index;
pub(crate) mod types;
pub mod weekday;

pub fn get_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::handler))
        .route("/between", post(between::handler::handler))
        .route("/weekday", post(weekday::handler::handler))
        .route(
            "/history",
            get(history::handler::read_handler)
                .delete(history::handler::clear_handler),
        )
        .route("/current_age", get(current_age::handler::handler))
        .with_state(state)
}

/// Count a successfully served request and refresh the history gauge.
pub(crate) fn record_served(state: &AppState, route: Route) {
    let history_len = state.history.len();
    state.telemetry.maybe_use_metrics(|m| {
        m.record_served(route.as_str(), history_len);
    });
}
