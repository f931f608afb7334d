pub mod aggregator;
mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
