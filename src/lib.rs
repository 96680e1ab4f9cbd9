// src/lib.rs

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use services::dispatcher::Dispatcher;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

pub mod entities {
    pub mod prelude;
    pub mod items;
}

pub mod services {
    pub mod clock;
    pub mod dispatcher;
    pub mod formatting;
    pub mod intent_router;
    pub mod item_store;
    pub mod ledger_reporter;
    pub mod ledger_writer;
    pub mod memory_store;
    pub mod period;
    pub mod ports;
    pub mod price_parser;
    pub mod telegram;
    pub mod update_handler;
}

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .route("/webhook", post(handlers::webhook::receive_update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
