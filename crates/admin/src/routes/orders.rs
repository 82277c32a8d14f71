//! Mock order table handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::models::Order;
use crate::state::AppState;

/// Order table template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub orders: Vec<Order>,
}

/// Display the mock order table (read-only).
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let orders = state.orders().clone();
    OrdersIndexTemplate { orders }
}
