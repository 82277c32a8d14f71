//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub product_count: usize,
    pub customer_count: usize,
    pub order_count: usize,
    pub revenue: Decimal,
}

/// Display the dashboard overview.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let product_count = ProductRepository::new(state.pool()).list().await?.len();

    let customer_count = state.customers().len();
    let (order_count, revenue) = {
        let orders = state.orders();
        let revenue = orders.iter().map(|order| order.total).sum();
        (orders.len(), revenue)
    };

    Ok(DashboardTemplate {
        product_count,
        customer_count,
        order_count,
        revenue,
    }
    .into_response())
}
