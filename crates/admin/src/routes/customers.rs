//! Mock customer table handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tracing::instrument;

use resonant_harmony_core::CustomerId;

use crate::filters;
use crate::models::Customer;
use crate::state::AppState;

/// Customer table template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub customers: Vec<Customer>,
}

/// Display the mock customer table.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let customers = state.customers().clone();
    CustomersIndexTemplate { customers }
}

/// Remove a customer from the mock list. Removing an unknown id is a no-op.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<CustomerId>) -> Redirect {
    state.customers_mut().retain(|customer| customer.id != id);
    tracing::info!(%id, "Customer removed from mock list");
    Redirect::to("/customers")
}
