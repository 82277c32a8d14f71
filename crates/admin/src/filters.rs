//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Formats a decimal amount as a dollar price.
///
/// Usage in templates: `{{ total|money }}`
#[askama::filter_fn]
pub fn money(amount: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("${amount:.2}"))
}
