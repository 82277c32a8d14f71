//! URL-safe product slugs.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("slug may only contain lowercase letters, digits, and hyphens (got {0:?})")]
    InvalidCharacter(char),
}

/// A URL-safe unique identifier derived from a product's name.
///
/// Slugs appear in catalog URLs (`/products/zen-harmony-bowl`) and are
/// unique across the catalog.
///
/// ## Constraints
///
/// - Non-empty
/// - Only lowercase ASCII letters, digits, and hyphens
///
/// ## Examples
///
/// ```
/// use resonant_harmony_core::Slug;
///
/// assert!(Slug::parse("zen-harmony-bowl").is_ok());
/// assert!(Slug::parse("Zen Bowl").is_err());
///
/// let derived = Slug::from_name("Zen Bowl  Deluxe");
/// assert_eq!(derived.as_str(), "zen-bowl-deluxe");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or contains characters outside
    /// `[a-z0-9-]`.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SlugError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Derive a slug from a product name: lowercase, with each run of
    /// whitespace replaced by a single hyphen.
    ///
    /// Characters that remain invalid after lowering (punctuation, symbols)
    /// are dropped.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let lowered = name.to_lowercase();
        let mut out = String::with_capacity(lowered.len());
        let mut in_whitespace = false;

        for c in lowered.chars() {
            if c.is_whitespace() {
                in_whitespace = true;
                continue;
            }
            if in_whitespace && !out.is_empty() {
                out.push('-');
            }
            in_whitespace = false;
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                out.push(c);
            }
        }

        Self(out)
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
