//! Product category tags.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// The category a catalog item belongs to.
///
/// Serialized in kebab-case to match the wire format and the values stored
/// in the `product.tag` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProductTag {
    #[default]
    SingingBowl,
    Beads,
    Bells,
    Incense,
    MeditationCushion,
    Accessories,
}

impl ProductTag {
    /// All tags, in display order. Used to render filter chips and the
    /// admin form's category selector.
    pub const ALL: [Self; 6] = [
        Self::SingingBowl,
        Self::Beads,
        Self::Bells,
        Self::Incense,
        Self::MeditationCushion,
        Self::Accessories,
    ];

    /// The kebab-case wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SingingBowl => "singing-bowl",
            Self::Beads => "beads",
            Self::Bells => "bells",
            Self::Incense => "incense",
            Self::MeditationCushion => "meditation-cushion",
            Self::Accessories => "accessories",
        }
    }

    /// Human-readable label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SingingBowl => "Singing Bowl",
            Self::Beads => "Beads",
            Self::Bells => "Bells",
            Self::Incense => "Incense",
            Self::MeditationCushion => "Meditation Cushion",
            Self::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for ProductTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown tag value.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown product tag: {0}")]
pub struct UnknownTag(pub String);

impl FromStr for ProductTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|tag| tag.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownTag(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_str() {
        for tag in ProductTag::ALL {
            assert_eq!(tag.as_str().parse::<ProductTag>().expect("known"), tag);
        }
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&ProductTag::MeditationCushion).expect("serialize");
        assert_eq!(json, "\"meditation-cushion\"");
    }

    #[test]
    fn test_unknown_tag_is_error() {
        assert!("gongs".parse::<ProductTag>().is_err());
    }

    #[test]
    fn test_default_is_singing_bowl() {
        assert_eq!(ProductTag::default(), ProductTag::SingingBowl);
    }
}
