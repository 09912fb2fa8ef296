//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The theme name is not one of the known themes.
    #[error("unknown theme: {value}")]
    UnknownTheme { value: String },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated event identifier.
    ///
    /// Event IDs must be non-empty strings. New events get a UUID; older
    /// persisted state may carry other non-empty strings.
    EventId, "event ID"
);

impl EventId {
    /// Generates a fresh random ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Color theme chosen by the user.
///
/// The first four are free; the rest require premium.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Midnight,
    Slate,
    Indigo,
    Emerald,
    PureWhite,
    PureBlack,
    Monochrome,
    Sunset,
    Ocean,
    Forest,
}

impl Theme {
    /// Every theme, free ones first.
    pub const ALL: [Self; 10] = [
        Self::Midnight,
        Self::Slate,
        Self::Indigo,
        Self::Emerald,
        Self::PureWhite,
        Self::PureBlack,
        Self::Monochrome,
        Self::Sunset,
        Self::Ocean,
        Self::Forest,
    ];

    /// String representation used in persisted state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Midnight => "midnight",
            Self::Slate => "slate",
            Self::Indigo => "indigo",
            Self::Emerald => "emerald",
            Self::PureWhite => "pure-white",
            Self::PureBlack => "pure-black",
            Self::Monochrome => "monochrome",
            Self::Sunset => "sunset",
            Self::Ocean => "ocean",
            Self::Forest => "forest",
        }
    }

    /// Whether the theme is only available with premium.
    #[must_use]
    pub const fn is_premium(&self) -> bool {
        matches!(
            self,
            Self::PureWhite
                | Self::PureBlack
                | Self::Monochrome
                | Self::Sunset
                | Self::Ocean
                | Self::Forest
        )
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownTheme {
                value: s.to_string(),
            })
    }
}
