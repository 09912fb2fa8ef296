//! Free vs premium feature access.
//!
//! The gate only decides how many events and which themes or icons are
//! available. It never depends on the date engine.

use std::fmt;

use crate::types::Theme;

/// Events a free user may keep at once.
pub const FREE_EVENT_LIMIT: usize = 3;

/// Features that can be locked behind premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Events,
    Themes,
    Icons,
    Lifespan,
}

impl Feature {
    /// Explanation shown when the feature is locked.
    pub fn gate_message(self) -> String {
        match self {
            Self::Events => format!(
                "Free users can create up to {FREE_EVENT_LIMIT} events. Upgrade to Premium for unlimited events."
            ),
            Self::Themes => "Upgrade to Premium to unlock all premium themes.".to_string(),
            Self::Icons => "Upgrade to Premium to access 50+ exclusive icons.".to_string(),
            Self::Lifespan => "Upgrade to Premium to customize your life expectancy.".to_string(),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Events => "events",
            Self::Themes => "themes",
            Self::Icons => "icons",
            Self::Lifespan => "lifespan",
        };
        write!(f, "{name}")
    }
}

/// Whether another event may be created given the current count.
pub const fn can_create_more_events(current_count: usize, is_premium: bool) -> bool {
    is_premium || current_count < FREE_EVENT_LIMIT
}

/// Free event slots left, or `None` when unlimited.
pub const fn remaining_free_events(current_count: usize, is_premium: bool) -> Option<usize> {
    if is_premium {
        None
    } else {
        Some(FREE_EVENT_LIMIT.saturating_sub(current_count))
    }
}

/// Whether the theme may be selected.
pub const fn can_access_theme(theme: Theme, is_premium: bool) -> bool {
    is_premium || !theme.is_premium()
}

/// Whether the premium icon set may be used.
pub const fn can_access_premium_icons(is_premium: bool) -> bool {
    is_premium
}

/// Whether the life expectancy may be changed from the default.
///
/// Currently open to everyone.
pub const fn can_customize_life_expectancy(_is_premium: bool) -> bool {
    true
}
