use serde::{Deserialize, Serialize};

/// Storefronts and consoles a library entry can come from.
///
/// Short names, display names, and aliases live here so sources, the store,
/// and the CLI agree on one spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Platform {
    Steam,
    Ps4,
    Ps5,
    Switch,
    Xbox,
    /// Entered by hand, not tracked by any external source.
    Manual,
}

/// De-duplication bucket for platforms.
///
/// Names are unique within a group, and removal bookkeeping during a sync
/// only considers records of the source's group. A PS4 and a PS5 copy of the
/// same title share a group; a Steam copy and a console port do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlatformGroup {
    Steam,
    PlayStation,
    Nintendo,
    Xbox,
    Manual,
}

const ALL_PLATFORMS: &[Platform] = &[
    Platform::Steam,
    Platform::Ps4,
    Platform::Ps5,
    Platform::Switch,
    Platform::Xbox,
    Platform::Manual,
];

impl Platform {
    /// Canonical short name used for the CLI and the database.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Steam => "steam",
            Self::Ps4 => "ps4",
            Self::Ps5 => "ps5",
            Self::Switch => "switch",
            Self::Xbox => "xbox",
            Self::Manual => "manual",
        }
    }

    /// Full display name for the platform.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Steam => "Steam",
            Self::Ps4 => "PS4",
            Self::Ps5 => "PS5",
            Self::Switch => "Switch",
            Self::Xbox => "Xbox",
            Self::Manual => "Manual",
        }
    }

    /// All accepted names for this platform (case-insensitive matching).
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Steam => &["steam", "pc", "steam deck"],
            Self::Ps4 => &["ps4", "playstation 4", "playstation4"],
            Self::Ps5 => &["ps5", "playstation 5", "playstation5"],
            Self::Switch => &["switch", "nintendo switch", "ns"],
            Self::Xbox => &["xbox", "xbox one", "xbox series", "xsx"],
            Self::Manual => &["manual", "other", "physical"],
        }
    }

    pub fn group(&self) -> PlatformGroup {
        match self {
            Self::Steam => PlatformGroup::Steam,
            Self::Ps4 | Self::Ps5 => PlatformGroup::PlayStation,
            Self::Switch => PlatformGroup::Nintendo,
            Self::Xbox => PlatformGroup::Xbox,
            Self::Manual => PlatformGroup::Manual,
        }
    }

    pub fn all() -> &'static [Platform] {
        ALL_PLATFORMS
    }
}

impl PlatformGroup {
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Steam => "steam",
            Self::PlayStation => "playstation",
            Self::Nintendo => "nintendo",
            Self::Xbox => "xbox",
            Self::Manual => "manual",
        }
    }

    /// Platforms that belong to this group.
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        ALL_PLATFORMS.iter().copied().filter(move |p| p.group() == *self)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::fmt::Display for PlatformGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Error returned when a string cannot be parsed into a `Platform`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown platform: '{0}'")]
pub struct PlatformParseError(pub String);

impl std::str::FromStr for Platform {
    type Err = PlatformParseError;

    /// Parse a platform from any recognized name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ALL_PLATFORMS
            .iter()
            .copied()
            .find(|p| p.aliases().contains(&lower.as_str()))
            .ok_or_else(|| PlatformParseError(s.to_string()))
    }
}

impl TryFrom<String> for Platform {
    type Error = PlatformParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.short_name().to_string()
    }
}

#[cfg(test)]
#[path = "tests/platform_tests.rs"]
mod tests;
