use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// New Relic deployment to target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Region {
    /// US-based production deployment.
    #[default]
    Us,
    /// EU-based production deployment.
    Eu,
    /// US-based staging deployment, for internal New Relic use only.
    Staging,
}

impl Region {
    /// Every region, in declaration order.
    pub const ALL: [Region; 3] = [Region::Us, Region::Eu, Region::Staging];

    /// Base URL of the REST API v2 for this region.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Us => "https://api.newrelic.com/v2",
            Self::Eu => "https://api.eu.newrelic.com/v2",
            Self::Staging => "https://staging-api.newrelic.com/v2",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Eu => "eu",
            Self::Staging => "staging",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|region| region.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownRegion(s.to_owned()))
    }
}

impl TryFrom<String> for Region {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
