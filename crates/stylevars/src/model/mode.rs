//! Resolution modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A resolution context under which a variable may have a distinct value.
///
/// The set is closed: every backend knows how to emit each mode. [`Mode::Light`]
/// is the default mode, used as the fallback when a variable has no definition
/// for the requested mode.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    /// Every mode, in declaration order.
    pub const ALL: [Mode; 2] = [Mode::Light, Mode::Dark];

    /// Returns the lowercase name used in definition files and generated output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Mode::Light),
            "dark" => Ok(Mode::Dark),
            other => Err(format!("Unknown mode: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_light() {
        assert_eq!(Mode::default(), Mode::Light);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("light".parse::<Mode>(), Ok(Mode::Light));
        assert_eq!(" DARK ".parse::<Mode>(), Ok(Mode::Dark));
        assert!("dim".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_display_round_trips_through_serde() {
        let yaml = serde_yaml::to_string(&Mode::Dark).unwrap();
        assert_eq!(yaml.trim(), "dark");
        assert_eq!(Mode::Dark.to_string(), "dark");
    }
}
