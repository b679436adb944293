use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LogoGenError;

/// Declares one of the fixed single-choice option sets offered during
/// onboarding. The first listed option is the default.
macro_rules! option_set {
    ($name:ident, $label:literal, [$($variant:ident => $text:literal),+ $(,)?]) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const LABEL: &'static str = $label;

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            pub fn options() -> Vec<&'static str> {
                Self::ALL.iter().map(|option| option.as_str()).collect()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = LogoGenError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| {
                        LogoGenError::Validation(format!(
                            "Unknown {} '{}'. Must be one of: {}",
                            $label,
                            s,
                            Self::options().join(", ")
                        ))
                    })
            }
        }
    };
}

option_set!(BrandStyle, "Style", [
    Modern => "Modern",
    Minimal => "Minimal",
    Bold => "Bold",
    Retro => "Retro",
    Elegant => "Elegant",
]);

option_set!(Palette, "Palette", [
    Vibrant => "Vibrant",
    Muted => "Muted",
    Monochrome => "Monochrome",
    Pastel => "Pastel",
]);

option_set!(AspectRatio, "Aspect Ratio", [
    Square => "1:1",
    Widescreen => "16:9",
    Standard => "4:3",
    Classic => "3:2",
]);

/// Style choices the main screen falls back to when the user has not picked
/// anything else. A completed onboarding flow supplies these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationDefaults {
    pub style: BrandStyle,
    pub palette: Palette,
    pub aspect_ratio: AspectRatio,
}
