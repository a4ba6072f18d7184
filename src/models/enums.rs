use serde::{Deserialize, Serialize};

use crate::catalog::CatalogError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        $(#[$meta])*
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CatalogError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(CatalogError::UnknownValue {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(
    #[serde(rename_all = "UPPERCASE")]
    Dsm5Code {
        A1 => "A1",
        A2 => "A2",
        A3 => "A3",
        A4 => "A4",
        A5 => "A5",
        A6 => "A6",
        A7 => "A7",
        A8 => "A8",
        A9 => "A9",
    }
);

str_enum!(
    /// Which strategy produced a detection. Declaration order is priority order.
    #[serde(rename_all = "snake_case")]
    MatchType {
        Token => "token",
        Phrase => "phrase",
        Keyword => "keyword",
    }
);

str_enum!(
    #[serde(rename_all = "snake_case")]
    ImpairmentSeverity {
        None => "none",
        Mild => "mild",
        Moderate => "moderate",
        Severe => "severe",
    }
);

str_enum!(
    #[serde(rename_all = "snake_case")]
    TemporalCategory {
        Chronic => "chronic",
        Frequent => "frequent",
        Recent => "recent",
        Intermittent => "intermittent",
    }
);

str_enum!(
    #[serde(rename_all = "snake_case")]
    IntensityCategory {
        High => "high",
        Moderate => "moderate",
        Low => "low",
    }
);

impl MatchType {
    /// Confidence attached to a detection produced by this strategy.
    pub fn confidence(&self) -> f32 {
        match self {
            Self::Token => 0.7,
            Self::Phrase => 0.8,
            Self::Keyword => 0.6,
        }
    }
}

impl ImpairmentSeverity {
    /// Bucket a count of distinct impairment phrases.
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Self::None,
            1 => Self::Mild,
            2 => Self::Moderate,
            _ => Self::Severe,
        }
    }
}
