use serde::{Deserialize, Serialize};
use std::fmt;

/// A ratio must be strictly above this to count as high.
pub const HIGH_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentingStyle {
    /// High warmth, high control
    Authoritative,
    /// High warmth, low control
    Permissive,
    /// Low warmth, high control
    Authoritarian,
    /// Low warmth, low control
    Uninvolved,
}

impl ParentingStyle {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Authoritative => "Authoritative",
            Self::Permissive => "Permissive",
            Self::Authoritarian => "Authoritarian",
            Self::Uninvolved => "Uninvolved",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Self::Authoritative => "Balanced",
            Self::Permissive => "Generous",
            Self::Authoritarian => "Strict",
            Self::Uninvolved => "Detached",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Authoritative => {
                "You keep a healthy balance of affection and discipline. \
                 This is considered the best environment for a child's development."
            }
            Self::Permissive => {
                "You are very affectionate but relaxed about discipline. \
                 Setting limits now and then is important."
            }
            Self::Authoritarian => {
                "You put a strong emphasis on discipline. \
                 A little more affection and freedom will strengthen the relationship."
            }
            Self::Uninvolved => {
                "You may need to be more involved in your child's life. \
                 Increase conversation and time together."
            }
        }
    }
}

impl fmt::Display for ParentingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.summary(), self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

impl Level {
    pub fn of(ratio: f64) -> Self {
        if ratio > HIGH_THRESHOLD {
            Level::High
        } else {
            Level::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Level::High => "high",
            Level::Low => "low",
        }
    }
}

impl ParentingStyle {
    /// The four-way decision on (warmth, control) levels.
    pub fn from_levels(warmth: Level, control: Level) -> Self {
        match (warmth, control) {
            (Level::High, Level::High) => Self::Authoritative,
            (Level::High, Level::Low) => Self::Permissive,
            (Level::Low, Level::High) => Self::Authoritarian,
            (Level::Low, Level::Low) => Self::Uninvolved,
        }
    }
}

/// (warmth, control) -> style in display order. Mirrors `from_levels`.
pub const RULES: [(Level, Level, ParentingStyle); 4] = [
    (Level::High, Level::High, ParentingStyle::Authoritative),
    (Level::High, Level::Low, ParentingStyle::Permissive),
    (Level::Low, Level::High, ParentingStyle::Authoritarian),
    (Level::Low, Level::Low, ParentingStyle::Uninvolved),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StyleClassification {
    pub style: ParentingStyle,
    pub warmth_ratio: f64,
    pub control_ratio: f64,
}

impl StyleClassification {
    pub fn title(&self) -> &'static str {
        self.style.title()
    }

    pub fn description(&self) -> &'static str {
        self.style.description()
    }
}

/// Classify from warmth and control totals.
///
/// Both maxima must be positive; `aggregate` guarantees this.
pub fn classify(
    warmth_score: u32,
    control_score: u32,
    max_warmth: u32,
    max_control: u32,
) -> StyleClassification {
    let warmth_ratio = warmth_score as f64 / max_warmth as f64;
    let control_ratio = control_score as f64 / max_control as f64;
    let style = ParentingStyle::from_levels(Level::of(warmth_ratio), Level::of(control_ratio));

    StyleClassification {
        style,
        warmth_ratio,
        control_ratio,
    }
}

/// A static tip shown under every result.
#[derive(Debug, Clone, Copy)]
pub struct Recommendation {
    pub heading: &'static str,
    pub body: &'static str,
}

pub const RECOMMENDATIONS: [Recommendation; 4] = [
    Recommendation {
        heading: "The power of praise",
        body: "Praise your child's small achievements. This raises warmth.",
    },
    Recommendation {
        heading: "Positive discipline",
        body: "When a mistake happens, talk it through instead of hitting. This keeps control positive.",
    },
    Recommendation {
        heading: "Give time",
        body: "Spend at least 15 minutes a day with your child without a phone.",
    },
    Recommendation {
        heading: "Emotional support",
        body: "When your child is sad, listen first before giving advice.",
    },
];
