use serde::Serialize;

use crate::scoring::{Category, CategoryScoreSet};

/// RGB fill for a bar
pub type Rgb = (u8, u8, u8);

pub const WARMTH_FILL: Rgb = (0x4f, 0x46, 0xe5);
pub const CONTROL_FILL: Rgb = (0xe1, 0x1d, 0x48);
pub const RADAR_FILL: Rgb = (0x8b, 0x5c, 0xf6);

/// Full mark of every radar axis
pub const RADAR_FULL_MARK: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    pub category: Category,
    pub score: u32,
    pub full: u32,
    pub fill: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarDatum {
    pub category: Category,
    pub percent: u32,
}

/// Raw warmth and control totals. Support only appears on the radar.
pub fn bar_data(scores: &CategoryScoreSet) -> Vec<BarDatum> {
    vec![
        BarDatum {
            category: Category::Warmth,
            score: scores.warmth.score,
            full: scores.warmth.max,
            fill: WARMTH_FILL,
        },
        BarDatum {
            category: Category::Control,
            score: scores.control.score,
            full: scores.control.max,
            fill: CONTROL_FILL,
        },
    ]
}

/// Rounded percentage per category, all three axes
pub fn radar_data(scores: &CategoryScoreSet) -> Vec<RadarDatum> {
    Category::ALL
        .iter()
        .map(|&category| RadarDatum {
            category,
            percent: scores.get(category).percent(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::CategoryScore;

    fn scores() -> CategoryScoreSet {
        CategoryScoreSet {
            warmth: CategoryScore { score: 7, max: 10 },
            control: CategoryScore { score: 2, max: 10 },
            support: CategoryScore { score: 1, max: 3 },
        }
    }

    #[test]
    fn test_bar_data_excludes_support() {
        let bars = bar_data(&scores());
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].category, Category::Warmth);
        assert_eq!((bars[0].score, bars[0].full), (7, 10));
        assert_eq!(bars[1].fill, CONTROL_FILL);
    }

    #[test]
    fn test_radar_percentages() {
        let radar = radar_data(&scores());
        let percents: Vec<_> = radar.iter().map(|d| d.percent).collect();
        assert_eq!(percents, vec![70, 20, 33]);
        assert!(radar.iter().all(|d| d.percent <= RADAR_FULL_MARK));
    }
}
