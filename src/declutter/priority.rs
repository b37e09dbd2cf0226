use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::constants::{POI_DRAW_PRIORITY, PROVINCE_DRAW_PRIORITY, WATER_DRAW_PRIORITY};
use crate::data::features::{Category, SizeRank};

/// Keep/draw priority of a label. When two labels collide the higher one stays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawPriority(pub i32);

impl DrawPriority {
    /// Reserved for the highlighted feature; nothing configured can beat it.
    pub const HIGHLIGHT: DrawPriority = DrawPriority(i32::MAX);

    pub const LOWEST: DrawPriority = DrawPriority(i32::MIN);

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn is_highlight(self) -> bool {
        self == Self::HIGHLIGHT
    }

    /// Priority for a category entry: an explicit `zIndex` wins, otherwise
    /// settlements rank by size and other categories use a fixed constant.
    ///
    /// Configured values are capped just below [`Self::HIGHLIGHT`].
    pub fn for_category(
        category: Category,
        rank: Option<SizeRank>,
        configured: Option<i32>,
    ) -> Self {
        let value = configured.unwrap_or_else(|| match (category, rank) {
            (Category::Settlement, Some(rank)) => rank.get() as i32,
            (Category::Settlement, None) => 0,
            (Category::PointOfInterest, _) => POI_DRAW_PRIORITY,
            (Category::Province, _) => PROVINCE_DRAW_PRIORITY,
            (Category::Water, _) => WATER_DRAW_PRIORITY,
        });
        DrawPriority(value.min(i32::MAX - 1))
    }
}

impl Default for DrawPriority {
    fn default() -> Self {
        DrawPriority(0)
    }
}

impl fmt::Display for DrawPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_highlight() {
            f.pad("highlight")
        } else {
            f.pad(&self.0.to_string())
        }
    }
}
