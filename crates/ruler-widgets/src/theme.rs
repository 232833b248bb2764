//! Ruler colors and indicator metrics

use iced::Color;

// ─────────────────────────────────────────────────────────────────────────────
// Colors
// ─────────────────────────────────────────────────────────────────────────────

pub const RULER_BACKGROUND: Color = Color::from_rgb(0.14, 0.14, 0.16);
pub const SCRUB_ZONE_BACKGROUND: Color = Color::from_rgb(0.10, 0.10, 0.12);
pub const RULER_EDGE: Color = Color::from_rgb(0.30, 0.30, 0.34);

/// Play region while it loops independently of the selection
pub const PLAY_REGION_ACTIVE: Color = Color::from_rgba(0.35, 0.55, 0.95, 0.85);
/// Last active bounds while the region follows the selection
pub const PLAY_REGION_INACTIVE: Color = Color::from_rgba(0.45, 0.45, 0.50, 0.55);
pub const PLAY_REGION_EDGE: Color = Color::from_rgb(0.85, 0.88, 0.95);

pub const QUICK_PLAY_INDICATOR: Color = Color::from_rgb(0.90, 0.90, 0.90);
pub const SCRUB_INDICATOR: Color = Color::from_rgb(0.30, 0.85, 0.40);

pub const GUIDELINE_NEUTRAL: Color = Color::from_rgb(0.80, 0.80, 0.80);
pub const GUIDELINE_SNAP: Color = Color::from_rgb(1.0, 0.85, 0.20);
pub const GUIDELINE_PREVIEW: Color = Color::from_rgb(0.30, 0.85, 0.40);

// ─────────────────────────────────────────────────────────────────────────────
// Indicator metrics
// ─────────────────────────────────────────────────────────────────────────────

pub const INDICATOR_SMALL_WIDTH: i32 = 9;
pub const INDICATOR_MEDIUM_WIDTH: i32 = 13;
/// Gap between the indicator tip and the ruler edge
pub const INDICATOR_OFFSET: i32 = 1;

pub fn indicator_height_for_width(width: i32) -> i32 {
    ((width / 2) * 3) / 2
}

pub fn indicator_width_for_height(height: i32) -> i32 {
    INDICATOR_SMALL_WIDTH.max(((height * 2) / 3) * 2)
}

/// Height of the scrub/seek indicator, sized to the scrub zone
pub fn indicator_big_height() -> i32 {
    (crate::layout::SCRUB_HEIGHT - crate::layout::TOP_MARGIN).max(INDICATOR_MEDIUM_WIDTH)
}

pub fn indicator_big_width() -> i32 {
    indicator_width_for_height(indicator_big_height())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_sizes() {
        assert_eq!(indicator_height_for_width(INDICATOR_SMALL_WIDTH), 6);
        assert_eq!(indicator_height_for_width(INDICATOR_MEDIUM_WIDTH), 9);
        assert_eq!(indicator_big_height(), 13);
        assert_eq!(indicator_big_width(), 16);
        // Never narrower than the small indicator
        assert_eq!(indicator_width_for_height(3), INDICATOR_SMALL_WIDTH);
    }
}
