//! Hit-test geometry of the ruler
//!
//! The ruler is split into a quick-play zone on top and, when the scrub bar
//! is shown, a scrub zone at the bottom. The scrub zone's hit area extends
//! over the bottom margin so the very last row of pixels still scrubs.

use iced::{Point, Rectangle, Size};

pub const LEFT_MARGIN: i32 = 1;
pub const RIGHT_MARGIN: i32 = 1;
pub const TOP_MARGIN: i32 = 1;
pub const BOTTOM_MARGIN: i32 = 2;

/// Height of the scrub bar
pub const SCRUB_HEIGHT: i32 = 14;
/// Height of the ruler without the scrub bar
pub const PROPER_RULER_HEIGHT: i32 = 29;

/// Total ruler height for the given scrub bar visibility
pub fn ruler_height(show_scrub_bar: bool) -> i32 {
    if show_scrub_bar {
        PROPER_RULER_HEIGHT + SCRUB_HEIGHT
    } else {
        PROPER_RULER_HEIGHT
    }
}

/// The two interactive areas of the ruler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulerCell {
    QuickPlay,
    Scrub,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulerLayout {
    outer: Rectangle,
    inner: Rectangle,
    scrub_zone: Rectangle,
    show_scrub_bar: bool,
}

impl Default for RulerLayout {
    fn default() -> Self {
        let mut layout = Self {
            outer: Rectangle::new(Point::ORIGIN, Size::ZERO),
            inner: Rectangle::new(Point::ORIGIN, Size::ZERO),
            scrub_zone: Rectangle::new(Point::ORIGIN, Size::ZERO),
            show_scrub_bar: false,
        };
        layout.update(0, false);
        layout
    }
}

impl RulerLayout {
    pub fn new(width: i32, show_scrub_bar: bool) -> Self {
        let mut layout = Self::default();
        layout.update(width, show_scrub_bar);
        layout
    }

    /// Recompute the rectangles for a ruler `width` pixels wide
    ///
    /// Returns true when any rectangle changed.
    pub fn update(&mut self, width: i32, show_scrub_bar: bool) -> bool {
        let height = ruler_height(show_scrub_bar);
        let outer = rect(0, 0, width.max(0), height);

        let mut inner = rect(
            LEFT_MARGIN,
            0,
            (width - LEFT_MARGIN - RIGHT_MARGIN).max(0),
            height,
        );
        let mut scrub_zone = inner;

        if show_scrub_bar {
            let scrub_height = (inner.height as i32).min(SCRUB_HEIGHT);
            let top_height = inner.height as i32 - scrub_height;
            scrub_zone.y += top_height as f32;
            scrub_zone.height = (scrub_height - BOTTOM_MARGIN).max(0) as f32;
            inner.height = top_height as f32;
        } else {
            inner.height = (inner.height as i32 - BOTTOM_MARGIN).max(0) as f32;
        }
        inner.y += TOP_MARGIN as f32;
        inner.height = (inner.height - TOP_MARGIN as f32).max(0.0);
        if !show_scrub_bar {
            scrub_zone = inner;
        }

        let changed = outer != self.outer
            || inner != self.inner
            || scrub_zone != self.scrub_zone
            || show_scrub_bar != self.show_scrub_bar;
        self.outer = outer;
        self.inner = inner;
        self.scrub_zone = scrub_zone;
        self.show_scrub_bar = show_scrub_bar;
        changed
    }

    pub fn outer(&self) -> Rectangle {
        self.outer
    }

    /// Quick-play zone inside the margins
    pub fn inner(&self) -> Rectangle {
        self.inner
    }

    pub fn scrub_zone(&self) -> Rectangle {
        self.scrub_zone
    }

    pub fn shows_scrub_bar(&self) -> bool {
        self.show_scrub_bar
    }

    pub fn height(&self) -> i32 {
        self.outer.height as i32
    }

    /// Which cell is under the pointer, if any
    pub fn hit_test(&self, x: i32, y: i32) -> Option<RulerCell> {
        let (xf, yf) = (x as f32, y as f32);
        if xf < self.outer.x || xf >= self.outer.x + self.outer.width {
            return None;
        }
        if yf < self.outer.y || yf >= self.outer.y + self.outer.height {
            return None;
        }
        if self.show_scrub_bar && yf >= self.scrub_zone.y {
            Some(RulerCell::Scrub)
        } else {
            Some(RulerCell::QuickPlay)
        }
    }
}

fn rect(x: i32, y: i32, width: i32, height: i32) -> Rectangle {
    Rectangle::new(
        Point::new(x as f32, y as f32),
        Size::new(width as f32, height as f32),
    )
}
