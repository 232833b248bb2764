//! Context menu model for the ruler
//!
//! The ruler only describes the items and performs the chosen action;
//! building and showing the native menu is up to the host.

use ruler_core::{RulerConfig, ViewInfo};

/// Which cell's menu to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    QuickPlay,
    /// Scrub zone; its items belong to the scrubber
    Scrub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulerMenuAction {
    ToggleDragSelection,
    ToggleAutoScroll,
    TogglePlayRegion,
    ClearPlayRegion,
    SetPlayRegionToSelection,
    TogglePinnedHead,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulerMenuItem {
    Action {
        label: &'static str,
        action: RulerMenuAction,
        checked: Option<bool>,
        enabled: bool,
    },
    Separator,
}

impl RulerMenuItem {
    fn check(label: &'static str, action: RulerMenuAction, checked: bool) -> Self {
        Self::Action {
            label,
            action,
            checked: Some(checked),
            enabled: true,
        }
    }

    fn plain(label: &'static str, action: RulerMenuAction) -> Self {
        Self::Action {
            label,
            action,
            checked: None,
            enabled: true,
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Action { label, .. } => Some(*label),
            Self::Separator => None,
        }
    }

    pub fn action(&self) -> Option<RulerMenuAction> {
        match self {
            Self::Action { action, .. } => Some(*action),
            Self::Separator => None,
        }
    }
}

/// Items of the quick-play zone's menu for the current state
pub fn quick_play_menu(config: &RulerConfig, view: &ViewInfo) -> Vec<RulerMenuItem> {
    let active = view.play_region.is_active();
    vec![
        // Mirroring only applies while the region follows the selection
        RulerMenuItem::Action {
            label: "Enable dragging selection",
            action: RulerMenuAction::ToggleDragSelection,
            checked: Some(config.quick_play.drag_selection && !active),
            enabled: !active,
        },
        RulerMenuItem::check(
            "Update display while playing",
            RulerMenuAction::ToggleAutoScroll,
            view.update_track_indicator,
        ),
        RulerMenuItem::check(
            "Enable Looping",
            RulerMenuAction::TogglePlayRegion,
            active,
        ),
        RulerMenuItem::plain("Clear Looping Region", RulerMenuAction::ClearPlayRegion),
        RulerMenuItem::plain(
            "Set Loop To Selection",
            RulerMenuAction::SetPlayRegionToSelection,
        ),
        RulerMenuItem::Separator,
        RulerMenuItem::check(
            "Pinned Play Head",
            RulerMenuAction::TogglePinnedHead,
            config.playhead.pinned,
        ),
    ]
}
