//! Which system bars should be visible for a given overlay state.

use std::iter::FromIterator;

use crate::insets::InsetType;

use super::host::SystemBarsBehavior;
use super::messages::{SystemUiMode, SystemUiOverlay};

/// Overlays explicitly enabled by the framework.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlaySet {
    pub top: bool,
    pub bottom: bool,
}

impl FromIterator<SystemUiOverlay> for OverlaySet {
    fn from_iter<I: IntoIterator<Item = SystemUiOverlay>>(iter: I) -> Self {
        iter.into_iter()
            .fold(OverlaySet::default(), |mut set, overlay| {
                match overlay {
                    SystemUiOverlay::Top => set.top = true,
                    SystemUiOverlay::Bottom => set.bottom = true,
                }
                set
            })
    }
}

/// What chrome is currently requested: a named mode, or an explicit list
/// of overlays. Setting one replaces the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemUiState {
    Mode(SystemUiMode),
    Overlays(OverlaySet),
}

impl Default for SystemUiState {
    fn default() -> Self {
        SystemUiState::Mode(SystemUiMode::EdgeToEdge)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemBarConfig {
    pub show: InsetType,
    pub hide: InsetType,
    pub behavior: SystemBarsBehavior,
}

pub fn compute_system_bar_visibility(state: SystemUiState) -> SystemBarConfig {
    let bars = InsetType::STATUS_BARS | InsetType::NAVIGATION_BARS;

    let (hide, behavior) = match state {
        SystemUiState::Overlays(overlays) => {
            let mut hide = bars;
            if overlays.top {
                hide.remove(InsetType::STATUS_BARS);
            }
            if overlays.bottom {
                hide.remove(InsetType::NAVIGATION_BARS);
            }
            (hide, SystemBarsBehavior::ShowTransientBarsBySwipe)
        }
        SystemUiState::Mode(SystemUiMode::EdgeToEdge) => {
            (InsetType::empty(), SystemBarsBehavior::ShowBarsByTouch)
        }
        SystemUiState::Mode(SystemUiMode::Immersive) => (bars, SystemBarsBehavior::ShowBarsBySwipe),
        SystemUiState::Mode(SystemUiMode::ImmersiveSticky) => {
            (bars, SystemBarsBehavior::ShowTransientBarsBySwipe)
        }
        SystemUiState::Mode(SystemUiMode::LeanBack) => (bars, SystemBarsBehavior::ShowBarsByTouch),
    };

    SystemBarConfig {
        show: bars - hide,
        hide,
        behavior,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_states() -> Vec<SystemUiState> {
        let mut states = vec![
            SystemUiState::Mode(SystemUiMode::LeanBack),
            SystemUiState::Mode(SystemUiMode::Immersive),
            SystemUiState::Mode(SystemUiMode::ImmersiveSticky),
            SystemUiState::Mode(SystemUiMode::EdgeToEdge),
        ];
        for &top in &[false, true] {
            for &bottom in &[false, true] {
                states.push(SystemUiState::Overlays(OverlaySet { top, bottom }));
            }
        }
        states
    }

    #[test]
    fn test_idempotent() {
        for state in all_states() {
            assert_eq!(
                compute_system_bar_visibility(state),
                compute_system_bar_visibility(state)
            );
        }
    }

    #[test]
    fn test_show_and_hide_partition_the_bars() {
        for state in all_states() {
            let config = compute_system_bar_visibility(state);
            assert!((config.show & config.hide).is_empty());
            assert_eq!(
                config.show | config.hide,
                InsetType::STATUS_BARS | InsetType::NAVIGATION_BARS
            );
        }
    }

    #[test]
    fn test_edge_to_edge_shows_everything() {
        let config = compute_system_bar_visibility(SystemUiState::default());
        assert!(config.hide.is_empty());
    }

    #[test]
    fn test_modes() {
        let config = compute_system_bar_visibility(SystemUiState::Mode(SystemUiMode::Immersive));
        assert_eq!(config.behavior, SystemBarsBehavior::ShowBarsBySwipe);
        assert_eq!(config.hide, InsetType::STATUS_BARS | InsetType::NAVIGATION_BARS);

        let config =
            compute_system_bar_visibility(SystemUiState::Mode(SystemUiMode::ImmersiveSticky));
        assert_eq!(config.behavior, SystemBarsBehavior::ShowTransientBarsBySwipe);

        let config = compute_system_bar_visibility(SystemUiState::Mode(SystemUiMode::LeanBack));
        assert_eq!(config.behavior, SystemBarsBehavior::ShowBarsByTouch);
        assert!(config.show.is_empty());
    }

    #[test]
    fn test_explicit_overlays() {
        let overlays: OverlaySet = vec![SystemUiOverlay::Top].into_iter().collect();
        let config = compute_system_bar_visibility(SystemUiState::Overlays(overlays));
        assert_eq!(config.behavior, SystemBarsBehavior::ShowTransientBarsBySwipe);
        assert_eq!(config.show, InsetType::STATUS_BARS);
        assert_eq!(config.hide, InsetType::NAVIGATION_BARS);

        let config = compute_system_bar_visibility(SystemUiState::Overlays(OverlaySet::default()));
        assert!(config.show.is_empty());
    }
}
