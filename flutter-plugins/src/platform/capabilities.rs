//! What the running platform version allows the plugin to do.
//!
//! Resolved once from the SDK level when the plugin is built, so the rest
//! of the plugin asks for a capability instead of comparing versions.

/// Android SDK levels the plugin cares about.
pub mod sdk {
    pub const LOLLIPOP: u32 = 21;
    pub const M: u32 = 23;
    pub const O: u32 = 26;
    pub const P: u32 = 28;
    pub const Q: u32 = 29;
    pub const R: u32 = 30;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskDescriptionApi {
    Unsupported,
    Legacy,
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub sdk_level: u32,
    pub heavy_impact_haptic: bool,
    pub selection_click_haptic: bool,
    pub task_description: TaskDescriptionApi,
    /// Styling needs the legacy window flags adjusted first.
    pub legacy_bar_flags: bool,
    /// Status bar icon brightness and color.
    pub status_bar_style: bool,
    /// Navigation bar icon brightness and color.
    pub navigation_bar_style: bool,
    pub navigation_bar_divider_color: bool,
    pub bar_contrast_enforcement: bool,
}

impl Capabilities {
    pub fn for_sdk(sdk_level: u32) -> Self {
        let task_description = if sdk_level >= sdk::P {
            TaskDescriptionApi::Current
        } else if sdk_level > sdk::LOLLIPOP {
            TaskDescriptionApi::Legacy
        } else {
            TaskDescriptionApi::Unsupported
        };

        Self {
            sdk_level,
            heavy_impact_haptic: sdk_level >= sdk::M,
            selection_click_haptic: sdk_level >= sdk::LOLLIPOP,
            task_description,
            legacy_bar_flags: sdk_level < sdk::R,
            status_bar_style: sdk_level >= sdk::M,
            navigation_bar_style: sdk_level >= sdk::O,
            navigation_bar_divider_color: sdk_level >= sdk::P,
            bar_contrast_enforcement: sdk_level >= sdk::Q,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_description_bands() {
        assert_eq!(
            Capabilities::for_sdk(19).task_description,
            TaskDescriptionApi::Unsupported
        );
        assert_eq!(
            Capabilities::for_sdk(21).task_description,
            TaskDescriptionApi::Unsupported
        );
        assert_eq!(
            Capabilities::for_sdk(22).task_description,
            TaskDescriptionApi::Legacy
        );
        assert_eq!(
            Capabilities::for_sdk(27).task_description,
            TaskDescriptionApi::Legacy
        );
        assert_eq!(
            Capabilities::for_sdk(28).task_description,
            TaskDescriptionApi::Current
        );
    }

    #[test]
    fn test_style_floors() {
        let caps = Capabilities::for_sdk(25);
        assert!(caps.status_bar_style);
        assert!(!caps.navigation_bar_style);
        assert!(!caps.navigation_bar_divider_color);
        assert!(caps.legacy_bar_flags);

        let caps = Capabilities::for_sdk(30);
        assert!(caps.navigation_bar_divider_color);
        assert!(caps.bar_contrast_enforcement);
        assert!(!caps.legacy_bar_flags);
    }
}
