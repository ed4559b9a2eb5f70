//! The pieces of the hosting activity the platform plugin drives.
//!
//! An embedder implements these traits on top of its window, decor view,
//! insets controller and clipboard service. All calls happen on the UI
//! thread.

use std::fmt;

use crate::insets::{InsetType, WindowInsets};

bitflags::bitflags! {
    /// Window layout flags used on hosts without the insets controller
    /// styling API.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        const TRANSLUCENT_STATUS = 0x0400_0000;
        const TRANSLUCENT_NAVIGATION = 0x0800_0000;
        const DRAWS_SYSTEM_BAR_BACKGROUNDS = 0x8000_0000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Click,
}

/// Haptic feedback constants understood by the host view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticFeedbackConstant {
    LongPress = 0,
    VirtualKey = 1,
    KeyboardTap = 3,
    ClockTick = 4,
    ContextClick = 6,
}

/// How hidden system bars may be revealed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemBarsBehavior {
    ShowBarsByTouch = 0,
    ShowBarsBySwipe = 1,
    ShowTransientBarsBySwipe = 2,
}

/// Recents-list entry for the running task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDescription {
    /// Pre-P constructor taking an icon bitmap, which is always absent here.
    Legacy { label: String, color: u32 },
    /// Constructor taking an icon resource id, always `0` here.
    Current {
        label: String,
        icon_res: i32,
        color: u32,
    },
}

pub type InsetsListener = Box<dyn FnMut(&WindowInsets)>;

pub trait PlatformHost {
    fn play_sound_effect(&mut self, effect: SoundEffect);

    fn perform_haptic_feedback(&mut self, feedback: HapticFeedbackConstant);

    fn set_requested_orientation(&mut self, orientation: i32);

    fn set_task_description(&mut self, description: TaskDescription);

    fn set_decor_fits_system_windows(&mut self, fits: bool);

    fn show_insets(&mut self, types: InsetType);

    fn hide_insets(&mut self, types: InsetType);

    fn set_system_bars_behavior(&mut self, behavior: SystemBarsBehavior);

    fn set_appearance_light_status_bars(&mut self, light: bool);

    fn set_appearance_light_navigation_bars(&mut self, light: bool);

    fn set_status_bar_color(&mut self, color: u32);

    fn set_navigation_bar_color(&mut self, color: u32);

    fn set_navigation_bar_divider_color(&mut self, color: u32);

    fn set_status_bar_contrast_enforced(&mut self, enforced: bool);

    fn set_navigation_bar_contrast_enforced(&mut self, enforced: bool);

    fn add_window_flags(&mut self, flags: WindowFlags);

    fn clear_window_flags(&mut self, flags: WindowFlags);

    /// Registers the listener called whenever the decor view receives new
    /// window insets. Replaces any previous listener.
    fn set_on_apply_window_insets_listener(&mut self, listener: InsetsListener);

    fn has_back_pressed_dispatcher(&self) -> bool;

    fn on_back_pressed(&mut self);

    fn finish(&mut self);
}

/// Customizes behavior the plugin would otherwise handle itself.
pub trait PlatformPluginDelegate {
    /// Returns true if the pop was consumed, which skips the default of
    /// dispatching a back press or finishing the activity.
    fn pop_system_navigator(&mut self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipItem {
    Text(String),
    /// Content referenced by uri; `text` is what the item coerces to.
    Uri { uri: String, text: String },
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipData {
    pub label: String,
    pub mime_types: Vec<String>,
    pub items: Vec<ClipItem>,
}

pub const MIMETYPE_TEXT_PLAIN: &str = "text/plain";

impl ClipData {
    pub fn new_plain_text<L: Into<String>, T: Into<String>>(label: L, text: T) -> Self {
        Self {
            label: label.into(),
            mime_types: vec![MIMETYPE_TEXT_PLAIN.to_owned()],
            items: vec![ClipItem::Text(text.into())],
        }
    }

    pub fn description(&self) -> ClipDescription {
        ClipDescription {
            label: self.label.clone(),
            mime_types: self.mime_types.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipDescription {
    pub label: String,
    pub mime_types: Vec<String>,
}

impl ClipDescription {
    /// Matches with `*` wildcards on either side, e.g. `text/*`.
    pub fn has_mime_type(&self, mime_type: &str) -> bool {
        self.mime_types
            .iter()
            .any(|declared| mime_type_matches(declared, mime_type))
    }
}

fn mime_type_matches(a: &str, b: &str) -> bool {
    let mut a = a.splitn(2, '/');
    let mut b = b.splitn(2, '/');
    let part_matches = |x: Option<&str>, y: Option<&str>| match (x, y) {
        (Some(x), Some(y)) => x == "*" || y == "*" || x.eq_ignore_ascii_case(y),
        _ => false,
    };
    part_matches(a.next(), b.next()) && part_matches(a.next(), b.next())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    PermissionDenied(String),
    NotFound(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClipboardError::PermissionDenied(msg) => write!(f, "permission denied: {}", msg),
            ClipboardError::NotFound(msg) => write!(f, "not found: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

pub trait Clipboard {
    fn has_primary_clip(&self) -> bool;

    fn primary_clip(&self) -> Result<Option<ClipData>, ClipboardError>;

    /// Metadata of the primary clip. Reading it does not count as a
    /// clipboard access for the user-facing paste notification.
    fn primary_clip_description(&self) -> Option<ClipDescription>;

    /// Opens `uri` as a typed stream, used to check the content is readable.
    fn open_typed_uri(&self, uri: &str, mime_type: &str) -> Result<(), ClipboardError>;

    fn set_primary_clip(&mut self, clip: ClipData);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_wildcards() {
        let description = ClipData::new_plain_text("label", "hi").description();
        assert!(description.has_mime_type("text/*"));
        assert!(description.has_mime_type("*/*"));
        assert!(description.has_mime_type("text/plain"));
        assert!(!description.has_mime_type("image/*"));
    }

    #[test]
    fn test_non_text_description() {
        let description = ClipDescription {
            label: "img".into(),
            mime_types: vec!["image/png".into()],
        };
        assert!(!description.has_mime_type("text/*"));
    }
}
