//! Typed arguments of the `flutter/platform` method calls.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(from = "String")]
pub enum SoundType {
    #[serde(rename = "SystemSoundType.click")]
    Click,
    #[serde(rename = "SystemSoundType.alert")]
    Alert,
    /// A sound type this plugin does not know.
    #[serde(skip)]
    Unknown,
}

impl From<String> for SoundType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "SystemSoundType.click" => SoundType::Click,
            "SystemSoundType.alert" => SoundType::Alert,
            _ => SoundType::Unknown,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticFeedbackType {
    /// Sent as a null argument.
    #[serde(skip)]
    Standard,
    #[serde(rename = "HapticFeedbackType.lightImpact")]
    LightImpact,
    #[serde(rename = "HapticFeedbackType.mediumImpact")]
    MediumImpact,
    #[serde(rename = "HapticFeedbackType.heavyImpact")]
    HeavyImpact,
    #[serde(rename = "HapticFeedbackType.selectionClick")]
    SelectionClick,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceOrientation {
    #[serde(rename = "DeviceOrientation.portraitUp")]
    PortraitUp,
    #[serde(rename = "DeviceOrientation.portraitDown")]
    PortraitDown,
    #[serde(rename = "DeviceOrientation.landscapeLeft")]
    LandscapeLeft,
    #[serde(rename = "DeviceOrientation.landscapeRight")]
    LandscapeRight,
}

/// Requested orientation values of the hosting activity.
pub mod screen_orientation {
    pub const UNSPECIFIED: i32 = -1;
    pub const LANDSCAPE: i32 = 0;
    pub const PORTRAIT: i32 = 1;
    pub const USER: i32 = 2;
    pub const REVERSE_LANDSCAPE: i32 = 8;
    pub const REVERSE_PORTRAIT: i32 = 9;
    pub const USER_LANDSCAPE: i32 = 11;
    pub const USER_PORTRAIT: i32 = 12;
    pub const FULL_USER: i32 = 13;
}

impl DeviceOrientation {
    fn mask(self) -> u8 {
        match self {
            DeviceOrientation::PortraitUp => 0x01,
            DeviceOrientation::LandscapeLeft => 0x02,
            DeviceOrientation::PortraitDown => 0x04,
            DeviceOrientation::LandscapeRight => 0x08,
        }
    }

    fn screen_orientation(self) -> i32 {
        match self {
            DeviceOrientation::PortraitUp => screen_orientation::PORTRAIT,
            DeviceOrientation::LandscapeLeft => screen_orientation::LANDSCAPE,
            DeviceOrientation::PortraitDown => screen_orientation::REVERSE_PORTRAIT,
            DeviceOrientation::LandscapeRight => screen_orientation::REVERSE_LANDSCAPE,
        }
    }
}

/// Folds the preferred orientations into the single orientation value the
/// host window accepts. Combinations the host cannot express fall back to
/// the first orientation in the list.
pub fn screen_orientation_for(orientations: &[DeviceOrientation]) -> i32 {
    let mask = orientations.iter().fold(0u8, |mask, o| mask | o.mask());
    match mask {
        0x00 => screen_orientation::UNSPECIFIED,
        0x01 => screen_orientation::PORTRAIT,
        0x02 => screen_orientation::LANDSCAPE,
        0x04 => screen_orientation::REVERSE_PORTRAIT,
        0x05 => screen_orientation::USER_PORTRAIT,
        0x08 => screen_orientation::REVERSE_LANDSCAPE,
        0x0a => screen_orientation::USER_LANDSCAPE,
        0x0b => screen_orientation::USER,
        0x0f => screen_orientation::FULL_USER,
        _ => orientations
            .first()
            .map(|o| o.screen_orientation())
            .unwrap_or(screen_orientation::PORTRAIT),
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct AppSwitcherDescriptionArgs {
    #[serde(default)]
    label: String,
    #[serde(default)]
    primary_color: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSwitcherDescription {
    pub label: String,
    pub color: u32,
}

impl<'de> Deserialize<'de> for AppSwitcherDescription {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let args = AppSwitcherDescriptionArgs::deserialize(deserializer)?;
        // recents entries must be opaque
        let color = match args.primary_color.unwrap_or(0) as u32 {
            0 => 0,
            color => color | 0xFF00_0000,
        };
        Ok(AppSwitcherDescription {
            label: args.label,
            color,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemUiOverlay {
    #[serde(rename = "SystemUiOverlay.top")]
    Top,
    #[serde(rename = "SystemUiOverlay.bottom")]
    Bottom,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemUiMode {
    /// Immersive, revealed by touching anywhere.
    #[serde(rename = "SystemUiMode.leanBack")]
    LeanBack,
    #[serde(rename = "SystemUiMode.immersive")]
    Immersive,
    #[serde(rename = "SystemUiMode.immersiveSticky")]
    ImmersiveSticky,
    #[serde(rename = "SystemUiMode.edgeToEdge")]
    EdgeToEdge,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brightness {
    #[serde(rename = "Brightness.dark")]
    Dark,
    #[serde(rename = "Brightness.light")]
    Light,
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.map(|color| color as u32))
}

/// Requested look of the status and navigation bars. Absent fields leave
/// the corresponding host setting untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SystemChromeStyle {
    #[serde(default)]
    pub status_bar_icon_brightness: Option<Brightness>,
    #[serde(default, deserialize_with = "deserialize_color")]
    pub status_bar_color: Option<u32>,
    #[serde(default)]
    pub system_status_bar_contrast_enforced: Option<bool>,
    #[serde(default)]
    pub system_navigation_bar_icon_brightness: Option<Brightness>,
    #[serde(default, deserialize_with = "deserialize_color")]
    pub system_navigation_bar_color: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_color")]
    pub system_navigation_bar_divider_color: Option<u32>,
    #[serde(default)]
    pub system_navigation_bar_contrast_enforced: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardContentFormat {
    #[serde(rename = "text/plain")]
    PlainText,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClipboardText {
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardHasStrings {
    pub value: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use flutter_engine_codec::{from_value, json_value};

    #[test]
    fn test_orientation_mask() {
        use DeviceOrientation::*;
        assert_eq!(screen_orientation_for(&[]), screen_orientation::UNSPECIFIED);
        assert_eq!(
            screen_orientation_for(&[PortraitUp]),
            screen_orientation::PORTRAIT
        );
        assert_eq!(
            screen_orientation_for(&[PortraitUp, PortraitDown]),
            screen_orientation::USER_PORTRAIT
        );
        assert_eq!(
            screen_orientation_for(&[LandscapeLeft, LandscapeRight]),
            screen_orientation::USER_LANDSCAPE
        );
        assert_eq!(
            screen_orientation_for(&[PortraitUp, LandscapeLeft, PortraitDown, LandscapeRight]),
            screen_orientation::FULL_USER
        );
    }

    #[test]
    fn test_orientation_falls_back_to_first() {
        use DeviceOrientation::*;
        assert_eq!(
            screen_orientation_for(&[LandscapeRight, PortraitUp]),
            screen_orientation::REVERSE_LANDSCAPE
        );
        assert_eq!(
            screen_orientation_for(&[PortraitUp, LandscapeLeft]),
            screen_orientation::PORTRAIT
        );
    }

    #[test]
    fn test_decode_orientations() {
        let value = json_value!(["DeviceOrientation.portraitUp", "DeviceOrientation.landscapeLeft"]);
        let orientations: Vec<DeviceOrientation> = from_value(&value).unwrap();
        assert_eq!(
            orientations,
            vec![DeviceOrientation::PortraitUp, DeviceOrientation::LandscapeLeft]
        );
    }

    #[test]
    fn test_app_switcher_color_is_opaque() {
        let value = json_value!({ "label": "app", "primaryColor": 0x123456 });
        let description: AppSwitcherDescription = from_value(&value).unwrap();
        assert_eq!(description.label, "app");
        assert_eq!(description.color, 0xFF12_3456);

        let value = json_value!({ "label": "app", "primaryColor": null });
        let description: AppSwitcherDescription = from_value(&value).unwrap();
        assert_eq!(description.color, 0);
    }

    #[test]
    fn test_decode_style() {
        let value = json_value!({
            "statusBarColor": 4278190080i64,
            "statusBarIconBrightness": "Brightness.dark",
            "systemNavigationBarContrastEnforced": false
        });
        let style: SystemChromeStyle = from_value(&value).unwrap();
        assert_eq!(style.status_bar_color, Some(0xFF00_0000));
        assert_eq!(style.status_bar_icon_brightness, Some(Brightness::Dark));
        assert_eq!(style.system_navigation_bar_contrast_enforced, Some(false));
        assert_eq!(style.system_navigation_bar_color, None);
        assert_eq!(style.system_navigation_bar_icon_brightness, None);
    }

    #[test]
    fn test_decode_sound_type() {
        let sound: SoundType = from_value(&json_value!("SystemSoundType.click")).unwrap();
        assert_eq!(sound, SoundType::Click);
        let sound: SoundType = from_value(&json_value!("SystemSoundType.tick")).unwrap();
        assert_eq!(sound, SoundType::Unknown);
    }

    #[test]
    fn test_decode_unknown_mode() {
        let value = json_value!("SystemUiMode.unknown");
        assert!(from_value::<SystemUiMode>(&value).is_err());
    }
}
