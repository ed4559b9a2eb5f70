//! Plugin to work with clipboard and various system related functions.
//! It handles flutter/platform type message.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, trace, warn};

use flutter_engine_codec::{
    error::MethodCallError, from_value, to_value, MethodCall, Value,
};

use crate::channel::{BinaryMessenger, JsonMethodChannel, MethodCallHandler};
use crate::insets::{InsetType, WindowInsets};
use crate::tasks::TaskRunner;

pub mod capabilities;
pub mod host;
pub mod messages;
pub mod system_chrome;

use self::capabilities::{Capabilities, TaskDescriptionApi};
use self::host::{
    ClipItem, ClipData, Clipboard, ClipboardError, HapticFeedbackConstant, PlatformHost,
    PlatformPluginDelegate, SoundEffect, TaskDescription, WindowFlags,
};
use self::messages::{
    screen_orientation_for, AppSwitcherDescription, Brightness, ClipboardContentFormat,
    ClipboardHasStrings, ClipboardText, DeviceOrientation, HapticFeedbackType, SoundType,
    SystemChromeStyle, SystemUiMode, SystemUiOverlay,
};
use self::system_chrome::{compute_system_bar_visibility, OverlaySet, SystemUiState};

pub const PLUGIN_NAME: &str = module_path!();
pub const CHANNEL_NAME: &str = "flutter/platform";

/// SDK level assumed when the embedder does not report one.
pub const DEFAULT_SDK_LEVEL: u32 = 34;

const CLIPBOARD_TEXT_MIME_TYPES: &str = "text/*";

pub struct PlatformPluginBuilder {
    host: Box<dyn PlatformHost>,
    clipboard: Box<dyn Clipboard>,
    messenger: Rc<dyn BinaryMessenger>,
    delegate: Option<Box<dyn PlatformPluginDelegate>>,
    sdk_level: u32,
}

impl PlatformPluginBuilder {
    pub fn new(
        host: Box<dyn PlatformHost>,
        clipboard: Box<dyn Clipboard>,
        messenger: Rc<dyn BinaryMessenger>,
    ) -> Self {
        Self {
            host,
            clipboard,
            messenger,
            delegate: None,
            sdk_level: DEFAULT_SDK_LEVEL,
        }
    }

    pub fn with_delegate(mut self, delegate: Box<dyn PlatformPluginDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    pub fn with_sdk_level(mut self, sdk_level: u32) -> Self {
        self.sdk_level = sdk_level;
        self
    }

    pub fn build(self) -> PlatformPlugin {
        let capabilities = Capabilities::for_sdk(self.sdk_level);
        debug!("platform capabilities: {:?}", capabilities);

        let channel = Rc::new(JsonMethodChannel::new(CHANNEL_NAME, self.messenger));
        let task_runner = TaskRunner::new();
        let handler = Rc::new(RefCell::new(Handler {
            host: self.host,
            clipboard: self.clipboard,
            delegate: self.delegate,
            capabilities,
            current_theme: None,
            ui_state: SystemUiState::default(),
            channel: Rc::downgrade(&channel),
            task_runner: task_runner.clone(),
        }));

        let method_handler: Rc<RefCell<dyn MethodCallHandler>> = handler.clone();
        channel.set_handler(Some(Rc::downgrade(&method_handler)));

        PlatformPlugin {
            channel,
            handler,
            task_runner,
        }
    }
}

pub struct PlatformPlugin {
    channel: Rc<JsonMethodChannel>,
    handler: Rc<RefCell<Handler>>,
    task_runner: TaskRunner,
}

impl PlatformPlugin {
    pub fn plugin_name() -> &'static str {
        PLUGIN_NAME
    }

    pub fn channel(&self) -> &JsonMethodChannel {
        &self.channel
    }

    /// Handle a message received on the platform channel and return the
    /// encoded reply.
    pub fn handle_platform_message(&self, message: &[u8]) -> Vec<u8> {
        self.channel.handle_platform_message(message)
    }

    /// Queue of work deferred to the next frame. The embedder runs it from
    /// its UI loop.
    pub fn task_runner(&self) -> &TaskRunner {
        &self.task_runner
    }

    /// Refreshes the system bars to match the requested mode and style.
    pub fn update_system_ui_overlays(&self) {
        self.handler.borrow_mut().update_system_ui_overlays();
    }

    /// Detaches the plugin from the platform channel.
    pub fn destroy(&self) {
        debug!("detaching {} from {}", PLUGIN_NAME, CHANNEL_NAME);
        self.channel.set_handler(None);
    }
}

struct Handler {
    host: Box<dyn PlatformHost>,
    clipboard: Box<dyn Clipboard>,
    delegate: Option<Box<dyn PlatformPluginDelegate>>,
    capabilities: Capabilities,
    current_theme: Option<SystemChromeStyle>,
    ui_state: SystemUiState,
    channel: Weak<JsonMethodChannel>,
    task_runner: TaskRunner,
}

impl MethodCallHandler for Handler {
    fn on_method_call(&mut self, call: MethodCall) -> Result<Value, MethodCallError> {
        debug!("got method call {} with args {:?}", call.method, call.args);
        match call.method.as_str() {
            "SystemSound.play" => {
                let sound_type: SoundType = from_value(&call.args)?;
                self.play_system_sound(sound_type);
                Ok(Value::Null)
            }
            "HapticFeedback.vibrate" => {
                let feedback_type = if call.args.is_null() {
                    HapticFeedbackType::Standard
                } else {
                    from_value(&call.args)?
                };
                self.vibrate_haptic_feedback(feedback_type);
                Ok(Value::Null)
            }
            "SystemChrome.setPreferredOrientations" => {
                let orientations: Vec<DeviceOrientation> = from_value(&call.args)?;
                self.host
                    .set_requested_orientation(screen_orientation_for(&orientations));
                Ok(Value::Null)
            }
            "SystemChrome.setApplicationSwitcherDescription" => {
                let description: AppSwitcherDescription = from_value(&call.args)?;
                self.set_application_switcher_description(description);
                Ok(Value::Null)
            }
            "SystemChrome.setEnabledSystemUIOverlays" => {
                let overlays: Vec<SystemUiOverlay> = from_value(&call.args)?;
                self.set_enabled_system_ui_overlays(overlays.into_iter().collect());
                Ok(Value::Null)
            }
            "SystemChrome.setEnabledSystemUIMode" => {
                let mode: SystemUiMode = from_value(&call.args)?;
                self.set_enabled_system_ui_mode(mode);
                Ok(Value::Null)
            }
            "SystemChrome.setSystemUIChangeListener" => {
                self.set_system_chrome_change_listener();
                Ok(Value::Null)
            }
            "SystemChrome.restoreSystemUIOverlays" => {
                self.update_system_ui_overlays();
                Ok(Value::Null)
            }
            "SystemChrome.setSystemUIOverlayStyle" => {
                let style: SystemChromeStyle = from_value(&call.args)?;
                self.set_system_ui_overlay_style(style);
                Ok(Value::Null)
            }
            "SystemNavigator.pop" => {
                self.pop_system_navigator();
                Ok(Value::Null)
            }
            "Clipboard.getData" => {
                let format: Option<ClipboardContentFormat> = if call.args.is_null() {
                    None
                } else {
                    Some(from_value(&call.args)?)
                };
                match self.get_clipboard_data(format) {
                    Some(text) => Ok(to_value(ClipboardText { text })?),
                    None => Ok(Value::Null),
                }
            }
            "Clipboard.setData" => {
                let args: ClipboardText = from_value(&call.args)?;
                self.set_clipboard_data(args.text);
                Ok(Value::Null)
            }
            "Clipboard.hasStrings" => Ok(to_value(ClipboardHasStrings {
                value: self.clipboard_has_strings(),
            })?),
            _ => Err(MethodCallError::NotImplemented),
        }
    }
}

impl Handler {
    fn play_system_sound(&mut self, sound_type: SoundType) {
        if sound_type == SoundType::Click {
            self.host.play_sound_effect(SoundEffect::Click);
        }
    }

    fn vibrate_haptic_feedback(&mut self, feedback_type: HapticFeedbackType) {
        let constant = match feedback_type {
            HapticFeedbackType::Standard => Some(HapticFeedbackConstant::LongPress),
            HapticFeedbackType::LightImpact => Some(HapticFeedbackConstant::VirtualKey),
            HapticFeedbackType::MediumImpact => Some(HapticFeedbackConstant::KeyboardTap),
            HapticFeedbackType::HeavyImpact if self.capabilities.heavy_impact_haptic => {
                Some(HapticFeedbackConstant::ContextClick)
            }
            HapticFeedbackType::SelectionClick if self.capabilities.selection_click_haptic => {
                Some(HapticFeedbackConstant::ClockTick)
            }
            _ => None,
        };
        match constant {
            Some(constant) => self.host.perform_haptic_feedback(constant),
            None => trace!("{:?} is not supported on this platform", feedback_type),
        }
    }

    fn set_application_switcher_description(&mut self, description: AppSwitcherDescription) {
        let AppSwitcherDescription { label, color } = description;
        match self.capabilities.task_description {
            TaskDescriptionApi::Unsupported => {}
            TaskDescriptionApi::Legacy => self
                .host
                .set_task_description(TaskDescription::Legacy { label, color }),
            TaskDescriptionApi::Current => {
                self.host.set_task_description(TaskDescription::Current {
                    label,
                    icon_res: 0,
                    color,
                })
            }
        }
    }

    fn set_system_chrome_change_listener(&mut self) {
        let channel = self.channel.clone();
        let task_runner = self.task_runner.clone();
        self.host
            .set_on_apply_window_insets_listener(Box::new(move |insets: &WindowInsets| {
                let visible =
                    insets.is_visible(InsetType::STATUS_BARS | InsetType::NAVIGATION_BARS);
                let channel = channel.clone();
                // the framework may react by changing the system ui again,
                // which must not happen within the frame reporting the change
                task_runner.post_next_frame(move || {
                    if let Some(channel) = channel.upgrade() {
                        channel.invoke_method("SystemChrome.systemUIChange", vec![visible]);
                    }
                });
            }));
    }

    fn set_enabled_system_ui_mode(&mut self, mode: SystemUiMode) {
        self.ui_state = SystemUiState::Mode(mode);
        self.update_system_ui_overlays();
    }

    fn set_enabled_system_ui_overlays(&mut self, overlays: OverlaySet) {
        self.ui_state = SystemUiState::Overlays(overlays);
        self.update_system_ui_overlays();
    }

    fn update_system_ui_overlays(&mut self) {
        let config = compute_system_bar_visibility(self.ui_state);
        trace!("applying {:?} for {:?}", config, self.ui_state);

        // flutter handles the insets itself
        self.host.set_decor_fits_system_windows(false);
        self.host.show_insets(config.show);
        self.host.hide_insets(config.hide);
        self.host.set_system_bars_behavior(config.behavior);

        if let Some(theme) = self.current_theme.clone() {
            self.set_system_ui_overlay_style(theme);
        }
    }

    fn set_system_ui_overlay_style(&mut self, style: SystemChromeStyle) {
        let caps = self.capabilities;
        let host = &mut self.host;

        if caps.legacy_bar_flags {
            host.add_window_flags(WindowFlags::DRAWS_SYSTEM_BAR_BACKGROUNDS);
            host.clear_window_flags(
                WindowFlags::TRANSLUCENT_STATUS | WindowFlags::TRANSLUCENT_NAVIGATION,
            );
        }

        // dark icons need a light bar appearance
        if caps.status_bar_style {
            if let Some(brightness) = style.status_bar_icon_brightness {
                host.set_appearance_light_status_bars(brightness == Brightness::Dark);
            }
            if let Some(color) = style.status_bar_color {
                host.set_status_bar_color(color);
            }
        }
        if caps.bar_contrast_enforcement {
            if let Some(enforced) = style.system_status_bar_contrast_enforced {
                host.set_status_bar_contrast_enforced(enforced);
            }
        }

        if caps.navigation_bar_style {
            if let Some(brightness) = style.system_navigation_bar_icon_brightness {
                host.set_appearance_light_navigation_bars(brightness == Brightness::Dark);
            }
            if let Some(color) = style.system_navigation_bar_color {
                host.set_navigation_bar_color(color);
            }
        }
        if caps.navigation_bar_divider_color {
            if let Some(color) = style.system_navigation_bar_divider_color {
                host.set_navigation_bar_divider_color(color);
            }
        }
        if caps.bar_contrast_enforcement {
            if let Some(enforced) = style.system_navigation_bar_contrast_enforced {
                host.set_navigation_bar_contrast_enforced(enforced);
            }
        }

        self.current_theme = Some(style);
    }

    fn pop_system_navigator(&mut self) {
        if let Some(delegate) = &mut self.delegate {
            if delegate.pop_system_navigator() {
                return;
            }
        }

        if self.host.has_back_pressed_dispatcher() {
            self.host.on_back_pressed();
        } else {
            self.host.finish();
        }
    }

    fn get_clipboard_data(&self, format: Option<ClipboardContentFormat>) -> Option<String> {
        if !self.clipboard.has_primary_clip() {
            return None;
        }

        let clip = match self.clipboard.primary_clip() {
            Ok(clip) => clip?,
            Err(err) => return clipboard_failure(err),
        };

        match format {
            None | Some(ClipboardContentFormat::PlainText) => match clip.items.first()? {
                ClipItem::Text(text) => Some(text.clone()),
                ClipItem::Uri { uri, text } => {
                    if let Err(err) = self.clipboard.open_typed_uri(uri, CLIPBOARD_TEXT_MIME_TYPES)
                    {
                        return clipboard_failure(err);
                    }
                    Some(text.clone())
                }
                ClipItem::Other => None,
            },
        }
    }

    fn set_clipboard_data(&mut self, text: String) {
        self.clipboard
            .set_primary_clip(ClipData::new_plain_text("text", text));
    }

    fn clipboard_has_strings(&self) -> bool {
        // only the description is inspected, reading the content would
        // surface a paste notification to the user
        if !self.clipboard.has_primary_clip() {
            return false;
        }
        self.clipboard
            .primary_clip_description()
            .map_or(false, |description| {
                description.has_mime_type(CLIPBOARD_TEXT_MIME_TYPES)
            })
    }
}

fn clipboard_failure(err: ClipboardError) -> Option<String> {
    if let ClipboardError::PermissionDenied(_) = err {
        warn!(
            "Attempted to get clipboard data that requires additional permission(s): {}",
            err
        );
    }
    None
}
