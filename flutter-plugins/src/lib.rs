//! Platform integration plugins for flutter embedders on Android-style hosts.
//!
//! [`platform::PlatformPlugin`] answers the `flutter/platform` channel and
//! drives the host window's chrome, haptics, navigation and clipboard.
//! [`editing::ImeSyncDeferringInsets`] keeps a view's insets in step with
//! keyboard animations.

pub mod channel;
pub mod editing;
pub mod insets;
pub mod platform;
pub mod prelude;
pub mod tasks;
