//! Keeps a view's insets in sync with keyboard show/hide animations.
//!
//! When the keyboard starts to animate, the host immediately delivers the
//! insets of the animation's final state. Applying them straight away makes
//! the view jump before the keyboard has moved. The coordinator swallows
//! that first delivery, feeds the view interpolated insets on every
//! animation frame, and re-dispatches the saved final insets once the
//! animation ends.

use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use crate::insets::{InsetType, Insets, WindowInsets};

/// The view whose insets are being coordinated.
pub trait InsetView {
    /// The view's own inset handling, bypassing any installed listener.
    fn on_apply_window_insets(&mut self, insets: &WindowInsets) -> WindowInsets;

    /// Dispatches insets to the view and its children.
    fn dispatch_apply_window_insets(&mut self, insets: &WindowInsets) -> WindowInsets;

    /// Routes (or stops routing) the view's inset events and animation
    /// callbacks to the coordinator.
    fn set_inset_callbacks_installed(&mut self, installed: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsetsAnimation {
    pub type_mask: InsetType,
}

impl InsetsAnimation {
    pub fn new(type_mask: InsetType) -> Self {
        Self { type_mask }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferralConfig {
    /// Inset types whose animations are deferred.
    pub deferred_types: InsetType,
    /// Longest a deferral may stay open without the animation ending.
    pub watchdog: Option<Duration>,
}

impl Default for DeferralConfig {
    fn default() -> Self {
        Self {
            deferred_types: InsetType::IME,
            watchdog: Some(Duration::from_secs(2)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferralState {
    Idle,
    /// A watched animation was prepared; the next inset event is its final
    /// state and gets saved.
    Capturing { since: Instant },
    /// The final insets are saved and held back until the animation ends.
    Deferring { since: Instant },
}

pub struct ImeSyncDeferringInsets<V: InsetView> {
    view: V,
    config: DeferralConfig,
    state: DeferralState,
    last_window_insets: Option<WindowInsets>,
}

impl<V: InsetView> ImeSyncDeferringInsets<V> {
    pub fn new(view: V, config: DeferralConfig) -> Self {
        Self {
            view,
            config,
            state: DeferralState::Idle,
            last_window_insets: None,
        }
    }

    pub fn install(&mut self) {
        self.view.set_inset_callbacks_installed(true);
    }

    pub fn remove(&mut self) {
        self.view.set_inset_callbacks_installed(false);
    }

    pub fn state(&self) -> DeferralState {
        self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn is_watched(&self, animation: &InsetsAnimation) -> bool {
        animation.type_mask.intersects(self.config.deferred_types)
    }

    /// Inset listener entry point for non-animation inset deliveries.
    pub fn on_apply_window_insets(&mut self, insets: WindowInsets, now: Instant) -> WindowInsets {
        self.expire(now);
        match self.state {
            DeferralState::Capturing { since } => {
                trace!("deferring final insets of the running animation");
                self.last_window_insets = Some(insets);
                self.state = DeferralState::Deferring { since };
                WindowInsets::consumed()
            }
            DeferralState::Deferring { .. } => WindowInsets::consumed(),
            DeferralState::Idle => self.view.on_apply_window_insets(&insets),
        }
    }

    pub fn on_prepare(&mut self, animation: &InsetsAnimation, now: Instant) {
        self.expire(now);
        if self.is_watched(animation) {
            debug!("preparing deferred animation of {:?}", animation.type_mask);
            self.state = DeferralState::Capturing { since: now };
        }
    }

    /// Called on every animation frame with the current interpolated insets.
    pub fn on_progress(
        &mut self,
        insets: &WindowInsets,
        running_animations: &[InsetsAnimation],
        now: Instant,
    ) -> WindowInsets {
        self.expire(now);
        if let DeferralState::Deferring { .. } = self.state {
            if running_animations.iter().any(|a| self.is_watched(a)) {
                if let Some(last) = &self.last_window_insets {
                    let bottom = insets.get_insets(self.config.deferred_types).bottom;
                    let interim = last
                        .to_builder()
                        .set_insets(self.config.deferred_types, Insets::new(0, 0, 0, bottom))
                        .build();
                    // straight to the view, going through our listener would
                    // save this as the final state
                    self.view.on_apply_window_insets(&interim);
                }
            }
        }
        insets.clone()
    }

    pub fn on_end(&mut self, animation: &InsetsAnimation, now: Instant) {
        self.expire(now);
        if self.state != DeferralState::Idle && self.is_watched(animation) {
            debug!("deferred animation of {:?} ended", animation.type_mask);
            self.flush();
        }
    }

    /// Closes a deferral whose animation never ended. Returns true if one
    /// was closed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let since = match self.state {
            DeferralState::Idle => return false,
            DeferralState::Capturing { since } | DeferralState::Deferring { since } => since,
        };
        match self.config.watchdog {
            Some(watchdog) if now.saturating_duration_since(since) >= watchdog => {
                warn!(
                    "inset animation did not end within {:?}, releasing deferred insets",
                    watchdog
                );
                self.flush();
                true
            }
            _ => false,
        }
    }

    fn flush(&mut self) {
        self.state = DeferralState::Idle;
        if let Some(insets) = self.last_window_insets.take() {
            self.view.dispatch_apply_window_insets(&insets);
        }
    }
}
