//! Window inset values shared by the system chrome controller and the
//! keyboard animation coordinator.

use std::collections::BTreeMap;

bitflags::bitflags! {
    /// Categories of screen-edge regions occupied by system UI.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct InsetType: u32 {
        const STATUS_BARS = 1 << 0;
        const NAVIGATION_BARS = 1 << 1;
        const CAPTION_BAR = 1 << 2;
        const IME = 1 << 3;
        const SYSTEM_GESTURES = 1 << 4;
        const MANDATORY_SYSTEM_GESTURES = 1 << 5;
        const TAPPABLE_ELEMENT = 1 << 6;
        const DISPLAY_CUTOUT = 1 << 7;

        const SYSTEM_BARS = Self::STATUS_BARS.bits()
            | Self::NAVIGATION_BARS.bits()
            | Self::CAPTION_BAR.bits();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub const NONE: Insets = Insets {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Edge-wise maximum, used when several inset types are queried at once.
    fn union(self, other: Insets) -> Insets {
        Insets {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// Snapshot of the window insets delivered to a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowInsets {
    insets: BTreeMap<InsetType, Insets>,
    visible: InsetType,
    consumed: bool,
}

impl WindowInsets {
    /// Insets that have been fully handled and must not be propagated further.
    pub fn consumed() -> Self {
        Self {
            consumed: true,
            ..Default::default()
        }
    }

    pub fn builder() -> WindowInsetsBuilder {
        WindowInsetsBuilder {
            insets: WindowInsets::default(),
        }
    }

    pub fn to_builder(&self) -> WindowInsetsBuilder {
        WindowInsetsBuilder {
            insets: WindowInsets {
                consumed: false,
                ..self.clone()
            },
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Insets for the given types. When several types are requested the
    /// result is the edge-wise union.
    pub fn get_insets(&self, types: InsetType) -> Insets {
        types
            .iter()
            .filter_map(|t| self.insets.get(&t))
            .fold(Insets::NONE, |acc, insets| acc.union(*insets))
    }

    /// True only if every type in `types` is currently visible.
    pub fn is_visible(&self, types: InsetType) -> bool {
        self.visible.contains(types)
    }
}

pub struct WindowInsetsBuilder {
    insets: WindowInsets,
}

impl WindowInsetsBuilder {
    /// Sets `insets` for each individual type contained in `types`.
    pub fn set_insets(mut self, types: InsetType, insets: Insets) -> Self {
        for t in types.iter() {
            self.insets.insets.insert(t, insets);
        }
        self
    }

    pub fn set_visible(mut self, types: InsetType, visible: bool) -> Self {
        self.insets.visible.set(types, visible);
        self
    }

    pub fn build(self) -> WindowInsets {
        self.insets
    }
}
