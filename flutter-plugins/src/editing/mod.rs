//! Text editing support that lives on the embedder side.

pub mod ime_sync;

pub use self::ime_sync::{
    DeferralConfig, DeferralState, ImeSyncDeferringInsets, InsetView, InsetsAnimation,
};
