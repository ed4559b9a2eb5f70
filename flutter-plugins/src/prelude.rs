pub use serde::{Deserialize, Serialize};

pub use flutter_engine_codec::{
    error::MethodCallError,
    from_value, json_codec, json_value, to_value, MethodCall, MethodCallResult, MethodCodec,
    Value,
};

pub use crate::{
    channel::{BinaryMessenger, JsonMethodChannel, MethodCallHandler},
    editing::{DeferralConfig, ImeSyncDeferringInsets, InsetView, InsetsAnimation},
    insets::{InsetType, Insets, WindowInsets},
    platform::{
        host::{Clipboard, PlatformHost, PlatformPluginDelegate},
        PlatformPlugin, PlatformPluginBuilder,
    },
    tasks::TaskRunner,
};
