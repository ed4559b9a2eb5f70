//! Values and codecs used to talk to the flutter framework over
//! platform channels.

#[macro_use]
mod macros;

pub mod error;
pub mod json_codec;
pub mod value;

use serde::{Deserialize, Serialize};

pub use self::value::{from_value, to_value, Value};

#[doc(hidden)]
pub use serde_json;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MethodCallResult {
    Ok(Value),
    Err {
        code: String,
        message: String,
        details: Value,
    },
    NotImplemented,
}

pub trait MethodCodec {
    /// Methods for handling dart call
    fn decode_method_call(&self, buf: &[u8]) -> Option<MethodCall>;
    fn encode_success_envelope(&self, v: &Value) -> Vec<u8>;
    fn encode_error_envelope(&self, code: &str, message: &str, details: &Value) -> Vec<u8>;

    fn encode_method_call_response(&self, response: &MethodCallResult) -> Vec<u8> {
        match response {
            MethodCallResult::Ok(data) => self.encode_success_envelope(data),
            MethodCallResult::Err {
                code,
                message,
                details,
            } => self.encode_error_envelope(code, message, details),
            MethodCallResult::NotImplemented => vec![],
        }
    }

    /// Methods for calling into dart
    fn encode_method_call(&self, v: &MethodCall) -> Vec<u8>;
    fn decode_envelope(&self, buf: &[u8]) -> Option<MethodCallResult>;
}
