use std::convert::TryInto;

use log::error;
use serde_json::json;

use super::{MethodCall, MethodCallResult, MethodCodec, Value};

pub struct JsonMethodCodec;

pub const CODEC: JsonMethodCodec = JsonMethodCodec {};

impl MethodCodec for JsonMethodCodec {
    fn decode_method_call(&self, buf: &[u8]) -> Option<MethodCall> {
        match serde_json::from_slice::<MethodCall>(buf) {
            Ok(call) => Some(call),
            Err(err) => {
                error!("Invalid method call: {}", err);
                None
            }
        }
    }

    fn decode_envelope(&self, buf: &[u8]) -> Option<MethodCallResult> {
        if buf.is_empty() {
            return Some(MethodCallResult::NotImplemented);
        }
        let json: Option<Value> = serde_json::from_slice::<serde_json::Value>(buf)
            .ok()
            .and_then(|json| json.try_into().ok());
        if let Some(Value::List(mut v)) = json {
            if v.len() == 1 {
                return Some(MethodCallResult::Ok(v.swap_remove(0)));
            } else if v.len() == 3 {
                return Some(MethodCallResult::Err {
                    code: v[0].as_str().unwrap_or_default().to_owned(),
                    message: v[1].as_str().unwrap_or_default().to_owned(),
                    details: v.swap_remove(2),
                });
            }
        }
        error!("Invalid envelope: {}", String::from_utf8_lossy(buf));
        None
    }

    fn encode_method_call(&self, v: &MethodCall) -> Vec<u8> {
        json!(v).to_string().into_bytes()
    }

    fn encode_success_envelope(&self, v: &Value) -> Vec<u8> {
        json!([v]).to_string().into_bytes()
    }

    fn encode_error_envelope(&self, code: &str, message: &str, v: &Value) -> Vec<u8> {
        json!([code, message, v]).to_string().into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_method_call() {
        let call = CODEC
            .decode_method_call(br#"{"method":"Clipboard.setData","args":{"text":"hi"}}"#)
            .expect("valid call");
        assert_eq!(call.method, "Clipboard.setData");
        assert_eq!(call.args, json_value!({ "text": "hi" }));
    }

    #[test]
    fn test_decode_method_call_without_args() {
        let call = CODEC
            .decode_method_call(br#"{"method":"SystemNavigator.pop"}"#)
            .expect("valid call");
        assert_eq!(call.args, Value::Null);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(CODEC.decode_method_call(b"not json").is_none());
    }

    #[test]
    fn test_envelopes() {
        let ok = CODEC.encode_success_envelope(&json_value!({ "value": true }));
        assert_eq!(
            CODEC.decode_envelope(&ok),
            Some(MethodCallResult::Ok(json_value!({ "value": true })))
        );

        let err = CODEC.encode_error_envelope("code", "message", &Value::Null);
        assert_eq!(
            CODEC.decode_envelope(&err),
            Some(MethodCallResult::Err {
                code: "code".into(),
                message: "message".into(),
                details: Value::Null,
            })
        );

        assert_eq!(
            CODEC.decode_envelope(&[]),
            Some(MethodCallResult::NotImplemented)
        );
    }
}
