//! Plugins use a method channel to interop with flutter/dart.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, error, trace};
use serde::Serialize;

use flutter_engine_codec::{
    error::MethodCallError, json_codec::CODEC, to_value, MethodCall, MethodCallResult,
    MethodCodec, Value,
};

/// Outbound side of the platform channels, provided by the embedder.
pub trait BinaryMessenger {
    fn send(&self, channel: &str, message: &[u8]);
}

pub trait MethodCallHandler {
    fn on_method_call(&mut self, call: MethodCall) -> Result<Value, MethodCallError>;
}

pub struct JsonMethodChannel {
    name: String,
    messenger: Rc<dyn BinaryMessenger>,
    method_handler: RefCell<Option<Weak<RefCell<dyn MethodCallHandler>>>>,
}

impl JsonMethodChannel {
    pub fn new<N: AsRef<str>>(name: N, messenger: Rc<dyn BinaryMessenger>) -> Self {
        Self {
            name: name.as_ref().to_owned(),
            messenger,
            method_handler: RefCell::new(None),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Attach or detach (`None`) the handler receiving inbound calls.
    pub fn set_handler(&self, method_handler: Option<Weak<RefCell<dyn MethodCallHandler>>>) {
        self.method_handler.replace(method_handler);
    }

    fn codec(&self) -> &'static dyn MethodCodec {
        &CODEC
    }

    /// Handle a message received on this channel and return the encoded reply.
    pub fn handle_platform_message(&self, message: &[u8]) -> Vec<u8> {
        let codec = self.codec();
        let call = match codec.decode_method_call(message) {
            Some(call) => call,
            None => {
                return codec.encode_method_call_response(&MethodCallError::UnspecifiedError.into())
            }
        };
        trace!(
            "on channel {}, got method call {} with args {:?}",
            self.name,
            call.method,
            call.args
        );

        let handler = self
            .method_handler
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade);
        let handler = match handler {
            Some(handler) => handler,
            None => {
                debug!("No handler attached to channel {}", self.name);
                return codec.encode_method_call_response(&MethodCallResult::NotImplemented);
            }
        };

        let result = handler.borrow_mut().on_method_call(call);
        let response = match result {
            Ok(value) => MethodCallResult::Ok(value),
            Err(err) => {
                if !matches!(err, MethodCallError::NotImplemented) {
                    error!("Method call on channel {} failed: {}", self.name, err);
                }
                err.into()
            }
        };
        codec.encode_method_call_response(&response)
    }

    /// Invoke a flutter method using this channel
    pub fn invoke_method<S, T>(&self, method: S, args: T)
    where
        S: Into<String>,
        T: Serialize,
    {
        let method = method.into();
        let args = match to_value(args) {
            Ok(args) => args,
            Err(err) => {
                error!("Failed to encode args of {}: {}", method, err);
                return;
            }
        };
        let buf = self.codec().encode_method_call(&MethodCall { method, args });
        self.messenger.send(&self.name, &buf);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Default)]
    pub(crate) struct RecordingMessenger {
        pub(crate) sent: RefCell<Vec<(String, MethodCall)>>,
    }

    impl BinaryMessenger for RecordingMessenger {
        fn send(&self, channel: &str, message: &[u8]) {
            let call = CODEC
                .decode_method_call(message)
                .expect("outbound message is a method call");
            self.sent.borrow_mut().push((channel.to_owned(), call));
        }
    }

    struct Echo;

    impl MethodCallHandler for Echo {
        fn on_method_call(&mut self, call: MethodCall) -> Result<Value, MethodCallError> {
            match call.method.as_str() {
                "echo" => Ok(call.args),
                _ => Err(MethodCallError::NotImplemented),
            }
        }
    }

    fn channel() -> (JsonMethodChannel, Rc<RefCell<dyn MethodCallHandler>>) {
        let channel = JsonMethodChannel::new("test/echo", Rc::new(RecordingMessenger::default()));
        let handler: Rc<RefCell<dyn MethodCallHandler>> = Rc::new(RefCell::new(Echo));
        channel.set_handler(Some(Rc::downgrade(&handler)));
        (channel, handler)
    }

    #[test]
    fn test_dispatch() {
        let (channel, _handler) = channel();
        let reply = channel.handle_platform_message(br#"{"method":"echo","args":"hi"}"#);
        assert_eq!(
            CODEC.decode_envelope(&reply),
            Some(MethodCallResult::Ok(Value::String("hi".into())))
        );

        let reply = channel.handle_platform_message(br#"{"method":"nope","args":null}"#);
        assert!(reply.is_empty());
    }

    #[test]
    fn test_detached_handler() {
        let (channel, _handler) = channel();
        channel.set_handler(None);
        let reply = channel.handle_platform_message(br#"{"method":"echo","args":"hi"}"#);
        assert!(reply.is_empty());
    }

    #[test]
    fn test_invoke_method() {
        let messenger = Rc::new(RecordingMessenger::default());
        let channel = JsonMethodChannel::new("test/out", messenger.clone());
        channel.invoke_method("ping", vec![true]);

        let sent = messenger.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "test/out");
        assert_eq!(sent[0].1.method, "ping");
        assert_eq!(sent[0].1.args, Value::List(vec![Value::Boolean(true)]));
    }
}
