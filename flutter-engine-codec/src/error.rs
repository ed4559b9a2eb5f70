use std::{error, fmt};

use crate::{MethodCallResult, Value};

#[derive(Debug)]
pub enum MethodCallError {
    NotImplemented,
    DeserializeError(ValueError),
    UnspecifiedError,
}

impl From<ValueError> for MethodCallError {
    fn from(error: ValueError) -> Self {
        MethodCallError::DeserializeError(error)
    }
}

impl fmt::Display for MethodCallError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MethodCallError::NotImplemented => write!(f, "method not implemented"),
            MethodCallError::DeserializeError(err) => {
                write!(f, "failed to deserialize value: {}", err)
            }
            MethodCallError::UnspecifiedError => write!(f, "unspecified error"),
        }
    }
}

impl error::Error for MethodCallError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            MethodCallError::DeserializeError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MethodCallError> for MethodCallResult {
    fn from(error: MethodCallError) -> Self {
        match error {
            MethodCallError::NotImplemented => MethodCallResult::NotImplemented,
            error => MethodCallResult::Err {
                code: "".into(),
                message: format!("{}", error),
                details: Value::Null,
            },
        }
    }
}

#[derive(Debug)]
pub enum ValueError {
    Message(String),
    WrongType,
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValueError::Message(s) => write!(f, "{}", s),
            ValueError::WrongType => write!(f, "wrong type"),
        }
    }
}

impl serde::de::Error for ValueError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ValueError::Message(msg.to_string())
    }
}

impl error::Error for ValueError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_implemented_envelope() {
        let result: MethodCallResult = MethodCallError::NotImplemented.into();
        assert_eq!(result, MethodCallResult::NotImplemented);
    }

    #[test]
    fn test_deserialize_error_envelope() {
        let error: MethodCallError = ValueError::Message("missing field `text`".into()).into();
        match MethodCallResult::from(error) {
            MethodCallResult::Err {
                code,
                message,
                details,
            } => {
                assert_eq!(code, "");
                assert_eq!(message, "failed to deserialize value: missing field `text`");
                assert_eq!(details, Value::Null);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
