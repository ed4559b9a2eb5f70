use std::{
    collections::HashMap,
    convert::{TryFrom, TryInto},
};

use serde::{de, ser, de::DeserializeOwned, Deserialize, Serialize};

use crate::error::ValueError;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    I64(i64),
    F64(f64),
    String(String),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::I64(i)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl Serialize for Value {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::I64(i) => serializer.serialize_i64(*i),
            Value::F64(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s.as_str()),
            Value::List(vec) => vec.serialize(serializer),
            Value::Map(m) => {
                use ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m {
                    map.serialize_key(k)?;
                    map.serialize_value(v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        use de::Visitor;
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            #[inline]
            fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
                Ok(Value::Boolean(value))
            }

            #[inline]
            fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
                Ok(Value::I64(value))
            }

            #[inline]
            fn visit_u64<E>(self, value: u64) -> Result<Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Value::I64)
                    .map_err(|_| E::custom("number too large for i64"))
            }

            #[inline]
            fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
                Ok(Value::F64(value))
            }

            #[inline]
            fn visit_str<E>(self, value: &str) -> Result<Value, E> {
                Ok(Value::String(value.into()))
            }

            #[inline]
            fn visit_string<E>(self, value: String) -> Result<Value, E> {
                Ok(Value::String(value))
            }

            #[inline]
            fn visit_none<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            #[inline]
            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: de::Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            #[inline]
            fn visit_unit<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            #[inline]
            fn visit_seq<V>(self, mut visitor: V) -> Result<Value, V::Error>
            where
                V: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = visitor.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::List(vec))
            }

            #[inline]
            fn visit_map<V>(self, mut visitor: V) -> Result<Value, V::Error>
            where
                V: de::MapAccess<'de>,
            {
                let mut map = HashMap::new();
                while let Some((k, v)) = visitor.next_entry()? {
                    map.insert(k, v);
                }
                Ok(Value::Map(map))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = ValueError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Boolean(b)),
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Number(num) => {
                if let Some(i) = num.as_i64() {
                    Ok(Value::I64(i))
                } else if let Some(f) = num.as_f64() {
                    Ok(Value::F64(f))
                } else {
                    Err(ValueError::WrongType)
                }
            }
            serde_json::Value::Array(vec) => Ok(Value::List(
                vec.into_iter()
                    .map(TryInto::try_into)
                    .collect::<Result<_, _>>()?,
            )),
            serde_json::Value::Object(map) => Ok(Value::Map(
                map.into_iter()
                    .map(|(k, v)| Ok((k, v.try_into()?)))
                    .collect::<Result<_, ValueError>>()?,
            )),
        }
    }
}

/// Deserialize a typed argument struct out of a [`Value`].
pub fn from_value<T>(value: &Value) -> Result<T, ValueError>
where
    T: DeserializeOwned,
{
    let json = serde_json::to_value(value).map_err(|e| ValueError::Message(e.to_string()))?;
    serde_json::from_value(json).map_err(|e| ValueError::Message(e.to_string()))
}

pub fn to_value<T>(value: T) -> Result<Value, ValueError>
where
    T: Serialize,
{
    serde_json::to_value(value)
        .map_err(|e| ValueError::Message(e.to_string()))?
        .try_into()
}

#[cfg(test)]
mod tests {
    use super::{from_value, to_value, Value};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
    #[serde(rename_all = "camelCase")]
    struct Description {
        label: String,
        primary_color: i64,
    }

    #[test]
    fn test_deserialize_struct() {
        let value = json_value!({ "label": "app", "primaryColor": 42 });
        let deserialized =
            from_value::<Description>(&value).expect("deserialization failed");
        assert_eq!(
            deserialized,
            Description {
                label: "app".into(),
                primary_color: 42
            }
        );
    }

    #[test]
    fn test_deserialize_wrong_type() {
        let value = json_value!({ "label": 1, "primaryColor": 42 });
        assert!(from_value::<Description>(&value).is_err());
    }

    #[test]
    fn test_serialize_map() {
        let value = to_value(Description {
            label: "x".into(),
            primary_color: 7,
        })
        .expect("serialization failed");
        assert_eq!(value.get("label"), Some(&Value::String("x".into())));
        assert_eq!(value.get("primaryColor"), Some(&Value::I64(7)));
    }

    #[test]
    fn test_json_value_macro() {
        assert_eq!(json_value!(null), Value::Null);
        assert_eq!(json_value!(true), Value::Boolean(true));
        assert_eq!(
            json_value!([1, "a"]),
            Value::List(vec![Value::I64(1), Value::String("a".into())])
        );
    }
}
