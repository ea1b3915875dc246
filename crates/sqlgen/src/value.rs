//! Bind parameter values.
//!
//! [`Value`] is the type-agnostic payload carried by the builder's parameter
//! mapping. `Value::Null` stands for an absent value: required filters reject
//! it, optional filters skip it (or bind NULL, see
//! [`QueryBuilder::add_optional_where_with_operator`](crate::QueryBuilder::add_optional_where_with_operator)).

use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type};
use uuid::Uuid;

/// A tagged union of everything that can be bound to a named parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Uuid(Uuid),
    Json(serde_json::Value),
    /// A sequence of values. Only meaningful for `IN` filters, which expand it
    /// into one placeholder per element.
    List(Vec<Value>),
}

macro_rules! impl_conv_for_value {
    ($variant:ident, $ty:ty, $name:ident) => {
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }

        impl Value {
            /// Attempts to extract a reference to the inner value if it matches the variant.
            pub fn $name(&self) -> Option<&$ty> {
                if let Value::$variant(v) = self {
                    Some(v)
                } else {
                    None
                }
            }
        }
    };
}

impl_conv_for_value!(Bool, bool, as_bool);
impl_conv_for_value!(Int, i64, as_int);
impl_conv_for_value!(Float, f64, as_float);
impl_conv_for_value!(Text, String, as_text);
impl_conv_for_value!(Date, NaiveDate, as_date);
impl_conv_for_value!(Timestamp, NaiveDateTime, as_timestamp);
impl_conv_for_value!(TimestampTz, DateTime<Utc>, as_timestamptz);
impl_conv_for_value!(Uuid, Uuid, as_uuid);

macro_rules! impl_int_conv {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_int_conv!(i8, i16, i32, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

/// JSON scalars map onto the matching variant, arrays become [`Value::List`],
/// objects stay as [`Value::Json`].
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Json(serde_json::Value::Number(n)), Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            obj @ serde_json::Value::Object(_) => Value::Json(obj),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl Value {
    /// Checks if the value is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Checks if the value is a [`Value::List`].
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the type name of the value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Text(_) => "Text",
            Value::Bytes(_) => "Bytes",
            Value::Date(_) => "Date",
            Value::Timestamp(_) => "Timestamp",
            Value::TimestampTz(_) => "TimestampTz",
            Value::Uuid(_) => "Uuid",
            Value::Json(_) => "Json",
            Value::List(_) => "List",
        }
    }
}

fn encode<T: ToSql>(
    value: &T,
    variant: &str,
    ty: &Type,
    out: &mut BytesMut,
) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    if !T::accepts(ty) {
        return Err(format!("cannot bind {variant} value to Postgres type {ty}").into());
    }
    value.to_sql(ty, out)
}

fn narrow_f32(v: f64) -> Result<f32, Box<dyn Error + Sync + Send>> {
    let narrowed = v as f32;
    if v.is_finite() && !narrowed.is_finite() {
        return Err(format!("{v} is out of range for Postgres type float4").into());
    }
    Ok(narrowed)
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        let name = self.type_name();
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => encode(v, name, ty, out),
            Value::Int(v) => match *ty {
                Type::INT2 => encode(&i16::try_from(*v)?, name, ty, out),
                Type::INT4 => encode(&i32::try_from(*v)?, name, ty, out),
                Type::OID => encode(&u32::try_from(*v)?, name, ty, out),
                _ => encode(v, name, ty, out),
            },
            Value::Float(v) => match *ty {
                Type::FLOAT4 => encode(&narrow_f32(*v)?, name, ty, out),
                _ => encode(v, name, ty, out),
            },
            Value::Text(v) => encode(v, name, ty, out),
            Value::Bytes(v) => encode(v, name, ty, out),
            Value::Date(v) => encode(v, name, ty, out),
            Value::Timestamp(v) => encode(v, name, ty, out),
            Value::TimestampTz(v) => encode(v, name, ty, out),
            Value::Uuid(v) => encode(v, name, ty, out),
            Value::Json(v) => encode(v, name, ty, out),
            Value::List(_) => {
                Err("list values cannot be bound directly; expand them with an IN filter".into())
            }
        }
    }

    fn accepts(_ty: &Type) -> bool {
        // Checked per variant in `to_sql`.
        true
    }

    tokio_postgres::types::to_sql_checked!();
}
