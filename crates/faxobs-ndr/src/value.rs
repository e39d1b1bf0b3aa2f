//! Logical parameter values
//!
//! Frames are built from and decoded into [`Values`]: a name-keyed set of
//! [`Value`]s. A unique pointer has no value of its own; its pointee's value
//! is stored directly and [`Value::Null`] marks the pointer as null. A double
//! pointer therefore also carries a single value.

use crate::{ContextHandle, NdrError, Result};

/// A decoded or to-be-encoded value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Null pointer
    Null,
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Bool(bool),
    Handle(ContextHandle),
    Bytes(Vec<u8>),
    Text(String),
    /// Structure fields in declaration order
    Struct(Vec<Value>),
    /// Fixed array elements
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer value usable as a `size_is` count
    pub fn as_size(&self) -> Option<u64> {
        match self {
            Value::U8(v) => Some(u64::from(*v)),
            Value::U16(v) => Some(u64::from(*v)),
            Value::U32(v) => Some(u64::from(*v)),
            Value::U64(v) => Some(*v),
            _ => None,
        }
    }
}

/// Name-keyed parameter values, kept in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Values {
    entries: Vec<(&'static str, Value)>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: &'static str, value: impl IntoValue) -> Self {
        self.insert(name, value.into_value());
        self
    }

    /// Insert or replace a value
    pub fn insert(&mut self, name: &'static str, value: Value) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Remove and return a value
    pub fn take(&mut self, name: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(n, _)| *n == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.entries.iter().map(|(n, v)| (*n, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Conversion into a [`Value`]
pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// Conversion out of a [`Value`]
pub trait FromValue: Sized {
    /// `field` names the value in errors
    fn from_value(value: Value, field: &'static str) -> Result<Self>;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: Value, _field: &'static str) -> Result<Self> {
        Ok(value)
    }
}

macro_rules! impl_value_conv {
    ($ty:ty, $variant:ident, $expected:expr) => {
        impl IntoValue for $ty {
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value, field: &'static str) -> Result<Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    Value::Null => Err(NdrError::MissingValue(field)),
                    _ => Err(NdrError::TypeMismatch {
                        field,
                        expected: $expected,
                    }),
                }
            }
        }
    };
}

impl_value_conv!(u8, U8, "u8");
impl_value_conv!(u16, U16, "u16");
impl_value_conv!(u32, U32, "u32");
impl_value_conv!(u64, U64, "u64");
impl_value_conv!(bool, Bool, "bool");
impl_value_conv!(ContextHandle, Handle, "context handle");
impl_value_conv!(Vec<u8>, Bytes, "byte array");
impl_value_conv!(String, Text, "wide string");

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value, field: &'static str) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other, field).map(Some),
        }
    }
}

impl<T: IntoValue, const N: usize> IntoValue for [T; N] {
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: FromValue, const N: usize> FromValue for [T; N] {
    fn from_value(value: Value, field: &'static str) -> Result<Self> {
        let mismatch = NdrError::TypeMismatch {
            field,
            expected: "fixed array",
        };
        let items = match value {
            Value::List(items) if items.len() == N => items,
            Value::Null => return Err(NdrError::MissingValue(field)),
            _ => return Err(mismatch),
        };
        let converted = items
            .into_iter()
            .map(|v| T::from_value(v, field))
            .collect::<Result<Vec<T>>>()?;
        converted.try_into().map_err(|_| mismatch)
    }
}
