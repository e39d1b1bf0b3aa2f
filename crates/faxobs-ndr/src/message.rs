//! Typed messages
//!
//! [`ndr_message!`](crate::ndr_message) declares a request or response
//! struct whose fields map to operation parameters by wire name.
//! [`ndr_struct!`](crate::ndr_struct) declares a nested structure together
//! with its [`StructSchema`](crate::StructSchema), so field order is written
//! down once.

use crate::{Result, Values};

/// A typed value converted to and from frame parameters
pub trait FrameMessage: Sized {
    /// Parameter values for the frame encoder
    fn to_values(&self) -> Values;

    /// Rebuild from decoded parameter values
    fn from_values(values: Values) -> Result<Self>;
}

/// Declare a typed request or response
///
/// ```
/// use faxobs_ndr::{ndr_message, ContextHandle, FrameMessage};
///
/// ndr_message! {
///     /// ConnectionRefCount request
///     pub struct ConnectRequest {
///         "Handle" => handle: ContextHandle,
///         "Connect" => connect: u32,
///     }
/// }
///
/// let req = ConnectRequest { handle: ContextHandle::EMPTY, connect: 1 };
/// let values = req.to_values();
/// assert_eq!(ConnectRequest::from_values(values).unwrap(), req);
/// ```
#[macro_export]
macro_rules! ndr_message {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $wire:literal => $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        $vis struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $crate::FrameMessage for $name {
            #[allow(unused_mut)]
            fn to_values(&self) -> $crate::Values {
                let mut values = $crate::Values::new();
                $( values.insert($wire, $crate::IntoValue::into_value(self.$field.clone())); )*
                values
            }

            #[allow(unused_mut, unused_variables)]
            fn from_values(mut values: $crate::Values) -> $crate::Result<Self> {
                Ok(Self {
                    $(
                        $field: $crate::FromValue::from_value(
                            values.take($wire).unwrap_or($crate::Value::Null),
                            $wire,
                        )?,
                    )*
                })
            }
        }
    };
}

/// Declare a nested structure and its schema
///
/// ```
/// use faxobs_ndr::{ndr_struct, IntoValue, FromValue, Kind, Value};
///
/// ndr_struct! {
///     /// FAX_TIME
///     pub struct Time as TIME_SCHEMA = "FAX_TIME" {
///         "Hour" => hour: u16 = Kind::U16,
///         "Minute" => minute: u16 = Kind::U16,
///     }
/// }
///
/// assert_eq!(TIME_SCHEMA.fields.len(), 2);
/// let value = Time { hour: 22, minute: 30 }.into_value();
/// assert_eq!(value, Value::Struct(vec![Value::U16(22), Value::U16(30)]));
/// assert_eq!(Time::from_value(value, "Time").unwrap().minute, 30);
/// ```
#[macro_export]
macro_rules! ndr_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident as $schema:ident = $wire_name:literal {
            $( $(#[$fmeta:meta])* $wire:literal => $field:ident : $ty:ty = $kind:expr ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        $vis struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        #[doc = concat!("Wire layout of `", $wire_name, "`")]
        $vis const $schema: $crate::StructSchema = $crate::StructSchema {
            name: $wire_name,
            fields: &[ $( $crate::Field::new($wire, $kind), )* ],
        };

        impl $crate::IntoValue for $name {
            fn into_value(self) -> $crate::Value {
                $crate::Value::Struct(vec![ $( $crate::IntoValue::into_value(self.$field), )* ])
            }
        }

        impl $crate::FromValue for $name {
            fn from_value(value: $crate::Value, field: &'static str) -> $crate::Result<Self> {
                let items = match value {
                    $crate::Value::Struct(items) if items.len() == $schema.fields.len() => items,
                    $crate::Value::Null => return Err($crate::NdrError::MissingValue(field)),
                    _ => {
                        return Err($crate::NdrError::TypeMismatch {
                            field,
                            expected: $wire_name,
                        })
                    }
                };
                let mut items = items.into_iter();
                Ok(Self {
                    $(
                        $field: $crate::FromValue::from_value(
                            items.next().unwrap_or($crate::Value::Null),
                            $wire,
                        )?,
                    )*
                })
            }
        }
    };
}
