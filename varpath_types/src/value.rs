//! Dynamically typed values stored in reflected object fields.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ValueTypeError;

/// A handle to a host-owned object.
///
/// Having a single numeric type is convenient so that `Value` doesn't have to
/// be generic on an object storage implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// The null object handle.
    pub const NULL: Self = Self(0);

    /// Returns true if the handle is null.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "object(null)")
        } else {
            write!(f, "object({})", self.0)
        }
    }
}

/// An integer value, regardless of the underlying integer type's size.
pub type IntValue = i64;

/// A float value, regardless of the underlying float type's size.
pub type FloatValue = f64;

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A boolean value.
    Bool(bool),
    /// An integer value, shared by the byte/int/int64 types.
    Int(IntValue),
    /// A float value, shared by the float/double types.
    Float(FloatValue),
    /// A textual value, shared by the string/name/text types.
    String(String),
    /// An object reference value.
    Object(ObjectId),
    /// A struct value, keyed by internal field name.
    Struct(Box<IndexMap<String, Value>>),
    /// An array value.
    Array(Vec<Value>),
    /// A map value as an ordered entry list.
    ///
    /// Key lookup is a linear scan with key-type-aware comparison rather than
    /// hashing, since key types can have a textual identity that differs from
    /// their physical representation.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Convert the value to a bool.
    pub fn try_as_bool(&self) -> Result<bool, ValueTypeError> {
        if let Value::Bool(b) = *self {
            Ok(b)
        } else {
            Err(self.type_error("bool"))
        }
    }

    /// Convert the value to a bool, panicking on type mismatch.
    #[track_caller]
    pub fn as_bool(&self) -> bool {
        match self.try_as_bool() {
            Ok(b) => b,
            Err(error) => panic!("{}", error),
        }
    }

    /// Convert the value to an int.
    pub fn try_as_int(&self) -> Result<IntValue, ValueTypeError> {
        if let Value::Int(n) = *self {
            Ok(n)
        } else {
            Err(self.type_error("int"))
        }
    }

    /// Convert the value to an int, panicking on type mismatch.
    #[track_caller]
    pub fn as_int(&self) -> IntValue {
        match self.try_as_int() {
            Ok(n) => n,
            Err(error) => panic!("{}", error),
        }
    }

    /// Convert the value to a float.
    pub fn try_as_float(&self) -> Result<FloatValue, ValueTypeError> {
        if let Value::Float(r) = *self {
            Ok(r)
        } else {
            Err(self.type_error("float"))
        }
    }

    /// Convert the value to a float, panicking on type mismatch.
    #[track_caller]
    pub fn as_float(&self) -> FloatValue {
        match self.try_as_float() {
            Ok(r) => r,
            Err(error) => panic!("{}", error),
        }
    }

    /// Convert the value to a string.
    pub fn try_as_str(&self) -> Result<&str, ValueTypeError> {
        if let Value::String(s) = self {
            Ok(s)
        } else {
            Err(self.type_error("string"))
        }
    }

    /// Convert the value to a string, panicking on type mismatch.
    #[track_caller]
    pub fn as_str(&self) -> &str {
        match self.try_as_str() {
            Ok(s) => s,
            Err(error) => panic!("{}", error),
        }
    }

    /// Convert the value to an object handle.
    pub fn try_as_object(&self) -> Result<ObjectId, ValueTypeError> {
        if let Value::Object(id) = *self {
            Ok(id)
        } else {
            Err(self.type_error("object"))
        }
    }

    /// Convert the value to an object handle, panicking on type mismatch.
    #[track_caller]
    pub fn as_object(&self) -> ObjectId {
        match self.try_as_object() {
            Ok(id) => id,
            Err(error) => panic!("{}", error),
        }
    }

    /// Borrow the value's struct fields.
    pub fn try_as_struct(&self) -> Result<&IndexMap<String, Value>, ValueTypeError> {
        if let Value::Struct(fields) = self {
            Ok(fields)
        } else {
            Err(self.type_error("struct"))
        }
    }

    /// Mutably borrow the value's struct fields.
    pub fn try_as_struct_mut(&mut self) -> Result<&mut IndexMap<String, Value>, ValueTypeError> {
        if let Value::Struct(fields) = self {
            Ok(fields)
        } else {
            Err(self.type_error("struct"))
        }
    }

    /// Borrow the value's array items.
    pub fn try_as_array(&self) -> Result<&[Value], ValueTypeError> {
        if let Value::Array(items) = self {
            Ok(items)
        } else {
            Err(self.type_error("array"))
        }
    }

    /// Mutably borrow the value's array items.
    pub fn try_as_array_mut(&mut self) -> Result<&mut Vec<Value>, ValueTypeError> {
        if let Value::Array(items) = self {
            Ok(items)
        } else {
            Err(self.type_error("array"))
        }
    }

    /// Borrow the value's map entries.
    pub fn try_as_map(&self) -> Result<&[(Value, Value)], ValueTypeError> {
        if let Value::Map(entries) = self {
            Ok(entries)
        } else {
            Err(self.type_error("map"))
        }
    }

    /// Mutably borrow the value's map entries.
    pub fn try_as_map_mut(&mut self) -> Result<&mut Vec<(Value, Value)>, ValueTypeError> {
        if let Value::Map(entries) = self {
            Ok(entries)
        } else {
            Err(self.type_error("map"))
        }
    }

    fn type_error(&self, expected: &'static str) -> ValueTypeError {
        ValueTypeError {
            expected: expected.into(),
            actual: self.clone(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<IntValue> for Value {
    fn from(v: IntValue) -> Self {
        Self::Int(v)
    }
}

impl From<FloatValue> for Value {
    fn from(v: FloatValue) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<ObjectId> for Value {
    fn from(v: ObjectId) -> Self {
        Self::Object(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(r) => write!(f, "{}", r),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Object(id) => write!(f, "{}", id),
            Value::Struct(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                write!(f, "}}")
            }
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} -> {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        assert_eq!(Value::Int(5).as_int(), 5);
        assert_eq!(Value::from("hi").as_str(), "hi");
        assert!(Value::Bool(true).try_as_int().is_err());
        assert!(ObjectId::NULL.is_null());
        assert!(!ObjectId(3).is_null());
    }

    #[test]
    fn display() {
        let value = Value::Array(vec![Value::Int(1), Value::from("a")]);
        assert_eq!(value.to_string(), "[1, \"a\"]");
    }
}
