//! Types and functions for describing reflected variable types.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// A runtime description of a reflected variable's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum VarType {
    /// A boolean.
    Bool,
    /// An 8 bit unsigned integer.
    Byte,
    /// A 32 bit signed integer.
    Int,
    /// A 64 bit signed integer.
    Int64,
    /// A 32 bit float.
    Float,
    /// A 64 bit float.
    Double,
    /// A plain text string.
    String,
    /// An interned name identifier.
    ///
    /// Names compare case insensitively by their textual form.
    Name,
    /// A localizable text identifier.
    Text,
    /// A nested struct, referencing a struct layout by name.
    Struct(String),
    /// A reference to another object, referencing a class layout by name.
    Object(String),
    /// A dynamically sized array.
    Array(VarTypeRef),
    /// A key/value container.
    Map {
        /// The key type.
        key: VarTypeRef,
        /// The value type.
        value: VarTypeRef,
    },
}

/// A shared reference to a `VarType`.
pub type VarTypeRef = Arc<VarType>;

impl VarType {
    /// Return true if two type descriptions denote the same type.
    ///
    /// This is structural equality over the type tree.
    pub fn same_type(&self, other: &VarType) -> bool {
        self == other
    }

    /// Return true if the type can key a map accessed with an integer index.
    pub fn is_integer_key(&self) -> bool {
        matches!(self, Self::Byte | Self::Int | Self::Int64)
    }

    /// Return true if the type can key a map accessed with a quoted string key.
    pub fn is_string_key(&self) -> bool {
        matches!(self, Self::String | Self::Name | Self::Text)
    }

    /// Return true if the type is a nested struct.
    pub fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }

    /// Return true if the type is an object reference.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Return true if the type is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Return true if the type is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map { .. })
    }

    /// Return the struct layout name for a struct type.
    pub fn struct_name(&self) -> Option<&str> {
        if let Self::Struct(name) = self {
            Some(name)
        } else {
            None
        }
    }

    /// Return the class layout name for an object reference type.
    pub fn object_class(&self) -> Option<&str> {
        if let Self::Object(name) = self {
            Some(name)
        } else {
            None
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarType::Bool => write!(f, "bool"),
            VarType::Byte => write!(f, "byte"),
            VarType::Int => write!(f, "int"),
            VarType::Int64 => write!(f, "int64"),
            VarType::Float => write!(f, "float"),
            VarType::Double => write!(f, "double"),
            VarType::String => write!(f, "string"),
            VarType::Name => write!(f, "name"),
            VarType::Text => write!(f, "text"),
            VarType::Struct(name) => write!(f, "struct {}", name),
            VarType::Object(name) => write!(f, "object {}", name),
            VarType::Array(base) => write!(f, "array[{}]", base),
            VarType::Map { key, value } => write!(f, "map[{}, {}]", key, value),
        }
    }
}
