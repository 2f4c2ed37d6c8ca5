//! Field table registry for classes and structs.

use std::{collections::HashMap, fmt, sync::Arc};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use varpath_types::{ObjectId, Value, VarType, VarTypeRef};

use crate::{
    authored_name,
    LayoutLookupError::{self, *},
    LayoutParseError,
};

/// A shared reference to a type layout.
pub type TypeLayoutRef = Arc<TypeLayout>;

/// The field table of an object class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassLayout {
    /// The class name.
    pub name: String,
    /// Whether the class was produced by the visual-scripting generation
    /// layer. Generated classes store fields under decorated internal names.
    pub generated: bool,
    /// The generation-scope class whose field table is searched as a one-hop
    /// fallback, for native classes that were the base of a generated class.
    pub generated_by: Option<String>,
    /// The fields of the class, keyed by internal name.
    pub fields: IndexMap<String, VarTypeRef>,
}

impl ClassLayout {
    /// Create a class layout with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generated: false,
            generated_by: None,
            fields: IndexMap::new(),
        }
    }

    /// Mark the class as produced by the generation layer.
    pub fn generated(mut self) -> Self {
        self.generated = true;
        self
    }

    /// Link the class to its generation-scope class.
    pub fn generated_by(mut self, class: impl Into<String>) -> Self {
        self.generated_by = Some(class.into());
        self
    }

    /// Add a field under its internal name.
    pub fn with_field(mut self, internal_name: impl Into<String>, data_type: VarTypeRef) -> Self {
        self.fields.insert(internal_name.into(), data_type);
        self
    }

    /// Look up a field by user-facing name.
    ///
    /// Returns the internal name and type of the field. Generated classes
    /// match by authored name, so decoration on the stored name is ignored.
    pub fn find_field(&self, name: &str) -> Option<(&str, &VarTypeRef)> {
        if self.generated {
            self.fields
                .iter()
                .find(|(internal, _)| authored_name(internal) == name)
                .map(|(internal, data_type)| (internal.as_str(), data_type))
        } else {
            self.fields
                .get_key_value(name)
                .map(|(internal, data_type)| (internal.as_str(), data_type))
        }
    }
}

/// The field table of a nested struct type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructLayout {
    /// The struct type name.
    pub name: String,
    /// Whether the struct was produced by the generation layer.
    pub generated: bool,
    /// The fields of the struct, keyed by internal name.
    pub fields: IndexMap<String, VarTypeRef>,
}

impl StructLayout {
    /// Create a struct layout with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generated: false,
            fields: IndexMap::new(),
        }
    }

    /// Mark the struct as produced by the generation layer.
    pub fn generated(mut self) -> Self {
        self.generated = true;
        self
    }

    /// Add a field under its internal name.
    pub fn with_field(mut self, internal_name: impl Into<String>, data_type: VarTypeRef) -> Self {
        self.fields.insert(internal_name.into(), data_type);
        self
    }

    /// Look up a field by user-facing name.
    ///
    /// Returns the internal name and type of the field. Generated structs
    /// match by authored name.
    pub fn find_field(&self, name: &str) -> Option<(&str, &VarTypeRef)> {
        if self.generated {
            self.fields
                .iter()
                .find(|(internal, _)| authored_name(internal) == name)
                .map(|(internal, data_type)| (internal.as_str(), data_type))
        } else {
            self.fields
                .get_key_value(name)
                .map(|(internal, data_type)| (internal.as_str(), data_type))
        }
    }
}

/// A description of the classes and structs reachable through variable paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeLayout {
    /// The registered class layouts, by class name.
    pub classes: HashMap<String, ClassLayout>,
    /// The registered struct layouts, by struct type name.
    pub structs: HashMap<String, StructLayout>,
}

impl TypeLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class layout under its name.
    pub fn add_class(&mut self, class: ClassLayout) {
        self.classes.insert(class.name.clone(), class);
    }

    /// Register a struct layout under its name.
    pub fn add_struct(&mut self, strukt: StructLayout) {
        self.structs.insert(strukt.name.clone(), strukt);
    }

    /// Look up a class layout by name.
    pub fn class_layout(&self, name: &str) -> Result<&ClassLayout, LayoutLookupError> {
        self.classes
            .get(name)
            .ok_or_else(|| UndefinedClass(name.to_string()))
    }

    /// Look up a struct layout by name.
    pub fn struct_layout(&self, name: &str) -> Result<&StructLayout, LayoutLookupError> {
        self.structs
            .get(name)
            .ok_or_else(|| UndefinedStruct(name.to_string()))
    }

    /// Build the default value for a type.
    ///
    /// Numeric types default to zero, strings to empty, object references to
    /// null, containers to empty, and structs to the defaults of each of
    /// their fields.
    pub fn default_value(&self, data_type: &VarType) -> Result<Value, LayoutLookupError> {
        Ok(match data_type {
            VarType::Bool => Value::Bool(false),
            VarType::Byte | VarType::Int | VarType::Int64 => Value::Int(0),
            VarType::Float | VarType::Double => Value::Float(0.0),
            VarType::String | VarType::Name | VarType::Text => Value::String(String::new()),
            VarType::Object(_) => Value::Object(ObjectId::NULL),
            VarType::Struct(name) => {
                let strukt = self.struct_layout(name)?;
                let mut fields = IndexMap::new();
                for (internal, field_type) in &strukt.fields {
                    fields.insert(internal.clone(), self.default_value(field_type)?);
                }
                Value::Struct(Box::new(fields))
            }
            VarType::Array(_) => Value::Array(Vec::new()),
            VarType::Map { .. } => Value::Map(Vec::new()),
        })
    }

    /// Load a layout from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, LayoutParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the layout to JSON.
    pub fn to_json(&self) -> Result<String, LayoutParseError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for TypeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, class) in &self.classes {
            writeln!(f, "class {}", name)?;
            for (internal, data_type) in &class.fields {
                writeln!(f, "  {}: {}", internal, data_type)?;
            }
        }
        for (name, strukt) in &self.structs {
            writeln!(f, "struct {}", name)?;
            for (internal, data_type) in &strukt.fields {
                writeln!(f, "  {}: {}", internal, data_type)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> VarTypeRef {
        Arc::new(VarType::Int)
    }

    #[test]
    fn find_field_native() {
        let class = ClassLayout::new("Target").with_field("Hp", int());
        assert!(class.find_field("Hp").is_some());
        assert!(class.find_field("hp").is_none());
    }

    #[test]
    fn find_field_generated() {
        let class = ClassLayout::new("TargetGen")
            .generated()
            .with_field("Hp_2_89343B9D44A0ED2E67AE07B38205F067", int());
        let (internal, data_type) = class.find_field("Hp").unwrap();
        assert_eq!(internal, "Hp_2_89343B9D44A0ED2E67AE07B38205F067");
        assert_eq!(**data_type, VarType::Int);
    }

    #[test]
    fn default_values() {
        let mut layout = TypeLayout::new();
        layout.add_struct(
            StructLayout::new("Item")
                .with_field("Name", Arc::new(VarType::String))
                .with_field("Count", int()),
        );

        let value = layout
            .default_value(&VarType::Struct("Item".to_string()))
            .unwrap();
        let fields = value.try_as_struct().unwrap();
        assert_eq!(fields["Name"], Value::String(String::new()));
        assert_eq!(fields["Count"], Value::Int(0));

        assert_eq!(
            layout.default_value(&VarType::Object("Owner".into())).unwrap(),
            Value::Object(ObjectId::NULL)
        );
        assert!(layout
            .default_value(&VarType::Struct("Missing".to_string()))
            .is_err());
    }

    #[test]
    fn json_round_trip() {
        let mut layout = TypeLayout::new();
        layout.add_class(
            ClassLayout::new("Target")
                .with_field("Hp", int())
                .with_field("Inventory", Arc::new(VarType::Array(int()))),
        );

        let json = layout.to_json().unwrap();
        let loaded = TypeLayout::from_json(&json).unwrap();
        let class = loaded.class_layout("Target").unwrap();
        assert_eq!(**class.find_field("Inventory").unwrap().1, VarType::Array(int()));
    }
}
