use std::collections::HashMap;

use indexmap::IndexMap;
use varpath_layout::TypeLayout;
use varpath_types::{ObjectId, Value};

use crate::{HeapError, ObjectRead, ObjectWrite};

/// A single object instance: its class name and field storage.
#[derive(Debug, Clone)]
pub struct ObjectInstance {
    /// The name of the object's class layout.
    pub class: String,
    /// The object's field values, keyed by internal field name.
    pub fields: IndexMap<String, Value>,
}

/// In-memory object storage.
#[derive(Debug, Default)]
pub struct ObjectHeap {
    objects: HashMap<ObjectId, ObjectInstance>,
    next_id: u64,
}

impl ObjectHeap {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            next_id: 1,
        }
    }

    /// Create an object of the given class with default field values.
    ///
    /// Fields of the class's generation-scope class, if any, are
    /// materialized on the instance as well, so that generation-scope
    /// lookups resolve against the same storage.
    pub fn spawn(&mut self, layout: &TypeLayout, class: &str) -> Result<ObjectId, HeapError> {
        let class_layout = layout.class_layout(class)?;

        let mut fields = IndexMap::new();
        for (internal, data_type) in &class_layout.fields {
            fields.insert(internal.clone(), layout.default_value(data_type)?);
        }
        if let Some(generation_class) = &class_layout.generated_by {
            let generation_layout = layout.class_layout(generation_class)?;
            for (internal, data_type) in &generation_layout.fields {
                fields.insert(internal.clone(), layout.default_value(data_type)?);
            }
        }

        Ok(self.insert(ObjectInstance {
            class: class.to_string(),
            fields,
        }))
    }

    /// Insert a fully built instance and return its handle.
    pub fn insert(&mut self, instance: ObjectInstance) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, instance);
        id
    }

    /// Remove an object from the heap.
    pub fn remove(&mut self, object: ObjectId) -> Option<ObjectInstance> {
        self.objects.remove(&object)
    }

    /// Return true if the heap contains an object with the given handle.
    pub fn contains(&self, object: ObjectId) -> bool {
        self.objects.contains_key(&object)
    }

    /// The number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Return true if the heap holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn instance(&self, object: ObjectId) -> Result<&ObjectInstance, HeapError> {
        if object.is_null() {
            return Err(HeapError::NullObject);
        }
        self.objects
            .get(&object)
            .ok_or(HeapError::UndefinedObject(object))
    }
}

impl ObjectRead for ObjectHeap {
    fn object_class(&self, object: ObjectId) -> Result<&str, HeapError> {
        Ok(&self.instance(object)?.class)
    }

    fn object_fields(&self, object: ObjectId) -> Result<&IndexMap<String, Value>, HeapError> {
        Ok(&self.instance(object)?.fields)
    }
}

impl ObjectWrite for ObjectHeap {
    fn object_fields_mut(
        &mut self,
        object: ObjectId,
    ) -> Result<&mut IndexMap<String, Value>, HeapError> {
        if object.is_null() {
            return Err(HeapError::NullObject);
        }
        self.objects
            .get_mut(&object)
            .map(|instance| &mut instance.fields)
            .ok_or(HeapError::UndefinedObject(object))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use varpath_layout::ClassLayout;
    use varpath_types::VarType;

    use super::*;

    #[test]
    fn spawn_initializes_defaults() {
        let mut layout = TypeLayout::new();
        layout.add_class(
            ClassLayout::new("Target")
                .with_field("Hp", Arc::new(VarType::Int))
                .with_field("Tags", Arc::new(VarType::Array(Arc::new(VarType::Name)))),
        );

        let mut heap = ObjectHeap::new();
        let id = heap.spawn(&layout, "Target").unwrap();
        let fields = heap.object_fields(id).unwrap();
        assert_eq!(fields["Hp"], Value::Int(0));
        assert_eq!(fields["Tags"], Value::Array(Vec::new()));
    }

    #[test]
    fn spawn_includes_generation_fields() {
        let mut layout = TypeLayout::new();
        layout.add_class(
            ClassLayout::new("Target")
                .with_field("Hp", Arc::new(VarType::Int))
                .generated_by("TargetBlueprint"),
        );
        layout.add_class(
            ClassLayout::new("TargetBlueprint")
                .generated()
                .with_field(
                    "Mana_3_0123456789ABCDEF0123456789ABCDEF",
                    Arc::new(VarType::Int),
                ),
        );

        let mut heap = ObjectHeap::new();
        let id = heap.spawn(&layout, "Target").unwrap();
        let fields = heap.object_fields(id).unwrap();
        assert!(fields.contains_key("Mana_3_0123456789ABCDEF0123456789ABCDEF"));
    }

    #[test]
    fn null_and_unknown_handles_fail() {
        let heap = ObjectHeap::new();
        assert!(matches!(
            heap.object_class(ObjectId::NULL),
            Err(HeapError::NullObject)
        ));
        assert!(matches!(
            heap.object_fields(ObjectId(7)),
            Err(HeapError::UndefinedObject(_))
        ));
    }
}
