use indexmap::IndexMap;
use varpath_types::{ObjectId, Value};

use crate::HeapError;

/// Trait for a view of object storage that allows reading fields by handle.
pub trait ObjectRead {
    /// Return the class name of an object.
    fn object_class(&self, object: ObjectId) -> Result<&str, HeapError>;

    /// Return the field values of an object, keyed by internal field name.
    fn object_fields(&self, object: ObjectId) -> Result<&IndexMap<String, Value>, HeapError>;
}

/// Trait for object storage that allows writing fields in place.
pub trait ObjectWrite: ObjectRead {
    /// Return the field values of an object for mutation.
    fn object_fields_mut(
        &mut self,
        object: ObjectId,
    ) -> Result<&mut IndexMap<String, Value>, HeapError>;
}
