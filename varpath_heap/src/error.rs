#![allow(missing_docs)]

use std::{error::Error, fmt};

use varpath_layout::LayoutLookupError;
use varpath_types::ObjectId;

#[derive(Debug, Clone)]
pub enum HeapError {
    NullObject,
    UndefinedObject(ObjectId),
    LayoutLookupError(LayoutLookupError),
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::NullObject => write!(f, "null object handle"),
            HeapError::UndefinedObject(object) => {
                write!(f, "no object with handle {}", object)
            }
            HeapError::LayoutLookupError(error) => write!(f, "{}", error),
        }
    }
}

impl Error for HeapError {}

impl From<LayoutLookupError> for HeapError {
    fn from(v: LayoutLookupError) -> Self {
        Self::LayoutLookupError(v)
    }
}
