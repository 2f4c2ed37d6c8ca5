#![allow(missing_docs)]

use std::{error::Error, fmt, sync::Arc};

#[derive(Debug, Clone)]
pub enum LayoutLookupError {
    UndefinedClass(String),
    UndefinedStruct(String),
}

impl fmt::Display for LayoutLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutLookupError::UndefinedClass(name) => {
                write!(f, "undefined class name: {}", name)
            }
            LayoutLookupError::UndefinedStruct(name) => {
                write!(f, "undefined struct name: {}", name)
            }
        }
    }
}

impl Error for LayoutLookupError {}

#[derive(Debug, Clone)]
pub enum LayoutParseError {
    JsonError(Arc<serde_json::Error>),
}

impl fmt::Display for LayoutParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutParseError::JsonError(error) => write!(f, "{}", error),
        }
    }
}

impl Error for LayoutParseError {}

impl From<serde_json::Error> for LayoutParseError {
    fn from(v: serde_json::Error) -> Self {
        Self::JsonError(Arc::new(v))
    }
}
