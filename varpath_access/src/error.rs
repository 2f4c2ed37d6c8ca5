#![allow(missing_docs)]

use std::{error::Error, fmt};

#[derive(Debug, Clone)]
pub enum PathParseError {
    TooDeep { depth: usize, max: usize },
}

impl fmt::Display for PathParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathParseError::TooDeep { depth, max } => write!(
                f,
                "variable path has {} segments, more than the maximum depth {}",
                depth, max
            ),
        }
    }
}

impl Error for PathParseError {}
