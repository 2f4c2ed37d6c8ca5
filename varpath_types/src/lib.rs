//! Runtime type descriptions and dynamically typed values for variable paths.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub use error::*;
pub use value::*;
pub use var_type::*;

mod error;
mod value;
mod var_type;
