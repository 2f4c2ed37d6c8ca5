//! Recording and looking up the field tables of reflected classes and structs.
//!
//! A [TypeLayout] is the reflection registry the variable-path walker runs
//! against. Hosts register one [ClassLayout] per object class and one
//! [StructLayout] per nested struct type, either programmatically or from
//! JSON.
//!
//! Classes and structs produced by a visual-scripting generation layer store
//! their fields under decorated internal names. The decoration is handled
//! entirely in this crate (see [authored_name]) so that path resolution code
//! can match user-entered names without knowing about the mangling scheme.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub use error::*;
pub use layout::*;
pub use names::*;

mod error;
mod layout;
mod names;
