//! Reading and writing object fields by variable path.
//!
//! A variable path names a field with a C-like syntax: `.` descends into
//! nested structs and referenced objects, `[3]` indexes arrays and
//! integer-keyed maps, and `["Key"]` looks up string-keyed maps. A `.`
//! inside a quoted key is part of the key, not a separator.
//!
//! Paths are parsed by [VarPath::parse] and evaluated against a
//! [TypeLayout](varpath_layout::TypeLayout) plus an object store implementing
//! [ObjectWrite](varpath_heap::ObjectWrite). All runtime failures (bad token,
//! unknown field, type mismatch, missing element, null reference) surface as
//! a plain `false`/`None`; callers branch on the outcome, nothing is thrown.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use varpath_access::{
//!     get_int_variable_by_name, set_int_variable_by_name, AccessParams,
//! };
//! use varpath_heap::ObjectHeap;
//! use varpath_layout::{ClassLayout, StructLayout, TypeLayout};
//! use varpath_types::VarType;
//!
//! let mut layout = TypeLayout::new();
//! layout.add_struct(
//!     StructLayout::new("Item")
//!         .with_field("Name", Arc::new(VarType::String))
//!         .with_field("Count", Arc::new(VarType::Int)),
//! );
//! layout.add_class(ClassLayout::new("Target").with_field(
//!     "Inventory",
//!     Arc::new(VarType::Array(Arc::new(VarType::Struct("Item".to_string())))),
//! ));
//!
//! let mut heap = ObjectHeap::new();
//! let target = heap.spawn(&layout, "Target").unwrap();
//!
//! let params = AccessParams {
//!     extend_if_not_present: true,
//!     ..AccessParams::default()
//! };
//! let written =
//!     set_int_variable_by_name(&mut heap, &layout, target, "Inventory[1].Count", 7, &params);
//! assert_eq!(written, Some(7));
//!
//! let read =
//!     get_int_variable_by_name(&mut heap, &layout, target, "Inventory[1].Count", &params);
//! assert_eq!(read, Some(7));
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub use access::*;
pub use cache::*;
pub use error::*;
pub use library::*;
pub use parse::*;
pub use resolve::*;

mod access;
mod cache;
mod error;
mod library;
mod parse;
mod preflight;
mod resolve;
