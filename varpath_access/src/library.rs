//! Get/set entry points that parse a path string and walk it.
//!
//! The typed wrappers mirror the per-type function library exposed to graph
//! nodes: each declares its terminal type, so a path landing on a field of a
//! different type fails rather than coercing.

use std::sync::Arc;

use log::debug;
use varpath_heap::ObjectWrite;
use varpath_layout::{TypeLayout, TypeLayoutRef};
use varpath_types::{FloatValue, IntValue, ObjectId, Value, VarType, VarTypeRef};

use crate::{
    access_variable, resolve_terminal_type, AccessParams, TerminalType, TypedValue, VarPath,
    VarPathCache,
};

/// Read the variable at `path` into `dest`.
///
/// Returns false (and copies nothing) if the path does not parse, does not
/// resolve, or resolves to a field whose type differs from `dest.data_type`.
pub fn get_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    dest: &mut TypedValue,
    params: &AccessParams,
) -> bool {
    let parsed = match VarPath::parse(path) {
        Ok(parsed) => parsed,
        Err(error) => {
            debug!("variable path {:?} failed to parse: {}", path, error);
            return false;
        }
    };
    access_variable(heap, layout, target, &parsed.segments, dest, None, params)
}

/// Write `new_value` to the variable at `path`.
///
/// On success `dest` receives the value after the write. Returns false with
/// nothing written on any failure.
pub fn set_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    new_value: &TypedValue,
    dest: &mut TypedValue,
    params: &AccessParams,
) -> bool {
    let parsed = match VarPath::parse(path) {
        Ok(parsed) => parsed,
        Err(error) => {
            debug!("variable path {:?} failed to parse: {}", path, error);
            return false;
        }
    };
    access_variable(
        heap,
        layout,
        target,
        &parsed.segments,
        dest,
        Some(new_value),
        params,
    )
}

/// A layout plus a parse cache behind one access API.
///
/// Hosts that evaluate many paths against one layout keep a single
/// `VariableAccessor` so repeated path strings are split and analyzed once.
#[derive(Debug)]
pub struct VariableAccessor {
    layout: TypeLayoutRef,
    cache: VarPathCache,
}

impl VariableAccessor {
    /// Create an accessor over a shared layout.
    pub fn new(layout: &TypeLayoutRef) -> Self {
        Self {
            layout: Arc::clone(layout),
            cache: VarPathCache::default(),
        }
    }

    /// The layout the accessor resolves against.
    pub fn layout(&self) -> &TypeLayout {
        &self.layout
    }

    /// Read the variable at `path` into `dest`, caching the parsed path.
    pub fn get<H: ObjectWrite>(
        &self,
        heap: &mut H,
        target: ObjectId,
        path: &str,
        dest: &mut TypedValue,
        params: &AccessParams,
    ) -> bool {
        match self.cache.parse(path) {
            Ok(parsed) => {
                access_variable(heap, &self.layout, target, &parsed.segments, dest, None, params)
            }
            Err(error) => {
                debug!("variable path {:?} failed to parse: {}", path, error);
                false
            }
        }
    }

    /// Write `new_value` to the variable at `path`, caching the parsed path.
    pub fn set<H: ObjectWrite>(
        &self,
        heap: &mut H,
        target: ObjectId,
        path: &str,
        new_value: &TypedValue,
        dest: &mut TypedValue,
        params: &AccessParams,
    ) -> bool {
        match self.cache.parse(path) {
            Ok(parsed) => access_variable(
                heap,
                &self.layout,
                target,
                &parsed.segments,
                dest,
                Some(new_value),
                params,
            ),
            Err(error) => {
                debug!("variable path {:?} failed to parse: {}", path, error);
                false
            }
        }
    }

    /// Resolve the terminal type of `path` rooted at a class.
    pub fn resolve(
        &self,
        root_class: &str,
        path: &str,
        params: &AccessParams,
    ) -> Option<TerminalType> {
        let parsed = self.cache.parse(path).ok()?;
        resolve_terminal_type(&self.layout, root_class, &parsed.segments, params)
    }
}

fn get_typed<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    params: &AccessParams,
    data_type: VarTypeRef,
    empty: Value,
) -> Option<Value> {
    let mut dest = TypedValue::new(data_type, empty);
    if get_variable_by_name(heap, layout, target, path, &mut dest, params) {
        Some(dest.value)
    } else {
        None
    }
}

fn set_typed<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    params: &AccessParams,
    data_type: VarTypeRef,
    new_value: Value,
    empty: Value,
) -> Option<Value> {
    let new_value = TypedValue::new(data_type.clone(), new_value);
    let mut dest = TypedValue::new(data_type, empty);
    if set_variable_by_name(heap, layout, target, path, &new_value, &mut dest, params) {
        Some(dest.value)
    } else {
        None
    }
}

/// Read a bool variable by path.
pub fn get_bool_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    params: &AccessParams,
) -> Option<bool> {
    get_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Bool),
        Value::Bool(false),
    )?
    .try_as_bool()
    .ok()
}

/// Write a bool variable by path, returning the value after the write.
pub fn set_bool_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    new_value: bool,
    params: &AccessParams,
) -> Option<bool> {
    set_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Bool),
        Value::Bool(new_value),
        Value::Bool(false),
    )?
    .try_as_bool()
    .ok()
}

/// Read a byte variable by path.
pub fn get_byte_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    params: &AccessParams,
) -> Option<IntValue> {
    get_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Byte),
        Value::Int(0),
    )?
    .try_as_int()
    .ok()
}

/// Write a byte variable by path, returning the value after the write.
pub fn set_byte_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    new_value: IntValue,
    params: &AccessParams,
) -> Option<IntValue> {
    set_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Byte),
        Value::Int(new_value),
        Value::Int(0),
    )?
    .try_as_int()
    .ok()
}

/// Read an int variable by path.
pub fn get_int_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    params: &AccessParams,
) -> Option<IntValue> {
    get_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Int),
        Value::Int(0),
    )?
    .try_as_int()
    .ok()
}

/// Write an int variable by path, returning the value after the write.
pub fn set_int_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    new_value: IntValue,
    params: &AccessParams,
) -> Option<IntValue> {
    set_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Int),
        Value::Int(new_value),
        Value::Int(0),
    )?
    .try_as_int()
    .ok()
}

/// Read an int64 variable by path.
pub fn get_int64_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    params: &AccessParams,
) -> Option<IntValue> {
    get_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Int64),
        Value::Int(0),
    )?
    .try_as_int()
    .ok()
}

/// Write an int64 variable by path, returning the value after the write.
pub fn set_int64_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    new_value: IntValue,
    params: &AccessParams,
) -> Option<IntValue> {
    set_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Int64),
        Value::Int(new_value),
        Value::Int(0),
    )?
    .try_as_int()
    .ok()
}

/// Read a float variable by path.
pub fn get_float_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    params: &AccessParams,
) -> Option<FloatValue> {
    get_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Float),
        Value::Float(0.0),
    )?
    .try_as_float()
    .ok()
}

/// Write a float variable by path, returning the value after the write.
pub fn set_float_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    new_value: FloatValue,
    params: &AccessParams,
) -> Option<FloatValue> {
    set_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Float),
        Value::Float(new_value),
        Value::Float(0.0),
    )?
    .try_as_float()
    .ok()
}

/// Read a double variable by path.
pub fn get_double_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    params: &AccessParams,
) -> Option<FloatValue> {
    get_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Double),
        Value::Float(0.0),
    )?
    .try_as_float()
    .ok()
}

/// Write a double variable by path, returning the value after the write.
pub fn set_double_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    new_value: FloatValue,
    params: &AccessParams,
) -> Option<FloatValue> {
    set_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Double),
        Value::Float(new_value),
        Value::Float(0.0),
    )?
    .try_as_float()
    .ok()
}

/// Read a string variable by path.
pub fn get_string_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    params: &AccessParams,
) -> Option<String> {
    match get_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::String),
        Value::String(String::new()),
    )? {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Write a string variable by path, returning the value after the write.
pub fn set_string_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    new_value: &str,
    params: &AccessParams,
) -> Option<String> {
    match set_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::String),
        Value::String(new_value.to_string()),
        Value::String(String::new()),
    )? {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Read a name variable by path.
pub fn get_name_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    params: &AccessParams,
) -> Option<String> {
    match get_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Name),
        Value::String(String::new()),
    )? {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Write a name variable by path, returning the value after the write.
pub fn set_name_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    new_value: &str,
    params: &AccessParams,
) -> Option<String> {
    match set_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Name),
        Value::String(new_value.to_string()),
        Value::String(String::new()),
    )? {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Read a text variable by path.
pub fn get_text_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    params: &AccessParams,
) -> Option<String> {
    match get_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Text),
        Value::String(String::new()),
    )? {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Write a text variable by path, returning the value after the write.
pub fn set_text_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    new_value: &str,
    params: &AccessParams,
) -> Option<String> {
    match set_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Text),
        Value::String(new_value.to_string()),
        Value::String(String::new()),
    )? {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Read an object-reference variable by path.
///
/// `class` is the declared class of the reference; a reference to any other
/// class fails the terminal type check.
pub fn get_object_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    class: &str,
    params: &AccessParams,
) -> Option<ObjectId> {
    get_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Object(class.to_string())),
        Value::Object(ObjectId::NULL),
    )?
    .try_as_object()
    .ok()
}

/// Write an object-reference variable by path, returning the reference after
/// the write.
pub fn set_object_variable_by_name<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    path: &str,
    class: &str,
    new_value: ObjectId,
    params: &AccessParams,
) -> Option<ObjectId> {
    set_typed(
        heap,
        layout,
        target,
        path,
        params,
        Arc::new(VarType::Object(class.to_string())),
        Value::Object(new_value),
        Value::Object(ObjectId::NULL),
    )?
    .try_as_object()
    .ok()
}
