//! The reflective walker: runtime get/set along a parsed variable path.

use varpath_heap::ObjectWrite;
use varpath_layout::{ClassLayout, TypeLayout};
use varpath_types::{IntValue, ObjectId, Value, VarType, VarTypeRef};

use crate::{parse::MAX_VAR_DEPTH, preflight, VarSegment};

/// The parameters governing one access attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessParams {
    /// Also search fields contributed by the generation-scope class when a
    /// name is not found on the target's own class.
    pub include_generation_class: bool,
    /// Grow arrays and insert map entries instead of failing when an
    /// indexed element is absent.
    pub extend_if_not_present: bool,
}

impl AccessParams {
    /// Build access parameters.
    pub fn new(include_generation_class: bool, extend_if_not_present: bool) -> Self {
        Self {
            include_generation_class,
            extend_if_not_present,
        }
    }
}

/// A terminal field descriptor: the declared type plus a value buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    /// The declared type of the terminal field.
    pub data_type: VarTypeRef,
    /// The value buffer that is read into or written from.
    pub value: Value,
}

impl TypedValue {
    /// Build a descriptor from a type and an initial buffer value.
    pub fn new(data_type: VarTypeRef, value: Value) -> Self {
        Self { data_type, value }
    }
}

/// Walk `segments` starting at `target` and read or write the terminal field.
///
/// On success the terminal value is copied into `dest.value`; if `new_value`
/// is given its value is copied into the field first, so `dest` observes the
/// value after the write. Any failure returns false with nothing copied.
///
/// When `extend_if_not_present` is set, the whole path is validated with a
/// read-only pass before any container is grown, so a failing call never
/// leaves a freshly inserted element behind.
pub fn access_variable<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    target: ObjectId,
    segments: &[VarSegment],
    dest: &mut TypedValue,
    new_value: Option<&TypedValue>,
    params: &AccessParams,
) -> bool {
    if segments.is_empty() || segments.len() > MAX_VAR_DEPTH {
        return false;
    }
    if params.extend_if_not_present
        && !preflight::check_object(heap, layout, target, segments, 0, &dest.data_type, params)
    {
        return false;
    }
    access_in_object(heap, layout, target, segments, 0, dest, new_value, params)
}

/// The result of walking as far as possible inside one object's storage.
enum Outcome {
    Done(bool),
    /// The walk crossed an object reference; continue in that object's scope.
    Object { object: ObjectId, depth: usize },
}

fn access_in_object<H: ObjectWrite>(
    heap: &mut H,
    layout: &TypeLayout,
    object: ObjectId,
    segments: &[VarSegment],
    depth: usize,
    dest: &mut TypedValue,
    new_value: Option<&TypedValue>,
    params: &AccessParams,
) -> bool {
    if depth >= segments.len() {
        return false;
    }
    let name = match segments[depth].name() {
        Some(name) => name,
        None => return false,
    };
    if object.is_null() {
        return false;
    }

    let class_name = match heap.object_class(object) {
        Ok(class) => class.to_string(),
        Err(_) => return false,
    };
    let class = match layout.class_layout(&class_name) {
        Ok(class) => class,
        Err(_) => return false,
    };
    let (internal, field_type) = match find_object_field(layout, class, name, params) {
        Some(found) => found,
        None => return false,
    };

    let outcome = match heap.object_fields_mut(object) {
        Ok(fields) => match fields.get_mut(internal) {
            Some(slot) => step_value(
                layout, field_type, slot, segments, depth, dest, new_value, params,
            ),
            None => Outcome::Done(false),
        },
        Err(_) => Outcome::Done(false),
    };

    match outcome {
        Outcome::Done(ok) => ok,
        Outcome::Object { object, depth } => {
            access_in_object(heap, layout, object, segments, depth, dest, new_value, params)
        }
    }
}

fn step_struct(
    layout: &TypeLayout,
    struct_name: &str,
    slot: &mut Value,
    segments: &[VarSegment],
    depth: usize,
    dest: &mut TypedValue,
    new_value: Option<&TypedValue>,
    params: &AccessParams,
) -> Outcome {
    if depth >= segments.len() {
        return Outcome::Done(false);
    }
    let name = match segments[depth].name() {
        Some(name) => name,
        None => return Outcome::Done(false),
    };
    let strukt = match layout.struct_layout(struct_name) {
        Ok(strukt) => strukt,
        Err(_) => return Outcome::Done(false),
    };
    let (internal, field_type) = match strukt.find_field(name) {
        Some(found) => found,
        None => return Outcome::Done(false),
    };
    let fields = match slot {
        Value::Struct(fields) => fields,
        _ => return Outcome::Done(false),
    };
    match fields.get_mut(internal) {
        Some(field_slot) => step_value(
            layout, field_type, field_slot, segments, depth, dest, new_value, params,
        ),
        None => Outcome::Done(false),
    }
}

/// Handle one segment against a located field and its storage slot.
///
/// At the last segment this performs the typed terminal copy; otherwise it
/// recurses into struct storage or reports an object hop to the caller.
fn step_value(
    layout: &TypeLayout,
    data_type: &VarTypeRef,
    slot: &mut Value,
    segments: &[VarSegment],
    depth: usize,
    dest: &mut TypedValue,
    new_value: Option<&TypedValue>,
    params: &AccessParams,
) -> Outcome {
    let last = depth + 1 == segments.len();
    match &segments[depth] {
        VarSegment::Plain { .. } => {
            if last {
                if data_type != &dest.data_type {
                    return Outcome::Done(false);
                }
                return Outcome::Done(copy_terminal(slot, dest, new_value));
            }
            match data_type.as_ref() {
                VarType::Struct(struct_name) => step_struct(
                    layout,
                    struct_name,
                    slot,
                    segments,
                    depth + 1,
                    dest,
                    new_value,
                    params,
                ),
                VarType::Object(_) => object_hop(slot, depth + 1),
                _ => Outcome::Done(false),
            }
        }
        VarSegment::Index { index, .. } => match data_type.as_ref() {
            VarType::Array(element_type) => {
                let items = match slot {
                    Value::Array(items) => items,
                    _ => return Outcome::Done(false),
                };
                if last {
                    if element_type != &dest.data_type {
                        return Outcome::Done(false);
                    }
                    return match array_item_mut(
                        layout,
                        element_type,
                        items,
                        *index,
                        params.extend_if_not_present,
                    ) {
                        Some(item) => Outcome::Done(copy_terminal(item, dest, new_value)),
                        None => Outcome::Done(false),
                    };
                }
                match element_type.as_ref() {
                    VarType::Struct(struct_name) => match array_item_mut(
                        layout,
                        element_type,
                        items,
                        *index,
                        params.extend_if_not_present,
                    ) {
                        Some(item) => step_struct(
                            layout,
                            struct_name,
                            item,
                            segments,
                            depth + 1,
                            dest,
                            new_value,
                            params,
                        ),
                        None => Outcome::Done(false),
                    },
                    VarType::Object(_) => match array_item_mut(
                        layout,
                        element_type,
                        items,
                        *index,
                        params.extend_if_not_present,
                    ) {
                        Some(item) => object_hop(item, depth + 1),
                        None => Outcome::Done(false),
                    },
                    _ => Outcome::Done(false),
                }
            }
            VarType::Map {
                key: key_type,
                value: value_type,
            } => {
                if !key_type.is_integer_key() {
                    return Outcome::Done(false);
                }
                let entries = match slot {
                    Value::Map(entries) => entries,
                    _ => return Outcome::Done(false),
                };
                if last {
                    if value_type != &dest.data_type {
                        return Outcome::Done(false);
                    }
                    return match map_value_mut_int(
                        layout,
                        value_type,
                        entries,
                        *index,
                        params.extend_if_not_present,
                    ) {
                        Some(value) => Outcome::Done(copy_terminal(value, dest, new_value)),
                        None => Outcome::Done(false),
                    };
                }
                match value_type.as_ref() {
                    VarType::Struct(struct_name) => match map_value_mut_int(
                        layout,
                        value_type,
                        entries,
                        *index,
                        params.extend_if_not_present,
                    ) {
                        Some(value) => step_struct(
                            layout,
                            struct_name,
                            value,
                            segments,
                            depth + 1,
                            dest,
                            new_value,
                            params,
                        ),
                        None => Outcome::Done(false),
                    },
                    VarType::Object(_) => match map_value_mut_int(
                        layout,
                        value_type,
                        entries,
                        *index,
                        params.extend_if_not_present,
                    ) {
                        Some(value) => object_hop(value, depth + 1),
                        None => Outcome::Done(false),
                    },
                    _ => Outcome::Done(false),
                }
            }
            _ => Outcome::Done(false),
        },
        VarSegment::Key { key, .. } => match data_type.as_ref() {
            VarType::Map {
                key: key_type,
                value: value_type,
            } => {
                if !key_type.is_string_key() {
                    return Outcome::Done(false);
                }
                let entries = match slot {
                    Value::Map(entries) => entries,
                    _ => return Outcome::Done(false),
                };
                if last {
                    if value_type != &dest.data_type {
                        return Outcome::Done(false);
                    }
                    return match map_value_mut_string(
                        layout,
                        key_type,
                        value_type,
                        entries,
                        key,
                        params.extend_if_not_present,
                    ) {
                        Some(value) => Outcome::Done(copy_terminal(value, dest, new_value)),
                        None => Outcome::Done(false),
                    };
                }
                match value_type.as_ref() {
                    VarType::Struct(struct_name) => match map_value_mut_string(
                        layout,
                        key_type,
                        value_type,
                        entries,
                        key,
                        params.extend_if_not_present,
                    ) {
                        Some(value) => step_struct(
                            layout,
                            struct_name,
                            value,
                            segments,
                            depth + 1,
                            dest,
                            new_value,
                            params,
                        ),
                        None => Outcome::Done(false),
                    },
                    VarType::Object(_) => match map_value_mut_string(
                        layout,
                        key_type,
                        value_type,
                        entries,
                        key,
                        params.extend_if_not_present,
                    ) {
                        Some(value) => object_hop(value, depth + 1),
                        None => Outcome::Done(false),
                    },
                    _ => Outcome::Done(false),
                }
            }
            _ => Outcome::Done(false),
        },
        VarSegment::Invalid => Outcome::Done(false),
    }
}

/// Copy the terminal value: `new_value` into the field on a set, then the
/// field into the destination buffer.
fn copy_terminal(slot: &mut Value, dest: &mut TypedValue, new_value: Option<&TypedValue>) -> bool {
    if let Some(new_value) = new_value {
        *slot = new_value.value.clone();
    }
    dest.value = slot.clone();
    true
}

fn object_hop(slot: &Value, depth: usize) -> Outcome {
    match slot {
        Value::Object(object) => Outcome::Object {
            object: *object,
            depth,
        },
        _ => Outcome::Done(false),
    }
}

/// Look up a field on an object class, with the one-hop generation-scope
/// fallback when enabled.
pub(crate) fn find_object_field<'l>(
    layout: &'l TypeLayout,
    class: &'l ClassLayout,
    name: &str,
    params: &AccessParams,
) -> Option<(&'l str, &'l VarTypeRef)> {
    if let Some(found) = class.find_field(name) {
        return Some(found);
    }
    if params.include_generation_class {
        if let Some(generation_class) = &class.generated_by {
            if let Ok(generation_layout) = layout.class_layout(generation_class) {
                return generation_layout.find_field(name);
            }
        }
    }
    None
}

/// Return the array element slot at `index`, growing the array with default
/// values when extension is enabled.
pub(crate) fn array_item_mut<'v>(
    layout: &TypeLayout,
    element_type: &VarTypeRef,
    items: &'v mut Vec<Value>,
    index: IntValue,
    extend: bool,
) -> Option<&'v mut Value> {
    if index < 0 {
        return None;
    }
    let index = usize::try_from(index).ok()?;
    if index >= items.len() {
        if !extend {
            return None;
        }
        let default = layout.default_value(element_type).ok()?;
        items.resize(index + 1, default);
    }
    items.get_mut(index)
}

pub(crate) fn int_key_matches(stored: &Value, wanted: IntValue) -> bool {
    matches!(stored, Value::Int(n) if *n == wanted)
}

/// Compare a stored map key with a path literal by textual form.
///
/// Name keys have an interned physical representation, so they match
/// case-insensitively on their text; string and text keys match exactly.
pub(crate) fn string_key_matches(key_type: &VarType, stored: &Value, wanted: &str) -> bool {
    match stored {
        Value::String(stored) => {
            if matches!(key_type, VarType::Name) {
                stored.eq_ignore_ascii_case(wanted)
            } else {
                stored == wanted
            }
        }
        _ => false,
    }
}

fn map_value_mut_int<'v>(
    layout: &TypeLayout,
    value_type: &VarTypeRef,
    entries: &'v mut Vec<(Value, Value)>,
    key: IntValue,
    extend: bool,
) -> Option<&'v mut Value> {
    match entries
        .iter()
        .position(|(stored, _)| int_key_matches(stored, key))
    {
        Some(i) => entries.get_mut(i).map(|(_, value)| value),
        None if extend => {
            let default = layout.default_value(value_type).ok()?;
            entries.push((Value::Int(key), default));
            entries.last_mut().map(|(_, value)| value)
        }
        None => None,
    }
}

fn map_value_mut_string<'v>(
    layout: &TypeLayout,
    key_type: &VarTypeRef,
    value_type: &VarTypeRef,
    entries: &'v mut Vec<(Value, Value)>,
    key: &str,
    extend: bool,
) -> Option<&'v mut Value> {
    match entries
        .iter()
        .position(|(stored, _)| string_key_matches(key_type, stored, key))
    {
        Some(i) => entries.get_mut(i).map(|(_, value)| value),
        None if extend => {
            let default = layout.default_value(value_type).ok()?;
            entries.push((Value::String(key.to_string()), default));
            entries.last_mut().map(|(_, value)| value)
        }
        None => None,
    }
}
