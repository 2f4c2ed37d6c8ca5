//! Read-only validation of a full path before any container mutation.
//!
//! When extension is enabled, a set could insert a map entry or grow an
//! array and only then discover that a later segment fails, leaving the new
//! element behind. This pass walks the same path without mutating anything:
//! absent container elements are checked against the layout default of their
//! type (so a default-null object reference mid-path predicts the downstream
//! failure), and the terminal type check runs up front. The mutating walk
//! only starts once this pass succeeds.

use varpath_heap::ObjectRead;
use varpath_layout::TypeLayout;
use varpath_types::{ObjectId, Value, VarType, VarTypeRef};

use crate::{
    access::{find_object_field, int_key_matches, string_key_matches},
    AccessParams, VarSegment,
};

pub(crate) fn check_object<H: ObjectRead>(
    heap: &H,
    layout: &TypeLayout,
    object: ObjectId,
    segments: &[VarSegment],
    depth: usize,
    dest_type: &VarTypeRef,
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
        Ok(class) => class,
        Err(_) => return false,
    };
    let class = match layout.class_layout(class_name) {
        Ok(class) => class,
        Err(_) => return false,
    };
    let (internal, field_type) = match find_object_field(layout, class, name, params) {
        Some(found) => found,
        None => return false,
    };
    let fields = match heap.object_fields(object) {
        Ok(fields) => fields,
        Err(_) => return false,
    };
    let slot = match fields.get(internal) {
        Some(slot) => slot,
        None => return false,
    };
    check_value(heap, layout, field_type, slot, segments, depth, dest_type, params)
}

fn check_struct<H: ObjectRead>(
    heap: &H,
    layout: &TypeLayout,
    struct_name: &str,
    slot: &Value,
    segments: &[VarSegment],
    depth: usize,
    dest_type: &VarTypeRef,
    params: &AccessParams,
) -> bool {
    if depth >= segments.len() {
        return false;
    }
    let name = match segments[depth].name() {
        Some(name) => name,
        None => return false,
    };
    let strukt = match layout.struct_layout(struct_name) {
        Ok(strukt) => strukt,
        Err(_) => return false,
    };
    let (internal, field_type) = match strukt.find_field(name) {
        Some(found) => found,
        None => return false,
    };
    let fields = match slot {
        Value::Struct(fields) => fields,
        _ => return false,
    };
    match fields.get(internal) {
        Some(field_slot) => check_value(
            heap, layout, field_type, field_slot, segments, depth, dest_type, params,
        ),
        None => false,
    }
}

fn check_value<H: ObjectRead>(
    heap: &H,
    layout: &TypeLayout,
    data_type: &VarTypeRef,
    slot: &Value,
    segments: &[VarSegment],
    depth: usize,
    dest_type: &VarTypeRef,
    params: &AccessParams,
) -> bool {
    let last = depth + 1 == segments.len();
    match &segments[depth] {
        VarSegment::Plain { .. } => {
            if last {
                return data_type == dest_type;
            }
            check_continue(heap, layout, data_type, slot, segments, depth + 1, dest_type, params)
        }
        VarSegment::Index { index, .. } => match data_type.as_ref() {
            VarType::Array(element_type) => {
                let items = match slot {
                    Value::Array(items) => items,
                    _ => return false,
                };
                if *index < 0 {
                    return false;
                }
                let index = match usize::try_from(*index) {
                    Ok(index) => index,
                    Err(_) => return false,
                };
                if last {
                    if element_type != dest_type {
                        return false;
                    }
                    return index < items.len() || params.extend_if_not_present;
                }
                match items.get(index) {
                    Some(item) => check_continue(
                        heap,
                        layout,
                        element_type,
                        item,
                        segments,
                        depth + 1,
                        dest_type,
                        params,
                    ),
                    None if params.extend_if_not_present => {
                        check_default(heap, layout, element_type, segments, depth + 1, dest_type, params)
                    }
                    None => false,
                }
            }
            VarType::Map {
                key: key_type,
                value: value_type,
            } => {
                if !key_type.is_integer_key() {
                    return false;
                }
                let entries = match slot {
                    Value::Map(entries) => entries,
                    _ => return false,
                };
                let existing = entries
                    .iter()
                    .find(|(stored, _)| int_key_matches(stored, *index))
                    .map(|(_, value)| value);
                if last {
                    if value_type != dest_type {
                        return false;
                    }
                    return existing.is_some() || params.extend_if_not_present;
                }
                match existing {
                    Some(value) => check_continue(
                        heap,
                        layout,
                        value_type,
                        value,
                        segments,
                        depth + 1,
                        dest_type,
                        params,
                    ),
                    None if params.extend_if_not_present => {
                        check_default(heap, layout, value_type, segments, depth + 1, dest_type, params)
                    }
                    None => false,
                }
            }
            _ => false,
        },
        VarSegment::Key { key, .. } => match data_type.as_ref() {
            VarType::Map {
                key: key_type,
                value: value_type,
            } => {
                if !key_type.is_string_key() {
                    return false;
                }
                let entries = match slot {
                    Value::Map(entries) => entries,
                    _ => return false,
                };
                let existing = entries
                    .iter()
                    .find(|(stored, _)| string_key_matches(key_type, stored, key))
                    .map(|(_, value)| value);
                if last {
                    if value_type != dest_type {
                        return false;
                    }
                    return existing.is_some() || params.extend_if_not_present;
                }
                match existing {
                    Some(value) => check_continue(
                        heap,
                        layout,
                        value_type,
                        value,
                        segments,
                        depth + 1,
                        dest_type,
                        params,
                    ),
                    None if params.extend_if_not_present => {
                        check_default(heap, layout, value_type, segments, depth + 1, dest_type, params)
                    }
                    None => false,
                }
            }
            _ => false,
        },
        VarSegment::Invalid => false,
    }
}

/// Continue past a non-terminal element: only struct and object-reference
/// kinds can carry the walk further.
fn check_continue<H: ObjectRead>(
    heap: &H,
    layout: &TypeLayout,
    data_type: &VarTypeRef,
    slot: &Value,
    segments: &[VarSegment],
    depth: usize,
    dest_type: &VarTypeRef,
    params: &AccessParams,
) -> bool {
    match data_type.as_ref() {
        VarType::Struct(struct_name) => check_struct(
            heap, layout, struct_name, slot, segments, depth, dest_type, params,
        ),
        VarType::Object(_) => match slot {
            Value::Object(object) => {
                check_object(heap, layout, *object, segments, depth, dest_type, params)
            }
            _ => false,
        },
        _ => false,
    }
}

/// Continue the check through an element that extension would create.
fn check_default<H: ObjectRead>(
    heap: &H,
    layout: &TypeLayout,
    data_type: &VarTypeRef,
    segments: &[VarSegment],
    depth: usize,
    dest_type: &VarTypeRef,
    params: &AccessParams,
) -> bool {
    match layout.default_value(data_type) {
        Ok(default) => check_continue(
            heap, layout, data_type, &default, segments, depth, dest_type, params,
        ),
        Err(_) => false,
    }
}
