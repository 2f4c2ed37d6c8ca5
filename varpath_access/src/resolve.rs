//! Editor-time resolution of a path's terminal type.
//!
//! This walks field tables only, never object storage, and is what pin type
//! inference uses before any object exists to read.

use varpath_layout::TypeLayout;
use varpath_types::{VarType, VarTypeRef};

use crate::{access::find_object_field, AccessParams, VarSegment};

/// The container traversed at the terminal segment, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// The terminal is a plain field.
    None,
    /// The terminal indexes an array.
    Array,
    /// The terminal indexes a map.
    Map,
}

/// The resolved type at the end of a path.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalType {
    /// The container traversed at the terminal segment.
    pub container: ContainerKind,
    /// The terminal field's type (the element or value type when the
    /// terminal segment indexes a container).
    pub data_type: VarTypeRef,
}

/// Resolve the terminal type of a path rooted at an object class.
pub fn resolve_terminal_type(
    layout: &TypeLayout,
    root_class: &str,
    segments: &[VarSegment],
    params: &AccessParams,
) -> Option<TerminalType> {
    resolve_in_class(layout, root_class, segments, 0, params)
}

/// Resolve the terminal type of a path rooted at a struct type.
pub fn resolve_terminal_type_in_struct(
    layout: &TypeLayout,
    root_struct: &str,
    segments: &[VarSegment],
    params: &AccessParams,
) -> Option<TerminalType> {
    resolve_in_struct(layout, root_struct, segments, 0, params)
}

fn resolve_in_class(
    layout: &TypeLayout,
    class_name: &str,
    segments: &[VarSegment],
    depth: usize,
    params: &AccessParams,
) -> Option<TerminalType> {
    if depth >= segments.len() {
        return None;
    }
    let name = segments[depth].name()?;
    let class = layout.class_layout(class_name).ok()?;
    let (_, field_type) = find_object_field(layout, class, name, params)?;
    resolve_value_type(layout, field_type, segments, depth, params)
}

fn resolve_in_struct(
    layout: &TypeLayout,
    struct_name: &str,
    segments: &[VarSegment],
    depth: usize,
    params: &AccessParams,
) -> Option<TerminalType> {
    if depth >= segments.len() {
        return None;
    }
    let name = segments[depth].name()?;
    let strukt = layout.struct_layout(struct_name).ok()?;
    let (_, field_type) = strukt.find_field(name)?;
    resolve_value_type(layout, field_type, segments, depth, params)
}

fn resolve_value_type(
    layout: &TypeLayout,
    data_type: &VarTypeRef,
    segments: &[VarSegment],
    depth: usize,
    params: &AccessParams,
) -> Option<TerminalType> {
    let last = depth + 1 == segments.len();
    match &segments[depth] {
        VarSegment::Plain { .. } => {
            if last {
                return Some(TerminalType {
                    container: ContainerKind::None,
                    data_type: data_type.clone(),
                });
            }
            match data_type.as_ref() {
                VarType::Struct(struct_name) => {
                    resolve_in_struct(layout, struct_name, segments, depth + 1, params)
                }
                VarType::Object(class_name) => {
                    resolve_in_class(layout, class_name, segments, depth + 1, params)
                }
                _ => None,
            }
        }
        VarSegment::Index { .. } => match data_type.as_ref() {
            VarType::Array(element_type) => {
                if last {
                    return Some(TerminalType {
                        container: ContainerKind::Array,
                        data_type: element_type.clone(),
                    });
                }
                match element_type.as_ref() {
                    VarType::Struct(struct_name) => {
                        resolve_in_struct(layout, struct_name, segments, depth + 1, params)
                    }
                    VarType::Object(class_name) => {
                        resolve_in_class(layout, class_name, segments, depth + 1, params)
                    }
                    _ => None,
                }
            }
            VarType::Map { value, .. } => {
                if last {
                    return Some(TerminalType {
                        container: ContainerKind::Map,
                        data_type: value.clone(),
                    });
                }
                match value.as_ref() {
                    VarType::Struct(struct_name) => {
                        resolve_in_struct(layout, struct_name, segments, depth + 1, params)
                    }
                    VarType::Object(class_name) => {
                        resolve_in_class(layout, class_name, segments, depth + 1, params)
                    }
                    _ => None,
                }
            }
            _ => None,
        },
        VarSegment::Key { .. } => match data_type.as_ref() {
            VarType::Map { value, .. } => {
                if last {
                    return Some(TerminalType {
                        container: ContainerKind::Map,
                        data_type: value.clone(),
                    });
                }
                match value.as_ref() {
                    VarType::Struct(struct_name) => {
                        resolve_in_struct(layout, struct_name, segments, depth + 1, params)
                    }
                    VarType::Object(class_name) => {
                        resolve_in_class(layout, class_name, segments, depth + 1, params)
                    }
                    _ => None,
                }
            }
            _ => None,
        },
        VarSegment::Invalid => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use varpath_layout::{ClassLayout, StructLayout};

    use crate::VarPath;

    use super::*;

    fn fixture() -> TypeLayout {
        let mut layout = TypeLayout::new();
        layout.add_struct(
            StructLayout::new("Item")
                .with_field("Name", Arc::new(VarType::String))
                .with_field("Count", Arc::new(VarType::Int)),
        );
        layout.add_class(
            ClassLayout::new("Target")
                .with_field("Hp", Arc::new(VarType::Int))
                .with_field(
                    "Inventory",
                    Arc::new(VarType::Array(Arc::new(VarType::Struct("Item".into())))),
                )
                .with_field(
                    "Scores",
                    Arc::new(VarType::Map {
                        key: Arc::new(VarType::Name),
                        value: Arc::new(VarType::Int),
                    }),
                ),
        );
        layout
    }

    fn resolve(layout: &TypeLayout, path: &str) -> Option<TerminalType> {
        let parsed = VarPath::parse(path).unwrap();
        resolve_terminal_type(layout, "Target", &parsed.segments, &AccessParams::default())
    }

    #[test]
    fn plain_terminal() {
        let layout = fixture();
        let terminal = resolve(&layout, "Hp").unwrap();
        assert_eq!(terminal.container, ContainerKind::None);
        assert_eq!(*terminal.data_type, VarType::Int);

        // A plain access to a container field reports the field type itself.
        let terminal = resolve(&layout, "Inventory").unwrap();
        assert_eq!(terminal.container, ContainerKind::None);
        assert!(terminal.data_type.is_array());
    }

    #[test]
    fn container_terminals() {
        let layout = fixture();
        let terminal = resolve(&layout, "Inventory[0]").unwrap();
        assert_eq!(terminal.container, ContainerKind::Array);
        assert_eq!(*terminal.data_type, VarType::Struct("Item".into()));

        let terminal = resolve(&layout, "Scores[\"ai\"]").unwrap();
        assert_eq!(terminal.container, ContainerKind::Map);
        assert_eq!(*terminal.data_type, VarType::Int);
    }

    #[test]
    fn nested_terminal() {
        let layout = fixture();
        let terminal = resolve(&layout, "Inventory[3].Count").unwrap();
        assert_eq!(terminal.container, ContainerKind::None);
        assert_eq!(*terminal.data_type, VarType::Int);
    }

    #[test]
    fn unresolvable_paths() {
        let layout = fixture();
        assert!(resolve(&layout, "Missing").is_none());
        assert!(resolve(&layout, "Hp.Count").is_none());
        assert!(resolve(&layout, "Hp[0]").is_none());
        assert!(resolve(&layout, "Inventory[0].Missing").is_none());
        assert!(resolve(&layout, "4bad").is_none());
    }
}
