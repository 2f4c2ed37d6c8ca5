//! Splitting and analyzing variable path strings.

use std::mem;

use varpath_types::IntValue;

use crate::PathParseError;

/// The maximum number of segments in a variable path.
///
/// Paths deeper than this fail to parse, bounding the walker's recursion.
pub const MAX_VAR_DEPTH: usize = 64;

/// One analyzed hop of a variable path.
#[derive(Debug, Clone, PartialEq)]
pub enum VarSegment {
    /// A plain field access, e.g. `Foo`.
    Plain {
        /// The field name.
        name: String,
    },
    /// A field access followed by an integer container index, e.g. `Foo[3]`.
    Index {
        /// The field name.
        name: String,
        /// The element index or integer map key.
        index: IntValue,
    },
    /// A field access followed by a quoted string key, e.g. `Foo["Key"]`.
    Key {
        /// The field name.
        name: String,
        /// The map key.
        key: String,
    },
    /// A token that matched none of the recognized grammars.
    ///
    /// The walk fails when it reaches the depth of an invalid segment.
    Invalid,
}

impl VarSegment {
    /// The field name of the segment, or None for an invalid segment.
    pub fn name(&self) -> Option<&str> {
        match self {
            VarSegment::Plain { name }
            | VarSegment::Index { name, .. }
            | VarSegment::Key { name, .. } => Some(name),
            VarSegment::Invalid => None,
        }
    }

    /// Return true if the segment parsed against a recognized grammar.
    pub fn is_valid(&self) -> bool {
        !matches!(self, VarSegment::Invalid)
    }
}

/// A parsed variable path.
#[derive(Debug, Clone, PartialEq)]
pub struct VarPath {
    /// The original source for the path.
    pub source: String,
    /// The analyzed segments, in order.
    pub segments: Vec<VarSegment>,
}

impl VarPath {
    /// Split and analyze a variable path string.
    ///
    /// Unrecognized tokens do not fail the parse; they become
    /// [VarSegment::Invalid] and fail the walk at their depth. The only
    /// parse error is a path deeper than [MAX_VAR_DEPTH].
    pub fn parse(source: &str) -> Result<Self, PathParseError> {
        let tokens = split_var_name(source);
        if tokens.len() > MAX_VAR_DEPTH {
            return Err(PathParseError::TooDeep {
                depth: tokens.len(),
                max: MAX_VAR_DEPTH,
            });
        }
        Ok(Self {
            source: source.to_string(),
            segments: analyze_var_names(&tokens),
        })
    }
}

/// Split a raw path on `.` separators that sit outside double quotes.
///
/// Empty components from leading, trailing, or doubled separators are
/// dropped.
pub fn split_var_name(source: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    for c in source.chars() {
        if c == '"' {
            in_string = !in_string;
        }
        if c == '.' && !in_string {
            tokens.push(mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    tokens.push(current);
    tokens.retain(|token| !token.is_empty());
    tokens
}

/// Analyze raw path tokens into segments.
///
/// Each token is tried against the string-key, integer-index, and plain
/// grammars in that fixed order; the first match wins. `Foo["3"]` is
/// therefore always a string key, never an integer index.
pub fn analyze_var_names(tokens: &[String]) -> Vec<VarSegment> {
    tokens.iter().map(|token| analyze_token(token)).collect()
}

fn analyze_token(token: &str) -> VarSegment {
    if let Some(segment) = match_string_key(token) {
        return segment;
    }
    if let Some(segment) = match_integer_index(token) {
        return segment;
    }
    if let Some(segment) = match_plain(token) {
        return segment;
    }
    VarSegment::Invalid
}

/// Split a token into its leading field name and the remainder.
///
/// A field name is a letter or underscore followed by letters, digits,
/// underscores, or spaces. Spaces tolerate engine-generated display names.
fn split_name(token: &str) -> Option<(&str, &str)> {
    let mut chars = token.char_indices();
    let (_, first) = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    let mut end = token.len();
    for (i, c) in chars {
        if !(c.is_ascii_alphanumeric() || c == '_' || c == ' ') {
            end = i;
            break;
        }
    }
    Some((&token[..end], &token[end..]))
}

fn match_string_key(token: &str) -> Option<VarSegment> {
    let (name, rest) = split_name(token)?;
    let key = rest.strip_prefix("[\"")?.strip_suffix("\"]")?;
    if key.is_empty() || key.chars().any(char::is_whitespace) {
        return None;
    }
    Some(VarSegment::Key {
        name: name.to_string(),
        key: key.to_string(),
    })
}

fn match_integer_index(token: &str) -> Option<VarSegment> {
    let (name, rest) = split_name(token)?;
    let digits = rest.strip_prefix('[')?.strip_suffix(']')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Digits that overflow IntValue leave the segment invalid rather than
    // wrapping.
    let index = match digits.parse::<IntValue>() {
        Ok(index) => index,
        Err(_) => return Some(VarSegment::Invalid),
    };
    Some(VarSegment::Index {
        name: name.to_string(),
        index,
    })
}

fn match_plain(token: &str) -> Option<VarSegment> {
    let (name, rest) = split_name(token)?;
    if !rest.is_empty() {
        return None;
    }
    Some(VarSegment::Plain {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(source: &str) -> Vec<String> {
        split_var_name(source)
    }

    #[test]
    fn split_plain_components() {
        assert_eq!(split("A.B.C"), ["A", "B", "C"]);
        assert_eq!(split("Inventory"), ["Inventory"]);
    }

    #[test]
    fn split_drops_empty_components() {
        assert_eq!(split(".A..B."), ["A", "B"]);
        assert_eq!(split(""), Vec::<String>::new());
        assert_eq!(split("..."), Vec::<String>::new());
    }

    #[test]
    fn split_keeps_dots_inside_quotes() {
        assert_eq!(
            split("A.B[2].C[\"k.k\"]"),
            ["A", "B[2]", "C[\"k.k\"]"]
        );
        assert_eq!(split("M[\"a.b.c\"]"), ["M[\"a.b.c\"]"]);
    }

    #[test]
    fn analyze_plain() {
        assert_eq!(
            analyze_token("Inventory"),
            VarSegment::Plain {
                name: "Inventory".to_string()
            }
        );
        // Embedded spaces are allowed for engine display names.
        assert_eq!(
            analyze_token("My Var"),
            VarSegment::Plain {
                name: "My Var".to_string()
            }
        );
        assert_eq!(
            analyze_token("_private2"),
            VarSegment::Plain {
                name: "_private2".to_string()
            }
        );
    }

    #[test]
    fn analyze_integer_index() {
        assert_eq!(
            analyze_token("Items[12]"),
            VarSegment::Index {
                name: "Items".to_string(),
                index: 12
            }
        );
        assert_eq!(
            analyze_token("Items[0]"),
            VarSegment::Index {
                name: "Items".to_string(),
                index: 0
            }
        );
    }

    #[test]
    fn analyze_string_key() {
        assert_eq!(
            analyze_token("Owners[\"alice\"]"),
            VarSegment::Key {
                name: "Owners".to_string(),
                key: "alice".to_string()
            }
        );
        // Keys can contain dots; split never sees them as separators.
        assert_eq!(
            analyze_token("M[\"a.b\"]"),
            VarSegment::Key {
                name: "M".to_string(),
                key: "a.b".to_string()
            }
        );
    }

    #[test]
    fn quoted_digits_are_a_string_key() {
        assert_eq!(
            analyze_token("Foo[\"3\"]"),
            VarSegment::Key {
                name: "Foo".to_string(),
                key: "3".to_string()
            }
        );
    }

    #[test]
    fn analyze_rejects_malformed_tokens() {
        assert_eq!(analyze_token("1Bad"), VarSegment::Invalid);
        assert_eq!(analyze_token("Items["), VarSegment::Invalid);
        assert_eq!(analyze_token("Items[-1]"), VarSegment::Invalid);
        assert_eq!(analyze_token("Items[1]x"), VarSegment::Invalid);
        assert_eq!(analyze_token("Items[\"\"]"), VarSegment::Invalid);
        assert_eq!(analyze_token("Items[\"a b\"]"), VarSegment::Invalid);
        assert_eq!(analyze_token("Items[1.5]"), VarSegment::Invalid);
    }

    #[test]
    fn index_overflow_is_invalid() {
        assert_eq!(
            analyze_token("Items[99999999999999999999]"),
            VarSegment::Invalid
        );
    }

    #[test]
    fn parse_enforces_depth_cap() {
        let deep = vec!["A"; MAX_VAR_DEPTH + 1].join(".");
        assert!(matches!(
            VarPath::parse(&deep),
            Err(PathParseError::TooDeep { .. })
        ));

        let ok = vec!["A"; MAX_VAR_DEPTH].join(".");
        assert_eq!(VarPath::parse(&ok).unwrap().segments.len(), MAX_VAR_DEPTH);
    }

    #[test]
    fn parse_keeps_invalid_segments_in_order() {
        let path = VarPath::parse("A.4x.B").unwrap();
        assert_eq!(path.segments.len(), 3);
        assert!(path.segments[0].is_valid());
        assert_eq!(path.segments[1], VarSegment::Invalid);
        assert!(path.segments[2].is_valid());
    }
}
