//! Normalization of generated field names.

const GUID_LEN: usize = 32;

/// Return the user-facing name for an internal field name.
///
/// Generated classes and structs store each field as
/// `<name>_<index>_<32 hex digit guid>`. Lookup by user-entered name has to
/// strip that decoration. Names without the decoration are returned
/// unchanged.
pub fn authored_name(internal: &str) -> &str {
    strip_generation_suffix(internal).unwrap_or(internal)
}

fn strip_generation_suffix(internal: &str) -> Option<&str> {
    let guid_start = internal.len().checked_sub(GUID_LEN)?;
    let guid = internal.get(guid_start..)?;
    if !guid.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let rest = internal[..guid_start].strip_suffix('_')?;
    let digits = rest.bytes().rev().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let name = rest[..rest.len() - digits].strip_suffix('_')?;
    if name.is_empty() {
        return None;
    }
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decorated_names_are_stripped() {
        assert_eq!(
            authored_name("Hp_2_89343B9D44A0ED2E67AE07B38205F067"),
            "Hp"
        );
        assert_eq!(
            authored_name("My Var_13_00112233445566778899aabbccddeeff"),
            "My Var"
        );
    }

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(authored_name("Hp"), "Hp");
        assert_eq!(authored_name("Inventory"), "Inventory");
        // Too short to carry a guid.
        assert_eq!(authored_name("A_1_ff"), "A_1_ff");
        // Guid-sized tail that is not hex.
        assert_eq!(
            authored_name("Hp_2_89343B9D44A0ED2E67AE07B38205F0GG"),
            "Hp_2_89343B9D44A0ED2E67AE07B38205F0GG"
        );
        // Missing the index digits.
        assert_eq!(
            authored_name("Hp__89343B9D44A0ED2E67AE07B38205F067"),
            "Hp__89343B9D44A0ED2E67AE07B38205F067"
        );
    }
}
