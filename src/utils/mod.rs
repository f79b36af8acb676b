pub mod expiry;
pub mod url_validator;

/// Symbols used for generated short codes: `[A-Za-z0-9]`
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Maximum length accepted for a custom alias
pub const MAX_ALIAS_LENGTH: usize = 64;

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Custom aliases are restricted to `[A-Za-z0-9_-]`, 1 to 64 characters.
pub fn is_valid_alias(alias: &str) -> bool {
    !alias.is_empty()
        && alias.len() <= MAX_ALIAS_LENGTH
        && alias
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Reserved route names are compared case-insensitively.
pub fn is_reserved_route(code: &str, reserved: &[String]) -> bool {
    reserved.iter().any(|r| r.eq_ignore_ascii_case(code))
}
