use heck::{ToLowerCamelCase, ToPascalCase};

/// Derive a PascalCase type name from an arbitrary schema key.
pub fn type_name(name: &str) -> String {
    guard_leading_digit(sanitize_identifier(name).to_pascal_case())
}

/// Derive a camelCase field name from an arbitrary property key.
pub fn field_name(name: &str) -> String {
    guard_leading_digit(sanitize_identifier(name).to_lower_camel_case())
}

fn guard_leading_digit(name: String) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Sanitize a string to be a valid identifier.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}
