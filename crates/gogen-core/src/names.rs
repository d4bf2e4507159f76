use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derive a Go type name: `user-profile` → `UserProfile`.
pub fn type_name(value: &str) -> String {
    value.replace('-', "_").to_pascal_case()
}

/// Derive an exported Go field/variable name. Same transform as
/// [`type_name`], kept as a separate hook so callers name their intent.
pub fn variable_name(value: &str) -> String {
    type_name(value)
}

/// Derive an exported Go method name.
pub fn method_name(value: &str) -> String {
    type_name(value)
}

/// Derive an enum member name from a literal value.
///
/// Dashes become underscores, runs of whitespace collapse to single
/// separators, and characters that cannot appear in a Go identifier are
/// stripped before PascalCasing.
pub fn enum_member_name(value: &str) -> String {
    let mut cleaned = String::with_capacity(value.len());
    let mut prev_space = false;
    for ch in value.chars() {
        if ch == '-' || ch == '_' {
            cleaned.push('_');
            prev_space = false;
        } else if ch.is_ascii_alphanumeric() {
            cleaned.push(ch);
            prev_space = false;
        } else if ch.is_whitespace() {
            if !prev_space {
                cleaned.push('_');
            }
            prev_space = true;
        }
        // Anything else is dropped
    }
    cleaned.to_pascal_case()
}

/// Human-readable label: `UserProfile` → `user profile`.
pub fn display_name(value: &str) -> String {
    value.to_snake_case().replace('_', " ")
}

/// Snake-cased entity table name: `PluginConfig` → `plugin_config`.
pub fn underscore(value: &str) -> String {
    value.to_snake_case()
}

/// Lower-camel singular variable form: `Principals` → `principal`.
pub fn singular_variable(value: &str) -> String {
    singularize(&value.to_lower_camel_case())
}

/// Lower-camel plural variable form: `Principal` → `principals`.
pub fn plural_variable(value: &str) -> String {
    pluralize(&value.to_lower_camel_case())
}

/// Naive singularization: strips trailing 's' if present.
pub fn singularize(word: &str) -> String {
    if word.ends_with("ies") && word.len() > 3 {
        format!("{}y", &word[..word.len() - 3])
    } else if word.ends_with("ses") || word.ends_with("xes") || word.ends_with("zes") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") && word.len() > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Naive pluralization, the inverse of `singularize`.
pub fn pluralize(word: &str) -> String {
    if word.ends_with('y') && word.len() > 1 {
        let before = word.as_bytes()[word.len() - 2] as char;
        if !matches!(before, 'a' | 'e' | 'i' | 'o' | 'u') {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }
    if word.ends_with('s') || word.ends_with('x') || word.ends_with('z') {
        return format!("{word}es");
    }
    format!("{word}s")
}

/// Extract a model name from a `$ref` path: `#/definitions/Widget` → `Widget`.
pub fn extract_model_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

/// Short package name from an import path:
/// `github.com/prizem-io/gateway/models` → `models`.
pub fn package_prefix(value: &str) -> &str {
    value.rsplit('/').next().unwrap_or(value)
}

/// Quote and escape a literal for embedding in Go source.
pub fn escape_go_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
