pub const DEFAULT_TYPE: &str = "uint256";

pub fn map_type(token: &str) -> String {
    let token = token.trim();

    if let Some(inner) = strip_parametric(token, &["mapping", "dict", "Dict"]) {
        let parts = split_top_level(inner);
        if let [key, value] = parts.as_slice() {
            return format!("mapping({} => {})", map_type(key), map_type(value));
        }
        return DEFAULT_TYPE.to_string();
    }

    if let Some(inner) = strip_parametric(token, &["list", "List"]) {
        return format!("{}[]", map_type(inner));
    }

    match token {
        "int" | "uint" | "uint256" => "uint256".to_string(),
        "str" | "string" => "string".to_string(),
        "bool" => "bool".to_string(),
        "address" => "address".to_string(),
        "bytes" => "bytes".to_string(),
        _ if is_sized_integer(token) || is_fixed_bytes(token) => token.to_string(),
        _ => DEFAULT_TYPE.to_string(),
    }
}

pub fn infer_type(literal: &str) -> String {
    let value = literal.trim();
    let inferred = match value {
        "True" | "False" => "bool",
        "{}" => "mapping(address => uint256)",
        "[]" => "uint256[]",
        "msg.sender" | "tx.origin" => "address",
        _ if value.starts_with('"') || value.starts_with('\'') => "string",
        _ if value.starts_with("0x") => "address",
        _ if is_numeric_literal(value) => "uint256",
        _ => DEFAULT_TYPE,
    };
    inferred.to_string()
}

/// Convert a dialect initializer to a Solidity one. `None` means the
/// variable is left to its default value.
pub fn convert_value(value: &str, var_type: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if var_type == "bool" {
        let converted = if value == "True" || value == "true" {
            "true"
        } else {
            "false"
        };
        return Some(converted.to_string());
    }
    if var_type == "string" {
        return Some(value.to_string());
    }
    match value {
        "{}" | "[]" => None,
        _ => Some(value.to_string()),
    }
}

pub fn default_return(return_type: &str) -> String {
    match return_type {
        "bool" => "false".to_string(),
        "string" | "bytes" => "\"\"".to_string(),
        "address" => "address(0)".to_string(),
        t if t.ends_with("[]") => format!("new {}(0)", t),
        t if is_fixed_bytes(t) => format!("{}(0)", t),
        _ => "0".to_string(),
    }
}

pub fn is_reference_type(solidity_type: &str) -> bool {
    solidity_type == "string" || solidity_type == "bytes" || solidity_type.ends_with("[]")
}

pub(crate) fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

fn strip_parametric<'a>(token: &'a str, heads: &[&str]) -> Option<&'a str> {
    heads.iter().find_map(|head| {
        let rest = token.strip_prefix(head)?;
        rest.strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
            .or_else(|| rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')))
    })
}

fn is_sized_integer(token: &str) -> bool {
    let bits = token
        .strip_prefix("uint")
        .or_else(|| token.strip_prefix("int"));
    match bits.and_then(|b| b.parse::<u32>().ok()) {
        Some(n) => n % 8 == 0 && (8..=256).contains(&n),
        None => false,
    }
}

fn is_fixed_bytes(token: &str) -> bool {
    match token.strip_prefix("bytes").and_then(|b| b.parse::<u32>().ok()) {
        Some(n) => (1..=32).contains(&n),
        None => false,
    }
}

fn is_numeric_literal(value: &str) -> bool {
    let digits: String = value.chars().filter(|c| *c != '_').collect();
    !digits.is_empty() && digits.parse::<f64>().is_ok()
}
