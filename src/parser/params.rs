use crate::transpiler::ast::Parameter;
use crate::transpiler::converter::{map_type, split_top_level, DEFAULT_TYPE};

const RECEIVERS: &[&str] = &["self", "cls"];

pub fn parse_parameters(text: &str) -> Vec<Parameter> {
    split_top_level(text)
        .into_iter()
        .enumerate()
        .filter(|(i, token)| !(*i == 0 && RECEIVERS.contains(&receiver_name(token))))
        .map(|(_, token)| parse_parameter(token))
        .collect()
}

fn parse_parameter(token: &str) -> Parameter {
    let declaration = token.split_once('=').map_or(token, |(decl, _)| decl.trim());

    match declaration.split_once(':') {
        Some((name, annotation)) if is_name(name.trim()) && !annotation.trim().is_empty() => {
            Parameter {
                name: name.trim().to_string(),
                param_type: map_type(annotation),
            }
        }
        None if is_name(declaration) => Parameter {
            name: declaration.to_string(),
            param_type: DEFAULT_TYPE.to_string(),
        },
        _ => Parameter {
            name: token.to_string(),
            param_type: DEFAULT_TYPE.to_string(),
        },
    }
}

fn receiver_name(token: &str) -> &str {
    token.split(':').next().unwrap_or(token).trim()
}

pub(crate) fn is_name(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}
