use tracing::debug;

use super::params::is_name;
use crate::transpiler::ast::{FunctionSpec, Visibility};

const BASE_MODIFIERS: &[&str] = &["nonReentrant", "onlyOwner", "whenNotPaused", "whenPaused"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoratorKind {
    Contract,
    Public,
    Private,
    Internal,
    External,
    View,
    Pure,
    Payable,
    Event,
    CustomModifier(String),
    Unrecognized(String),
}

impl DecoratorKind {
    pub fn from_parts(name: &str, args: Option<&str>) -> Self {
        let name = name.rsplit('.').next().unwrap_or(name);
        match name {
            "contract" => DecoratorKind::Contract,
            "public" | "public_function" => DecoratorKind::Public,
            "private" | "private_function" => DecoratorKind::Private,
            "internal" => DecoratorKind::Internal,
            "external" => DecoratorKind::External,
            "view" | "view_function" => DecoratorKind::View,
            "pure" => DecoratorKind::Pure,
            "payable" => DecoratorKind::Payable,
            "event" => DecoratorKind::Event,
            "modifier" => match args.map(unquote).filter(|a| is_name(a)) {
                Some(modifier) => DecoratorKind::CustomModifier(modifier.to_string()),
                None => DecoratorKind::Unrecognized(name.to_string()),
            },
            _ if BASE_MODIFIERS.contains(&name) => DecoratorKind::CustomModifier(name.to_string()),
            _ => DecoratorKind::Unrecognized(name.to_string()),
        }
    }

    pub fn apply(&self, function: &mut FunctionSpec) {
        match self {
            DecoratorKind::Public => function.visibility = Visibility::Public,
            DecoratorKind::Private => function.visibility = Visibility::Private,
            DecoratorKind::Internal => function.visibility = Visibility::Internal,
            DecoratorKind::External => function.visibility = Visibility::External,
            DecoratorKind::View => function.is_view = true,
            DecoratorKind::Pure => function.is_pure = true,
            DecoratorKind::Payable => function.is_payable = true,
            DecoratorKind::CustomModifier(modifier) => {
                if !function.modifiers.contains(modifier) {
                    function.modifiers.push(modifier.clone());
                }
            }
            DecoratorKind::Contract | DecoratorKind::Event => {}
            DecoratorKind::Unrecognized(name) => {
                debug!("Ignoring decorator @{} on {}", name, function.name);
            }
        }
    }
}

fn unquote(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')))
        .unwrap_or(text)
}
