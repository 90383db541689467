use std::collections::BTreeMap;

use super::ast::ContractModel;

pub const REENTRANCY_GUARD: &str = "nonReentrant";

type Rule = fn(&ContractModel, &mut Vec<String>);

const RULES: &[Rule] = &[
    check_has_functions,
    check_payable_guard,
    check_mutability_conflicts,
    check_duplicate_functions,
];

pub fn validate(model: &ContractModel) -> Vec<String> {
    let mut warnings = Vec::new();
    for rule in RULES {
        rule(model, &mut warnings);
    }
    warnings
}

fn check_has_functions(model: &ContractModel, warnings: &mut Vec<String>) {
    if model.functions.is_empty() {
        warnings.push("No functions defined in contract".to_string());
    }
}

fn check_payable_guard(model: &ContractModel, warnings: &mut Vec<String>) {
    for func in &model.functions {
        if func.is_payable && !func.modifiers.iter().any(|m| m == REENTRANCY_GUARD) {
            warnings.push(format!(
                "Function {} is payable but doesn't have reentrancy protection",
                func.name
            ));
        }
    }
}

fn check_mutability_conflicts(model: &ContractModel, warnings: &mut Vec<String>) {
    for func in &model.functions {
        if func.is_view && func.is_pure {
            warnings.push(format!("Function {} is marked both view and pure", func.name));
        }
        if func.is_payable && (func.is_view || func.is_pure) {
            warnings.push(format!(
                "Function {} cannot be payable and view/pure at the same time",
                func.name
            ));
        }
    }
}

fn check_duplicate_functions(model: &ContractModel, warnings: &mut Vec<String>) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for func in &model.functions {
        *counts.entry(func.name.as_str()).or_default() += 1;
    }
    // Report in declaration order.
    for func in &model.functions {
        if counts.remove(func.name.as_str()).map_or(false, |n| n > 1) {
            warnings.push(format!(
                "Function {} is defined more than once; identical signatures will be rejected by the compiler",
                func.name
            ));
        }
    }
}
