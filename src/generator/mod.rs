use std::fmt::Write;

use crate::error::TranspileError;
use crate::transpiler::ast::{ContractModel, FunctionSpec, Parameter};
use crate::transpiler::converter::{convert_value, default_return, is_reference_type};

pub const PRAGMA: &str = "pragma solidity ^0.8.20;";

const IMPORTS: &[&str] = &[
    "@openzeppelin/contracts/access/Ownable.sol",
    "@openzeppelin/contracts/utils/ReentrancyGuard.sol",
    "@openzeppelin/contracts/utils/Pausable.sol",
];

pub fn generate(contract: &ContractModel) -> Result<String, TranspileError> {
    let mut output = String::new();

    // Header and framework imports
    writeln!(output, "// SPDX-License-Identifier: MIT")?;
    writeln!(output, "{}", PRAGMA)?;
    writeln!(output)?;
    for import in IMPORTS {
        writeln!(output, "import \"{}\";", import)?;
    }
    writeln!(output)?;

    writeln!(output, "/**")?;
    writeln!(output, " * @title {}", contract.contract_name)?;
    writeln!(output, " * @dev Transpiled from Python using PyVax Advanced Transpiler")?;
    writeln!(output, " * @custom:security-contact security@pyvax.io")?;
    writeln!(output, " */")?;
    writeln!(
        output,
        "contract {} is Ownable, ReentrancyGuard, Pausable {{",
        contract.contract_name
    )?;
    writeln!(output)?;

    if !contract.state_vars.is_empty() {
        writeln!(output, "    // State Variables")?;
        for var in &contract.state_vars {
            let value = var
                .value
                .as_deref()
                .and_then(|v| convert_value(v, &var.var_type))
                .map(|v| format!(" = {}", v))
                .unwrap_or_default();
            writeln!(
                output,
                "    {} {} {}{};",
                var.var_type,
                var.visibility.as_str(),
                var.name,
                value
            )?;
        }
        writeln!(output)?;
    }

    if !contract.events.is_empty() {
        writeln!(output, "    // Events")?;
        for event in &contract.events {
            let params = event
                .params
                .iter()
                .map(|p| format!("{} {}", p.param_type, p.name))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(output, "    event {}({});", event.name, params)?;
        }
        writeln!(output)?;
    }

    writeln!(output, "    /**")?;
    writeln!(output, "     * @dev Contract constructor")?;
    writeln!(output, "     */")?;
    writeln!(output, "    constructor() Ownable(msg.sender) {{")?;
    writeln!(output, "        // Initialize contract")?;
    writeln!(output, "    }}")?;
    writeln!(output)?;

    if !contract.functions.is_empty() {
        writeln!(output, "    // Functions")?;
        for func in &contract.functions {
            generate_function(&mut output, func)?;
        }
    }

    writeln!(output, "    // Emergency Functions")?;
    writeln!(output, "    function pause() external onlyOwner {{")?;
    writeln!(output, "        _pause();")?;
    writeln!(output, "    }}")?;
    writeln!(output)?;
    writeln!(output, "    function unpause() external onlyOwner {{")?;
    writeln!(output, "        _unpause();")?;
    writeln!(output, "    }}")?;
    writeln!(output, "}}")?;

    Ok(output)
}

fn generate_function(output: &mut String, func: &FunctionSpec) -> Result<(), TranspileError> {
    writeln!(output, "    /**")?;
    writeln!(output, "     * @dev {}", func.name)?;
    for param in &func.params {
        writeln!(output, "     * @param {} {}", param.name, param.param_type)?;
    }
    if let Some(returns) = &func.returns {
        writeln!(output, "     * @return {}", returns)?;
    }
    writeln!(output, "     */")?;

    writeln!(output, "    {} {{", signature(func))?;

    if func.body.trim().is_empty() {
        writeln!(output, "        // Implement function logic")?;
        if let Some(returns) = &func.returns {
            writeln!(output, "        return {};", default_return(returns))?;
        }
    } else {
        for line in func.body.lines().filter(|l| !l.trim().is_empty()) {
            writeln!(output, "        {}", line)?;
        }
    }

    writeln!(output, "    }}")?;
    writeln!(output)?;
    Ok(())
}

fn signature(func: &FunctionSpec) -> String {
    let params = func
        .params
        .iter()
        .map(parameter_declaration)
        .collect::<Vec<_>>()
        .join(", ");

    let mut signature = format!("function {}({}) {}", func.name, params, func.visibility.as_str());
    if func.is_view {
        signature.push_str(" view");
    }
    if func.is_pure {
        signature.push_str(" pure");
    }
    if func.is_payable {
        signature.push_str(" payable");
    }
    for modifier in &func.modifiers {
        signature.push(' ');
        signature.push_str(modifier);
    }
    if let Some(returns) = &func.returns {
        signature.push_str(&format!(" returns ({})", with_location(returns)));
    }
    signature
}

fn parameter_declaration(param: &Parameter) -> String {
    format!("{} {}", with_location(&param.param_type), param.name)
}

fn with_location(solidity_type: &str) -> String {
    if is_reference_type(solidity_type) {
        format!("{} memory", solidity_type)
    } else {
        solidity_type.to_string()
    }
}
