pub mod compile;
pub mod error;
pub mod generator;
pub mod parser;
pub mod transpiler;


use serde::Serialize;
use serde_json::Value;

pub use error::{CompileError, TranspileError};
use transpiler::ast::ContractModel;

pub const COMPILER_NAME: &str = "pyvax-transpiler";
pub const COMPILER_VERSION: &str = "2.0.0";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub contract_name: String,
    pub compiler: String,
    pub version: String,
    pub optimization: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranspileResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solidity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytecode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abi: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl TranspileResult {
    pub fn failure(errors: Vec<String>) -> Self {
        TranspileResult {
            success: false,
            solidity: None,
            bytecode: None,
            abi: None,
            errors: Some(errors),
            warnings: None,
            metadata: None,
        }
    }

    pub fn push_warning(&mut self, warning: String) {
        self.warnings.get_or_insert_with(Vec::new).push(warning);
    }
}

pub fn transpile(source: &str) -> TranspileResult {
    match run(source) {
        Ok((model, solidity, warnings)) => TranspileResult {
            success: true,
            solidity: Some(solidity),
            bytecode: None,
            abi: None,
            errors: None,
            warnings: if warnings.is_empty() {
                None
            } else {
                Some(warnings)
            },
            metadata: Some(Metadata {
                contract_name: model.contract_name,
                compiler: COMPILER_NAME.to_string(),
                version: COMPILER_VERSION.to_string(),
                optimization: true,
            }),
        },
        Err(err) => {
            tracing::debug!("Transpilation failed: {}", err);
            TranspileResult::failure(vec![err.to_string()])
        }
    }
}

fn run(source: &str) -> Result<(ContractModel, String, Vec<String>), TranspileError> {
    let model = parser::parse(source)?;
    let warnings = transpiler::validate(&model);
    let solidity = generator::generate(&model)?;
    Ok((model, solidity, warnings))
}
