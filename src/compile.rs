use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CompileError;
use crate::TranspileResult;

pub const SOURCE_NAME: &str = "Contract.sol";

const OUTPUT_SELECTION: &[&str] = &["abi", "evm.bytecode", "evm.deployedBytecode"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Optimizer {
    pub enabled: bool,
    pub runs: u32,
}

impl Default for Optimizer {
    fn default() -> Self {
        Optimizer {
            enabled: true,
            runs: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceUnit {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub optimizer: Optimizer,
    pub output_selection: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardJsonInput {
    pub language: String,
    pub sources: BTreeMap<String, SourceUnit>,
    pub settings: Settings,
}

impl StandardJsonInput {
    pub fn new(solidity: &str, optimizer: Optimizer) -> Self {
        let selection: Vec<String> = OUTPUT_SELECTION.iter().map(|s| s.to_string()).collect();
        let per_contract = BTreeMap::from([("*".to_string(), selection)]);

        StandardJsonInput {
            language: "Solidity".to_string(),
            sources: BTreeMap::from([(
                SOURCE_NAME.to_string(),
                SourceUnit {
                    content: solidity.to_string(),
                },
            )]),
            settings: Settings {
                optimizer,
                output_selection: BTreeMap::from([("*".to_string(), per_contract)]),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StandardJsonOutput {
    #[serde(default)]
    pub errors: Vec<Diagnostic>,
    #[serde(default)]
    pub contracts: BTreeMap<String, BTreeMap<String, ContractOutput>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub formatted_message: Option<String>,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == "error"
    }

    pub fn text(&self) -> &str {
        self.formatted_message.as_deref().unwrap_or(&self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContractOutput {
    #[serde(default)]
    pub abi: Vec<Value>,
    #[serde(default)]
    pub evm: Evm,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evm {
    #[serde(default)]
    pub bytecode: Bytecode,
    #[serde(default)]
    pub deployed_bytecode: Bytecode,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Bytecode {
    #[serde(default)]
    pub object: String,
}

pub trait SolidityCompiler {
    fn compile(&self, input: &StandardJsonInput) -> Result<StandardJsonOutput, CompileError>;
}

#[derive(Debug, Clone)]
pub struct Solc {
    binary: PathBuf,
}

impl Solc {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Solc {
            binary: binary.into(),
        }
    }
}

impl Default for Solc {
    fn default() -> Self {
        Solc::new("solc")
    }
}

impl SolidityCompiler for Solc {
    fn compile(&self, input: &StandardJsonInput) -> Result<StandardJsonOutput, CompileError> {
        debug!("Running {} --standard-json", self.binary.display());
        let mut child = Command::new(&self.binary)
            .arg("--standard-json")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&serde_json::to_vec(input)?)?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(CompileError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

/// Compiler errors turn the result into a failure that still carries the
/// Solidity. A compiler that cannot run at all only adds a warning.
pub fn compile_result(
    mut result: TranspileResult,
    compiler: &dyn SolidityCompiler,
    optimizer: Optimizer,
) -> TranspileResult {
    let (solidity, contract_name) = match (&result.solidity, &result.metadata) {
        (Some(solidity), Some(metadata)) if result.success => {
            (solidity.clone(), metadata.contract_name.clone())
        }
        _ => return result,
    };

    let input = StandardJsonInput::new(&solidity, optimizer);
    let output = match compiler.compile(&input) {
        Ok(output) => output,
        Err(err) => {
            warn!("Compilation skipped: {}", err);
            result.push_warning(format!("Compilation skipped: {}", err));
            return result;
        }
    };

    let errors: Vec<String> = output
        .errors
        .iter()
        .filter(|d| d.is_error())
        .map(|d| d.text().to_string())
        .collect();
    if !errors.is_empty() {
        result.success = false;
        result.errors = Some(errors);
        return result;
    }

    match output
        .contracts
        .get(SOURCE_NAME)
        .and_then(|contracts| contracts.get(&contract_name))
    {
        Some(contract) => {
            result.bytecode = Some(contract.evm.bytecode.object.clone());
            result.abi = Some(contract.abi.clone());
        }
        None => {
            let err = CompileError::MissingContract(contract_name);
            result.push_warning(format!("Compilation skipped: {}", err));
        }
    }
    result
}
