use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::ast::*;
use crate::error::TranspileError;

const IGNORED_PARENTS: &[&str] = &["object", "PySmartContract"];

#[derive(Debug, Default)]
pub struct ContractBuilder {
    contract_name: Option<String>,
    imports: BTreeSet<String>,
    state_vars: Vec<StateVariable>,
    functions: Vec<FunctionSpec>,
    events: Vec<Event>,
}

impl ContractBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_contract(&mut self, name: &str, parents: &[&str]) {
        if let Some(previous) = &self.contract_name {
            warn!("Found second contract class {}, replacing {}", name, previous);
        }
        debug!("Found contract {}", name);
        self.contract_name = Some(name.to_string());
        for parent in parents {
            if !parent.is_empty() && !IGNORED_PARENTS.contains(parent) {
                self.imports.insert(parent.to_string());
            }
        }
    }

    pub fn record_import(&mut self, statement: &str) {
        self.imports.insert(statement.to_string());
    }

    /// Insert a state variable. Redeclaring a name keeps its original position
    /// and takes the newest type and value.
    pub fn add_state_variable(&mut self, var: StateVariable) {
        debug!("Found state variable {}: {}", var.name, var.var_type);
        match self.state_vars.iter_mut().find(|v| v.name == var.name) {
            Some(existing) => *existing = var,
            None => self.state_vars.push(var),
        }
    }

    pub fn add_event(&mut self, event: Event) {
        debug!("Found event {}", event.name);
        self.events.push(event);
    }

    pub fn add_function(&mut self, function: FunctionSpec) {
        debug!("Found function {}", function.name);
        self.functions.push(function);
    }

    /// Finish the model. The constructor is dropped here; its effects already
    /// live on as state variables.
    pub fn finish(self) -> Result<ContractModel, TranspileError> {
        let contract_name = self.contract_name.ok_or(TranspileError::MissingContract)?;
        let functions = self
            .functions
            .into_iter()
            .filter(|f| !f.is_constructor())
            .collect();

        Ok(ContractModel {
            contract_name,
            imports: self.imports,
            state_vars: self.state_vars,
            functions,
            events: self.events,
        })
    }
}
