use std::collections::BTreeSet;

pub const CONSTRUCTOR_NAME: &str = "__init__";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    Internal,
    External,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Internal => "internal",
            Visibility::External => "external",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub param_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateVariable {
    pub name: String,
    pub var_type: String,
    pub visibility: Visibility,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub params: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: String,
    pub params: Vec<Parameter>,
    pub returns: Option<String>,
    pub visibility: Visibility,
    pub modifiers: Vec<String>,
    pub body: String,
    pub is_view: bool,
    pub is_pure: bool,
    pub is_payable: bool,
}

impl FunctionSpec {
    pub fn new(name: impl Into<String>) -> Self {
        FunctionSpec {
            name: name.into(),
            params: Vec::new(),
            returns: None,
            visibility: Visibility::Public,
            modifiers: Vec::new(),
            body: String::new(),
            is_view: false,
            is_pure: false,
            is_payable: false,
        }
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractModel {
    pub contract_name: String,
    pub imports: BTreeSet<String>,
    pub state_vars: Vec<StateVariable>,
    pub functions: Vec<FunctionSpec>,
    pub events: Vec<Event>,
}
