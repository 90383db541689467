use std::fmt;
use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranspileError {
    #[error("No source code provided")]
    EmptySource,

    #[error("No contract class found in source")]
    MissingContract,

    #[error("Failed to render Solidity: {0}")]
    Emit(#[from] fmt::Error),
}

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("failed to run solc: {0}")]
    Spawn(#[from] io::Error),

    #[error("invalid compiler JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("solc exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("contract {0} not found in compiler output")]
    MissingContract(String),
}
