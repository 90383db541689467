pub mod ast;
pub mod body;
pub mod builder;
pub mod converter;
pub mod validator;

pub use builder::ContractBuilder;
pub use validator::validate;
