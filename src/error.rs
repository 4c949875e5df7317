use thiserror::Error;

pub type Result<T> = std::result::Result<T, CalcError>;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("no variable to solve for")]
    NoVariable,
    #[error("unsupported degree: {0}")]
    UnsupportedDegree(String),
    #[error("cannot bind non-constant expression to `{0}`")]
    NonConstantAssignment(String),
}
