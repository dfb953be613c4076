use thiserror::Error;

pub type DateMathResult<T> = Result<T, DateMathError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateMathError {
    #[error("Unable to convert value to datetime: {0:?}")]
    InvalidDateFormat(String),

    #[error("Date value required, got {0}")]
    InvalidOperand(&'static str),
}
