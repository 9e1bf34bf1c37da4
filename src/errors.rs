use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// The builder discovered more states than its configured limit allows.
    #[error("dfa contains more than {limit} states")]
    TooManyStates { limit: usize },

    /// A program listing could not be read.
    #[error("syntax error: {0}")]
    Syntax(String),
}
