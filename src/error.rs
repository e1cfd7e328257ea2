use std::io;
use std::num::ParseIntError;

use thiserror::Error;

/// Fatal conditions that end a run. Stack underflow is not one of them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("rotation of {0} degrees is not a multiple of 90")]
    InvalidRotation(i32),

    #[error("cell ({x}, {y}) is out of range")]
    OutOfRange { x: i64, y: i64 },

    #[error("invalid integer input {input:?}")]
    InvalidInteger {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("unexpected end of input")]
    EndOfInput,

    #[error("division by zero")]
    DivisionByZero,

    #[error("{0} is not a valid character")]
    InvalidChar(i64),

    #[error("unknown: {0}")]
    UnknownInstruction(char),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
