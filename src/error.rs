use thiserror::Error;

/// Errors raised while building a message, before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("An embed can hold at most {limit} fields (tried to add field #{attempted})")]
    TooManyFields { limit: usize, attempted: usize },

    #[error("{value:?} is not a base-10 integer")]
    NotAnInteger { value: String },

    #[error("{value} does not fit into a 64-bit signed integer")]
    IntegerOverflow { value: String },

    #[error("Floating point value {value} cannot be used as an integer")]
    FloatNotInteger { value: String },

    #[error("{value:?} is not a hex color of the form rrggbb")]
    InvalidHexColor { value: String },
}
