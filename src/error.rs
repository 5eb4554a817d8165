use serde::Serialize;

/// Everything that can go wrong while encoding one source line.
///
/// All variants are line-local: the session records them and moves on to the
/// next line (unless the driver's early-exit policy stops it).
#[derive(thiserror::Error, Debug, Serialize)]
pub enum AssembleError {
    #[error("operation '{0}' not found")]
    UnknownOperation(String),
    #[error("operation '{0}' takes arguments, found none")]
    MissingOperands(String),
    #[error("got {got} arguments, expected {expected}")]
    ArityMismatch { expected: usize, got: usize },
    #[error("incorrect register declaration '{0}'")]
    MalformedOperand(String),
    #[error("undefined register {0}")]
    RegisterOutOfRange(u8),
    #[error("invalid constant '{0}'")]
    MalformedLiteral(String),
    #[error("oversized constant '{0}'")]
    ConstantOutOfRange(String),
    #[error("invalid memory address '{0}', must be of the form N6(Rn)")]
    MalformedMemoryAddress(String),
}
