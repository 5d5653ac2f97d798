use thiserror::Error;

/// A fault raised while evaluating a predicate against an attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("cannot compare a {actual} value against a {expected} operand")]
    TypeMismatch { expected: &'static str, actual: &'static str },
}
