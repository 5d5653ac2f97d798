//! Predicates evaluated against resource attribute values
//!
//! Filter and assert expressions in a specification are parameterized by an
//! [`Evaluator`]: a closed set of operators, each computing `negate XOR matched`
//! over a single [`AttributeValue`](crate::model::AttributeValue).
//!
//! # Implementation Model
//!
//! Evaluation is a pure function of the operand and the actual value. Values of
//! incompatible types are never silently unequal; they produce an
//! [`EvalError::TypeMismatch`], which the validation engine turns into an errored
//! rule. Integers and floats compare numerically, and a date compared against a
//! string parses the string as RFC 3339.

mod eval_error;
mod evaluator;

pub use eval_error::EvalError;
pub use evaluator::{Evaluator, EvaluatorKind, EvaluatorOp, OperandError};
