//! Equality and membership predicates over attribute values

use super::EvalError;
use crate::model::AttributeValue;
use chrono::{DateTime, Utc};
use core::fmt::{Display, Formatter, Result as FmtResult};
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumIter};
use thiserror::Error;

/// Discriminant of an [`Evaluator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum EvaluatorKind {
    Equal,
    In,
}

/// Operator spelling accepted by the specification front-end.
///
/// The `not_*` spellings produce negated evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorOp {
    Equal,
    NotEqual,
    In,
    NotIn,
}

/// An operand that cannot be used with the requested operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("operator '{op}' {reason}")]
pub struct OperandError {
    pub op: EvaluatorOp,
    pub reason: &'static str,
}

/// A predicate over a single attribute value.
///
/// Every variant computes `negate XOR matched`, so negation composes the same way for
/// all operators. New operators extend this enum and the match in [`Evaluator::eval`].
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluator {
    Equal { value: AttributeValue, negate: bool },
    In { values: Vec<AttributeValue>, negate: bool },
}

impl Evaluator {
    #[must_use]
    pub fn equal(value: impl Into<AttributeValue>) -> Self {
        Self::Equal {
            value: value.into(),
            negate: false,
        }
    }

    #[must_use]
    pub fn not_equal(value: impl Into<AttributeValue>) -> Self {
        Self::Equal {
            value: value.into(),
            negate: true,
        }
    }

    #[must_use]
    pub fn is_in<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        Self::In {
            values: values.into_iter().map(Into::into).collect(),
            negate: false,
        }
    }

    #[must_use]
    pub fn not_in<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        Self::In {
            values: values.into_iter().map(Into::into).collect(),
            negate: true,
        }
    }

    /// Build an evaluator from an operator spelling and operand.
    ///
    /// `negate` is combined with the operator's own negation by XOR, so `not_equal` with
    /// `negate = true` behaves like `equal`.
    pub fn from_op(op: EvaluatorOp, value: AttributeValue, negate: bool) -> Result<Self, OperandError> {
        match op {
            EvaluatorOp::Equal | EvaluatorOp::NotEqual => Ok(Self::Equal {
                value,
                negate: negate ^ (op == EvaluatorOp::NotEqual),
            }),
            EvaluatorOp::In | EvaluatorOp::NotIn => match value {
                AttributeValue::List(values) => Ok(Self::In {
                    values,
                    negate: negate ^ (op == EvaluatorOp::NotIn),
                }),
                _ => Err(OperandError {
                    op,
                    reason: "requires an array operand",
                }),
            },
        }
    }

    #[must_use]
    pub const fn kind(&self) -> EvaluatorKind {
        match self {
            Self::Equal { .. } => EvaluatorKind::Equal,
            Self::In { .. } => EvaluatorKind::In,
        }
    }

    #[must_use]
    pub const fn is_negated(&self) -> bool {
        match self {
            Self::Equal { negate, .. } | Self::In { negate, .. } => *negate,
        }
    }

    /// The same predicate with negation flipped
    #[must_use]
    pub fn negated(self) -> Self {
        match self {
            Self::Equal { value, negate } => Self::Equal { value, negate: !negate },
            Self::In { values, negate } => Self::In { values, negate: !negate },
        }
    }

    /// Evaluate against an actual attribute value.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::TypeMismatch`] when the actual value cannot be compared with the
    /// operand. For `In`, a mismatch is only reported when no member matched and no member
    /// was comparable.
    pub fn eval(&self, actual: &AttributeValue) -> Result<bool, EvalError> {
        let matched = match self {
            Self::Equal { value, .. } => values_equal(value, actual)?,
            Self::In { values, .. } => contains(values, actual)?,
        };

        Ok(matched ^ self.is_negated())
    }
}

impl Display for Evaluator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Equal { value, negate: false } => write!(f, "== {value}"),
            Self::Equal { value, negate: true } => write!(f, "!= {value}"),
            Self::In { values, negate } => {
                if *negate {
                    write!(f, "not ")?;
                }
                write!(f, "in {}", AttributeValue::List(values.clone()))
            }
        }
    }
}

fn contains(values: &[AttributeValue], actual: &AttributeValue) -> Result<bool, EvalError> {
    let mut first_mismatch = None;
    let mut comparable = false;

    for candidate in values {
        match values_equal(candidate, actual) {
            Ok(true) => return Ok(true),
            Ok(false) => comparable = true,
            Err(e) => {
                if first_mismatch.is_none() {
                    first_mismatch = Some(e);
                }
            }
        }
    }

    match first_mismatch {
        Some(e) if !comparable => Err(e),
        _ => Ok(false),
    }
}

#[expect(clippy::cast_precision_loss, reason = "mixed integer/float comparison is approximate by definition")]
fn values_equal(expected: &AttributeValue, actual: &AttributeValue) -> Result<bool, EvalError> {
    use AttributeValue as V;

    let equal = match (expected, actual) {
        (V::String(a), V::String(b)) => a == b,
        (V::Integer(a), V::Integer(b)) => a == b,
        (V::Float(a), V::Float(b)) => a == b,
        (V::Integer(a), V::Float(b)) | (V::Float(b), V::Integer(a)) => (*a as f64) == *b,
        (V::Boolean(a), V::Boolean(b)) => a == b,
        (V::Date(a), V::Date(b)) => a == b,
        (V::String(s), V::Date(d)) | (V::Date(d), V::String(s)) => parse_date(s).ok_or_else(|| mismatch(expected, actual))? == *d,
        (V::List(a), V::List(b)) => {
            if a.len() != b.len() {
                return Ok(false);
            }
            for (x, y) in a.iter().zip(b) {
                if !values_equal(x, y)? {
                    return Ok(false);
                }
            }
            true
        }
        (V::Object(a), V::Object(b)) => {
            if a.len() != b.len() || a.keys().ne(b.keys()) {
                return Ok(false);
            }
            for (x, y) in a.values().zip(b.values()) {
                if !values_equal(x, y)? {
                    return Ok(false);
                }
            }
            true
        }
        (V::Reference { target: ta, id: ia }, V::Reference { target: tb, id: ib }) => ta == tb && ia == ib,
        (V::Reference { id, .. }, V::String(s)) | (V::String(s), V::Reference { id, .. }) => id.as_ref() == s.as_str(),
        _ => return Err(mismatch(expected, actual)),
    };

    Ok(equal)
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.with_timezone(&Utc))
}

fn mismatch(expected: &AttributeValue, actual: &AttributeValue) -> EvalError {
    EvalError::TypeMismatch {
        expected: expected.type_name(),
        actual: actual.type_name(),
    }
}
