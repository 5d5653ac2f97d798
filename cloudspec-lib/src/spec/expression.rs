//! Filter and assert expressions binding an attribute name to an evaluator

use crate::expr::{Evaluator, EvaluatorOp};
use crate::model::AttributeValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use toml::value::Datetime;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ExpressionData {
    attribute: String,
    op: EvaluatorOp,
    value: toml::Value,
    #[serde(default)]
    negate: bool,
}

/// Convert a decoded operand, turning native TOML datetimes into dates.
fn operand(value: toml::Value) -> Result<AttributeValue, String> {
    Ok(match value {
        toml::Value::String(s) => AttributeValue::String(s.into()),
        toml::Value::Integer(i) => AttributeValue::Integer(i),
        toml::Value::Float(x) => AttributeValue::Float(x),
        toml::Value::Boolean(b) => AttributeValue::Boolean(b),
        toml::Value::Datetime(dt) => AttributeValue::Date(to_utc(&dt)?),
        toml::Value::Array(items) => AttributeValue::List(items.into_iter().map(operand).collect::<Result<_, _>>()?),
        toml::Value::Table(fields) => AttributeValue::Object(
            fields
                .into_iter()
                .map(|(key, value)| operand(value).map(|value| (key, value)))
                .collect::<Result<_, _>>()?,
        ),
    })
}

/// Datetimes without an offset are taken as UTC; a bare date is midnight UTC.
fn to_utc(dt: &Datetime) -> Result<DateTime<Utc>, String> {
    let text = dt.to_string();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&text) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(local) = NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(local.and_utc());
    }

    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| format!("'{text}' is not a date"))
}

fn serialize_parts<S>(name: &'static str, attribute: &str, evaluator: &Evaluator, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::SerializeStruct;

    let (op, value) = match evaluator {
        Evaluator::Equal { value, negate } => (
            if *negate { EvaluatorOp::NotEqual } else { EvaluatorOp::Equal },
            value.clone(),
        ),
        Evaluator::In { values, negate } => (
            if *negate { EvaluatorOp::NotIn } else { EvaluatorOp::In },
            AttributeValue::List(values.clone()),
        ),
    };

    let mut state = serializer.serialize_struct(name, 3)?;
    state.serialize_field("attribute", attribute)?;
    state.serialize_field("op", &op)?;
    state.serialize_field("value", &value)?;
    state.end()
}

fn deserialize_parts<'de, D>(deserializer: D) -> Result<(String, Evaluator), D::Error>
where
    D: Deserializer<'de>,
{
    let data = ExpressionData::deserialize(deserializer)?;
    let value = operand(data.value).map_err(|e| D::Error::custom(format!("invalid operand on attribute '{}': {e}", data.attribute)))?;
    let evaluator = Evaluator::from_op(data.op, value, data.negate)
        .map_err(|e| D::Error::custom(format!("invalid expression on attribute '{}': {e}", data.attribute)))?;
    Ok((data.attribute, evaluator))
}

macro_rules! attribute_expression {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            attribute: String,
            evaluator: Evaluator,
        }

        impl $name {
            #[must_use]
            pub fn new(attribute: impl Into<String>, evaluator: Evaluator) -> Self {
                Self {
                    attribute: attribute.into(),
                    evaluator,
                }
            }

            #[must_use]
            pub fn attribute(&self) -> &str {
                &self.attribute
            }

            #[must_use]
            pub const fn evaluator(&self) -> &Evaluator {
                &self.evaluator
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{} {}", self.attribute, self.evaluator)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serialize_parts(stringify!($name), &self.attribute, &self.evaluator, serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let (attribute, evaluator) = deserialize_parts(deserializer)?;
                Ok(Self { attribute, evaluator })
            }
        }
    };
}

attribute_expression!(
    /// Narrows the resources a rule's assertions apply to
    FilterExpr
);

attribute_expression!(
    /// A condition every selected resource must satisfy
    AssertExpr
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::EvaluatorKind;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_equal() {
        let expr: AssertExpr = serde_json::from_str(r#"{"attribute": "instance_type", "op": "equal", "value": "t2.micro"}"#).unwrap();
        assert_eq!(expr.attribute(), "instance_type");
        assert_eq!(expr.evaluator(), &Evaluator::equal("t2.micro"));
    }

    #[test]
    fn test_deserialize_not_in() {
        let expr: FilterExpr = serde_json::from_str(r#"{"attribute": "region", "op": "not_in", "value": ["us-east-1"]}"#).unwrap();
        assert_eq!(expr.evaluator().kind(), EvaluatorKind::In);
        assert!(expr.evaluator().is_negated());
    }

    #[test]
    fn test_deserialize_explicit_negate() {
        let expr: AssertExpr = serde_json::from_str(r#"{"attribute": "encrypted", "op": "equal", "value": false, "negate": true}"#).unwrap();
        assert_eq!(expr.evaluator(), &Evaluator::not_equal(false));
    }

    #[test]
    fn test_deserialize_in_requires_array() {
        let result: Result<FilterExpr, _> = serde_json::from_str(r#"{"attribute": "region", "op": "in", "value": "eu-west-1"}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("requires an array operand"));
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result: Result<AssertExpr, _> = serde_json::from_str(r#"{"attribute": "a", "op": "equal", "value": 1, "negated": true}"#);
        assert!(result.is_err(), "misspelled field should be rejected");
    }

    #[test]
    fn test_deserialize_rejects_unknown_operator() {
        let result: Result<AssertExpr, _> = serde_json::from_str(r#"{"attribute": "a", "op": "greater", "value": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_uses_operator_spelling() {
        let expr = AssertExpr::new("region", Evaluator::not_in(["us-east-1"]));
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json["attribute"], "region");
        assert_eq!(json["op"], "not_in");
        assert_eq!(json["value"][0], "us-east-1");
    }

    #[test]
    fn test_toml_datetime_operand_is_a_date() {
        let expr: AssertExpr = toml::from_str(r#"
attribute = "launched"
op = "equal"
value = 2024-01-15T10:30:00Z
"#)
        .unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(expr.evaluator(), &Evaluator::equal(AttributeValue::Date(expected)));
    }

    #[test]
    fn test_toml_local_dates_are_utc() {
        let expr: FilterExpr = toml::from_str(r#"
attribute = "launched"
op = "in"
value = [2024-01-15, 2024-01-15T08:00:00, 2024-01-15T10:30:00+02:00]
"#)
        .unwrap();

        let expected = [
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap(),
        ];
        assert_eq!(expr.evaluator(), &Evaluator::is_in(expected.map(AttributeValue::Date)));
    }

    #[test]
    fn test_toml_time_only_operand_is_rejected() {
        let result: Result<AssertExpr, _> = toml::from_str(r#"
attribute = "launched"
op = "equal"
value = 10:30:00
"#);
        assert!(result.unwrap_err().to_string().contains("is not a date"));
    }

    #[test]
    fn test_display() {
        let expr = FilterExpr::new("region", Evaluator::equal("eu-west-1"));
        assert_eq!(expr.to_string(), "region == \"eu-west-1\"");
    }
}
