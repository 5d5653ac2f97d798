//! TOML front-end for specifications

use super::Spec;
use thiserror::Error;

/// Specification source text that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error in specification: {message}")]
pub struct SyntaxError {
    pub message: String,
}

/// Compile specification source text into a [`Spec`].
///
/// No partial tree is produced: any decoding problem fails the whole call.
pub fn compile(source: &str) -> Result<Spec, SyntaxError> {
    toml::from_str(source).map_err(|e| SyntaxError { message: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Evaluator;

    const SAMPLE: &str = r#"
name = "S1"

[[groups]]
name = "G1"

[[groups.rules]]
title = "R1"
resource = "aws:ec2:instance"
filters = [{ attribute = "region", op = "equal", value = "eu-west-1" }]
asserts = [
    { attribute = "instance_type", op = "in", value = ["t2.micro", "t3.micro"] },
    { attribute = "encrypted", op = "equal", value = true },
]

[[groups.rules]]
title = "R2"
resource = "aws:s3:bucket"

[[groups]]
name = "G2"
"#;

    #[test]
    fn test_compile_sample() {
        let spec = compile(SAMPLE).unwrap();
        assert_eq!(spec.name(), "S1");
        assert_eq!(spec.groups().len(), 2);

        let g1 = &spec.groups()[0];
        assert_eq!(g1.name(), "G1");
        assert_eq!(g1.rules().len(), 2);

        let r1 = &g1.rules()[0];
        assert_eq!(r1.title(), "R1");
        assert_eq!(r1.resource_type(), "aws:ec2:instance");
        assert_eq!(r1.filters().len(), 1);
        assert_eq!(r1.asserts().len(), 2);
        assert_eq!(r1.asserts()[1].evaluator(), &Evaluator::equal(true));

        let r2 = &g1.rules()[1];
        assert!(r2.filters().is_empty());
        assert!(r2.asserts().is_empty());

        assert!(spec.groups()[1].rules().is_empty());
    }

    #[test]
    fn test_compile_date_operand() {
        let spec = compile(
            r#"
name = "S"
[[groups]]
name = "G"
[[groups.rules]]
title = "recent"
resource = "aws:ec2:instance"
asserts = [{ attribute = "launched", op = "not_equal", value = 2024-01-15T10:30:00Z }]
"#,
        )
        .unwrap();

        let (_, rule) = spec.rules().next().unwrap();
        let launched = chrono::DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z").unwrap().with_timezone(&chrono::Utc);
        assert_eq!(
            rule.asserts()[0].evaluator(),
            &Evaluator::not_equal(crate::model::AttributeValue::Date(launched))
        );
    }

    #[test]
    fn test_rules_iterate_in_declaration_order() {
        let spec = compile(SAMPLE).unwrap();
        let titles: Vec<_> = spec.rules().map(|(group, rule)| format!("{}/{}", group.name(), rule.title())).collect();
        assert_eq!(titles, vec!["G1/R1", "G1/R2"]);
    }

    #[test]
    fn test_referenced_attributes() {
        let spec = compile(SAMPLE).unwrap();
        let r1 = &spec.groups()[0].rules()[0];
        let names: Vec<_> = r1.referenced_attributes().collect();
        assert_eq!(names, vec!["region", "instance_type", "encrypted"]);
    }

    #[test]
    fn test_compile_syntax_error() {
        let err = compile("name = ").unwrap_err();
        assert!(err.to_string().starts_with("syntax error in specification"));
    }

    #[test]
    fn test_compile_rejects_unknown_fields() {
        let source = r#"
name = "S"
[[groups]]
name = "G"
[[groups.rules]]
title = "R"
resource = "aws:ec2:instance"
assert = []
"#;
        let _ = compile(source).unwrap_err();
    }

    #[test]
    fn test_compile_requires_name() {
        let _ = compile("[[groups]]\nname = \"G\"\n").unwrap_err();
    }

    #[test]
    fn test_unparsable_resource_type_is_kept_as_written() {
        let source = r#"
name = "S"
[[groups]]
name = "G"
[[groups.rules]]
title = "R"
resource = "not-a-type"
"#;
        let spec = compile(source).unwrap();
        let rule = &spec.groups()[0].rules()[0];
        assert_eq!(rule.resource_type(), "not-a-type");
        let _ = rule.resource_def_ref().unwrap_err();
    }
}
