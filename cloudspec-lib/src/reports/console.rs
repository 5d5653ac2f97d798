use crate::Result;
use crate::validation::{RuleResult, RuleStatus, SpecResult, Summary};
use core::fmt::Write;
use owo_colors::OwoColorize;

pub fn generate<W: Write>(result: &SpecResult, use_colors: bool, writer: &mut W) -> Result<()> {
    if use_colors {
        writeln!(writer, "Specification {}", result.spec_name().bold())?;
    } else {
        writeln!(writer, "Specification {}", result.spec_name())?;
    }

    for group in result.group_results() {
        writeln!(writer)?;
        if use_colors {
            writeln!(writer, "{}", group.group_name().bold())?;
        } else {
            writeln!(writer, "{}", group.group_name())?;
        }

        for rule in group.rule_results() {
            write_rule(rule, use_colors, writer)?;
        }
    }

    writeln!(writer)?;
    writeln!(writer, "{}", format_summary(&result.summary(), use_colors))?;
    Ok(())
}

fn write_rule<W: Write>(rule: &RuleResult, use_colors: bool, writer: &mut W) -> Result<()> {
    let marker = match rule.status() {
        RuleStatus::Succeeded => "✔️",
        RuleStatus::Failed => "🗙",
        RuleStatus::Errored => "⚠️",
    };

    let heading = format!("{} ({})", rule.rule_name(), rule.resource_type());
    match rule.reason() {
        Some(reason) => writeln!(writer, "  {marker} {heading}: {}", colorize(reason, rule.status(), use_colors))?,
        None => writeln!(writer, "  {marker} {heading}")?,
    }

    for failure in rule.failures() {
        writeln!(
            writer,
            "      {}: {} is {}, expected {}",
            failure.resource_id, failure.attribute, failure.actual, failure.expected
        )?;
    }

    Ok(())
}

fn colorize(text: &str, status: RuleStatus, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }

    match status {
        RuleStatus::Succeeded => text.green().to_string(),
        RuleStatus::Failed => text.red().to_string(),
        RuleStatus::Errored => text.yellow().to_string(),
    }
}

fn format_summary(summary: &Summary, use_colors: bool) -> String {
    let passed = format!("{} passed", summary.passed);
    let failed = format!("{} failed", summary.failed);
    let errored = format!("{} errored", summary.errored);

    if use_colors {
        format!(
            "{} rule(s): {}, {}, {}",
            summary.total(),
            passed.green().bold(),
            failed.red().bold(),
            errored.yellow().bold()
        )
    } else {
        format!("{} rule(s): {passed}, {failed}, {errored}", summary.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::compile;
    use crate::store::{MemoryStore, ResourceStore};
    use crate::testing::instance;
    use crate::validation::Validator;

    fn sample_result() -> SpecResult {
        let store = MemoryStore::new();
        store.save_resource_with(instance("i-1", "t2.micro").with_attribute("tags", vec!["a"]));
        store.save_resource_with(instance("i-2", "m5.large").with_attribute("tags", vec!["b"]));

        let spec = compile(
            r#"
name = "S1"

[[groups]]
name = "G1"

[[groups.rules]]
title = "known types"
resource = "aws:ec2:instance"
asserts = [{ attribute = "instance_type", op = "in", value = ["t2.micro", "m5.large"] }]

[[groups.rules]]
title = "micro only"
resource = "aws:ec2:instance"
asserts = [{ attribute = "instance_type", op = "equal", value = "t2.micro" }]

[[groups]]
name = "G2"

[[groups.rules]]
title = "tagged"
resource = "aws:ec2:instance"
asserts = [{ attribute = "tags", op = "equal", value = "a" }]
"#,
        )
        .unwrap();

        Validator::new(&store).validate(&spec)
    }

    #[test]
    fn test_console_report_no_colors() {
        let mut output = String::new();
        generate(&sample_result(), false, &mut output).unwrap();

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "Specification S1");
        assert_eq!(lines[2], "G1");
        assert_eq!(lines[3], "  ✔️ known types (aws:ec2:instance)");
        assert_eq!(lines[4], "  🗙 micro only (aws:ec2:instance): 1 of 2 resource(s) failed assertions");
        assert_eq!(lines[5], "      i-2: instance_type is \"m5.large\", expected == \"t2.micro\"");
        assert_eq!(lines[7], "G2");
        assert!(lines[8].starts_with("  ⚠️ tagged (aws:ec2:instance): "));
        assert_eq!(lines.last().copied(), Some("3 rule(s): 1 passed, 1 failed, 1 errored"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_console_report_with_colors() {
        let mut output = String::new();
        generate(&sample_result(), true, &mut output).unwrap();
        assert!(output.contains('\u{1b}'));
        assert!(output.contains("micro only"));
    }
}
