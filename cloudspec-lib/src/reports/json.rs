use crate::Result;
use crate::loader::LoadReport;
use crate::validation::SpecResult;
use core::fmt::Write;
use serde_json::json;

/// Render a validation result, and the load report it was produced from if any, as JSON.
pub fn generate<W: Write>(result: &SpecResult, load_report: Option<&LoadReport>, writer: &mut W) -> Result<()> {
    let mut output = json!({
        "result": result,
        "summary": result.summary(),
        "success": result.is_success(),
    });

    if let Some(report) = load_report {
        output["load"] = json!(report);
    }

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceDefRef;
    use crate::spec::compile;
    use crate::store::{MemoryStore, ResourceStore};
    use crate::testing::instance;
    use crate::validation::Validator;

    fn sample_result() -> SpecResult {
        let store = MemoryStore::new();
        store.save_resource_with(instance("i-1", "m5.large"));

        let spec = compile(
            r#"
name = "S1"
[[groups]]
name = "G1"
[[groups.rules]]
title = "R1"
resource = "aws:ec2:instance"
asserts = [{ attribute = "instance_type", op = "equal", value = "t2.micro" }]
[[groups.rules]]
title = "R2"
resource = "aws:s3:bucket"
"#,
        )
        .unwrap();

        Validator::new(&store).validate(&spec)
    }

    #[test]
    fn test_json_report() {
        let mut output = String::new();
        generate(&sample_result(), None, &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["summary"]["passed"], 1);
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["result"]["spec_name"], "S1");

        let rules = value["result"]["group_results"][0]["rule_results"].as_array().unwrap();
        assert_eq!(rules[0]["rule_name"], "R1");
        assert_eq!(rules[0]["status"], "failed");
        assert_eq!(rules[0]["failures"][0]["resource_id"], "i-1");
        assert_eq!(rules[1]["rule_name"], "R2");
        assert_eq!(rules[1]["status"], "succeeded");
        assert!(value.get("load").is_none());
    }

    #[test]
    fn test_json_report_with_load_report() {
        let mut report = LoadReport::default();
        report.record_loaded(ResourceDefRef::new("aws", "ec2", "instance"), 1);
        report.record_failed(ResourceDefRef::new("aws", "s3", "bucket"), "timed out".to_string());

        let mut output = String::new();
        generate(&sample_result(), Some(&report), &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["load"]["loaded"]["aws:ec2:instance"], 1);
        assert_eq!(value["load"]["failed"]["aws:s3:bucket"], "timed out");
    }
}
