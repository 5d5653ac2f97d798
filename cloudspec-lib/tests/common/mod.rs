//! Fixtures shared by the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use camino::{Utf8Path, Utf8PathBuf};
use cloudspec_lib::Host;
use tempfile::TempDir;

/// Test host that captures output to in-memory buffers.
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, _code: i32) {}
}

pub const INVENTORY: &str = r#"{
    "resource_defs": [
        {
            "group": "ec2",
            "resource": "instance",
            "description": "EC2 instances",
            "attributes": [
                { "name": "instance_type", "type": "string" },
                { "name": "region", "type": "string" },
                { "name": "encrypted", "type": "boolean" },
                { "name": "tags", "type": "string", "array": true },
                { "name": "launched", "type": "date" }
            ],
            "associations": [{ "name": "volumes", "target": "aws:ec2:volume" }]
        },
        {
            "group": "s3",
            "resource": "bucket",
            "attributes": [{ "name": "versioning", "type": "boolean" }]
        }
    ],
    "resources": {
        "ec2:instance": [
            {
                "id": "i-1",
                "attributes": {
                    "instance_type": "t2.micro",
                    "region": "eu-west-1",
                    "encrypted": true,
                    "tags": ["web"],
                    "launched": "2024-03-01T10:00:00Z"
                }
            },
            {
                "id": "i-2",
                "attributes": {
                    "instance_type": "m5.large",
                    "region": "us-east-1",
                    "encrypted": false,
                    "tags": ["batch"],
                    "launched": "2023-11-20T08:30:00Z"
                }
            }
        ]
    }
}"#;

pub const CONFIG: &str = r#"
provider_timeout_secs = 10
load_concurrency = 2

[[providers]]
name = "aws"
path = "aws.json"
"#;

/// A scratch directory holding an `aws` inventory and a configuration that registers it
pub struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir should be UTF-8");
        std::fs::write(root.join("aws.json"), INVENTORY).expect("Failed to write inventory");
        std::fs::write(root.join("cloudspec.toml"), CONFIG).expect("Failed to write config");
        Self { _dir: dir, root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn config(&self) -> Utf8PathBuf {
        self.root.join("cloudspec.toml")
    }

    pub fn write_spec(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, contents).expect("Failed to write spec");
        path
    }
}
