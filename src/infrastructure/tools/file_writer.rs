//! Sandboxed file-writing tool.
//!
//! All paths are interpreted relative to a base directory; absolute paths
//! and any parent-directory component are rejected with a security error
//! before anything touches the filesystem.

use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::models::tool::FILE_WRITER_TOOL;
use crate::domain::models::{JsonMap, ToolError, ToolErrorCode, ToolRequest, ToolResponse};
use crate::domain::ports::Tool;

pub struct FileWriterTool {
    base_dir: PathBuf,
}

impl FileWriterTool {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl Tool for FileWriterTool {
    fn name(&self) -> &str {
        FILE_WRITER_TOOL
    }

    async fn run(&self, request: ToolRequest) -> ToolResponse {
        let start = Instant::now();
        let rel_path = request.input_str("path").unwrap_or_default().to_string();
        let content = request
            .input
            .get("content")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        if rel_path.is_empty() {
            return ToolResponse::failure(
                FILE_WRITER_TOOL,
                ToolError::new(ToolErrorCode::InvalidInput, "Missing 'path'"),
            )
            .with_duration_ms(elapsed_ms(start));
        }

        if escapes_sandbox(Path::new(&rel_path)) {
            return ToolResponse::failure(
                FILE_WRITER_TOOL,
                ToolError::new(ToolErrorCode::Security, "Path traversal blocked"),
            )
            .with_duration_ms(elapsed_ms(start));
        }

        let target = self.base_dir.join(&rel_path);
        if let Some(parent) = target.parent() {
            if let Err(err) = tokio::fs::create_dir_all(parent).await {
                return ToolResponse::failure(
                    FILE_WRITER_TOOL,
                    ToolError::new(ToolErrorCode::RuntimeError, err.to_string()),
                )
                .with_duration_ms(elapsed_ms(start));
            }
        }

        match tokio::fs::write(&target, content.as_bytes()).await {
            Ok(()) => {
                let mut output = JsonMap::new();
                output.insert(
                    "written_to".into(),
                    Value::String(target.display().to_string()),
                );
                output.insert("bytes".into(), Value::from(content.len()));
                ToolResponse::success(FILE_WRITER_TOOL, output).with_duration_ms(elapsed_ms(start))
            }
            Err(err) => ToolResponse::failure(
                FILE_WRITER_TOOL,
                ToolError::new(ToolErrorCode::RuntimeError, err.to_string()),
            )
            .with_duration_ms(elapsed_ms(start)),
        }
    }
}

/// Absolute paths, drive prefixes, and any `..` component escape the
/// sandbox.
fn escapes_sandbox(path: &Path) -> bool {
    path.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
