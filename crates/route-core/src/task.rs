//! Read side of the Beads issue store.
//!
//! Layout:
//!   .beads/issues.jsonl   one JSON issue record per line
//!
//! Records carry many more fields than routing needs; unknown fields are
//! ignored. A line that fails to parse is skipped with a warning.

use crate::error::{Result, RouteError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// TaskDescriptor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kept in stored order: the first `agent:` label wins.
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl TaskDescriptor {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            labels: Vec::new(),
            status: None,
            priority: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Title and description joined for free-text matching.
    pub fn text(&self) -> String {
        match &self.description {
            Some(desc) => format!("{} {}", self.title, desc),
            None => self.title.clone(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("closed"))
    }
}

// ---------------------------------------------------------------------------
// Store reads
// ---------------------------------------------------------------------------

/// Parse JSONL content. Blank lines are ignored, malformed lines are skipped.
pub fn parse_jsonl(content: &str) -> Vec<TaskDescriptor> {
    let mut tasks = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<TaskDescriptor>(line) {
            Ok(task) => tasks.push(task),
            Err(e) => {
                tracing::warn!(line = idx + 1, error = %e, "skipping malformed issue record");
            }
        }
    }
    tasks
}

/// Load every readable issue. A missing store is an empty store.
pub fn load_all(root: &Path) -> Result<Vec<TaskDescriptor>> {
    let path = paths::issues_path(root);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "issue store not found");
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(parse_jsonl(&content))
}

/// Look up a single issue by id.
pub fn find(root: &Path, id: &str) -> Result<TaskDescriptor> {
    load_all(root)?
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| RouteError::TaskNotFound(id.to_string()))
}

/// Issues still worth routing: everything not closed.
pub fn open_tasks(tasks: &[TaskDescriptor]) -> Vec<&TaskDescriptor> {
    tasks.iter().filter(|t| !t.is_closed()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const STORE: &str = r#"{"id":"gt-1","title":"Fix typo in readme","labels":["docs"],"status":"open","priority":2}
{"id":"gt-2","title":"Design auth","description":"OAuth flow","labels":["agent:opus","complexity:trivial"],"status":"in_progress","assignee":"mayor"}

not json at all
{"id":"gt-3","title":"Old work","status":"closed"}
{"title":"missing id"}
"#;

    fn write_store(dir: &TempDir, content: &str) {
        let path = paths::issues_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn parse_skips_malformed_lines() {
        let tasks = parse_jsonl(STORE);
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["gt-1", "gt-2", "gt-3"]);
    }

    #[test]
    fn parse_keeps_label_order_and_optional_fields() {
        let tasks = parse_jsonl(STORE);
        assert_eq!(tasks[1].labels, vec!["agent:opus", "complexity:trivial"]);
        assert_eq!(tasks[1].description.as_deref(), Some("OAuth flow"));
        assert_eq!(tasks[0].priority, Some(2));
        assert!(tasks[2].labels.is_empty());
        assert!(tasks[2].description.is_none());
    }

    #[test]
    fn missing_store_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(load_all(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn find_by_id() {
        let dir = TempDir::new().unwrap();
        write_store(&dir, STORE);
        let task = find(dir.path(), "gt-2").unwrap();
        assert_eq!(task.title, "Design auth");
    }

    #[test]
    fn find_unknown_id_fails() {
        let dir = TempDir::new().unwrap();
        write_store(&dir, STORE);
        let err = find(dir.path(), "gt-99").unwrap_err();
        assert!(matches!(err, RouteError::TaskNotFound(id) if id == "gt-99"));
    }

    #[test]
    fn open_tasks_excludes_closed() {
        let tasks = parse_jsonl(STORE);
        let open: Vec<&str> = open_tasks(&tasks).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(open, vec!["gt-1", "gt-2"]);
    }

    #[test]
    fn text_joins_title_and_description() {
        let t = TaskDescriptor::new("x", "Title").with_description("body");
        assert_eq!(t.text(), "Title body");
        assert_eq!(TaskDescriptor::new("y", "Only").text(), "Only");
    }
}
