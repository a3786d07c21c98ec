use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

pub const BEADS_DIR: &str = ".beads";
pub const ISSUES_FILE: &str = ".beads/issues.jsonl";
pub const CONFIG_FILE: &str = ".beads/routing.yaml";
pub const PLAN_FILE: &str = ".beads/escalation-plan.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn issues_path(root: &Path) -> PathBuf {
    root.join(ISSUES_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn plan_path(root: &Path) -> PathBuf {
    root.join(PLAN_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_live_under_beads_dir() {
        let root = Path::new("/work/rig");
        let beads = root.join(BEADS_DIR);
        assert!(issues_path(root).starts_with(&beads));
        assert!(config_path(root).starts_with(&beads));
        assert!(plan_path(root).starts_with(&beads));
    }
}
