use crate::error::Result;
use crate::escalation::EscalationConfig;
use crate::paths;
use crate::tier::Tier;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Iteration budget accepted by the loop runner.
pub const MIN_ITERATIONS: u32 = 1;
pub const MAX_ITERATIONS: u32 = 50;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// EscalationSettings
// ---------------------------------------------------------------------------

/// Escalation defaults from the config file. Unlike `EscalationConfig` the
/// starting tier is optional: when unset, it comes from routing the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_tier: Option<Tier>,
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    #[serde(default = "default_max_escalations")]
    pub max_escalations: u32,
}

fn default_threshold() -> u32 {
    3
}

fn default_max_escalations() -> u32 {
    2
}

impl Default for EscalationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            initial_tier: None,
            threshold: default_threshold(),
            max_escalations: default_max_escalations(),
        }
    }
}

impl EscalationSettings {
    pub fn with_initial_tier(&self, initial_tier: Tier) -> EscalationConfig {
        EscalationConfig {
            enabled: self.enabled,
            initial_tier,
            threshold: self.threshold,
            max_escalations: self.max_escalations,
        }
    }
}

// ---------------------------------------------------------------------------
// LoopConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Phrase the agent prints when the work is done.
    #[serde(default)]
    pub completion_phrase: Option<String>,
}

fn default_max_iterations() -> u32 {
    10
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            completion_phrase: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub escalation: EscalationSettings,
    #[serde(default, rename = "loop")]
    pub loop_: LoopConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            escalation: EscalationSettings::default(),
            loop_: LoopConfig::default(),
        }
    }
}

impl Config {
    /// Load `.beads/routing.yaml`, or the defaults when the file is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let esc = &self.escalation;

        if esc.threshold == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "escalation.threshold must be at least 1".to_string(),
            });
        }

        if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&self.loop_.max_iterations) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "loop.max_iterations={} is outside {MIN_ITERATIONS}..={MAX_ITERATIONS}",
                    self.loop_.max_iterations
                ),
            });
        }

        if let Some(initial) = esc.initial_tier {
            let headroom = initial.headroom();
            if esc.enabled && headroom == 0 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "escalation is enabled but initial tier '{initial}' is already the top tier"
                    ),
                });
            } else if esc.max_escalations > headroom {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "escalation.max_escalations={} but only {headroom} tier(s) sit above '{initial}'",
                        esc.max_escalations
                    ),
                });
            }
        } else if esc.max_escalations >= Tier::all().len() as u32 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "escalation.max_escalations={} exceeds the {}-tier ladder",
                    esc.max_escalations,
                    Tier::all().len()
                ),
            });
        }

        if self
            .loop_
            .completion_phrase
            .as_deref()
            .is_some_and(|p| p.trim().is_empty())
        {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "loop.completion_phrase is blank and will never match".to_string(),
            });
        }

        warnings
    }

    pub fn has_errors(&self) -> bool {
        self.validate().iter().any(|w| w.level == WarnLevel::Error)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(!cfg.escalation.enabled);
        assert_eq!(cfg.loop_.max_iterations, 10);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.escalation.enabled = true;
        cfg.escalation.initial_tier = Some(Tier::Flash);
        cfg.loop_.completion_phrase = Some("ALL TESTS PASS".to_string());
        cfg.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded, cfg);
        let raw = std::fs::read_to_string(paths::config_path(dir.path())).unwrap();
        assert!(raw.contains("loop:"));
        assert!(raw.contains("initial_tier: gemini-flash"));
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let yaml = "escalation:\n  enabled: true\n  initial_tier: claude-sonnet\n";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.escalation.initial_tier, Some(Tier::Sonnet));
        assert_eq!(cfg.escalation.threshold, 3);
        assert_eq!(cfg.loop_, LoopConfig::default());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = paths::config_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "escalation: [not, a, map]\n").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn default_config_is_clean() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn zero_threshold_is_an_error() {
        let mut cfg = Config::default();
        cfg.escalation.threshold = 0;
        assert!(cfg.has_errors());
    }

    #[test]
    fn iteration_budget_bounds() {
        let mut cfg = Config::default();
        cfg.loop_.max_iterations = 0;
        assert!(cfg.has_errors());
        cfg.loop_.max_iterations = 51;
        assert!(cfg.has_errors());
        cfg.loop_.max_iterations = 50;
        assert!(!cfg.has_errors());
    }

    #[test]
    fn escalation_ceiling_warnings() {
        let mut cfg = Config::default();
        cfg.escalation.initial_tier = Some(Tier::Sonnet);
        cfg.escalation.max_escalations = 3;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Warning);

        cfg.escalation.enabled = true;
        cfg.escalation.initial_tier = Some(Tier::Opus);
        let warnings = cfg.validate();
        assert!(warnings[0].message.contains("top tier"));
        assert!(!cfg.has_errors());
    }

    #[test]
    fn ceiling_without_initial_tier() {
        let mut cfg = Config::default();
        cfg.escalation.max_escalations = 4;
        assert!(cfg.validate().is_empty());
        cfg.escalation.max_escalations = 5;
        assert_eq!(cfg.validate().len(), 1);
    }

    #[test]
    fn settings_resolve_with_initial_tier() {
        let settings = EscalationSettings {
            enabled: true,
            ..EscalationSettings::default()
        };
        let resolved = settings.with_initial_tier(Tier::Pro);
        assert!(resolved.enabled);
        assert_eq!(resolved.initial_tier, Tier::Pro);
        assert_eq!(resolved.threshold, 3);
        assert_eq!(resolved.max_escalations, 2);
    }

    #[test]
    fn blank_completion_phrase_warns() {
        let mut cfg = Config::default();
        cfg.loop_.completion_phrase = Some("  ".to_string());
        assert_eq!(cfg.validate().len(), 1);
    }
}
