use crate::error::RouteError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// One rung of the model ladder, ordered cheapest and fastest first.
///
/// The derived `Ord` follows declaration order, so `Tier::Flash < Tier::Opus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "gemini-flash")]
    Flash,
    #[serde(rename = "gemini-pro")]
    Pro,
    #[serde(rename = "claude-haiku")]
    Haiku,
    #[serde(rename = "claude-sonnet")]
    Sonnet,
    #[serde(rename = "claude-opus")]
    Opus,
}

/// Label values accepted after `agent:` / `model:`, and by `--model` on the CLI.
const ALIASES: &[(&str, Tier)] = &[
    ("flash", Tier::Flash),
    ("fast", Tier::Flash),
    ("gemini", Tier::Flash),
    ("gemini-flash", Tier::Flash),
    ("pro", Tier::Pro),
    ("gemini-pro", Tier::Pro),
    ("haiku", Tier::Haiku),
    ("claude-haiku", Tier::Haiku),
    ("sonnet", Tier::Sonnet),
    ("claude", Tier::Sonnet),
    ("claude-sonnet", Tier::Sonnet),
    ("opus", Tier::Opus),
    ("claude-opus", Tier::Opus),
];

impl Tier {
    pub fn all() -> &'static [Tier] {
        &[Tier::Flash, Tier::Pro, Tier::Haiku, Tier::Sonnet, Tier::Opus]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The next tier up the ladder, `None` at the top.
    pub fn next(self) -> Option<Tier> {
        Tier::all().get(self.index() + 1).copied()
    }

    /// Number of escalation steps available above this tier.
    pub fn headroom(self) -> u32 {
        (Tier::all().len() - 1 - self.index()) as u32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Flash => "gemini-flash",
            Tier::Pro => "gemini-pro",
            Tier::Haiku => "claude-haiku",
            Tier::Sonnet => "claude-sonnet",
            Tier::Opus => "claude-opus",
        }
    }

    /// Position on the capability/cost ladder, vendor-neutral.
    pub fn class(self) -> &'static str {
        match self {
            Tier::Flash => "cheapest-fast",
            Tier::Pro => "cheap-capable",
            Tier::Haiku => "mid-cheap",
            Tier::Sonnet => "mid-capable",
            Tier::Opus => "premium",
        }
    }

    /// Resolve a label value or short name. Input is trimmed and lowercased.
    pub fn from_alias(value: &str) -> Option<Tier> {
        let value = value.trim().to_lowercase();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == value)
            .map(|(_, tier)| *tier)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::from_alias(s).ok_or_else(|| RouteError::UnknownTier(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
