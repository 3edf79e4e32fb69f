//! Session scripts: a recorded sequence of per-tick player snapshots.
//!
//! Each entry in `ticks` is either a [`PlayerSnapshot`] (a save is loaded)
//! or `null` (the player is on the title screen).

use std::path::Path;

use modkit_types::PlayerSnapshot;
use serde::Deserialize;

/// Errors that can occur when loading a session script.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to read the script from disk.
    #[error("failed to read session script: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse session YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for SessionError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// A replayable session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionScript {
    /// Human-readable session name.
    #[serde(default)]
    pub name: String,

    /// One entry per tick.
    #[serde(default)]
    pub ticks: Vec<Option<PlayerSnapshot>>,
}

impl SessionScript {
    /// Load a script from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the file cannot be read, or
    /// [`SessionError::Yaml`] if the content is not a valid script.
    pub fn from_file(path: &Path) -> Result<Self, SessionError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a script from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Yaml`] if the content is not a valid script.
    pub fn parse(yaml: &str) -> Result<Self, SessionError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Number of ticks in the script.
    pub const fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Whether the script has no ticks.
    pub const fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use modkit_types::SkillType;

    use super::*;

    const SCRIPT: &str = r#"
name: "two days"
ticks:
  - null
  - farmer:
      id: "0190f5c2-7a10-7000-8000-000000000001"
      name: "Ada"
    inventory:
      - id: "0190f5c2-7a10-7000-8000-0000000000a1"
        name: "Hoe"
        stack: 1
    skills:
      farming: 2
  - farmer:
      id: "0190f5c2-7a10-7000-8000-000000000001"
      name: "Ada"
"#;

    #[test]
    fn parses_snapshots_and_title_screen_ticks() {
        let script = SessionScript::parse(SCRIPT).unwrap_or_default();
        assert_eq!(script.name, "two days");
        assert_eq!(script.len(), 3);
        assert!(script.ticks.first().is_some_and(Option::is_none));

        let loaded = script.ticks.get(1).cloned().flatten();
        assert_eq!(loaded.as_ref().map(|s| s.farmer.name.as_str()), Some("Ada"));
        assert_eq!(loaded.as_ref().map(|s| s.inventory.len()), Some(1));
        assert_eq!(loaded.map(|s| s.skill_level(SkillType::Farming)), Some(2));

        let bare = script.ticks.get(2).cloned().flatten();
        assert_eq!(bare.map(|s| s.inventory.is_empty()), Some(true));
    }

    #[test]
    fn rejects_malformed_snapshot() {
        let result = SessionScript::parse("ticks:\n  - farmer: 12\n");
        assert!(matches!(result, Err(SessionError::Yaml { .. })));
    }

    #[test]
    fn empty_mapping_is_empty_script() {
        let script = SessionScript::parse("{}").unwrap_or_else(|_| SessionScript {
            name: String::from("failed"),
            ticks: vec![None],
        });
        assert!(script.is_empty());
        assert!(script.name.is_empty());
    }
}
