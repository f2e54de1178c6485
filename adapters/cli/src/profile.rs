use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use cgx_core::{AgentConfig, MovementConfig};
use serde::Deserialize;

const SUPPORTED_PROFILE_VERSION: u32 = 1;

/// Character tuning loaded from a TOML profile.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Profile {
    version: u32,
    /// Controller tuning.
    #[serde(default)]
    pub(crate) movement: MovementConfig,
    /// Starting status stats.
    #[serde(default)]
    pub(crate) agent: AgentConfig,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            version: SUPPORTED_PROFILE_VERSION,
            movement: MovementConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

impl Profile {
    /// Loads and validates the profile stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read character profile at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid character profile at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let profile: Profile =
            toml::from_str(contents).context("failed to parse character profile toml contents")?;
        if profile.version != SUPPORTED_PROFILE_VERSION {
            bail!(
                "unsupported character profile version {}; expected {}",
                profile.version,
                SUPPORTED_PROFILE_VERSION
            );
        }
        profile
            .movement
            .validate()
            .context("movement section is invalid")?;
        profile.agent.validate().context("agent section is invalid")?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::Profile;
    use cgx_core::{AgentConfig, MovementConfig};

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let profile = Profile::parse("version = 1\n").expect("minimal profile");
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn partial_sections_override_only_named_fields() {
        let profile = Profile::parse(
            r#"
version = 1

[movement]
run_speed = 11.0
jump_start_gravity = -12.5

[agent]
health = 30.0
"#,
        )
        .expect("valid profile");

        assert_eq!(
            profile.movement,
            MovementConfig {
                run_speed: 11.0,
                jump_start_gravity: -12.5,
                ..MovementConfig::default()
            }
        );
        assert_eq!(
            profile.agent,
            AgentConfig {
                health: 30.0,
                ..AgentConfig::default()
            }
        );
    }

    #[test]
    fn rejects_unsupported_version() {
        let error = Profile::parse("version = 2\n").expect_err("version 2 is unknown");
        assert!(error.to_string().contains("unsupported character profile version 2"));
    }

    #[test]
    fn rejects_negative_damping() {
        let error = Profile::parse("version = 1\n[movement]\nground_damping = -3.0\n")
            .expect_err("negative damping is invalid");
        assert_eq!(error.to_string(), "movement section is invalid");
        assert!(format!("{error:#}").contains("ground_damping"));
    }

    #[test]
    fn rejects_unknown_sections() {
        assert!(Profile::parse("version = 1\n[physics]\nsteps = 4\n").is_err());
    }
}
