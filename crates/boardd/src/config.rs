//! board.toml configuration parser.
//!
//! Every section is optional. Precedence, lowest first: built-in defaults,
//! the config file, command-line flags.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use board_core::{DataLayer, Unavailable, UserDirectory, UserRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub server: ServerConfig,
    pub board: BoardSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<DirectoryConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSection {
    /// Path prefix for every route; empty mounts at `/`.
    pub mount: String,
}

impl Default for BoardSection {
    fn default() -> Self {
        Self {
            mount: "/asmt".to_string(),
        }
    }
}

/// Seed rows for the in-memory user directory. Without this section the
/// lookup endpoint has no data layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub users: Vec<UserRecord>,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind: Option<IpAddr>,
    pub port: Option<u16>,
    pub mount: Option<String>,
}

impl BoardConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: BoardConfig = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path` if given, apply overrides, and validate.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(bind) = overrides.bind {
            self.server.bind = bind;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(mount) = &overrides.mount {
            self.board.mount = mount.clone();
        }
    }

    /// The mount becomes part of route paths, so it may only contain
    /// literal path characters.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mount = &self.board.mount;
        if let Some(bad) = mount
            .chars()
            .find(|c| matches!(c, '{' | '}' | '*' | '?' | '#' | ':') || c.is_whitespace())
        {
            bail!("board.mount {mount:?} contains unsupported character {bad:?}");
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.bind, self.server.port)
    }

    /// The data layer behind `/userByEmail`.
    pub fn data_layer(&self) -> Arc<dyn DataLayer> {
        let Some(dir) = &self.directory else {
            return Arc::new(Unavailable);
        };

        let directory = UserDirectory::new(dir.users.clone());
        if directory.is_empty() {
            warn!("[directory] has no users, every lookup will match nothing");
        } else {
            info!(users = directory.len(), "user directory seeded");
        }
        Arc::new(directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config: BoardConfig = toml::from_str("").unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.board.mount, "/asmt");
        assert_eq!(config.data_layer().describe(), "unavailable");
    }

    #[test]
    fn parse_full() {
        let toml_str = r#"
[server]
bind = "127.0.0.1"
port = 9000

[board]
mount = "/board"

[[directory.users]]
id = 1
email = "test@example.com"

[[directory.users]]
id = 2
email = "ops@example.com"
"#;
        let config: BoardConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.board.mount, "/board");
        assert_eq!(config.directory.as_ref().unwrap().users.len(), 2);
        assert_eq!(config.data_layer().describe(), "user-directory");
    }

    #[test]
    fn empty_directory_section_still_enables_lookups() {
        let config: BoardConfig = toml::from_str("[directory]\n").unwrap();
        assert_eq!(config.directory, Some(DirectoryConfig::default()));
        assert_eq!(config.data_layer().describe(), "user-directory");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: BoardConfig = toml::from_str("[server]\nport = 1234\n").unwrap();
        assert_eq!(config.server.port, 1234);
        assert_eq!(config.server.bind, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn overrides_win() {
        let mut config = BoardConfig::default();
        config.apply(&Overrides {
            bind: Some("127.0.0.1".parse().unwrap()),
            port: Some(3000),
            mount: Some(String::new()),
        });
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.board.mount, "");
    }

    #[test]
    fn rejects_pattern_characters_in_mount() {
        for mount in ["/{id}", "/a*", "/a b", "/x?y"] {
            let mut config = BoardConfig::default();
            config.board.mount = mount.to_string();
            assert!(config.validate().is_err(), "{mount}");
        }
    }

    #[test]
    fn load_reads_file_then_applies_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9000\n\n[board]\nmount = \"/b\"").unwrap();

        let overrides = Overrides {
            port: Some(9100),
            ..Default::default()
        };
        let config = BoardConfig::load(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.board.mount, "/b");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = BoardConfig::load(Some(Path::new("/nonexistent/board.toml")), &Overrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = BoardConfig {
            directory: Some(DirectoryConfig {
                users: vec![UserRecord {
                    id: 1,
                    email: "test@example.com".to_string(),
                }],
            }),
            ..Default::default()
        };
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("mount = \"/asmt\""));
        let parsed: BoardConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
