//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings that belong to the terminal session rather than to the rules.
///
/// Environment variables:
/// - `ROGUE_SESSION_ID` - name of the per-session log directory (default: timestamp)
/// - `ROGUE_LOG_DIR` - root of the log directories (default: platform cache dir)
/// - `ROGUE_MESSAGE_LINES` - log lines printed with each map (default: 5)
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub message_lines: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            session_id: None,
            log_dir: None,
            message_lines: 5,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.session_id = env::var("ROGUE_SESSION_ID").ok().filter(|id| !id.is_empty());
        config.log_dir = env::var_os("ROGUE_LOG_DIR").map(PathBuf::from);
        if let Some(lines) = read_env::<usize>("ROGUE_MESSAGE_LINES") {
            config.message_lines = lines.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
