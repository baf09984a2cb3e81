//! Runtime settings.
//!
//! Defaults are compiled in; environment variables overlay them:
//!   ROAD_TMPDIR           directory for TempFile/TempFolder (default: OS temp dir)
//!   ROAD_TEMP_PREFIX      name prefix for temporary entries (default: "road")
//!   ROAD_CHUNK_SIZE       default chunk size for File::chunks (default: 1024)
//!   ROAD_WATCH_SETTLE_MS  window that coalesces a burst of watch events (default: 50)
//!
//! Malformed values are ignored with a warning so a typo never breaks callers.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_CHUNK_SIZE: usize = 1024;
pub const DEFAULT_TEMP_PREFIX: &str = "road";
pub const DEFAULT_WATCH_SETTLE: Duration = Duration::from_millis(50);

/// Process-wide knobs for handles and temporary resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Chunk size used by `File::chunks`
    pub chunk_size: usize,
    /// Parent directory of temporary entries
    pub temp_dir: PathBuf,
    /// Leading component of temporary entry names
    pub temp_prefix: String,
    /// Quiet period after a watch event before rechecking
    pub watch_settle: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            temp_dir: env::temp_dir(),
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
            watch_settle: DEFAULT_WATCH_SETTLE,
        }
    }
}

impl Settings {
    /// Defaults overlaid with any ROAD_* environment variables.
    pub fn from_env() -> Self {
        let mut s = Self::default();
        if let Some(dir) = env::var_os("ROAD_TMPDIR").filter(|v| !v.is_empty()) {
            s.temp_dir = PathBuf::from(dir);
        }
        if let Ok(prefix) = env::var("ROAD_TEMP_PREFIX") {
            let prefix = prefix.trim();
            if prefix.is_empty() || prefix.contains(std::path::is_separator) {
                warn!(value = prefix, "ignoring ROAD_TEMP_PREFIX");
            } else {
                s.temp_prefix = prefix.to_string();
            }
        }
        if let Some(n) = parse_var::<usize>("ROAD_CHUNK_SIZE") {
            if n == 0 {
                warn!("ignoring ROAD_CHUNK_SIZE=0");
            } else {
                s.chunk_size = n;
            }
        }
        if let Some(ms) = parse_var::<u64>("ROAD_WATCH_SETTLE_MS") {
            s.watch_settle = Duration::from_millis(ms);
        }
        s
    }

    /// Env-derived settings, read once per process.
    pub fn global() -> &'static Settings {
        static GLOBAL: OnceLock<Settings> = OnceLock::new();
        GLOBAL.get_or_init(Settings::from_env)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring malformed setting");
            None
        }
    }
}

/// Program-defined verbosity levels exposed to the `road` binary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}
