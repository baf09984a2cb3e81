//! CLI definition and parsing for the `road` inspection tool.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Every subcommand goes through the library; nothing here touches the disk.

use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

use crate::access::AccessMode;
use crate::config::LogLevel;
use crate::kind::Kind;

/// Inspect filesystem entries through road_fs handles.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Inspect filesystem entries as typed handles")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file (refused if an ancestor is a symlink).
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show kind, location and metadata of a path.
    Stat {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
    },
    /// List the direct children of a directory.
    Ls {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        /// Only show entries of these kinds (repeatable).
        #[arg(long = "kind", short = 'k', value_enum)]
        kinds: Vec<KindArg>,
    },
    /// Look up one direct child by name.
    Find {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        name: String,
        #[arg(long = "kind", short = 'k', value_enum)]
        kinds: Vec<KindArg>,
    },
    /// Show where a symbolic link points.
    Target {
        #[arg(value_hint = ValueHint::AnyPath)]
        link: PathBuf,
    },
    /// Block until a path becomes accessible.
    Wait {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
        #[arg(long, value_enum, default_value_t = AccessArg::Exists)]
        mode: AccessArg,
        /// Give up after this many milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Print change notifications for a path until interrupted.
    Watch {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
        /// Stop after this many bursts.
        #[arg(long)]
        count: Option<usize>,
    },
    /// Create a temporary file (or folder), report it, then clean it up.
    Tmp {
        #[arg(long)]
        dir: bool,
        /// Text written into the temporary file.
        #[arg(long, conflicts_with = "dir")]
        text: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    File,
    Dir,
    Symlink,
    Block,
    Char,
    Fifo,
    Socket,
}

impl From<KindArg> for Kind {
    fn from(k: KindArg) -> Kind {
        match k {
            KindArg::File => Kind::RegularFile,
            KindArg::Dir => Kind::Directory,
            KindArg::Symlink => Kind::SymbolicLink,
            KindArg::Block => Kind::BlockDevice,
            KindArg::Char => Kind::CharacterDevice,
            KindArg::Fifo => Kind::Fifo,
            KindArg::Socket => Kind::Socket,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessArg {
    Exists,
    Read,
    Write,
    Execute,
}

impl From<AccessArg> for AccessMode {
    fn from(a: AccessArg) -> AccessMode {
        match a {
            AccessArg::Exists => AccessMode::EXISTS,
            AccessArg::Read => AccessMode::READ,
            AccessArg::Write => AccessMode::WRITE,
            AccessArg::Execute => AccessMode::EXECUTE,
        }
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > Normal.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.debug {
            return LogLevel::Debug;
        }
        self.log_level
            .as_deref()
            .and_then(LogLevel::parse)
            .unwrap_or_default()
    }
}

pub fn kinds(args: &[KindArg]) -> Vec<Kind> {
    args.iter().copied().map(Kind::from).collect()
}

pub fn parse() -> Args {
    Args::parse()
}
