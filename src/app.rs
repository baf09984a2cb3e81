//! Application orchestrator.
//! Initializes logging, installs the interrupt handler, builds a current-thread
//! runtime and dispatches the subcommand onto the library's async forms.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Local};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error};

use road_fs::cli::{self, Args, Command};
use road_fs::fs_ops::describe_road_error;
use road_fs::output as out;
use road_fs::{AccessMode, Folder, Road, RoadError, SymbolicLink, TempFile, TempFolder, shutdown};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let guard_opt = init_tracing(&args.effective_log_level(), args.log_file.as_deref(), args.json)
        .map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {e}"));
            e
        })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; shutting down gracefully...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })?;
    }

    debug!("Starting road: {:?}", args);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(dispatch(args.command));

    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    result
}

/// Print a library error the way users see it and turn it into the exit error.
fn fail(op: &str, path: &Path, e: RoadError) -> anyhow::Error {
    let msg = describe_road_error(op, path, &e);
    error!(code = e.code(), path = %path.display(), "{op} failed");
    out::print_error(&msg);
    anyhow!(msg)
}

fn line(road: &Road) -> String {
    format!("{}\t{}", road.kind(), road.name())
}

async fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Stat { path } => stat(&path).await.map_err(|e| fail("stat", &path, e)),
        Command::Ls { dir, kinds } => {
            let folder = Folder::open_async(&dir).await.map_err(|e| fail("list", &dir, e))?;
            let entries = folder
                .list_kinds_async(&cli::kinds(&kinds))
                .await
                .map_err(|e| fail("list", &dir, e))?;
            for road in &entries {
                out::print_user(&line(road));
            }
            Ok(())
        }
        Command::Find { dir, name, kinds } => {
            let folder = Folder::open_async(&dir).await.map_err(|e| fail("find", &dir, e))?;
            match folder
                .find_kinds_async(&name, &cli::kinds(&kinds))
                .await
                .map_err(|e| fail("find", &dir, e))?
            {
                Some(road) => {
                    out::print_user(&road.location().display().to_string());
                    Ok(())
                }
                None => {
                    out::print_error(&format!("'{name}' not found in '{}'", dir.display()));
                    Err(anyhow!("no match for '{name}'"))
                }
            }
        }
        Command::Target { link } => {
            let handle = SymbolicLink::open_async(&link)
                .await
                .map_err(|e| fail("read link", &link, e))?;
            let raw = handle
                .link_target_async()
                .await
                .map_err(|e| fail("read link", &link, e))?;
            out::print_user(&format!("{} -> {}", handle.name(), raw.display()));
            match handle.target_async().await {
                Ok(road) => out::print_field(&road.kind().to_string(), road.location().display()),
                Err(RoadError::NotFound(p)) => out::print_warn(&format!("dangling: {}", p.display())),
                Err(e) => return Err(fail("resolve link", &link, e)),
            }
            Ok(())
        }
        Command::Wait {
            path,
            mode,
            timeout_ms,
        } => {
            let road = Road::resolve_async(&path).await.map_err(|e| fail("wait", &path, e))?;
            let token = shutdown::token();
            if let Some(ms) = timeout_ms {
                let t = token.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                    t.cancel();
                });
            }
            let mut attempts = 0u32;
            let ready = road
                .until_accessible(AccessMode::from(mode), &token, || attempts += 1)
                .await
                .map_err(|e| fail("wait", &path, e))?;
            if ready {
                out::print_success(&format!("{} is accessible", path.display()));
                Ok(())
            } else if shutdown::is_requested() {
                out::print_warn(&format!("interrupted after {attempts} rechecks"));
                Err(anyhow!("interrupted while waiting for '{}'", path.display()))
            } else {
                out::print_warn(&format!("gave up after {attempts} rechecks"));
                Err(anyhow!("'{}' did not become accessible", path.display()))
            }
        }
        Command::Watch { path, count } => {
            let road = Road::resolve_async(&path).await.map_err(|e| fail("watch", &path, e))?;
            let token = shutdown::token();
            let mut seen = 0usize;
            road.on_change(&token, |ev| {
                let paths: Vec<String> = ev.paths.iter().map(|p| p.display().to_string()).collect();
                out::print_user(&format!("{:?}\t{}", ev.kind, paths.join(" ")));
                seen += 1;
                if count.is_some_and(|n| seen >= n) {
                    token.cancel();
                }
            })
            .await
            .map_err(|e| fail("watch", &path, e))
        }
        Command::Tmp { dir, text } => tmp(dir, text).await.map_err(|e| {
            out::print_error(&format!("tmp: {e}"));
            anyhow!(e)
        }),
    }
}

async fn stat(path: &Path) -> road_fs::Result<()> {
    let road = Road::resolve_async(path).await?;
    let modified: DateTime<Local> = road.modified_time_async().await?.into();
    out::print_field("location", road.location().display());
    out::print_field("kind", road.kind());
    out::print_field("mutable", road.is_mutable());
    out::print_field("depth", road.depth());
    out::print_field("modified", modified.format("%Y-%m-%d %H:%M:%S"));
    match &road {
        Road::File(f) => {
            out::print_field("size", f.size_async().await?);
            if let Some(ext) = f.extension() {
                out::print_field("extension", ext);
            }
        }
        Road::Folder(d) => out::print_field("entries", d.list_async().await?.len()),
        Road::Symlink(l) => out::print_field("target", l.link_target_async().await?.display()),
        Road::Special(_) => {}
    }
    Ok(())
}

async fn tmp(dir: bool, text: Option<String>) -> road_fs::Result<()> {
    if dir {
        let mut folder = TempFolder::new_async().await?;
        out::print_success(&format!("created {}", folder.location().display()));
        folder.close_async().await;
        return Ok(());
    }
    let mut file = TempFile::new_async().await?;
    if let Some(t) = text {
        file.write_text_async(&t).await?;
    }
    out::print_success(&format!(
        "created {} ({} bytes)",
        file.location().display(),
        file.size_async().await?
    ));
    file.close_async().await;
    Ok(())
}
