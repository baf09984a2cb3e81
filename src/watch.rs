//! Change-notification loops behind `Node::until_accessible` and `Node::on_change`.
//!
//! A wake-up means "recheck state", never "exactly one change happened":
//! platforms coalesce events differently, so every burst that arrives within
//! the settle window is folded into a single wake-up.
//!
//! The watcher lives in a guard local to each loop, so it is released on
//! every exit path: success, cancellation, or error.

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::access::AccessMode;
use crate::config::Settings;
use crate::errors::{Result, RoadError};
use crate::road::Node;

struct Watch {
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
    settle: Duration,
}

impl Watch {
    fn start(path: &Path, settle: Duration) -> Result<Watch> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            // Receiver gone means the loop already ended.
            let _ = tx.send(res);
        })?;
        watcher.watch(path, RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "watch started");
        Ok(Watch {
            _watcher: watcher,
            rx,
            settle,
        })
    }

    /// Wait for the next burst and return its first event.
    async fn next_burst(&mut self) -> Result<Event> {
        let first = match self.rx.recv().await {
            Some(res) => res?,
            None => return Err(closed()),
        };
        trace!(kind = ?first.kind, "watch event");
        loop {
            match tokio::time::timeout(self.settle, self.rx.recv()).await {
                Ok(Some(Ok(ev))) => trace!(kind = ?ev.kind, "coalesced watch event"),
                Ok(Some(Err(e))) => return Err(e.into()),
                Ok(None) | Err(_) => break,
            }
        }
        Ok(first)
    }
}

fn closed() -> RoadError {
    RoadError::Watch(notify::Error::generic("watch channel closed"))
}

pub(crate) async fn until_accessible<F: FnMut()>(
    node: &Node,
    mode: AccessMode,
    token: &CancellationToken,
    mut on_attempt: F,
) -> Result<bool> {
    // Subscribe before the first probe so a change in between is not missed.
    let mut watch = Watch::start(node.location(), Settings::global().watch_settle)?;
    if node.accessible_async(mode).await? {
        return Ok(true);
    }
    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(path = %node.location().display(), "until_accessible cancelled");
                return Ok(false);
            }
            burst = watch.next_burst() => { burst?; }
        }
        if node.accessible_async(mode).await? {
            debug!(path = %node.location().display(), "became accessible");
            return Ok(true);
        }
        on_attempt();
    }
}

pub(crate) async fn on_change<F: FnMut(&Event)>(
    node: &Node,
    token: &CancellationToken,
    mut on_change: F,
) -> Result<()> {
    let mut watch = Watch::start(node.location(), Settings::global().watch_settle)?;
    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(path = %node.location().display(), "on_change cancelled");
                return Ok(());
            }
            burst = watch.next_burst() => on_change(&burst?),
        }
    }
}
