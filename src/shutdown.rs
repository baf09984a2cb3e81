//! Process-wide shutdown coordination.
//! The ctrlc handler cancels one shared token; watch loops take it (or a child
//! of it) so an interrupt ends them promptly and releases their watchers.
//!
//! Notes:
//! - `request()` is safe to call from the signal-handler thread.
//! - Cancellation is one-way; there is no reset outside tests.

use std::sync::LazyLock;
use tokio_util::sync::CancellationToken;

static SHUTDOWN: LazyLock<CancellationToken> = LazyLock::new(CancellationToken::new);

/// Request a cooperative shutdown (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.cancel();
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.is_cancelled()
}

/// A token cancelled on shutdown that can also be cancelled on its own.
pub fn token() -> CancellationToken {
    SHUTDOWN.child_token()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_cancel_does_not_propagate_up() {
        let t = token();
        t.cancel();
        assert!(t.is_cancelled());
        assert!(!is_requested());
    }
}
