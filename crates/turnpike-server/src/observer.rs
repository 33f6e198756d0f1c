//! Exchange observer hooks

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{info, warn};
use turnpike_core::{Decision, HookError, Turn};

/// Side-effect hooks around each exchange
///
/// A hook that returns an error or panics is logged and otherwise ignored:
/// the engine still gets its response.
pub trait ExchangeObserver: Send + Sync + 'static {
    /// Called after a turn decodes, before the strategy sees it
    fn on_receive(&self, _turn: &Turn) -> Result<(), HookError> {
        Ok(())
    }

    /// Called once the encoded decision has been written out
    fn on_send(&self, _decision: &Decision) -> Result<(), HookError> {
        Ok(())
    }
}

/// Observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ExchangeObserver for NoopObserver {}

pub(crate) fn notify_receive<O: ExchangeObserver>(observer: &O, turn: &Turn) {
    match panic::catch_unwind(AssertUnwindSafe(|| observer.on_receive(turn))) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("on_receive hook failed for player {}: {}", turn.player_name, e),
        Err(payload) => warn!(
            "on_receive hook panicked for player {}: {}",
            turn.player_name,
            panic_message(payload.as_ref())
        ),
    }
}

pub(crate) fn notify_send<O: ExchangeObserver>(observer: &O, decision: &Decision) {
    match panic::catch_unwind(AssertUnwindSafe(|| observer.on_send(decision))) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("on_send hook failed: {}", e),
        Err(payload) => warn!("on_send hook panicked: {}", panic_message(payload.as_ref())),
    }
}

/// Report a sent decision without holding up the connection
///
/// The hook runs on its own task, after the connection task has yielded
/// back from writing the response. Outside a runtime it runs inline.
pub(crate) fn dispatch_send<O: ExchangeObserver>(observer: Arc<O>, decision: Decision) {
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                tokio::task::yield_now().await;
                info!("Sent decision");
                notify_send(observer.as_ref(), &decision);
            });
        }
        Err(_) => {
            info!("Sent decision");
            notify_send(observer.as_ref(), &decision);
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use turnpike_core::GameState;

    #[derive(Default)]
    struct Exploding {
        sends: AtomicUsize,
    }

    impl ExchangeObserver for Exploding {
        fn on_receive(&self, _turn: &Turn) -> Result<(), HookError> {
            panic!("receive went sideways")
        }

        fn on_send(&self, _decision: &Decision) -> Result<(), HookError> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            panic!("send went sideways")
        }
    }

    #[test]
    fn test_panicking_hooks_are_contained() {
        let observer = Exploding::default();
        notify_receive(&observer, &Turn::new("alice", GameState::default()));
        notify_send(&observer, &Decision::none());
        assert_eq!(observer.sends.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_outside_runtime_runs_inline() {
        let observer = Arc::new(Exploding::default());
        dispatch_send(Arc::clone(&observer), Decision::none());
        assert_eq!(observer.sends.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panic_message_from_string_payload() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("lost the board"));
        assert_eq!(panic_message(payload.as_ref()), "lost the board");
    }
}
