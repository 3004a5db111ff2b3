//! The engine seam
//!
//! Orchestration code talks to an [`AnimationEngine`] and never to a
//! concrete engine. Registrations return immediately; a [`Completion`]
//! resolves when the registered animation has finished playing forward.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use slotmap::new_key_type;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::scroll::ScrollTrigger;
use crate::timeline::Timeline;
use crate::tween::Tween;

new_key_type! {
    /// Handle to a registered scroll trigger
    pub struct TriggerId;
}

/// The engine went away before the animation finished
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("animation engine dropped before the animation completed")]
pub struct EngineClosed;

/// Resolves once when an animation finishes
///
/// An engine that has nothing to play (no targets, empty timeline) hands out
/// an already-resolved completion.
#[derive(Debug)]
#[must_use = "a completion does nothing unless awaited or dropped deliberately"]
pub struct Completion {
    rx: Option<oneshot::Receiver<()>>,
}

impl Completion {
    /// A completion that is already resolved
    pub fn ready() -> Self {
        Self { rx: None }
    }

    /// A completion paired with the sender that resolves it
    ///
    /// Dropping the sender without sending resolves the completion with
    /// [`EngineClosed`].
    pub fn channel() -> (oneshot::Sender<()>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx: Some(rx) })
    }

    /// A completion that reports [`EngineClosed`]
    pub fn closed() -> Self {
        let (_, completion) = Self::channel();
        completion
    }
}

impl Future for Completion {
    type Output = Result<(), EngineClosed>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let Some(rx) = this.rx.as_mut() else {
            return Poll::Ready(Ok(()));
        };
        match Pin::new(rx).poll(cx) {
            Poll::Ready(result) => {
                this.rx = None;
                Poll::Ready(result.map_err(|_| EngineClosed))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// What orchestration needs from an animation engine
pub trait AnimationEngine: Send + Sync {
    /// Play a tween once
    fn animate(&self, tween: Tween) -> Completion;

    /// Play a timeline once; the engine takes ownership
    fn play_timeline(&self, timeline: Timeline) -> Completion;

    /// Bind a tween's playback to scroll position
    ///
    /// Returns `None` when the trigger element or the tween's targets do not
    /// exist.
    fn register_scroll_trigger(&self, trigger: ScrollTrigger, tween: Tween) -> Option<TriggerId>;

    /// Feed the current scroll offset
    fn set_scroll(&self, offset: f32);
}

/// Shared engine handle
pub type SharedEngine = Arc<dyn AnimationEngine>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_completion_resolves() {
        assert_eq!(Completion::ready().await, Ok(()));
    }

    #[tokio::test]
    async fn test_channel_completion() {
        let (tx, completion) = Completion::channel();
        tx.send(()).unwrap();
        assert_eq!(completion.await, Ok(()));
    }

    #[tokio::test]
    async fn test_dropped_sender_reports_closed() {
        assert_eq!(Completion::closed().await, Err(EngineClosed));
    }
}
