//! Navigation transition results.
//!
//! Every navigation and load request returns a [`Transition`]: a future
//! resolving once the destination panel's assets finished loading, plus a
//! flag telling whether the request actually changed the current index.
//! Awaiting a transition is optional. Class bookkeeping runs on the host's
//! executor, so dropping the transition loses nothing.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::LocalBoxFuture;

use crate::error::CarouselError;

enum State {
    Done(Result<(), CarouselError>),
    Pending(LocalBoxFuture<'static, Result<(), CarouselError>>),
}

/// The outcome of a navigation or load request.
///
/// Resolves with `Ok(())` when the destination's asset fan-in settles
/// (failed assets count as settled) and with `Err` when the request was
/// rejected outright. Remains ready once resolved.
pub struct Transition {
    changed: bool,
    state: State,
}

impl Transition {
    /// A request that finished synchronously (no-op or nothing to load).
    pub(crate) fn settled(changed: bool) -> Self {
        Self {
            changed,
            state: State::Done(Ok(())),
        }
    }

    /// A request rejected without touching any state.
    pub(crate) fn rejected(error: CarouselError) -> Self {
        Self {
            changed: false,
            state: State::Done(Err(error)),
        }
    }

    /// A request whose asset loading is still in flight.
    pub(crate) fn loading(
        changed: bool,
        future: LocalBoxFuture<'static, Result<(), CarouselError>>,
    ) -> Self {
        Self {
            changed,
            state: State::Pending(future),
        }
    }

    /// Whether the request moved the current index.
    pub fn changed(&self) -> bool {
        self.changed
    }
}

impl Future for Transition {
    type Output = Result<(), CarouselError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            State::Done(result) => Poll::Ready(result.clone()),
            State::Pending(future) => match future.as_mut().poll(cx) {
                Poll::Ready(result) => {
                    this.state = State::Done(result.clone());
                    Poll::Ready(result)
                }
                Poll::Pending => Poll::Pending,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use futures::channel::oneshot;

    #[test]
    fn test_settled_resolves_immediately() {
        let transition = Transition::settled(true);
        assert!(transition.changed());
        assert_eq!(transition.now_or_never(), Some(Ok(())));
    }

    #[test]
    fn test_noop_reports_unchanged() {
        let transition = Transition::settled(false);
        assert!(!transition.changed());
    }

    #[test]
    fn test_rejected_carries_error() {
        let transition = Transition::rejected(CarouselError::IndexOutOfRange { index: 5, count: 2 });
        assert!(!transition.changed());
        assert_eq!(
            transition.now_or_never(),
            Some(Err(CarouselError::IndexOutOfRange { index: 5, count: 2 }))
        );
    }

    #[test]
    fn test_pending_resolves_after_signal() {
        let (tx, rx) = oneshot::channel::<()>();
        let mut transition = Transition::loading(true, rx.map(|_| Ok(())).boxed_local());

        assert!(transition.changed());
        assert_eq!((&mut transition).now_or_never(), None);

        tx.send(()).unwrap();
        assert_eq!((&mut transition).now_or_never(), Some(Ok(())));
        // stays ready after resolving
        assert_eq!(transition.now_or_never(), Some(Ok(())));
    }
}
