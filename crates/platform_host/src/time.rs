//! Timer host-service contracts.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use futures::channel::oneshot;

/// Object-safe boxed future used by [`TimerService`].
pub type TimerFuture = Pin<Box<dyn Future<Output = ()>>>;

/// Host service that resolves a future after a delay.
pub trait TimerService {
    /// Returns a future that completes after `delay_ms` milliseconds.
    fn sleep(&self, delay_ms: u32) -> TimerFuture;
}

#[derive(Debug, Clone, Copy, Default)]
/// Timer that resolves immediately, for hosts without a clock source.
pub struct ImmediateTimerService;

impl TimerService for ImmediateTimerService {
    fn sleep(&self, _delay_ms: u32) -> TimerFuture {
        Box::pin(async {})
    }
}

#[derive(Debug, Default)]
struct PendingTimers {
    timers: Vec<(u32, oneshot::Sender<()>)>,
}

#[derive(Debug, Clone, Default)]
/// Timer whose sleeps only complete when a test advances it.
pub struct ManualTimerService {
    pending: Rc<RefCell<PendingTimers>>,
}

impl ManualTimerService {
    /// Delays of the sleeps that have not fired yet, in request order.
    pub fn pending_delays(&self) -> Vec<u32> {
        self.pending
            .borrow()
            .timers
            .iter()
            .map(|(delay, _)| *delay)
            .collect()
    }

    /// Completes every pending sleep and returns how many fired.
    pub fn fire_all(&self) -> usize {
        let fired = std::mem::take(&mut self.pending.borrow_mut().timers);
        let count = fired.len();
        for (_, sender) in fired {
            let _ = sender.send(());
        }
        count
    }
}

impl TimerService for ManualTimerService {
    fn sleep(&self, delay_ms: u32) -> TimerFuture {
        let (sender, receiver) = oneshot::channel();
        self.pending.borrow_mut().timers.push((delay_ms, sender));
        Box::pin(async move {
            let _ = receiver.await;
        })
    }
}
