//! Shared fixtures for the integration tests: instrumented sources and
//! a pure program runner built on the public stepping API.

// Not every test binary uses every fixture.
#![allow(dead_code)]

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use rivulet_wye::event::{Cause, EarlyCause, ReceiveY};
use rivulet_wye::program::{Head, Stepped, Wye};
use rivulet_wye::source::{BoxSource, Pull, Source};

/// Counters observing one producer chain across its resumptions.
#[derive(Default)]
pub struct Probe {
    pub pulls: AtomicUsize,
    pub cancels: AtomicUsize,
    pub disposals: AtomicUsize,
    pub completions: AtomicUsize,
}

impl Probe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// How many times this producer chain was forcibly retired.
    pub fn retired(&self) -> usize {
        self.cancels.load(Ordering::SeqCst) + self.disposals.load(Ordering::SeqCst)
    }
}

/// Wrap a source so every pull, cancellation, disposal and completion is
/// counted on `probe`.
pub fn tracked<A: Send + 'static>(source: impl Source<A>, probe: Arc<Probe>) -> Tracked<A> {
    Tracked {
        inner: Box::new(source),
        probe,
    }
}

pub struct Tracked<A: Send + 'static> {
    inner: BoxSource<A>,
    probe: Arc<Probe>,
}

/// Counts a cancelled (dropped mid-pull) read unless disarmed.
struct CancelGuard {
    probe: Arc<Probe>,
    armed: bool,
}

impl CancelGuard {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        if self.armed {
            self.probe.cancels.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl<A: Send + 'static> Source<A> for Tracked<A> {
    async fn pull(self: Box<Self>) -> Pull<A> {
        let probe = Arc::clone(&self.probe);
        probe.pulls.fetch_add(1, Ordering::SeqCst);
        let guard = CancelGuard {
            probe: Arc::clone(&probe),
            armed: true,
        };
        let result = self.inner.pull().await;
        guard.disarm();
        match result {
            Pull::Batch(values, next) => Pull::Batch(
                values,
                Box::new(Tracked { inner: next, probe }),
            ),
            Pull::Done(cause) => {
                probe.completions.fetch_add(1, Ordering::SeqCst);
                Pull::Done(cause)
            }
        }
    }

    async fn dispose(self: Box<Self>, cause: EarlyCause) {
        self.probe.disposals.fetch_add(1, Ordering::SeqCst);
        self.inner.dispose(cause).await;
    }
}

/// Shared read-ahead observer for a pair of sources.
#[derive(Default)]
pub struct Lead {
    left_started: AtomicUsize,
    right_started: AtomicUsize,
    max_lead: AtomicUsize,
}

impl Lead {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn max_lead(&self) -> usize {
        self.max_lead.load(Ordering::SeqCst)
    }
}

/// Wrap one side of a pair so the left side's read-ahead over the right
/// is recorded.
pub fn lead_tracked<A: Send + 'static>(
    source: impl Source<A>,
    lead: Arc<Lead>,
    is_left: bool,
) -> LeadSource<A> {
    LeadSource {
        inner: Box::new(source),
        lead,
        is_left,
    }
}

pub struct LeadSource<A: Send + 'static> {
    inner: BoxSource<A>,
    lead: Arc<Lead>,
    is_left: bool,
}

#[async_trait]
impl<A: Send + 'static> Source<A> for LeadSource<A> {
    async fn pull(self: Box<Self>) -> Pull<A> {
        let lead = Arc::clone(&self.lead);
        let is_left = self.is_left;
        if is_left {
            let lefts = lead.left_started.fetch_add(1, Ordering::SeqCst) + 1;
            let rights = lead.right_started.load(Ordering::SeqCst);
            let current = lefts.saturating_sub(rights);
            lead.max_lead.fetch_max(current, Ordering::SeqCst);
        } else {
            lead.right_started.fetch_add(1, Ordering::SeqCst);
        }
        match self.inner.pull().await {
            Pull::Batch(values, next) => Pull::Batch(
                values,
                Box::new(LeadSource {
                    inner: next,
                    lead,
                    is_left,
                }),
            ),
            Pull::Done(cause) => Pull::Done(cause),
        }
    }
}

/// Poll `condition` until it holds or a second passes.
pub async fn wait_until(condition: impl Fn() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

/// Step a program to completion outside the driver, answering leftover
/// demands with a kill, and collect everything it emits.
pub fn drain_pure<L, R, O>(program: Wye<L, R, O>) -> (Vec<O>, Cause)
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    let mut out = Vec::new();
    let mut cur = program;
    loop {
        match cur.step() {
            Stepped::Step(step) => {
                let (head, cont) = step.into_parts();
                match head {
                    Head::Emit(values) => {
                        out.extend(values);
                        cur = cont.resume();
                    }
                    Head::AwaitL(recv) => cur = cont.prepend(recv(Err(EarlyCause::Kill))),
                    Head::AwaitR(recv) => cur = cont.prepend(recv(Err(EarlyCause::Kill))),
                    Head::AwaitBoth(recv) => {
                        cur = cont.prepend(recv(ReceiveY::HaltL(Cause::Kill)));
                    }
                }
            }
            Stepped::Done(cause) => return (out, cause),
        }
    }
}
