//! The driver actor: interprets a merge program against two producers.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, debug_span, trace, Instrument};

// Layer 3: Internal module imports
use crate::event::{Cause, EarlyCause, StreamError};
use crate::program::step::{Head, Stepped};
use crate::program::wye::Wye;
use crate::source::{BoxSource, Pull, Source};
use crate::transform::{disconnect_l, disconnect_r, feed_l, feed_r, halt_l, halt_r};
use crate::util::WyeId;

use super::config::DriverConfig;
use super::error::DriverFault;
use super::handle::Outlet;
use super::message::{BatchReply, DriverMsg};
use super::side::SideState;

/// A running merge pipeline: one program, two producers, one actor.
///
/// All fields are owned by the spawned actor task; nothing is shared.
/// The consumer talks to the actor exclusively through the [`Outlet`]
/// returned at spawn time.
///
/// # Example
///
/// ```rust,ignore
/// use rivulet_wye::combinator::merge;
/// use rivulet_wye::driver::WyeDriver;
/// use rivulet_wye::source::from_iter;
///
/// # async fn example() {
/// let outlet = WyeDriver::spawn(
///     merge::<i32>(),
///     from_iter(vec![1, 2, 3]),
///     from_iter(vec![10, 20]),
/// );
/// let values = outlet.collect().await.unwrap();
/// assert_eq!(values.len(), 5);
/// # }
/// ```
pub struct WyeDriver<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    id: WyeId,
    wye: Option<Wye<L, R, O>>,
    left: SideState<L>,
    right: SideState<R>,
    out: Option<oneshot::Sender<BatchReply<O>>>,
    down_done: Option<oneshot::Sender<()>>,
    closing: bool,
    left_bias: bool,
    tx: mpsc::Sender<DriverMsg<L, R, O>>,
}

impl<L, R, O> WyeDriver<L, R, O>
where
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    /// Spawn a driver with default configuration. Must be called from
    /// within a tokio runtime.
    pub fn spawn(
        wye: Wye<L, R, O>,
        left: impl Source<L>,
        right: impl Source<R>,
    ) -> Outlet<O> {
        Self::spawn_with_config(DriverConfig::default(), wye, left, right)
    }

    /// Spawn a driver with explicit configuration.
    pub fn spawn_with_config(
        config: DriverConfig,
        wye: Wye<L, R, O>,
        left: impl Source<L>,
        right: impl Source<R>,
    ) -> Outlet<O> {
        let (tx, rx) = mpsc::channel(config.mailbox_capacity.max(1));
        let id = WyeId::new();
        let driver = Self {
            id,
            wye: Some(wye),
            left: SideState::Idle(Box::new(left)),
            right: SideState::Idle(Box::new(right)),
            out: None,
            down_done: None,
            closing: false,
            left_bias: true,
            tx: tx.clone(),
        };
        let span = debug_span!("wye_driver", id = %id);
        tokio::spawn(driver.run(rx).instrument(span));
        Outlet::new(Box::new(tx))
    }

    async fn run(mut self, mut rx: mpsc::Receiver<DriverMsg<L, R, O>>) {
        debug!(id = %self.id, "driver started");
        while let Some(msg) = rx.recv().await {
            match msg {
                DriverMsg::ReadyL(pull) => self.on_ready_l(pull),
                DriverMsg::ReadyR(pull) => self.on_ready_r(pull),
                DriverMsg::Get(reply) => self.on_get(reply),
                DriverMsg::DownDone(ack) => self.on_down_done(ack),
            }
            if self.retired() {
                break;
            }
        }
        debug!("driver stopped");
    }

    /// The actor can go away once cleanup has fully settled.
    fn retired(&self) -> bool {
        self.closing
            && self.down_done.is_none()
            && self.left.is_done()
            && self.right.is_done()
    }

    fn on_ready_l(&mut self, pull: Pull<L>) {
        match pull {
            Pull::Batch(values, next) => {
                trace!(count = values.len(), "left batch");
                self.left = SideState::Idle(next);
                if let Some(wye) = self.wye.take() {
                    self.wye = Some(feed_l(values, wye));
                }
            }
            Pull::Done(cause) => {
                debug!(%cause, "left done");
                self.left = SideState::Done(cause.clone());
                if let Some(wye) = self.wye.take() {
                    self.wye = Some(halt_l(cause, wye));
                }
            }
        }
        self.run_step();
    }

    fn on_ready_r(&mut self, pull: Pull<R>) {
        match pull {
            Pull::Batch(values, next) => {
                trace!(count = values.len(), "right batch");
                self.right = SideState::Idle(next);
                if let Some(wye) = self.wye.take() {
                    self.wye = Some(feed_r(values, wye));
                }
            }
            Pull::Done(cause) => {
                debug!(%cause, "right done");
                self.right = SideState::Done(cause.clone());
                if let Some(wye) = self.wye.take() {
                    self.wye = Some(halt_r(cause, wye));
                }
            }
        }
        self.run_step();
    }

    fn on_get(&mut self, reply: oneshot::Sender<BatchReply<O>>) {
        if self.closing {
            let _ = reply.send(Err(Cause::Kill));
            return;
        }
        if self.out.is_some() {
            let _ = reply.send(Err(Cause::Error(StreamError::new(
                DriverFault::DownstreamBusy,
            ))));
            return;
        }
        self.out = Some(reply);
        self.run_step();
    }

    fn on_down_done(&mut self, ack: oneshot::Sender<()>) {
        if self.closing {
            let _ = ack.send(());
            return;
        }
        debug!("downstream done, disconnecting");
        self.closing = true;
        self.down_done = Some(ack);
        if let Some(reply) = self.out.take() {
            let _ = reply.send(Err(Cause::Kill));
        }
        if let Some(wye) = self.wye.take() {
            // Disconnect both sides, then abort: the kill resolves any
            // pending emit's continuations (feeds suspended mid-batch
            // included) with an early cause so their cleanup runs.
            self.wye = Some(
                disconnect_l(EarlyCause::Kill, disconnect_r(EarlyCause::Kill, wye)).kill(),
            );
        }
        self.run_step();
    }

    /// The step loop: reduce the program and act on its head until it
    /// suspends on demand, on a consumer that is not asking, or halts.
    fn run_step(&mut self) {
        loop {
            let Some(wye) = self.wye.take() else {
                return;
            };
            match wye.step() {
                Stepped::Step(step) => {
                    let (head, cont) = step.into_parts();
                    match head {
                        Head::Emit(values) if values.is_empty() => {
                            self.wye = Some(cont.resume());
                        }
                        Head::Emit(values) => {
                            if self.closing {
                                // Downstream is gone; cleanup discards
                                // output.
                                trace!(count = values.len(), "discarding batch");
                                self.wye = Some(cont.resume());
                            } else if let Some(reply) = self.out.take() {
                                trace!(count = values.len(), "delivering batch");
                                let _ = reply.send(Ok(values));
                                self.wye = Some(cont.resume());
                            } else {
                                self.wye = Some(cont.prepend(Wye::Emit(values)));
                                return;
                            }
                        }
                        Head::AwaitL(recv) => {
                            self.left_bias = false;
                            self.start_left();
                            self.wye = Some(cont.prepend(Wye::AwaitL(recv)));
                            return;
                        }
                        Head::AwaitR(recv) => {
                            self.left_bias = true;
                            self.start_right();
                            self.wye = Some(cont.prepend(Wye::AwaitR(recv)));
                            return;
                        }
                        Head::AwaitBoth(recv) => {
                            if self.left_bias {
                                self.start_left();
                                self.start_right();
                            } else {
                                self.start_right();
                                self.start_left();
                            }
                            self.left_bias = !self.left_bias;
                            self.wye = Some(cont.prepend(Wye::AwaitBoth(recv)));
                            return;
                        }
                    }
                }
                Stepped::Done(cause) => {
                    debug!(%cause, "program halted");
                    kill_side(&mut self.left, &self.tx, DriverMsg::ReadyL);
                    kill_side(&mut self.right, &self.tx, DriverMsg::ReadyR);
                    let settled = self.left.is_done() && self.right.is_done();
                    self.wye = Some(Wye::Halt(cause.clone()));
                    if settled {
                        if self.closing {
                            if let Some(ack) = self.down_done.take() {
                                let _ = ack.send(());
                            }
                        } else if let Some(reply) = self.out.take() {
                            let _ = reply.send(Err(cause));
                        }
                    }
                    return;
                }
            }
        }
    }

    fn start_left(&mut self) {
        start_read(&mut self.left, &self.tx, DriverMsg::ReadyL);
    }

    fn start_right(&mut self) {
        start_read(&mut self.right, &self.tx, DriverMsg::ReadyR);
    }
}

/// Launch a read on an idle side. Reading and done sides are left
/// untouched: one read per side at a time, and demand on a finished side
/// resolves through the program, not the producer.
fn start_read<A, L, R, O>(
    side: &mut SideState<A>,
    tx: &mpsc::Sender<DriverMsg<L, R, O>>,
    wrap: fn(Pull<A>) -> DriverMsg<L, R, O>,
) where
    A: Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    if !side.is_idle() {
        return;
    }
    match std::mem::replace(side, SideState::Reading(None)) {
        SideState::Idle(source) => {
            let (cancel_tx, cancel_rx) = oneshot::channel();
            *side = SideState::Reading(Some(cancel_tx));
            let tx = tx.clone();
            tokio::spawn(async move {
                let pull = read_or_cancel(source, cancel_rx).await;
                let _ = tx.send(wrap(pull)).await;
            });
        }
        other => *side = other,
    }
}

/// Race the pull against its cancel handle. Losing the race drops the
/// in-flight pull future, which releases the producer's resources.
async fn read_or_cancel<A: Send + 'static>(
    source: BoxSource<A>,
    cancel: oneshot::Receiver<EarlyCause>,
) -> Pull<A> {
    tokio::select! {
        pull = source.pull() => pull,
        cause = cancel => Pull::Done(cause.unwrap_or(EarlyCause::Kill).into_cause()),
    }
}

/// Retire a side that is not yet done: cancel an in-flight read exactly
/// once, or dispose an idle resumption so its finalizers run. The side
/// reports back through the mailbox and reaches `Done` like any other
/// completion.
fn kill_side<A, L, R, O>(
    side: &mut SideState<A>,
    tx: &mpsc::Sender<DriverMsg<L, R, O>>,
    wrap: fn(Pull<A>) -> DriverMsg<L, R, O>,
) where
    A: Send + 'static,
    L: Send + 'static,
    R: Send + 'static,
    O: Send + 'static,
{
    match side {
        SideState::Done(_) => {}
        SideState::Reading(cancel) => {
            if let Some(handle) = cancel.take() {
                let _ = handle.send(EarlyCause::Kill);
            }
        }
        SideState::Idle(_) => {
            let SideState::Idle(source) = std::mem::replace(side, SideState::Reading(None))
            else {
                return;
            };
            let tx = tx.clone();
            tokio::spawn(async move {
                source.dispose(EarlyCause::Kill).await;
                let _ = tx.send(wrap(Pull::Done(Cause::Kill))).await;
            });
        }
    }
}
