//! Page controller
//!
//! Owns the `(data, loading, error)` state of each card and keeps it fresh.
//! Everything here is single-threaded: slots live in `RefCell`s and every
//! future is `!Send`. Borrows are never held across an `.await`.
//!
//! # Lifecycle
//! - [`PageController::mount`] fetches every source once, then polls each one
//!   on its own cadence in its own task
//! - [`MountedPage::unmount`] (or dropping the handle) cancels all of them;
//!   a fetch already in flight is dropped and its result discarded

use std::cell::{Ref, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{AbortHandle, LocalBoxFuture, abortable};
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt, select};

use crate::config::RefreshIntervals;
use crate::error::Result;

/// An upstream the page can poll
pub trait DataSource {
    type Data;

    fn fetch(&self) -> impl Future<Output = Result<Self::Data>>;
}

/// Waits for a period of time on the host's event loop
pub trait Timer {
    fn sleep(&self, period: Duration) -> LocalBoxFuture<'static, ()>;
}

/// State of one card
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for Slot<T> {
    /// Nothing fetched yet: loading, no data
    fn default() -> Self {
        Self {
            data: None,
            is_loading: true,
            error: None,
        }
    }
}

impl<T> Slot<T> {
    /// Apply the outcome of a fetch
    ///
    /// Failures keep the previous data; it stays hidden behind the error
    /// until the next success.
    pub fn settle(&mut self, outcome: Result<T>) {
        match outcome {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        self.is_loading = false;
    }
}

/// One fetch cycle against `slot`
pub async fn run_cycle<T>(slot: &RefCell<Slot<T>>, fetch: impl Future<Output = Result<T>>) {
    slot.borrow_mut().is_loading = true;
    let outcome = fetch.await;
    slot.borrow_mut().settle(outcome);
}

/// Weather, crypto and portfolio cards with their sources
pub struct PageController<W: DataSource, C: DataSource, P: DataSource> {
    weather_source: W,
    crypto_source: C,
    portfolio_source: P,
    intervals: RefreshIntervals,

    weather: RefCell<Slot<W::Data>>,
    crypto: RefCell<Slot<C::Data>>,
    portfolios: RefCell<Slot<P::Data>>,
}

impl<W, C, P> PageController<W, C, P>
where
    W: DataSource,
    C: DataSource,
    P: DataSource,
{
    pub fn new(weather: W, crypto: C, portfolios: P, intervals: RefreshIntervals) -> Self {
        Self {
            weather_source: weather,
            crypto_source: crypto,
            portfolio_source: portfolios,
            intervals,
            weather: RefCell::default(),
            crypto: RefCell::default(),
            portfolios: RefCell::default(),
        }
    }

    pub fn weather(&self) -> Ref<'_, Slot<W::Data>> {
        self.weather.borrow()
    }

    pub fn crypto(&self) -> Ref<'_, Slot<C::Data>> {
        self.crypto.borrow()
    }

    pub fn portfolios(&self) -> Ref<'_, Slot<P::Data>> {
        self.portfolios.borrow()
    }

    /// Manual refresh of the weather card
    ///
    /// Not guarded against a scheduled fetch in flight; whichever finishes
    /// last wins.
    pub async fn refresh_weather(&self) {
        run_cycle(&self.weather, self.weather_source.fetch()).await;
    }

    pub async fn refresh_crypto(&self) {
        run_cycle(&self.crypto, self.crypto_source.fetch()).await;
    }

    pub async fn refresh_portfolios(&self) {
        run_cycle(&self.portfolios, self.portfolio_source.fetch()).await;
    }
}

impl<W, C, P> PageController<W, C, P>
where
    W: DataSource + 'static,
    C: DataSource + 'static,
    P: DataSource + 'static,
{
    /// Start the initial fetches and the recurring polls
    ///
    /// `spawn` hands each task to the host executor (`spawn_local` on a
    /// single-threaded runtime).
    pub fn mount<T, S>(self: &Rc<Self>, timer: T, spawn: S) -> MountedPage
    where
        T: Timer + 'static,
        S: Fn(LocalBoxFuture<'static, ()>),
    {
        let timer: Rc<dyn Timer> = Rc::new(timer);
        let mut page = MountedPage { handles: Vec::new() };

        let weather = {
            let this = Rc::clone(self);
            move || {
                let this = Rc::clone(&this);
                async move { this.refresh_weather().await }
            }
        };
        let crypto = {
            let this = Rc::clone(self);
            move || {
                let this = Rc::clone(&this);
                async move { this.refresh_crypto().await }
            }
        };
        let portfolios = {
            let this = Rc::clone(self);
            move || {
                let this = Rc::clone(&this);
                async move { this.refresh_portfolios().await }
            }
        };

        page.start(&spawn, weather());
        page.start(&spawn, crypto());
        page.start(&spawn, portfolios());

        page.start(&spawn, poll_every(Rc::clone(&timer), self.intervals.weather, weather));
        page.start(&spawn, poll_every(Rc::clone(&timer), self.intervals.crypto, crypto));
        page.start(&spawn, poll_every(timer, self.intervals.portfolios, portfolios));

        page
    }
}

/// Start a refresh every `period`, whether or not earlier ones have finished
///
/// Refreshes run inside this task, so aborting it drops them too.
async fn poll_every<F, Fut>(timer: Rc<dyn Timer>, period: Duration, refresh: F)
where
    F: Fn() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut in_flight = FuturesUnordered::new();
    let mut tick = timer.sleep(period).fuse();
    loop {
        select! {
            () = tick => {
                in_flight.push(refresh());
                tick = timer.sleep(period).fuse();
            }
            () = in_flight.select_next_some() => {}
        }
    }
}

/// Handle to the tasks started by [`PageController::mount`]
#[must_use = "dropping the handle unmounts the page"]
pub struct MountedPage {
    handles: Vec<AbortHandle>,
}

impl MountedPage {
    fn start<S>(&mut self, spawn: &S, task: impl Future<Output = ()> + 'static)
    where
        S: Fn(LocalBoxFuture<'static, ()>),
    {
        let (task, handle) = abortable(task);
        self.handles.push(handle);
        spawn(task.map(|_| ()).boxed_local());
    }

    /// Cancel every scheduled and in-flight task
    pub fn unmount(mut self) {
        self.abort_all();
    }

    fn abort_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for MountedPage {
    fn drop(&mut self) {
        self.abort_all();
    }
}
