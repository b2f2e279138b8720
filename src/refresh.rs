use std::rc::Rc;

use crate::constants::DEFAULT_REFRESH_INTERVAL_MS;
#[allow(unused_imports)]
use crate::logging::log;

/// Source of repeating timers
pub trait IntervalScheduler {
    /// Dropping the handle cancels the timer
    type Handle;

    fn schedule(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Self::Handle;
}

/// Browser timers via `setInterval`
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooScheduler;

impl IntervalScheduler for GlooScheduler {
    type Handle = gloo_timers::callback::Interval;

    fn schedule(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Self::Handle {
        gloo_timers::callback::Interval::new(period_ms, tick)
    }
}

/// Auto-refresh period chosen in the interval selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshInterval(u32);

impl RefreshInterval {
    /// Interpret the selector value as milliseconds
    ///
    /// Anything that is not a positive number falls back to one minute.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|ms| ms.is_finite() && *ms >= 1.0)
            .map_or_else(Self::default, |ms| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let ms = ms.min(f64::from(u32::MAX)) as u32;
                Self(ms)
            })
    }

    #[must_use]
    pub fn from_millis(ms: u32) -> Self {
        if ms == 0 {
            Self::default()
        } else {
            Self(ms)
        }
    }

    #[must_use]
    pub fn as_millis(self) -> u32 {
        self.0
    }
}

impl Default for RefreshInterval {
    fn default() -> Self {
        Self(DEFAULT_REFRESH_INTERVAL_MS)
    }
}

/// Single repeating refresh of the train on display
///
/// At most one timer exists at a time: every change stops the running timer
/// before a new one is started.
pub struct AutoRefresh<T: IntervalScheduler> {
    scheduler: T,
    on_tick: Rc<dyn Fn(&str)>,
    enabled: bool,
    interval: RefreshInterval,
    active: Option<T::Handle>,
}

impl<T: IntervalScheduler> AutoRefresh<T> {
    /// `on_tick` receives the id of the train to refresh each period
    pub fn new(scheduler: T, on_tick: impl Fn(&str) + 'static) -> Self {
        Self {
            scheduler,
            on_tick: Rc::new(on_tick),
            enabled: false,
            interval: RefreshInterval::default(),
            active: None,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn interval(&self) -> RefreshInterval {
        self.interval
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn set_enabled(&mut self, enabled: bool, train_id: Option<&str>) {
        self.enabled = enabled;
        self.reconfigure(train_id);
    }

    pub fn set_interval(&mut self, interval: RefreshInterval, train_id: Option<&str>) {
        self.interval = interval;
        self.reconfigure(train_id);
    }

    /// Stop the current timer, then start a new one if enabled and a train is selected
    pub fn reconfigure(&mut self, train_id: Option<&str>) {
        self.stop();

        let Some(train_id) = train_id.filter(|_| self.enabled) else {
            return;
        };

        let on_tick = Rc::clone(&self.on_tick);
        let train_id = train_id.to_string();
        let period = self.interval.as_millis();
        log!("Auto-refresh of {train_id} every {period}ms");
        self.active = Some(
            self.scheduler
                .schedule(period, Box::new(move || on_tick(&train_id))),
        );
    }

    pub fn stop(&mut self) {
        // Dropping the handle cancels the timer
        self.active = None;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::IntervalScheduler;

    type Tick = Rc<RefCell<Box<dyn FnMut()>>>;

    /// Records scheduled periods and lets tests fire the live timers by hand
    #[derive(Clone, Default)]
    pub struct FakeScheduler {
        pub periods: Rc<RefCell<Vec<u32>>>,
        live: Rc<Cell<usize>>,
        latest: Rc<RefCell<Option<Tick>>>,
    }

    pub struct FakeHandle {
        live: Rc<Cell<usize>>,
        latest: Rc<RefCell<Option<Tick>>>,
        tick: Tick,
    }

    impl Drop for FakeHandle {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
            let mut latest = self.latest.borrow_mut();
            if latest.as_ref().is_some_and(|t| Rc::ptr_eq(t, &self.tick)) {
                *latest = None;
            }
        }
    }

    impl FakeScheduler {
        pub fn live_timers(&self) -> usize {
            self.live.get()
        }

        pub fn scheduled(&self) -> Vec<u32> {
            self.periods.borrow().clone()
        }

        /// Run the most recently scheduled timer once, if it is still live
        pub fn fire(&self) -> bool {
            let Some(tick) = self.latest.borrow().clone() else {
                return false;
            };
            let mut tick = tick.borrow_mut();
            (*tick)();
            true
        }
    }

    impl IntervalScheduler for FakeScheduler {
        type Handle = FakeHandle;

        fn schedule(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> FakeHandle {
            self.periods.borrow_mut().push(period_ms);
            self.live.set(self.live.get() + 1);
            let tick: Tick = Rc::new(RefCell::new(tick));
            *self.latest.borrow_mut() = Some(Rc::clone(&tick));
            FakeHandle {
                live: Rc::clone(&self.live),
                latest: Rc::clone(&self.latest),
                tick,
            }
        }
    }
}
