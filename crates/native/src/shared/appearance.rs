use std::rc::Rc;
use std::time::Duration;

use app_core::platform::AppearanceSource;
use app_core::subscription::Subscription;
use tokio::time::MissedTickBehavior;

/// Whether the desktop currently prefers a dark theme.
pub fn os_is_dark() -> bool {
    matches!(dark_light::detect(), dark_light::Mode::Dark)
}

/// OS appearance by polling a detector.
///
/// Desktops don't expose a portable change event, so `subscribe` starts a
/// local task that re-checks every `interval` and reports only flips.
pub struct PollingAppearance {
    detector: Rc<dyn Fn() -> bool>,
    interval: Duration,
}

impl PollingAppearance {
    pub fn new(interval: Duration) -> Self {
        Self::with_detector(interval, os_is_dark)
    }

    /// Overrides the detector, e.g. to force a mode in tests.
    pub fn with_detector(interval: Duration, detector: impl Fn() -> bool + 'static) -> Self {
        Self {
            detector: Rc::new(detector),
            interval,
        }
    }
}

impl AppearanceSource for PollingAppearance {
    fn is_dark(&self) -> bool {
        (self.detector)()
    }

    fn subscribe(&self, on_change: Box<dyn Fn(bool)>) -> Subscription {
        let detector = self.detector.clone();
        let interval = self.interval;

        let handle = tokio::task::spawn_local(async move {
            let mut last = detector();
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let now = detector();
                if now != last {
                    tracing::debug!("OS appearance changed, dark = {}", now);
                    last = now;
                    on_change(now);
                }
            }
        });

        Subscription::new(move || handle.abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[tokio::test(start_paused = true)]
    async fn test_reports_flips_until_dropped() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let dark = Rc::new(Cell::new(false));
                let source = PollingAppearance::with_detector(Duration::from_millis(100), {
                    let dark = dark.clone();
                    move || dark.get()
                });

                let seen = Rc::new(RefCell::new(Vec::new()));
                let subscription = source.subscribe(Box::new({
                    let seen = seen.clone();
                    move |is_dark| seen.borrow_mut().push(is_dark)
                }));

                tokio::time::sleep(Duration::from_millis(250)).await;
                assert!(seen.borrow().is_empty());

                dark.set(true);
                tokio::time::sleep(Duration::from_millis(150)).await;
                assert_eq!(*seen.borrow(), vec![true]);
                assert!(source.is_dark());

                drop(subscription);
                dark.set(false);
                tokio::time::sleep(Duration::from_millis(500)).await;
                assert_eq!(*seen.borrow(), vec![true]);
            })
            .await;
    }
}
