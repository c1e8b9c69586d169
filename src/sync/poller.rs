use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

/// Liveness flag of one view's repeating refresh task.
///
/// Clones share the flag; cancelling any clone stops the loop before its next
/// tick.
#[derive(Debug, Clone)]
pub struct PollHandle {
    alive: Rc<Cell<bool>>,
}

impl Default for PollHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl PollHandle {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// Returns `true` only for the call that actually cancelled the poll.
    pub fn cancel(&self) -> bool {
        self.alive.replace(false)
    }
}

/// Runs `tick` now and then once per `interval` until `handle` is cancelled.
pub async fn run_poll<F, Fut>(handle: PollHandle, interval: Duration, mut tick: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    while handle.is_alive() {
        tick().await;
        if !handle.is_alive() {
            break;
        }
        super::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::task::LocalSet;

    #[test]
    fn cancel_succeeds_exactly_once() {
        let handle = PollHandle::new();
        let shared = handle.clone();
        assert!(shared.cancel());
        assert!(!handle.cancel());
        assert!(!handle.is_alive());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_poll_issues_no_further_ticks() {
        let handle = PollHandle::new();
        let ticks = Rc::new(Cell::new(0u32));

        LocalSet::new()
            .run_until(async {
                let counter = ticks.clone();
                tokio::task::spawn_local(run_poll(
                    handle.clone(),
                    Duration::from_millis(3000),
                    move || {
                        let counter = counter.clone();
                        async move { counter.set(counter.get() + 1) }
                    },
                ));

                // Ticks at 0s, 3s and 6s.
                tokio::time::sleep(Duration::from_millis(6500)).await;
                assert_eq!(ticks.get(), 3);

                assert!(handle.cancel());
                tokio::time::sleep(Duration::from_millis(30_000)).await;
                assert_eq!(ticks.get(), 3);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn cancelling_from_inside_a_tick_stops_the_loop() {
        let handle = PollHandle::new();
        let ticks = Rc::new(Cell::new(0u32));
        let counter = ticks.clone();
        let inner = handle.clone();

        run_poll(handle.clone(), Duration::from_millis(3000), move || {
            let counter = counter.clone();
            let inner = inner.clone();
            async move {
                counter.set(counter.get() + 1);
                if counter.get() == 2 {
                    inner.cancel();
                }
            }
        })
        .await;

        assert_eq!(ticks.get(), 2);
    }
}
