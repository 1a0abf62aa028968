//! Per-list frame loop.

use log::{debug, warn};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::components::list::{List, ListRecord};
use crate::error::extract_panic_message;

/// Handle to a running frame loop.
///
/// The loop ends when [`stop`](FrameLoop::stop) is called, when the list is
/// destroyed, or when the list's own cancellation token fires.
#[derive(Debug)]
pub struct FrameLoop {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl FrameLoop {
    /// Ask the loop to stop after the current frame.
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the loop to exit.
    pub async fn join(self) {
        if let Err(e) = self.handle.await
            && e.is_panic()
        {
            warn!(
                "frame loop panicked: {}",
                extract_panic_message(&*e.into_panic())
            );
        }
    }
}

/// Call [`List::frame`] every [`Timing::frame_interval`](crate::prelude::Timing)
/// on a tokio task.
///
/// Must be called from within a tokio runtime.
pub fn spawn_frame_loop<R: ListRecord>(list: &List<R>) -> FrameLoop {
    let token = list.cancellation_token().child_token();
    let period = list.timing().frame_interval;
    let list = list.clone();
    let cancel = token.clone();

    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        debug!("{}: frame loop started", list.id());
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    if list.is_destroyed() {
                        break;
                    }
                    list.frame(Instant::now().into_std());
                }
            }
        }
        debug!("{}: frame loop stopped", list.id());
    });

    FrameLoop { token, handle }
}
