//! Playback clock: one-second ticks while playing, rollover at the end of a
//! track, and the scoped timer task that drives it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Time moved forward; carries the new time.
    Advanced(u32),
    /// The track is over: advance to the next one and restart at zero.
    Rollover,
}

pub struct PlaybackClock;

impl PlaybackClock {
    /// Advance `time` by one second, or roll over when that would pass
    /// `duration`. Time may equal `duration` for exactly one tick.
    pub fn tick(time: u32, duration: u32) -> Tick {
        if time >= duration {
            Tick::Rollover
        } else {
            Tick::Advanced(time + 1)
        }
    }

    /// Seek target clamped to what the progress control allows.
    pub fn seek(target: u32, duration: u32) -> u32 {
        target.min(duration)
    }
}

/// A periodic timer bound to its owner's scope.
///
/// Every `period` it sends a clone of `event` into the channel. The task is
/// aborted when the `Ticker` is dropped and it stops on its own once the
/// receiver is gone, so no tick outlives the loop that asked for it.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn<E>(period: Duration, tx: mpsc::Sender<E>, event: E) -> Self
    where
        E: Clone + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(event.clone()).await.is_err() {
                    tracing::debug!("tick receiver closed, stopping ticker");
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Keep `slot` in step with the play flag: start a ticker when playing
/// begins, drop it (cancelling the task) when playback stops.
pub fn sync_ticker<E>(slot: &mut Option<Ticker>, playing: bool, period: Duration, tx: &mpsc::Sender<E>, event: E)
where
    E: Clone + Send + 'static,
{
    match (playing, slot.is_some()) {
        (true, false) => *slot = Some(Ticker::spawn(period, tx.clone(), event)),
        (false, true) => *slot = None,
        _ => {}
    }
}

/// Playback ticker that numbers each run, so ticks a cancelled run left in
/// the channel can be told apart from live ones.
#[derive(Debug, Default)]
pub struct PlaybackTimer {
    ticker: Option<Ticker>,
    generation: u64,
}

impl PlaybackTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start or stop with the play flag. `event` builds the tick message for
    /// a run from its generation.
    pub fn sync<E, F>(&mut self, playing: bool, period: Duration, tx: &mpsc::Sender<E>, event: F)
    where
        E: Clone + Send + 'static,
        F: FnOnce(u64) -> E,
    {
        if playing && self.ticker.is_none() {
            self.generation += 1;
        }
        sync_ticker(&mut self.ticker, playing, period, tx, event(self.generation));
    }

    /// Whether a tick stamped with `generation` came from the running ticker.
    pub fn accepts(&self, generation: u64) -> bool {
        self.ticker.is_some() && generation == self.generation
    }
}
