use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// 1 Hz position poll while a session is ready.
    ProgressPoll,
    /// Coarse quality and suppression re-assertion while ready.
    QualityCheck,
    /// Deferred reopen after a layout flip.
    Reopen,
}

/// A timer that came due during `fire_due`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub kind: TimerKind,
    /// Session serial that scheduled the timer, if any.
    pub owner: Option<u64>,
}

#[derive(Debug)]
struct TimerEntry {
    id: TimerId,
    kind: TimerKind,
    owner: Option<u64>,
    due: Instant,
    period: Option<Duration>,
}

/// Cooperative timers for the single-threaded UI loop. Nothing runs on its
/// own: the owner calls `fire_due` once per loop turn.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<TimerEntry>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn every(&mut self, kind: TimerKind, period: Duration, now: Instant, owner: Option<u64>) -> TimerId {
        self.insert(kind, now + period, Some(period), owner)
    }

    pub fn once(&mut self, kind: TimerKind, delay: Duration, now: Instant, owner: Option<u64>) -> TimerId {
        self.insert(kind, now + delay, None, owner)
    }

    fn insert(&mut self, kind: TimerKind, due: Instant, period: Option<Duration>, owner: Option<u64>) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.entries.push(TimerEntry { id, kind, owner, due, period });
        id
    }

    pub fn cancel_owned_by(&mut self, owner: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.owner != Some(owner));
        before - self.entries.len()
    }

    pub fn cancel_kind(&mut self, kind: TimerKind) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.kind != kind);
        before - self.entries.len()
    }

    #[cfg(test)]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    #[cfg(test)]
    pub fn active(&self, kind: TimerKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }

    /// Earliest pending deadline, used to schedule the next repaint.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Collects every timer due at `now`, in deadline order. Repeating timers
    /// are rescheduled from `now` (missed periods are not replayed), one-shot
    /// timers are removed.
    pub fn fire_due(&mut self, now: Instant) -> Vec<FiredTimer> {
        let mut fired: Vec<(Instant, FiredTimer)> = Vec::new();

        self.entries.retain_mut(|entry| {
            if entry.due > now {
                return true;
            }
            fired.push((
                entry.due,
                FiredTimer {
                    id: entry.id,
                    kind: entry.kind,
                    owner: entry.owner,
                },
            ));
            match entry.period {
                Some(period) => {
                    entry.due = now + period;
                    true
                }
                None => false,
            }
        });

        fired.sort_by_key(|(due, timer)| (*due, timer.id.0));
        fired.into_iter().map(|(_, timer)| timer).collect()
    }
}
