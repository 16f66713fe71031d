// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline-ordered timer storage.

use alloc::collections::BTreeMap;

use hashbrown::HashMap;

/// Stable handle for a scheduled timer.
///
/// Ids are never reused within a single [`TimerQueue`], so a stale id can be
/// safely passed to [`TimerQueue::cancel`] after its timer has fired.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Ordering key: deadline first, then scheduling order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct SlotKey {
    deadline: u64,
    seq: u64,
}

#[derive(Clone, Debug)]
struct Slot<T> {
    id: TimerId,
    interval: Option<u64>,
    payload: T,
}

/// A timer that came due in [`TimerQueue::pop_due`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    /// The id of the timer that fired.
    pub id: TimerId,
    /// The deadline the timer was scheduled for.
    ///
    /// This may be earlier than the `now` passed to `pop_due` when the host
    /// advances time in large steps.
    pub deadline: u64,
    /// The payload supplied when the timer was scheduled.
    pub payload: T,
    /// `true` if the timer is still scheduled for its next interval.
    pub repeating: bool,
}

/// A deterministic queue of one-shot and repeating timers.
///
/// See the [crate documentation](crate) for an overview.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    slots: BTreeMap<SlotKey, Slot<T>>,
    keys: HashMap<TimerId, SlotKey>,
    next_id: u64,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            keys: HashMap::new(),
            next_id: 0,
            next_seq: 0,
        }
    }

    /// Returns the number of scheduled timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no timers are scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Schedules a one-shot timer firing at `deadline`.
    pub fn schedule_at(&mut self, deadline: u64, payload: T) -> TimerId {
        self.insert(deadline, None, payload)
    }

    /// Schedules a one-shot timer firing `delay` milliseconds after `now`.
    pub fn schedule_after(&mut self, now: u64, delay: u64, payload: T) -> TimerId {
        self.insert(now.saturating_add(delay), None, payload)
    }

    /// Schedules a repeating timer first firing at `first_deadline`, then every
    /// `interval` milliseconds.
    ///
    /// An `interval` of zero is treated as one millisecond so that a repeating
    /// timer can never starve the queue.
    pub fn schedule_repeating(&mut self, first_deadline: u64, interval: u64, payload: T) -> TimerId {
        self.insert(first_deadline, Some(interval.max(1)), payload)
    }

    /// Cancels a timer, returning its payload if it was still scheduled.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let key = self.keys.remove(&id)?;
        self.slots.remove(&key).map(|slot| slot.payload)
    }

    /// Returns `true` if `id` is still scheduled.
    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.keys.contains_key(&id)
    }

    /// Returns the next deadline of `id`, if it is still scheduled.
    #[must_use]
    pub fn deadline_of(&self, id: TimerId) -> Option<u64> {
        self.keys.get(&id).map(|key| key.deadline)
    }

    /// Returns the earliest scheduled deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.slots.first_key_value().map(|(key, _)| key.deadline)
    }

    /// Removes every scheduled timer.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.keys.clear();
    }

    fn insert(&mut self, deadline: u64, interval: Option<u64>, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let key = self.next_key(deadline);
        self.slots.insert(
            key,
            Slot {
                id,
                interval,
                payload,
            },
        );
        self.keys.insert(id, key);
        id
    }

    fn next_key(&mut self, deadline: u64) -> SlotKey {
        let seq = self.next_seq;
        self.next_seq += 1;
        SlotKey { deadline, seq }
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Pops the earliest timer whose deadline is at or before `now`.
    ///
    /// Call this in a loop until it returns `None` to drain everything that is
    /// due. Repeating timers are rescheduled before being returned, so a loop
    /// with a large `now` observes every missed interval in order.
    pub fn pop_due(&mut self, now: u64) -> Option<Fired<T>> {
        let key = *self.slots.first_key_value()?.0;
        if key.deadline > now {
            return None;
        }
        let slot = self.slots.remove(&key)?;
        let id = slot.id;
        match slot.interval {
            Some(interval) => {
                let next_deadline = key.deadline.saturating_add(interval);
                let payload = slot.payload.clone();
                // Saturated: the timer can never fire again.
                let repeating = next_deadline > key.deadline;
                if repeating {
                    let next = self.next_key(next_deadline);
                    self.slots.insert(next, slot);
                    self.keys.insert(id, next);
                } else {
                    self.keys.remove(&id);
                }
                Some(Fired {
                    id,
                    deadline: key.deadline,
                    payload,
                    repeating,
                })
            }
            None => {
                self.keys.remove(&id);
                Some(Fired {
                    id,
                    deadline: key.deadline,
                    payload: slot.payload,
                    repeating: false,
                })
            }
        }
    }
}
