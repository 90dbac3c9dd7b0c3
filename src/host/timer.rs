//! Deferred work.
//!
//! Delayed effects are plain [`Task`] values handed to a [`Timer`]. The host
//! hands each task back to
//! [`InteractionController::run_task`](crate::controller::InteractionController::run_task)
//! when it fires, so nothing holds a callback into the controller and tests can
//! drive time with [`SimulatedTimer`].

use std::time::Duration;

use crate::surface::{NodeId, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

/// Work the controller performs when a timer fires.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Finish a furnishing's entrance transition.
    Reveal(NodeId),
    /// Drop a node once its exit transition is over. Tolerates the node being gone.
    RemoveNode(NodeId),
    /// Start fading a mascot message.
    FadeMessage(NodeId),
    /// Stop the mascot bounce animation.
    EndBounce,
    /// Stop the mascot wander transition.
    EndWander,
    /// Stop a layer pulse.
    EndPulse(NodeId),
    /// Emit one sparkle at a random point inside `area` of `parent`.
    Sparkle { parent: NodeId, area: Size },
    /// Put a button's label back after transient feedback.
    RestoreButton { node: NodeId, label: String },
    /// Startup greeting.
    Welcome,
    /// Idle relocation of the mascot.
    Wander,
    /// Probability-gated idle reaction.
    Chatter,
}

/// Host timer capability.
pub trait Timer {
    fn schedule_once(&mut self, delay: Duration, task: Task) -> TaskId;
    fn schedule_repeating(&mut self, interval: Duration, task: Task) -> TaskId;
}

#[derive(Debug)]
struct Scheduled {
    due_ms: u64,
    seq: u64,
    repeat_ms: Option<u64>,
    task: Task,
}

/// Timer running on simulated milliseconds.
///
/// Tasks due at the same instant fire in scheduling order. Repeating tasks are
/// re-queued one interval after they fire.
#[derive(Debug, Default)]
pub struct SimulatedTimer {
    now_ms: u64,
    next_seq: u64,
    queue: Vec<Scheduled>,
}

impl SimulatedTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pending tasks in firing order.
    pub fn upcoming(&self) -> Vec<(Duration, &Task)> {
        let mut entries: Vec<&Scheduled> = self.queue.iter().collect();
        entries.sort_by_key(|s| (s.due_ms, s.seq));
        entries
            .into_iter()
            .map(|s| (Duration::from_millis(s.due_ms), &s.task))
            .collect()
    }

    /// Pop the earliest task due at or before `until`, moving the clock to its
    /// due time. When nothing is due the clock moves to `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<Task> {
        let limit = until.as_millis() as u64;
        let next = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due_ms <= limit)
            .min_by_key(|(_, s)| (s.due_ms, s.seq))
            .map(|(i, _)| i);

        let Some(index) = next else {
            self.now_ms = self.now_ms.max(limit);
            return None;
        };

        let entry = self.queue.swap_remove(index);
        self.now_ms = self.now_ms.max(entry.due_ms);
        if let Some(every) = entry.repeat_ms {
            let seq = self.bump();
            self.queue.push(Scheduled {
                due_ms: entry.due_ms + every.max(1),
                seq,
                repeat_ms: entry.repeat_ms,
                task: entry.task.clone(),
            });
        }
        Some(entry.task)
    }

    fn bump(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn push(&mut self, delay: Duration, repeat_ms: Option<u64>, task: Task) -> TaskId {
        let seq = self.bump();
        self.queue.push(Scheduled {
            due_ms: self.now_ms + delay.as_millis() as u64,
            seq,
            repeat_ms,
            task,
        });
        TaskId(seq)
    }
}

impl Timer for SimulatedTimer {
    fn schedule_once(&mut self, delay: Duration, task: Task) -> TaskId {
        self.push(delay, None, task)
    }

    fn schedule_repeating(&mut self, interval: Duration, task: Task) -> TaskId {
        let every = (interval.as_millis() as u64).max(1);
        self.push(interval, Some(every), task)
    }
}
