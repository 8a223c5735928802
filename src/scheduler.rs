//! Cooperative multi-rate task scheduler.
//!
//! Holds a period and a last-fire timestamp for each periodic task of the
//! monitoring loop.  [`TaskScheduler::tick`] never blocks: it compares the
//! elapsed time of every task against its period and reports the set that
//! is due this pass.
//!
//! ```text
//!   now_ms ──▶ ┌──────────────────────────────────────────┐
//!              │ Light        period 1000  last 12000     │──┐
//!              │ Temperature  period 1500  last 11500     │  │  DueTasks
//!              │ Humidity     period 2000  last 11000     │  ├──▶ (bitmask)
//!              │ Display      period 3000  last 10000     │──┘
//!              └──────────────────────────────────────────┘
//! ```
//!
//! Due-ness is computed from elapsed wall time, not from call counts.  A
//! firing re-arms the task one period after its previous slot, so a late
//! pass delays a task without shifting the ones after it.  When a task falls
//! a whole period behind (e.g. after a blocking episode) it is re-based on
//! the current time: one catch-up firing, not a burst.

use crate::config::SystemConfig;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════
//  Task identity
// ═══════════════════════════════════════════════════════════════

/// The periodic tasks of the monitoring loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TaskId {
    Light = 0,
    Temperature = 1,
    Humidity = 2,
    Display = 3,
}

impl TaskId {
    pub const COUNT: usize = 4;
    pub const ALL: [TaskId; TaskId::COUNT] = [
        TaskId::Light,
        TaskId::Temperature,
        TaskId::Humidity,
        TaskId::Display,
    ];

    /// Bit for this task inside a [`DueTasks`] set.
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Display => "display",
        }
    }
}

/// Set of tasks that became due in one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueTasks(u8);

impl DueTasks {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, task: TaskId) {
        self.0 |= task.mask();
    }

    pub fn contains(self, task: TaskId) -> bool {
        self.0 & task.mask() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Due tasks in declaration order.
    pub fn iter(self) -> impl Iterator<Item = TaskId> {
        TaskId::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Internal bookkeeping for one periodic task.
#[derive(Debug, Clone, Copy)]
struct PeriodicTask {
    period_ms: u32,
    last_fire_ms: u64,
}

/// The scheduler engine.  Stack-allocated, one slot per [`TaskId`].
pub struct TaskScheduler {
    tasks: [PeriodicTask; TaskId::COUNT],
    running: bool,
}

impl TaskScheduler {
    /// Build a stopped scheduler with periods indexed by `TaskId as usize`.
    pub fn new(periods_ms: [u32; TaskId::COUNT]) -> Self {
        Self {
            tasks: periods_ms.map(|period_ms| PeriodicTask {
                period_ms,
                last_fire_ms: 0,
            }),
            running: false,
        }
    }

    /// Periods from the sampling section of the configuration.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new([
            config.light_interval_ms,
            config.temperature_interval_ms,
            config.humidity_interval_ms,
            config.display_interval_ms,
        ])
    }

    /// (Re)start every task with `now_ms` as its baseline.
    ///
    /// Nothing is due until a full period has elapsed after this call.
    pub fn start(&mut self, now_ms: u64) {
        for task in &mut self.tasks {
            task.last_fire_ms = now_ms;
        }
        self.running = true;
        info!("Scheduler: started at t={}ms", now_ms);
    }

    /// Stop all tasks.  `tick` reports nothing until the next `start`.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period_ms(&self, task: TaskId) -> u32 {
        self.tasks[task as usize].period_ms
    }

    /// Report the tasks due at `now_ms` and re-arm them.
    pub fn tick(&mut self, now_ms: u64) -> DueTasks {
        let mut due = DueTasks::empty();
        if !self.running {
            return due;
        }

        for (task, id) in self.tasks.iter_mut().zip(TaskId::ALL) {
            let elapsed = now_ms.saturating_sub(task.last_fire_ms);
            let period = u64::from(task.period_ms);
            if elapsed >= period {
                let slot = task.last_fire_ms + period;
                task.last_fire_ms = if now_ms.saturating_sub(slot) >= period {
                    now_ms
                } else {
                    slot
                };
                due.insert(id);
                debug!("Scheduler: '{}' due after {}ms", id.label(), elapsed);
            }
        }

        due
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
