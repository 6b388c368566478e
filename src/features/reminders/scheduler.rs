//! # Reminder Scheduler
//!
//! Polls the wall clock on a fixed interval and fires each scheduled slot at
//! most once per calendar day. A slot is due while the clock is within the
//! minute leading up to it (offset `now - slot` in [-1, 0] minutes, measured
//! around the 24h cycle so a 00:00 slot can match just before midnight).
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Date-change based daily reset, wraparound matching for midnight slots
//! - 1.0.0: Initial polling loop with cancellable sleep

use crate::features::reminders::schedule::ScheduleTable;
use crate::features::reminders::service::ReminderService;
use chrono::{Duration as ChronoDuration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_DAY: i64 = 24 * 60 * MS_PER_MINUTE;

/// Identifies one delivered slot: (category, date of the slot, slot time)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FiredKey {
    pub category: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Slots already delivered, owned by whoever drives [`tick`].
#[derive(Debug, Default)]
pub struct FiredSet {
    keys: HashSet<FiredKey>,
    current_day: Option<NaiveDate>,
}

impl FiredSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &FiredKey) -> bool {
        self.keys.contains(key)
    }

    /// Returns false if the key was already recorded.
    pub fn insert(&mut self, key: FiredKey) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Daily reset. When `today` differs from the last day seen, drops every
    /// key dated before `today`. Keys for `today` or later survive so a
    /// midnight slot matched at 23:59 is not delivered again at 00:00.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.current_day == Some(today) {
            return false;
        }
        let had_day = self.current_day.is_some();
        self.current_day = Some(today);

        let before = self.keys.len();
        self.keys.retain(|key| key.date >= today);
        if had_day {
            debug!(
                "Daily reset for {today}: dropped {} fired reminders",
                before - self.keys.len()
            );
        }
        had_day
    }
}

fn ms_from_midnight(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) * 1000 + i64::from(time.nanosecond() / 1_000_000)
}

/// Offset `now - slot` in milliseconds, folded into (-12h, +12h].
fn cyclic_offset_ms(now: NaiveTime, slot: NaiveTime) -> i64 {
    let raw = (ms_from_midnight(now) - ms_from_midnight(slot)).rem_euclid(MS_PER_DAY);
    if raw > MS_PER_DAY / 2 {
        raw - MS_PER_DAY
    } else {
        raw
    }
}

/// If `slot` is due at `now`, the date the slot falls on.
pub fn due_date(slot: NaiveTime, now: NaiveDateTime) -> Option<NaiveDate> {
    let offset = cyclic_offset_ms(now.time(), slot);
    if (-MS_PER_MINUTE..=0).contains(&offset) {
        Some((now - ChronoDuration::milliseconds(offset)).date())
    } else {
        None
    }
}

/// One scheduler tick: apply the daily reset, then record and return every
/// slot that is due at `now` and has not fired yet.
pub fn tick(schedule: &ScheduleTable, fired: &mut FiredSet, now: NaiveDateTime) -> Vec<FiredKey> {
    fired.roll_over(now.date());

    let mut due = Vec::new();
    for entry in schedule.categories() {
        for &slot in &entry.times {
            let Some(date) = due_date(slot, now) else {
                continue;
            };
            let key = FiredKey {
                category: entry.category.clone(),
                date,
                time: slot,
            };
            if fired.insert(key.clone()) {
                due.push(key);
            }
        }
    }
    due
}

fn deliver(service: &ReminderService, due: &[FiredKey], at: NaiveTime) {
    for key in due {
        service.notify_at(&key.category, at);
    }
}

/// Background polling loop
pub struct ReminderScheduler {
    service: Arc<ReminderService>,
    fired: FiredSet,
    interval: Duration,
}

impl ReminderScheduler {
    pub fn new(service: Arc<ReminderService>, interval: Duration) -> Self {
        ReminderScheduler {
            service,
            fired: FiredSet::new(),
            interval,
        }
    }

    /// Run one tick at `now` and deliver the due reminders on this thread.
    pub fn tick_at(&mut self, now: NaiveDateTime) -> Vec<FiredKey> {
        let due = tick(self.service.schedule(), &mut self.fired, now);
        deliver(&self.service, &due, now.time());
        due
    }

    /// Like [`tick_at`](Self::tick_at), but presenters run on the blocking
    /// pool so a slow notification tool never stalls the polling loop.
    fn spawn_tick(&mut self, now: NaiveDateTime) -> usize {
        let due = tick(self.service.schedule(), &mut self.fired, now);
        if !due.is_empty() {
            let service = self.service.clone();
            let count = due.len();
            tokio::task::spawn_blocking(move || deliver(&service, &due, now.time()));
            return count;
        }
        0
    }

    /// Run until `cancel` fires. The sleep between ticks is aborted promptly.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!(
            "⏰ Reminder scheduler started ({}s interval)",
            self.interval.as_secs()
        );

        loop {
            let due = self.spawn_tick(Local::now().naive_local());
            if due > 0 {
                debug!("Dispatched {due} reminder(s)");
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Reminder scheduler stopped");
                    break;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}
