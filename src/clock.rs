// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Injectable time and identifier sources.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::models::RecordId;

pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Noon on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Hands out unique ids in creation order.
pub trait IdGenerator {
    fn next_id(&mut self) -> RecordId;

    /// Registers an id that already exists so later ids stay above it.
    fn observe(&mut self, id: RecordId);
}

/// Millisecond timestamps, bumped when two records land in the same millisecond.
#[derive(Debug, Default)]
pub struct TimestampIds {
    last: RecordId,
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self) -> RecordId {
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last = millis.max(self.last + 1);
        self.last
    }

    fn observe(&mut self, id: RecordId) {
        self.last = self.last.max(id);
    }
}

/// 1, 2, 3, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    last: RecordId,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> RecordId {
        self.last += 1;
        self.last
    }

    fn observe(&mut self, id: RecordId) {
        self.last = self.last.max(id);
    }
}
