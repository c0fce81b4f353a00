#![allow(dead_code)]

use application::{Dashboard, Repositories};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use domain::event::{EventPublisher, PublishError};
use domain::{Clock, DomainEvent};
use infrastructure::{BroadcastEventPublisher, SeedData};
use std::sync::{Arc, Mutex};

/// Clock that moves forward by a fixed step on every reading
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl SteppingClock {
    pub fn starting_at(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }

    /// Always returns `at`
    pub fn frozen(at: DateTime<Utc>) -> Self {
        Self::starting_at(at, Duration::zero())
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap();
        let now = *next;
        *next = now + self.step;
        now
    }
}

/// Keeps every published event for assertions
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: DomainEvent) -> Result<(), PublishError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

pub fn start_of_2024() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

/// Dashboard over the bundled fixtures with a clock ticking one second per read
pub fn dashboard() -> Dashboard {
    dashboard_with_clock(SteppingClock::starting_at(start_of_2024(), Duration::seconds(1)))
}

pub fn dashboard_with_clock(clock: SteppingClock) -> Dashboard {
    let seed = SeedData::bundled().unwrap();
    Dashboard::new(Repositories::in_memory(seed).unwrap(), Arc::new(clock), 64)
}

/// Dashboard whose events are also recorded
pub fn recorded_dashboard() -> (Dashboard, Arc<RecordingPublisher>) {
    let seed = SeedData::bundled().unwrap();
    let recorder = Arc::new(RecordingPublisher::default());
    let dashboard = Dashboard::with_publisher(
        Repositories::in_memory(seed).unwrap(),
        Arc::new(SteppingClock::starting_at(start_of_2024(), Duration::seconds(1))),
        BroadcastEventPublisher::new(64),
        recorder.clone(),
    );
    (dashboard, recorder)
}
