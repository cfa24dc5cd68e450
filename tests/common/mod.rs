//! Shared fakes for host tests: a recording output sink and delay that
//! append to one ordered trace.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use fn_beacon::output::{OutputSink, PowerLevel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Key(bool),
    Power(PowerLevel),
    Delay(u32),
}

pub type Trace = Rc<RefCell<Vec<Event>>>;

pub struct RecordingOutput(pub Trace);

impl OutputSink for RecordingOutput {
    fn set_key(&mut self, on: bool) {
        self.0.borrow_mut().push(Event::Key(on));
    }

    fn set_power_level(&mut self, level: PowerLevel) {
        self.0.borrow_mut().push(Event::Power(level));
    }
}

/// Records each call as a single event, in microseconds.
pub struct RecordingDelay(pub Trace);

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(Event::Delay(ns / 1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().push(Event::Delay(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(Event::Delay(ms * 1_000));
    }
}

pub fn recorder() -> (Trace, RecordingOutput, RecordingDelay) {
    let trace: Trace = Rc::new(RefCell::new(Vec::new()));
    (
        trace.clone(),
        RecordingOutput(trace.clone()),
        RecordingDelay(trace),
    )
}

/// Collapse a trace into `(key_on, duration_us)` runs.
///
/// Consecutive delays at the same key state merge into one run.
pub fn pulses(events: &[Event]) -> Vec<(bool, u64)> {
    let mut key = false;
    let mut runs: Vec<(bool, u64)> = Vec::new();
    for event in events {
        match *event {
            Event::Key(on) => key = on,
            Event::Delay(us) => match runs.last_mut() {
                Some((on, total)) if *on == key => *total += u64::from(us),
                _ => runs.push((key, u64::from(us))),
            },
            Event::Power(_) => {}
        }
    }
    runs
}

/// Same as [`pulses`] but in whole dits.
pub fn pulses_in_dits(events: &[Event], dit_us: u32) -> Vec<(bool, u64)> {
    let dit = u64::from(dit_us);
    pulses(events)
        .into_iter()
        .map(|(on, us)| {
            assert_eq!(us % dit, 0, "run of {} us is not a whole number of dits", us);
            (on, us / dit)
        })
        .collect()
}

pub fn power_events(events: &[Event]) -> Vec<PowerLevel> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Power(level) => Some(*level),
            _ => None,
        })
        .collect()
}
