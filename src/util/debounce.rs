// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Trailing-edge debouncing.
//!
//! [`Debouncer`] collapses a burst of calls into a single invocation of the
//! wrapped callback, carrying the value of the most recent call. The quiet
//! period restarts on every call. Used to rate-limit card activation so a
//! double-tapped key selects once.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

pub(crate) struct Debouncer<T: Send + 'static> {
    tx: mpsc::Sender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Wraps `fire` so that it runs only after `wait` has elapsed with no
    /// further calls. The callback runs on a dedicated worker thread.
    pub(crate) fn new<F>(wait: Duration, mut fire: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<T>();

        thread::spawn(move || {
            let mut pending: Option<T> = None;

            loop {
                if pending.is_some() {
                    match rx.recv_timeout(wait) {
                        // A newer value restarts the quiet period
                        Ok(value) => pending = Some(value),
                        Err(RecvTimeoutError::Timeout) => {
                            if let Some(value) = pending.take() {
                                fire(value);
                            }
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                } else {
                    match rx.recv() {
                        Ok(value) => pending = Some(value),
                        Err(_) => break,
                    }
                }
            }
        });

        Self { tx }
    }

    /// Schedules `value` to fire after the quiet period, superseding any
    /// value still pending.
    pub(crate) fn call(&self, value: T) {
        let _ = self.tx.send(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn a_burst_collapses_to_the_last_value() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);

        let debouncer = Debouncer::new(Duration::from_millis(50), move |value: u32| {
            sink.lock().unwrap().push(value);
        });

        debouncer.call(1);
        debouncer.call(2);
        debouncer.call(3);

        thread::sleep(Duration::from_millis(400));
        assert_eq!(*fired.lock().unwrap(), vec![3]);
    }

    #[test]
    fn the_quiet_period_restarts_on_every_call() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);

        let debouncer = Debouncer::new(Duration::from_millis(150), move |value: u32| {
            sink.lock().unwrap().push(value);
        });

        for value in 0..4 {
            debouncer.call(value);
            thread::sleep(Duration::from_millis(40));
        }

        assert!(
            fired.lock().unwrap().is_empty(),
            "nothing fires while the burst is still going"
        );

        thread::sleep(Duration::from_millis(500));
        assert_eq!(*fired.lock().unwrap(), vec![3]);
    }

    #[test]
    fn separate_bursts_each_fire() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);

        let debouncer = Debouncer::new(Duration::from_millis(40), move |value: u32| {
            sink.lock().unwrap().push(value);
        });

        debouncer.call(1);
        thread::sleep(Duration::from_millis(300));
        debouncer.call(2);
        thread::sleep(Duration::from_millis(300));

        assert_eq!(*fired.lock().unwrap(), vec![1, 2]);
    }
}
