//! Senal de cancelacion compartida por los trabajadores de un encendido de la cafetera.
use std::{
    sync::{Condvar, Mutex},
    time::{Duration, Instant},
};

use log::error;

#[derive(Default)]
pub struct ShutdownSignal {
    cancelled: Mutex<bool>,
    cond: Condvar,
}

impl ShutdownSignal {
    pub fn new() -> ShutdownSignal {
        ShutdownSignal::default()
    }

    pub fn cancel(&self) {
        if let Ok(mut cancelled) = self.cancelled.lock() {
            *cancelled = true;
            self.cond.notify_all();
            return;
        }
        error!("Error setting the shutdown signal");
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.lock().map(|cancelled| *cancelled).unwrap_or(true)
    }

    /// Duerme `duration` salvo que se cancele antes. Devuelve true si se corto la espera.
    /// Si la duracion es demasiado larga para tener un limite, duerme hasta que se cancele.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now().checked_add(duration);
        let Ok(mut cancelled) = self.cancelled.lock() else {
            return true;
        };
        while !*cancelled {
            let waited = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return false;
                    }
                    self.cond
                        .wait_timeout(cancelled, deadline - now)
                        .map(|(guard, _)| guard)
                        .map_err(drop)
                }
                None => self.cond.wait(cancelled).map_err(drop),
            };
            cancelled = match waited {
                Ok(guard) => guard,
                Err(_) => return true,
            };
        }
        true
    }
}
