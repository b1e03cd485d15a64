//! Salida de la cafetera. Cada salida prepara una sola bebida a la vez.
use std::{
    fmt,
    sync::{Condvar, Mutex},
    time::{Duration, Instant},
};

use log::{debug, error, info, warn};

use crate::{
    beverage::Beverage, constants::OUTLET_WAIT_FACTOR, errors::MachineError,
    shutdown::ShutdownSignal,
};

/// Representa a una salida de la cafetera.
/// El flag `busy` es el lock de la salida. Los que esperan se despiertan con `released`.
pub struct Outlet {
    id: usize,
    busy: Mutex<bool>,
    released: Condvar,
}

/// Retiene la salida mientras vive. Al liberarlo la salida queda para el siguiente.
pub struct OutletGuard<'a> {
    outlet: &'a Outlet,
}

impl Drop for OutletGuard<'_> {
    fn drop(&mut self) {
        match self.outlet.busy.lock() {
            Ok(mut busy) => *busy = false,
            Err(poisoned) => *poisoned.into_inner() = false,
        }
        self.outlet.released.notify_one();
    }
}

impl Outlet {
    fn new(id: usize) -> Outlet {
        Outlet {
            id,
            busy: Mutex::new(false),
            released: Condvar::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_busy(&self) -> bool {
        self.busy.lock().map(|busy| *busy).unwrap_or(true)
    }

    /// Espera la salida a lo sumo `timeout`. Devuelve `None` si sigue ocupada pasado ese tiempo,
    /// o si se cancelo la senal mientras esperaba.
    pub fn acquire(
        &self,
        timeout: Duration,
        signal: &ShutdownSignal,
    ) -> Result<Option<OutletGuard<'_>>, MachineError> {
        let (mut busy, _) = self
            .released
            .wait_timeout_while(self.busy.lock()?, timeout, |busy| {
                *busy && !signal.is_cancelled()
            })?;

        if *busy || signal.is_cancelled() {
            return Ok(None);
        }
        *busy = true;
        Ok(Some(OutletGuard { outlet: self }))
    }

    /// Despierta a todos los que esperan esta salida para que vean la cancelacion.
    pub fn wake_waiters(&self) {
        // Se toma para que nadie pierda el aviso entre su chequeo y su espera.
        let _busy = self.busy.lock();
        self.released.notify_all();
    }

    /// Prepara la bebida. La cafetera ya saco los ingredientes del stock.
    pub fn prepare(&self, beverage: &Beverage, signal: &ShutdownSignal) -> Result<(), MachineError> {
        if self.is_busy() {
            info!("[OUTLET {}] Somebody already preparing a beverage at {}.", self.id, self);
        }

        let prepare_time = beverage.prepare_time_ms();
        let waited = Instant::now();
        let wait_bound = Duration::from_millis(prepare_time.saturating_mul(OUTLET_WAIT_FACTOR));
        let guard = self.acquire(wait_bound, signal)?;

        let Some(_guard) = guard else {
            if signal.is_cancelled() {
                warn!("[OUTLET {}] Cancelled {} while waiting", self.id, beverage.name());
                return Err(MachineError::PreparationCancelled {
                    beverage: beverage.name().to_string(),
                    outlet: self.id,
                });
            }
            let error = MachineError::OutletTimeout {
                beverage: beverage.name().to_string(),
                outlet: self.id,
                waited_ms: waited.elapsed().as_millis() as u64,
            };
            warn!("[OUTLET {}] {}", self.id, error);
            return Err(error);
        };

        debug!(
            "[OUTLET {}] Took the outlet after {}ms",
            self.id,
            waited.elapsed().as_millis()
        );
        info!(
            "[OUTLET {}] Preparing {} at {} (ETA = {} seconds).",
            self.id,
            beverage.name(),
            self,
            prepare_time as f64 / 1000.0
        );
        if signal.sleep(Duration::from_millis(prepare_time)) {
            warn!("[OUTLET {}] Cancelled {} while preparing", self.id, beverage.name());
            return Err(MachineError::PreparationCancelled {
                beverage: beverage.name().to_string(),
                outlet: self.id,
            });
        }
        info!("[OUTLET {}] Prepared {} at {}.", self.id, beverage.name(), self);
        Ok(())
    }
}

impl fmt::Display for Outlet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OUTLET({})", self.id)
    }
}

impl fmt::Debug for Outlet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outlet")
            .field("id", &self.id)
            .field("busy", &self.is_busy())
            .finish()
    }
}

/// Entrega salidas numeradas 1, 2, 3... Cada cafetera tiene su propia secuencia.
#[derive(Default)]
pub struct OutletSequence {
    last_id: usize,
}

impl OutletSequence {
    pub fn new() -> OutletSequence {
        OutletSequence::default()
    }
}

impl Iterator for OutletSequence {
    type Item = Outlet;

    fn next(&mut self) -> Option<Outlet> {
        self.last_id = match self.last_id.checked_add(1) {
            Some(id) => id,
            None => {
                error!("Ran out of outlet ids");
                return None;
            }
        };
        Some(Outlet::new(self.last_id))
    }
}
