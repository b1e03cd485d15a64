use std::sync::RwLock;

use crate::errors::MachineError;

/// Algo que le paso a un pedido, contado en las estadisticas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Ingredientes reservados y preparacion encolada.
    Dispatched,
    Prepared,
    TimedOut,
    Cancelled,
    /// No paso la validacion de ingredientes.
    Rejected,
    /// No se admitio porque otro tenia el lock de admision.
    Dropped,
    Refunded,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsSnapshot {
    pub dispatched: u64,
    pub prepared: u64,
    pub timed_out: u64,
    pub cancelled: u64,
    pub rejected: u64,
    pub dropped: u64,
    pub refunded: u64,
}

impl StatisticsSnapshot {
    /// Preparaciones despachadas que todavia no terminaron de ninguna forma.
    pub fn in_flight(&self) -> u64 {
        self.dispatched
            .saturating_sub(self.prepared + self.timed_out + self.cancelled)
    }
}

#[derive(Default)]
pub struct Statistics {
    counts: RwLock<StatisticsSnapshot>,
}

impl Statistics {
    pub fn new() -> Statistics {
        Statistics::default()
    }

    pub fn record(&self, event: Event) -> Result<(), MachineError> {
        let mut counts = self.counts.write().map_err(|_| MachineError::LockError)?;
        let counter = match event {
            Event::Dispatched => &mut counts.dispatched,
            Event::Prepared => &mut counts.prepared,
            Event::TimedOut => &mut counts.timed_out,
            Event::Cancelled => &mut counts.cancelled,
            Event::Rejected => &mut counts.rejected,
            Event::Dropped => &mut counts.dropped,
            Event::Refunded => &mut counts.refunded,
        };
        *counter += 1;
        Ok(())
    }

    pub fn snapshot(&self) -> Result<StatisticsSnapshot, MachineError> {
        let counts = *self.counts.read().map_err(|_| MachineError::LockError)?;
        Ok(counts)
    }
}
