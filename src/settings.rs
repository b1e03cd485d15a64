//! Ajustes de una cafetera. Los valores por defecto salen de [`crate::constants`].
use std::time::Duration;

use crate::constants::{MINIMUM_INGREDIENT_QUANTITY, SHUTDOWN_GRACE_PERIOD_MS};

/// Que pasa con los ingredientes reservados si la bebida nunca se prepara.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservationPolicy {
    /// Una vez reservados se pierden, aunque la salida se venza o la preparacion se cancele.
    #[default]
    Pessimistic,
    /// Vuelven al stock si la preparacion se vence o se cancela.
    RefundOnFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineSettings {
    /// `close` espera esto a los trabajadores, despues cancela y vuelve a esperar lo mismo.
    pub shutdown_grace_period: Duration,
    pub low_quantity_threshold: i64,
    pub reservation_policy: ReservationPolicy,
}

impl Default for MachineSettings {
    fn default() -> MachineSettings {
        MachineSettings {
            shutdown_grace_period: Duration::from_millis(SHUTDOWN_GRACE_PERIOD_MS),
            low_quantity_threshold: MINIMUM_INGREDIENT_QUANTITY,
            reservation_policy: ReservationPolicy::default(),
        }
    }
}
