//! Errores de la cafetera.
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    /// Seccion de configuracion faltante o mal formada. No se construye la cafetera.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Cantidad negativa, salida o bebida o ingrediente desconocido, receta vacia.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "{beverage} cannot be prepared at OUTLET({outlet}) because ingredient(s) ({}) is(are) not available!",
        .missing.join(", ")
    )]
    IngredientsUnavailable {
        beverage: String,
        outlet: usize,
        missing: Vec<String>,
    },

    #[error(
        "{beverage} cannot be prepared at OUTLET({outlet}) because ingredient(s) ({}) is(are) not sufficient!",
        .insufficient.join(", ")
    )]
    IngredientsInsufficient {
        beverage: String,
        outlet: usize,
        insufficient: Vec<String>,
    },

    /// Encender estando encendida, apagar estando apagada, servir estando apagada.
    #[error("{0}")]
    Lifecycle(String),

    #[error("Cannot prepare {beverage} in OUTLET({outlet}) right now, waited {waited_ms}ms. Please try again later.")]
    OutletTimeout {
        beverage: String,
        outlet: usize,
        waited_ms: u64,
    },

    #[error("Preparation of {beverage} at OUTLET({outlet}) was cancelled")]
    PreparationCancelled { beverage: String, outlet: usize },

    #[error("A lock of the coffee machine was poisoned")]
    LockError,
}

impl<T> From<std::sync::PoisonError<T>> for MachineError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        MachineError::LockError
    }
}

impl MachineError {
    /// Fallas de validacion de un pedido. La cafetera sigue funcionando despues de ellas.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MachineError::IngredientsUnavailable { .. }
                | MachineError::IngredientsInsufficient { .. }
                | MachineError::OutletTimeout { .. }
                | MachineError::PreparationCancelled { .. }
        )
    }
}
