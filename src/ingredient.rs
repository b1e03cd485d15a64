//! Contenedor de un ingrediente del stock.
use std::fmt;

use crate::errors::MachineError;

/// Ingrediente del stock. Guarda lo que queda y lo que se consumio hasta ahora.
/// Dos ingredientes son el mismo si tienen el mismo nombre.
#[derive(Debug, Clone)]
pub struct Ingredient {
    name: String,
    quantity: i64,
    consumed: i64,
}

impl Ingredient {
    pub fn new(name: &str, quantity: i64) -> Result<Ingredient, MachineError> {
        if quantity < 0 {
            return Err(MachineError::InvalidArgument(format!(
                "{} cannot start with a negative quantity ({})",
                name, quantity
            )));
        }
        Ok(Ingredient {
            name: name.to_string(),
            quantity,
            consumed: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn consumed(&self) -> i64 {
        self.consumed
    }

    pub fn add(&mut self, quantity: i64) -> Result<(), MachineError> {
        if quantity < 0 {
            return Err(MachineError::InvalidArgument(
                "Cannot add a negative amount of quantity to the ingredient!".to_string(),
            ));
        }
        self.quantity = self.quantity.checked_add(quantity).ok_or_else(|| {
            MachineError::InvalidArgument(format!(
                "Cannot add {} to {}, it already holds {}!",
                quantity, self.name, self.quantity
            ))
        })?;
        Ok(())
    }

    pub fn consume(&mut self, quantity: i64) -> Result<(), MachineError> {
        if quantity < 0 {
            return Err(MachineError::InvalidArgument(
                "Cannot consume a negative amount of quantity from ingredient!".to_string(),
            ));
        }
        if quantity > self.quantity {
            return Err(MachineError::InvalidArgument(format!(
                "You can consume at most {} of {}!",
                self.quantity, self.name
            )));
        }
        self.quantity -= quantity;
        self.consumed = self.consumed.saturating_add(quantity);
        Ok(())
    }

    /// Devuelve una cantidad consumida antes.
    pub(crate) fn restore(&mut self, quantity: i64) {
        let restored = quantity.min(self.consumed).max(0);
        self.quantity = self.quantity.saturating_add(restored);
        self.consumed -= restored;
    }
}

impl PartialEq for Ingredient {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Ingredient {}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INGREDIENT({}, {})", self.name, self.quantity)
    }
}
