//! Recetas de las bebidas. Una receta se arma una vez al cargar y despues no cambia.
use std::{collections::BTreeMap, fmt};

use crate::{constants::DEFAULT_PREPARE_TIME_MS, errors::MachineError};

/// Cantidad de cada ingrediente que lleva una bebida, y cuanto tarda en prepararse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    beverage_name: String,
    ingredients: BTreeMap<String, i64>,
    prepare_time_ms: u64,
}

impl Recipe {
    pub fn beverage_name(&self) -> &str {
        &self.beverage_name
    }

    pub fn prepare_time_ms(&self) -> u64 {
        self.prepare_time_ms
    }

    #[cfg(test)]
    pub fn required(&self, ingredient: &str) -> Option<i64> {
        self.ingredients.get(ingredient).copied()
    }

    /// Nombres de los ingredientes con su cantidad, ordenados por nombre.
    pub fn ingredients(&self) -> impl Iterator<Item = (&str, i64)> {
        self.ingredients
            .iter()
            .map(|(name, quantity)| (name.as_str(), *quantity))
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RECIPE({})", self.beverage_name)?;
        for (name, quantity) in self.ingredients() {
            writeln!(f, "\t\tINGREDIENT({}, {})", name, quantity)?;
        }
        Ok(())
    }
}

pub struct RecipeBuilder {
    beverage_name: String,
    ingredients: BTreeMap<String, i64>,
    prepare_time_ms: u64,
}

impl RecipeBuilder {
    pub fn new(beverage_name: &str) -> RecipeBuilder {
        RecipeBuilder {
            beverage_name: beverage_name.to_string(),
            ingredients: BTreeMap::new(),
            prepare_time_ms: DEFAULT_PREPARE_TIME_MS,
        }
    }

    pub fn prepare_time_ms(mut self, prepare_time_ms: u64) -> RecipeBuilder {
        self.prepare_time_ms = prepare_time_ms;
        self
    }

    /// Agrega un ingrediente. Si ya estaba, reemplaza la cantidad anterior.
    pub fn add_ingredient(mut self, name: &str, quantity: i64) -> Result<RecipeBuilder, MachineError> {
        if quantity < 0 {
            return Err(MachineError::InvalidArgument(format!(
                "{} cannot require a negative quantity of {}",
                self.beverage_name, name
            )));
        }
        self.ingredients.insert(name.to_string(), quantity);
        Ok(self)
    }

    pub fn remove_ingredient(mut self, name: &str) -> Result<RecipeBuilder, MachineError> {
        if self.ingredients.remove(name).is_none() {
            return Err(MachineError::InvalidArgument(format!(
                "{} doesn't exist for RECIPE({})! Cannot remove it",
                name, self.beverage_name
            )));
        }
        Ok(self)
    }

    pub fn build(self) -> Result<Recipe, MachineError> {
        if self.ingredients.is_empty() {
            return Err(MachineError::InvalidArgument(format!(
                "{} doesn't have any recipe!",
                self.beverage_name
            )));
        }
        Ok(Recipe {
            beverage_name: self.beverage_name,
            ingredients: self.ingredients,
            prepare_time_ms: self.prepare_time_ms,
        })
    }
}
