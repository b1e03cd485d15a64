//! Stock de ingredientes compartido por todas las salidas.
//!
//! El stock no se sincroniza solo. La cafetera lo guarda detras del lock de admision y toda
//! lectura, validacion y consumo se hace con ese lock tomado.
use std::collections::BTreeMap;

use crate::{errors::MachineError, ingredient::Ingredient, recipe::Recipe};

#[derive(Debug, Default)]
pub struct Stock {
    ingredients: BTreeMap<String, Ingredient>,
}

impl Stock {
    pub fn new(ingredients: Vec<Ingredient>) -> Stock {
        let ingredients = ingredients
            .into_iter()
            .map(|ingredient| (ingredient.name().to_string(), ingredient))
            .collect();
        Stock { ingredients }
    }

    pub fn lookup(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.get(name)
    }

    pub fn add(&mut self, name: &str, quantity: i64) -> Result<(), MachineError> {
        self.get_mut(name)?.add(quantity)
    }

    pub fn consume(&mut self, name: &str, quantity: i64) -> Result<(), MachineError> {
        self.get_mut(name)?.consume(quantity)
    }

    /// Ingredientes de la receta que el stock no tiene.
    pub fn missing_for(&self, recipe: &Recipe) -> Vec<String> {
        recipe
            .ingredients()
            .filter(|(name, _)| !self.ingredients.contains_key(*name))
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Ingredientes de la receta que piden mas de lo que queda. Los que faltan se ignoran.
    pub fn insufficient_for(&self, recipe: &Recipe) -> Vec<String> {
        recipe
            .ingredients()
            .filter(|(name, required)| {
                self.ingredients
                    .get(*name)
                    .map_or(false, |ingredient| *required > ingredient.quantity())
            })
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Consume todos los ingredientes de la receta, o ninguno.
    pub fn reserve(&mut self, recipe: &Recipe) -> Result<(), MachineError> {
        let missing = self.missing_for(recipe);
        let insufficient = self.insufficient_for(recipe);
        if !missing.is_empty() || !insufficient.is_empty() {
            return Err(MachineError::InvalidArgument(format!(
                "Cannot reserve {}: missing ({}) insufficient ({})",
                recipe.beverage_name(),
                missing.join(", "),
                insufficient.join(", ")
            )));
        }
        for (name, required) in recipe.ingredients() {
            self.consume(name, required)?;
        }
        Ok(())
    }

    /// Devuelve las cantidades de una receta reservada antes.
    pub fn refund(&mut self, recipe: &Recipe) {
        for (name, required) in recipe.ingredients() {
            if let Some(ingredient) = self.ingredients.get_mut(name) {
                ingredient.restore(required);
            }
        }
    }

    /// Ingredientes con menos de `threshold`, ordenados por nombre.
    pub fn below(&self, threshold: i64) -> Vec<Ingredient> {
        self.ingredients
            .values()
            .filter(|ingredient| ingredient.quantity() < threshold)
            .cloned()
            .collect()
    }

    pub fn ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.values()
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Ingredient, MachineError> {
        self.ingredients
            .get_mut(name)
            .ok_or_else(|| MachineError::InvalidArgument(format!("{} is not in stock!", name)))
    }
}
