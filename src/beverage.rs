use std::fmt;

use crate::recipe::Recipe;

/// Bebida que sirve la cafetera. Siempre tiene una receta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beverage {
    name: String,
    recipe: Recipe,
}

impl Beverage {
    pub fn new(name: &str, recipe: Recipe) -> Beverage {
        Beverage {
            name: name.to_string(),
            recipe,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn prepare_time_ms(&self) -> u64 {
        self.recipe.prepare_time_ms()
    }
}

impl fmt::Display for Beverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BEVERAGE({})", self.name)?;
        write!(f, "\t{}", self.recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::RecipeBuilder;

    fn recipe(name: &str, hot_water: i64) -> Recipe {
        RecipeBuilder::new(name)
            .add_ingredient("hot_water", hot_water)
            .and_then(|builder| builder.build())
            .unwrap()
    }

    #[test]
    fn should_be_equal_with_same_name_and_recipe() {
        let first = Beverage::new("black_tea", recipe("black_tea", 300));
        let second = Beverage::new("black_tea", recipe("black_tea", 300));
        assert_eq!(first, second);
    }

    #[test]
    fn should_differ_when_recipes_differ() {
        let first = Beverage::new("black_tea", recipe("black_tea", 300));
        let second = Beverage::new("black_tea", recipe("black_tea", 200));
        assert_ne!(first, second);
    }

    #[test]
    fn should_render_the_recipe_under_the_beverage() {
        let beverage = Beverage::new("black_tea", recipe("black_tea", 300));
        assert_eq!(
            "BEVERAGE(black_tea)\n\tRECIPE(black_tea)\n\t\tINGREDIENT(hot_water, 300)\n",
            beverage.to_string()
        );
    }
}
