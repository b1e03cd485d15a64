//! Lectura del archivo de configuracion de la cafetera: salidas, ingredientes y bebidas.
use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use log::{debug, info};
use serde::Deserialize;

use crate::{
    beverage::Beverage, constants::DEFAULT_PREPARE_TIME_MS, errors::MachineError,
    ingredient::Ingredient, recipe::RecipeBuilder,
};

#[derive(Deserialize, Debug)]
struct JsonOutlets {
    count_n: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct JsonMachine {
    outlets: Option<JsonOutlets>,
    total_items_quantity: Option<BTreeMap<String, i64>>,
    beverages: Option<BTreeMap<String, BTreeMap<String, i64>>>,
    prepare_time_ms: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct MachineConfiguration {
    machine: Option<JsonMachine>,
}

/// Todo lo necesario para construir una cafetera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineDefinition {
    pub outlet_count: usize,
    pub ingredients: Vec<Ingredient>,
    pub beverages: Vec<Beverage>,
}

#[derive(Debug, Default, Clone)]
pub struct Loader {
    prepare_time_override: Option<u64>,
}

impl Loader {
    pub fn new() -> Loader {
        Loader::default()
    }

    /// Todas las recetas tardan esto, diga lo que diga el archivo.
    pub fn with_prepare_time_ms(mut self, prepare_time_ms: u64) -> Loader {
        self.prepare_time_override = Some(prepare_time_ms);
        self
    }

    pub fn from_file<P: AsRef<Path>>(&self, path: P) -> Result<MachineDefinition, MachineError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            MachineError::InvalidConfiguration(format!("cannot open {}: {}", path.display(), err))
        })?;
        let configuration: MachineConfiguration = serde_json::from_reader(BufReader::new(file))
            .map_err(|err| {
                MachineError::InvalidConfiguration(format!(
                    "cannot parse {}: {}",
                    path.display(),
                    err
                ))
            })?;
        info!("[LOADER] Read configuration from {}", path.display());
        self.build(configuration)
    }

    #[cfg(test)]
    pub fn from_json(&self, json: &str) -> Result<MachineDefinition, MachineError> {
        let configuration: MachineConfiguration = serde_json::from_str(json)
            .map_err(|err| MachineError::InvalidConfiguration(format!("cannot parse: {}", err)))?;
        self.build(configuration)
    }

    fn build(&self, configuration: MachineConfiguration) -> Result<MachineDefinition, MachineError> {
        let machine = section(configuration.machine, "machine")?;
        let outlets = section(machine.outlets, "machine.outlets")?;
        let outlet_count = outlet_count(section(outlets.count_n, "machine.outlets.count_n")?)?;
        let ingredients = ingredients(section(
            machine.total_items_quantity,
            "machine.total_items_quantity",
        )?)?;

        let prepare_time_ms = self
            .prepare_time_override
            .or(machine.prepare_time_ms)
            .unwrap_or(DEFAULT_PREPARE_TIME_MS);
        let beverages = beverages(
            section(machine.beverages, "machine.beverages")?,
            prepare_time_ms,
        )?;

        debug!(
            "[LOADER] {} outlets, {} ingredients, {} beverages",
            outlet_count,
            ingredients.len(),
            beverages.len()
        );
        Ok(MachineDefinition {
            outlet_count,
            ingredients,
            beverages,
        })
    }
}

fn section<T>(value: Option<T>, name: &str) -> Result<T, MachineError> {
    value.ok_or_else(|| MachineError::InvalidConfiguration(format!("missing section {}", name)))
}

fn outlet_count(count_n: i64) -> Result<usize, MachineError> {
    if count_n < 1 {
        return Err(MachineError::InvalidConfiguration(format!(
            "machine.outlets.count_n must be at least 1, found {}",
            count_n
        )));
    }
    usize::try_from(count_n).map_err(|_| {
        MachineError::InvalidConfiguration(format!("machine.outlets.count_n is too big: {}", count_n))
    })
}

fn ingredients(total_items: BTreeMap<String, i64>) -> Result<Vec<Ingredient>, MachineError> {
    total_items
        .iter()
        .map(|(name, quantity)| {
            Ingredient::new(name, *quantity).map_err(|_| {
                MachineError::InvalidConfiguration(format!(
                    "machine.total_items_quantity.{} cannot be negative ({})",
                    name, quantity
                ))
            })
        })
        .collect()
}

fn beverages(
    json_beverages: BTreeMap<String, BTreeMap<String, i64>>,
    prepare_time_ms: u64,
) -> Result<Vec<Beverage>, MachineError> {
    let mut beverages = Vec::with_capacity(json_beverages.len());
    for (name, lines) in json_beverages {
        let mut builder = RecipeBuilder::new(&name).prepare_time_ms(prepare_time_ms);
        for (ingredient, quantity) in &lines {
            builder = builder.add_ingredient(ingredient, *quantity).map_err(|_| {
                MachineError::InvalidConfiguration(format!(
                    "machine.beverages.{}.{} cannot be negative ({})",
                    name, ingredient, quantity
                ))
            })?;
        }
        // Una linea en cero no pide nada, el stock no necesita tener ese ingrediente.
        for (ingredient, _) in lines.iter().filter(|(_, quantity)| **quantity == 0) {
            builder = builder.remove_ingredient(ingredient)?;
        }
        let recipe = builder.build().map_err(|_| {
            MachineError::InvalidConfiguration(format!("machine.beverages.{} has no ingredients", name))
        })?;
        beverages.push(Beverage::new(&name, recipe));
    }
    Ok(beverages)
}
