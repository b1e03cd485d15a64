//! Cafetera. Admite pedidos contra el stock compartido y los despacha a las salidas.
use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, RwLock, TryLockError,
    },
};

use log::{debug, error, info};

use crate::{
    beverage::Beverage,
    constants::WORKERS_PER_OUTLET,
    errors::MachineError,
    ingredient::Ingredient,
    loader::MachineDefinition,
    outlet::{Outlet, OutletSequence},
    preparation::PreparationTask,
    settings::MachineSettings,
    statistics::{Event, Statistics, StatisticsSnapshot},
    stock::Stock,
    worker::PreparationContext,
    worker_pool::WorkerPool,
};

/// Que paso con un pedido de `serve` que paso las validaciones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeOutcome {
    /// Ingredientes reservados, se encolo la preparacion con este id.
    Dispatched(usize),
    /// Alguien mas estaba usando el stock, se ignoro el pedido.
    Dropped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutletSnapshot {
    pub id: usize,
    pub busy: bool,
}

/// Copia de solo lectura del estado de la cafetera, para los reportes.
#[derive(Debug, Clone)]
pub struct MachineSnapshot {
    pub description: String,
    pub running: bool,
    pub outlets: Vec<OutletSnapshot>,
    pub ingredients: Vec<Ingredient>,
    pub beverages: Vec<Beverage>,
    pub statistics: StatisticsSnapshot,
}

/// Operaciones de una maquina expendedora de bebidas.
///
/// Los pedidos se admiten de a uno. Validar y reservar ingredientes se hace con un unico lock
/// de admision, que se toma sin esperar. Un pedido (o un reporte de stock bajo) que llega mientras
/// el lock esta tomado se descarta, nunca se encola. Las preparaciones corren en paralelo, a lo sumo
/// una por salida, en un pool de trabajadores que `start` crea y `close` vacia.
pub trait BeverageDispenser {
    /// Lanza los trabajadores. Falla si ya estaba encendida.
    fn start(&self) -> Result<(), MachineError>;

    /// Espera las preparaciones encoladas y en curso, cancela lo que quede pasado el periodo de gracia
    /// y detiene a los trabajadores. Falla si no estaba encendida, o si los trabajadores no terminan
    /// despues de dos periodos de gracia.
    fn close(&self) -> Result<(), MachineError>;

    /// Valida el pedido, reserva sus ingredientes y encola su preparacion en la salida.
    ///
    /// Falla con `InvalidArgument` si la salida o la bebida no existen, con `Lifecycle` si no esta
    /// encendida, y con `IngredientsUnavailable`/`IngredientsInsufficient` si el stock no alcanza
    /// para la receta. Si falla no se consume ningun ingrediente.
    fn serve(&self, outlet_no: usize, beverage_name: &str) -> Result<ServeOutcome, MachineError>;

    fn add_ingredient_quantity(&self, ingredient_name: &str, quantity: i64) -> Result<(), MachineError>;

    /// Ingredientes que se estan acabando, o `None` si el lock de admision estaba tomado.
    fn show_low_quantity_ingredients(&self) -> Result<Option<Vec<Ingredient>>, MachineError>;

    fn snapshot(&self) -> Result<MachineSnapshot, MachineError>;
}

pub struct CoffeeMachine {
    description: String,
    outlets: BTreeMap<usize, Arc<Outlet>>,
    beverages: BTreeMap<String, Arc<Beverage>>,
    /// Lock de admision. Toda lectura, validacion y reserva del stock se hace con el tomado.
    stock: Arc<Mutex<Stock>>,
    pool: RwLock<Option<WorkerPool>>,
    statistics: Arc<Statistics>,
    settings: MachineSettings,
    last_task_id: AtomicUsize,
}

impl CoffeeMachine {
    pub fn new(description: &str, definition: MachineDefinition, settings: MachineSettings) -> CoffeeMachine {
        let outlets = OutletSequence::new()
            .take(definition.outlet_count)
            .map(|outlet| (outlet.id(), Arc::new(outlet)))
            .collect();
        let beverages = definition
            .beverages
            .into_iter()
            .map(|beverage| (beverage.name().to_string(), Arc::new(beverage)))
            .collect();

        CoffeeMachine {
            description: description.to_string(),
            outlets,
            beverages,
            stock: Arc::new(Mutex::new(Stock::new(definition.ingredients))),
            pool: RwLock::new(None),
            statistics: Arc::new(Statistics::new()),
            settings,
            last_task_id: AtomicUsize::new(0),
        }
    }

    pub fn outlet_count(&self) -> usize {
        self.outlets.len()
    }

    pub fn beverage_names(&self) -> impl Iterator<Item = &str> {
        self.beverages.keys().map(String::as_str)
    }

    pub fn is_running(&self) -> bool {
        self.pool.read().map(|pool| pool.is_some()).unwrap_or(false)
    }

    pub fn statistics(&self) -> Result<StatisticsSnapshot, MachineError> {
        self.statistics.snapshot()
    }

    /// Estado actual de un ingrediente. Espera el lock de admision.
    pub fn ingredient(&self, name: &str) -> Result<Option<Ingredient>, MachineError> {
        Ok(self.stock.lock()?.lookup(name).cloned())
    }

    fn outlet(&self, outlet_no: usize) -> Result<&Arc<Outlet>, MachineError> {
        self.outlets.get(&outlet_no).ok_or_else(|| {
            MachineError::InvalidArgument(format!(
                "Choose a valid outlet among the {} available for this Coffee Machine!",
                self.outlets.len()
            ))
        })
    }

    fn beverage(&self, beverage_name: &str) -> Result<&Arc<Beverage>, MachineError> {
        self.beverages.get(beverage_name).ok_or_else(|| {
            MachineError::InvalidArgument(format!(
                "{} is not being served by the Coffee Machine! Enter a valid beverage!",
                beverage_name
            ))
        })
    }

    /// Valida y reserva la receta de `beverage`. Se llama con el lock de admision tomado.
    fn reserve(&self, stock: &mut Stock, outlet: &Outlet, beverage: &Beverage) -> Result<(), MachineError> {
        let recipe = beverage.recipe();

        let missing = stock.missing_for(recipe);
        if !missing.is_empty() {
            return Err(MachineError::IngredientsUnavailable {
                beverage: beverage.name().to_string(),
                outlet: outlet.id(),
                missing,
            });
        }

        let insufficient = stock.insufficient_for(recipe);
        if !insufficient.is_empty() {
            return Err(MachineError::IngredientsInsufficient {
                beverage: beverage.name().to_string(),
                outlet: outlet.id(),
                insufficient,
            });
        }

        stock.reserve(recipe)
    }

    fn count(&self, event: Event) {
        if let Err(err) = self.statistics.record(event) {
            error!("[MACHINE] Error recording {:?}: {}", event, err);
        }
    }
}

impl BeverageDispenser for CoffeeMachine {
    fn start(&self) -> Result<(), MachineError> {
        let mut pool = self.pool.write()?;
        if pool.is_some() {
            return Err(MachineError::Lifecycle(
                "Coffee Machine is already turned on and running!".to_string(),
            ));
        }
        let context = PreparationContext::new(
            self.stock.clone(),
            self.statistics.clone(),
            self.settings.reservation_policy,
        );
        let workers = WorkerPool::start(WORKERS_PER_OUTLET * self.outlets.len(), Arc::new(context))?;
        info!(
            "[MACHINE] Turned on {} with {} workers!",
            self.description,
            workers.size()
        );
        *pool = Some(workers);
        Ok(())
    }

    fn close(&self) -> Result<(), MachineError> {
        let pool = self.pool.write()?.take().ok_or_else(|| {
            MachineError::Lifecycle("Coffee Machine is already turned off!".to_string())
        })?;
        pool.shutdown(self.settings.shutdown_grace_period, || {
            for outlet in self.outlets.values() {
                outlet.wake_waiters();
            }
        })?;
        info!("[MACHINE] Turned off {}!", self.description);
        Ok(())
    }

    fn serve(&self, outlet_no: usize, beverage_name: &str) -> Result<ServeOutcome, MachineError> {
        let pool = self.pool.read()?;
        let Some(pool) = pool.as_ref() else {
            return Err(MachineError::Lifecycle(format!(
                "Coffee Machine is not turned on! Cannot serve {}!",
                beverage_name
            )));
        };
        let outlet = self.outlet(outlet_no)?;
        let beverage = self.beverage(beverage_name)?;

        let mut stock = match self.stock.try_lock() {
            Ok(stock) => stock,
            Err(TryLockError::WouldBlock) => {
                debug!(
                    "[MACHINE] Stock in use, dropping {} for {}",
                    beverage_name, outlet
                );
                self.count(Event::Dropped);
                return Ok(ServeOutcome::Dropped);
            }
            Err(TryLockError::Poisoned(_)) => return Err(MachineError::LockError),
        };

        if let Err(err) = self.reserve(&mut stock, outlet, beverage) {
            drop(stock);
            info!("[MACHINE] {}", err);
            self.count(Event::Rejected);
            return Err(err);
        }
        drop(stock);

        let id = self.last_task_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.count(Event::Dispatched);
        if let Err(err) = pool.submit(PreparationTask::new(id, outlet.clone(), beverage.clone())) {
            self.stock.lock()?.refund(beverage.recipe());
            self.count(Event::Cancelled);
            return Err(err);
        }
        debug!("[MACHINE] Dispatched task {}: {} at {}", id, beverage_name, outlet);
        Ok(ServeOutcome::Dispatched(id))
    }

    fn add_ingredient_quantity(&self, ingredient_name: &str, quantity: i64) -> Result<(), MachineError> {
        self.stock.lock()?.add(ingredient_name, quantity)?;
        info!("[MACHINE] Added {} to {}!", quantity, ingredient_name);
        Ok(())
    }

    fn show_low_quantity_ingredients(&self) -> Result<Option<Vec<Ingredient>>, MachineError> {
        match self.stock.try_lock() {
            Ok(stock) => Ok(Some(stock.below(self.settings.low_quantity_threshold))),
            Err(TryLockError::WouldBlock) => {
                debug!("[MACHINE] Stock in use, skipping the low quantity report");
                Ok(None)
            }
            Err(TryLockError::Poisoned(_)) => Err(MachineError::LockError),
        }
    }

    fn snapshot(&self) -> Result<MachineSnapshot, MachineError> {
        let ingredients = self.stock.lock()?.ingredients().cloned().collect();
        Ok(MachineSnapshot {
            description: self.description.clone(),
            running: self.is_running(),
            outlets: self
                .outlets
                .values()
                .map(|outlet| OutletSnapshot {
                    id: outlet.id(),
                    busy: outlet.is_busy(),
                })
                .collect(),
            ingredients,
            beverages: self
                .beverages
                .values()
                .map(|beverage| beverage.as_ref().clone())
                .collect(),
            statistics: self.statistics.snapshot()?,
        })
    }
}

impl Drop for CoffeeMachine {
    fn drop(&mut self) {
        let pool = match self.pool.get_mut() {
            Ok(pool) => pool.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(pool) = pool {
            debug!("[MACHINE] Dropped while running, letting the workers finish on their own");
            pool.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        thread,
        time::{Duration, Instant},
    };

    use super::*;
    use crate::{loader::Loader, settings::ReservationPolicy};

    const CONFIGURATION: &str = r#"{
        "machine": {
            "outlets": { "count_n": 4 },
            "total_items_quantity": {
                "hot_water": 100,
                "hot_milk": 100,
                "hot_tea": 100,
                "ginger_syrup": 100,
                "sugar_syrup": 100
            },
            "beverages": {
                "hot_tea": { "hot_water": 200, "hot_tea": 30, "sugar_syrup": 10, "ginger_syrup": 10 },
                "ginger_milk": { "hot_milk": 40, "ginger_syrup": 30 },
                "milk_tea": { "hot_milk": 70, "hot_tea": 20 },
                "green_tea": { "hot_water": 10, "green_mixture": 30 },
                "water_cup": { "hot_water": 30 }
            }
        }
    }"#;

    fn machine_with(prepare_time_ms: u64, settings: MachineSettings) -> CoffeeMachine {
        let definition = Loader::new()
            .with_prepare_time_ms(prepare_time_ms)
            .from_json(CONFIGURATION)
            .unwrap();
        CoffeeMachine::new("Chai Point", definition, settings)
    }

    fn machine(prepare_time_ms: u64) -> CoffeeMachine {
        machine_with(prepare_time_ms, MachineSettings::default())
    }

    fn quantity(machine: &CoffeeMachine, name: &str) -> i64 {
        machine.ingredient(name).unwrap().unwrap().quantity()
    }

    fn quantities(machine: &CoffeeMachine) -> Vec<i64> {
        machine
            .snapshot()
            .unwrap()
            .ingredients
            .iter()
            .map(|ingredient| ingredient.quantity())
            .collect()
    }

    #[test]
    fn should_create_one_outlet_per_configured_count() {
        let machine = machine(10);
        assert_eq!(4, machine.outlet_count());
        let ids: Vec<usize> = machine.snapshot().unwrap().outlets.iter().map(|o| o.id).collect();
        assert_eq!(vec![1, 2, 3, 4], ids);
    }

    #[test]
    fn should_not_serve_before_starting() {
        let machine = machine(10);
        let result = machine.serve(1, "water_cup");
        assert_eq!(true, matches!(result, Err(MachineError::Lifecycle(_))));
        assert_eq!(100, quantity(&machine, "hot_water"));
    }

    #[test]
    fn should_not_start_twice() {
        let machine = machine(10);
        machine.start().unwrap();
        assert_eq!(true, matches!(machine.start(), Err(MachineError::Lifecycle(_))));
        machine.close().unwrap();
    }

    #[test]
    fn should_not_close_a_stopped_machine() {
        let machine = machine(10);
        assert_eq!(true, matches!(machine.close(), Err(MachineError::Lifecycle(_))));
    }

    #[test]
    fn should_start_again_after_closing() {
        let machine = machine(5);
        machine.start().unwrap();
        machine.close().unwrap();
        assert_eq!(false, machine.is_running());
        machine.start().unwrap();
        assert_eq!(true, matches!(machine.serve(1, "water_cup"), Ok(ServeOutcome::Dispatched(_))));
        machine.close().unwrap();
        assert_eq!(1, machine.statistics().unwrap().prepared);
    }

    #[test]
    fn should_fail_with_insufficient_hot_water_and_keep_the_stock() {
        let machine = machine(10);
        machine.start().unwrap();
        let before = quantities(&machine);

        let result = machine.serve(1, "hot_tea");

        assert_eq!(
            Err(MachineError::IngredientsInsufficient {
                beverage: "hot_tea".to_string(),
                outlet: 1,
                insufficient: vec!["hot_water".to_string()],
            }),
            result
        );
        assert_eq!(before, quantities(&machine));
        machine.close().unwrap();
        assert_eq!(0, machine.statistics().unwrap().dispatched);
    }

    #[test]
    fn should_fail_with_unavailable_ingredients_and_keep_the_stock() {
        let machine = machine(10);
        machine.start().unwrap();
        let before = quantities(&machine);

        let result = machine.serve(3, "green_tea");

        assert_eq!(
            Err(MachineError::IngredientsUnavailable {
                beverage: "green_tea".to_string(),
                outlet: 3,
                missing: vec!["green_mixture".to_string()],
            }),
            result
        );
        assert_eq!(before, quantities(&machine));
        machine.close().unwrap();
    }

    #[test]
    fn should_reject_an_unknown_beverage() {
        let machine = machine(10);
        machine.start().unwrap();
        let result = machine.serve(1, "espresso");
        assert_eq!(true, matches!(result, Err(MachineError::InvalidArgument(_))));
        machine.close().unwrap();
        assert_eq!(0, machine.statistics().unwrap().dispatched);
    }

    #[test]
    fn should_reject_an_outlet_out_of_range() {
        let machine = machine(10);
        machine.start().unwrap();
        assert_eq!(true, matches!(machine.serve(5, "water_cup"), Err(MachineError::InvalidArgument(_))));
        assert_eq!(true, matches!(machine.serve(0, "water_cup"), Err(MachineError::InvalidArgument(_))));
        machine.close().unwrap();
        assert_eq!(0, machine.statistics().unwrap().dispatched);
        assert_eq!(100, quantity(&machine, "hot_water"));
    }

    #[test]
    fn should_reserve_ingredients_before_preparing() {
        let machine = machine(10);
        machine.start().unwrap();
        assert_eq!(Ok(ServeOutcome::Dispatched(1)), machine.serve(2, "ginger_milk"));
        assert_eq!(60, quantity(&machine, "hot_milk"));
        assert_eq!(70, quantity(&machine, "ginger_syrup"));
        machine.close().unwrap();
        assert_eq!(1, machine.statistics().unwrap().prepared);
    }

    #[test]
    fn should_check_the_second_request_against_the_stock_left_by_the_first() {
        let machine = machine(10);
        machine.start().unwrap();

        assert_eq!(true, matches!(machine.serve(1, "ginger_milk"), Ok(ServeOutcome::Dispatched(_))));
        let second = machine.serve(1, "milk_tea");

        assert_eq!(
            Err(MachineError::IngredientsInsufficient {
                beverage: "milk_tea".to_string(),
                outlet: 1,
                insufficient: vec!["hot_milk".to_string()],
            }),
            second
        );
        assert_eq!(60, quantity(&machine, "hot_milk"));
        assert_eq!(100, quantity(&machine, "hot_tea"));
        machine.close().unwrap();
    }

    #[test]
    fn should_drop_requests_while_the_admission_lock_is_taken() {
        let machine = machine(10);
        machine.start().unwrap();
        {
            let _admission = machine.stock.lock().unwrap();
            assert_eq!(Ok(ServeOutcome::Dropped), machine.serve(1, "water_cup"));
            assert_eq!(Ok(None), machine.show_low_quantity_ingredients());
        }
        machine.close().unwrap();
        let statistics = machine.statistics().unwrap();
        assert_eq!(1, statistics.dropped);
        assert_eq!(0, statistics.dispatched);
        assert_eq!(100, quantity(&machine, "hot_water"));
    }

    #[test]
    fn should_never_consume_more_than_the_stock_under_concurrent_requests() {
        let machine = Arc::new(machine(1));
        machine.start().unwrap();

        let handles: Vec<_> = (0..8)
            .map(|thread_id| {
                let machine = machine.clone();
                thread::spawn(move || {
                    for request in 0..10 {
                        let outlet = (thread_id + request) % 4 + 1;
                        let _ = machine.serve(outlet, "water_cup");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        machine.close().unwrap();

        let dispatched = machine.statistics().unwrap().dispatched as i64;
        let hot_water = machine.ingredient("hot_water").unwrap().unwrap();
        assert_eq!(true, dispatched <= 3);
        assert_eq!(100 - 30 * dispatched, hot_water.quantity());
        assert_eq!(30 * dispatched, hot_water.consumed());
        assert_eq!(true, hot_water.quantity() >= 0);
    }

    #[test]
    fn should_prepare_one_beverage_at_a_time_on_the_same_outlet() {
        let machine = machine(40);
        machine.start().unwrap();
        let start = Instant::now();

        assert_eq!(true, matches!(machine.serve(1, "water_cup"), Ok(ServeOutcome::Dispatched(_))));
        assert_eq!(true, matches!(machine.serve(1, "water_cup"), Ok(ServeOutcome::Dispatched(_))));
        machine.close().unwrap();

        assert_eq!(2, machine.statistics().unwrap().prepared);
        assert_eq!(true, start.elapsed() >= Duration::from_millis(80));
    }

    #[test]
    fn should_keep_reserved_ingredients_when_the_outlet_times_out() {
        let machine = machine(10);
        machine.start().unwrap();
        let signal = crate::shutdown::ShutdownSignal::new();
        let outlet = machine.outlet(2).unwrap().clone();
        let guard = outlet.acquire(Duration::from_millis(5), &signal).unwrap();

        assert_eq!(true, matches!(machine.serve(2, "water_cup"), Ok(ServeOutcome::Dispatched(_))));
        thread::sleep(Duration::from_millis(100));
        drop(guard);
        machine.close().unwrap();

        assert_eq!(1, machine.statistics().unwrap().timed_out);
        assert_eq!(70, quantity(&machine, "hot_water"));
    }

    #[test]
    fn should_give_back_reserved_ingredients_when_refunding() {
        let settings = MachineSettings {
            reservation_policy: ReservationPolicy::RefundOnFailure,
            ..MachineSettings::default()
        };
        let machine = machine_with(10, settings);
        machine.start().unwrap();
        let signal = crate::shutdown::ShutdownSignal::new();
        let outlet = machine.outlet(2).unwrap().clone();
        let guard = outlet.acquire(Duration::from_millis(5), &signal).unwrap();

        assert_eq!(true, matches!(machine.serve(2, "water_cup"), Ok(ServeOutcome::Dispatched(_))));
        thread::sleep(Duration::from_millis(100));
        drop(guard);
        machine.close().unwrap();

        let statistics = machine.statistics().unwrap();
        assert_eq!(1, statistics.timed_out);
        assert_eq!(1, statistics.refunded);
        assert_eq!(100, quantity(&machine, "hot_water"));
    }

    #[test]
    fn should_cancel_preparations_after_the_grace_period() {
        let settings = MachineSettings {
            shutdown_grace_period: Duration::from_millis(50),
            ..MachineSettings::default()
        };
        let machine = machine_with(10_000, settings);
        machine.start().unwrap();
        assert_eq!(true, matches!(machine.serve(1, "water_cup"), Ok(ServeOutcome::Dispatched(_))));
        assert_eq!(true, matches!(machine.serve(1, "water_cup"), Ok(ServeOutcome::Dispatched(_))));
        thread::sleep(Duration::from_millis(20));

        let start = Instant::now();
        assert_eq!(Ok(()), machine.close());
        assert_eq!(true, start.elapsed() < Duration::from_secs(5));
        assert_eq!(2, machine.statistics().unwrap().cancelled);
    }

    #[test]
    fn should_add_ingredient_quantity() {
        let machine = machine(10);
        machine.add_ingredient_quantity("hot_water", 150).unwrap();
        assert_eq!(250, quantity(&machine, "hot_water"));
    }

    #[test]
    fn should_reject_a_negative_or_unknown_addition() {
        let machine = machine(10);
        assert_eq!(
            true,
            matches!(machine.add_ingredient_quantity("hot_water", -1), Err(MachineError::InvalidArgument(_)))
        );
        assert_eq!(
            true,
            matches!(machine.add_ingredient_quantity("coffee_syrup", 10), Err(MachineError::InvalidArgument(_)))
        );
        assert_eq!(100, quantity(&machine, "hot_water"));
    }

    #[test]
    fn should_keep_serving_after_an_addition_that_does_not_fit() {
        let machine = machine(5);
        assert_eq!(
            true,
            matches!(machine.add_ingredient_quantity("hot_water", i64::MAX), Err(MachineError::InvalidArgument(_)))
        );
        assert_eq!(100, quantity(&machine, "hot_water"));
        machine.start().unwrap();
        assert_eq!(true, matches!(machine.serve(1, "water_cup"), Ok(ServeOutcome::Dispatched(_))));
        machine.close().unwrap();
        assert_eq!(1, machine.statistics().unwrap().prepared);
    }

    #[test]
    fn should_record_a_preparation_with_a_huge_prepare_time() {
        let settings = MachineSettings {
            shutdown_grace_period: Duration::from_millis(50),
            ..MachineSettings::default()
        };
        let machine = machine_with(u64::MAX / 2 + 1, settings);
        machine.start().unwrap();
        assert_eq!(true, matches!(machine.serve(1, "water_cup"), Ok(ServeOutcome::Dispatched(_))));
        assert_eq!(true, matches!(machine.serve(1, "water_cup"), Ok(ServeOutcome::Dispatched(_))));
        thread::sleep(Duration::from_millis(20));

        assert_eq!(Ok(()), machine.close());
        let statistics = machine.statistics().unwrap();
        assert_eq!(2, statistics.cancelled);
        assert_eq!(0, statistics.in_flight());
    }

    #[test]
    fn should_list_low_quantity_ingredients() {
        let machine = machine(10);
        machine.start().unwrap();
        machine.serve(1, "milk_tea").unwrap();
        let low = machine.show_low_quantity_ingredients().unwrap().unwrap();
        let names: Vec<&str> = low.iter().map(|ingredient| ingredient.name()).collect();
        assert_eq!(vec!["hot_milk"], names);
        machine.close().unwrap();
    }

    #[test]
    fn should_let_workers_finish_when_dropped_while_running() {
        let machine = machine(5);
        machine.start().unwrap();
        machine.serve(1, "water_cup").unwrap();
        drop(machine);
    }
}
