pub mod beverage;
pub mod constants;
pub mod errors;
pub mod ingredient;
pub mod loader;
pub mod machine;
pub mod outlet;
pub mod preparation;
pub mod preparation_queue;
pub mod recipe;
pub mod reporter;
pub mod settings;
pub mod shutdown;
pub mod statistics;
pub mod stock;
pub mod worker;
pub mod worker_pool;

use std::{path::PathBuf, process, thread, time::Duration};

use clap::Parser;
use log::{error, LevelFilter};
use rand::{seq::SliceRandom, thread_rng, Rng};
use simple_logger::SimpleLogger;

use constants::{DEFAULT_CONFIGURATION_PATH, DEFAULT_PAUSE_BETWEEN_REQUESTS_MS};
use errors::MachineError;
use loader::Loader;
use machine::{BeverageDispenser, CoffeeMachine, ServeOutcome};
use settings::{MachineSettings, ReservationPolicy};

/// Un llamado a `serve` de la secuencia: numero de salida y nombre de bebida.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ServeRequest {
    outlet: usize,
    beverage: String,
}

fn parse_request(value: &str) -> Result<ServeRequest, String> {
    let (outlet, beverage) = value
        .split_once(':')
        .ok_or_else(|| format!("expected OUTLET:BEVERAGE, got {}", value))?;
    let outlet = outlet
        .trim()
        .parse()
        .map_err(|_| format!("{} is not an outlet number", outlet))?;
    let beverage = beverage.trim();
    if beverage.is_empty() {
        return Err(format!("missing beverage in {}", value));
    }
    Ok(ServeRequest {
        outlet,
        beverage: beverage.to_string(),
    })
}

/// Cantidad de un ingrediente a agregar antes de servir.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Refill {
    ingredient: String,
    quantity: i64,
}

fn parse_refill(value: &str) -> Result<Refill, String> {
    let (ingredient, quantity) = value
        .split_once(':')
        .ok_or_else(|| format!("expected INGREDIENT:QUANTITY, got {}", value))?;
    let ingredient = ingredient.trim();
    if ingredient.is_empty() {
        return Err(format!("missing ingredient in {}", value));
    }
    let quantity = quantity
        .trim()
        .parse()
        .map_err(|_| format!("{} is not a quantity", quantity))?;
    Ok(Refill {
        ingredient: ingredient.to_string(),
        quantity,
    })
}

/// Carga una cafetera, sirve una secuencia de bebidas y la apaga
#[derive(Parser, Debug)]
#[command(name = "coffee-machine", version, about, long_about = None)]
struct Cli {
    /// Archivo de configuracion de la cafetera (salidas, stock y bebidas)
    #[arg(default_value = DEFAULT_CONFIGURATION_PATH)]
    config: PathBuf,

    /// Nombre que se muestra de la cafetera
    #[arg(long, default_value = "Chai Point")]
    name: String,

    /// Pedido a servir, como SALIDA:BEBIDA. Se puede repetir
    #[arg(short = 's', long = "serve", value_parser = parse_request)]
    requests: Vec<ServeRequest>,

    /// Ingrediente a reponer antes de servir, como INGREDIENTE:CANTIDAD. Se puede repetir
    #[arg(long = "refill", value_parser = parse_refill)]
    refills: Vec<Refill>,

    /// Agrega esta cantidad de pedidos con salida y bebida al azar
    #[arg(long)]
    random: Option<usize>,

    /// Sirve los pedidos en orden aleatorio
    #[arg(long)]
    shuffle: bool,

    /// Pausa entre dos pedidos
    #[arg(long, default_value_t = DEFAULT_PAUSE_BETWEEN_REQUESTS_MS)]
    pause_ms: u64,

    /// Tiempo de preparacion de todas las bebidas, reemplaza al del archivo de configuracion
    #[arg(long)]
    prepare_time_ms: Option<u64>,

    /// Cuanto espera el apagado a las preparaciones, antes y despues de cancelarlas
    #[arg(long)]
    grace_period_ms: Option<u64>,

    /// Devuelve los ingredientes si una preparacion se vence o se cancela
    #[arg(long)]
    refund_on_failure: bool,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn settings(&self) -> MachineSettings {
        let mut settings = MachineSettings::default();
        if let Some(grace_period_ms) = self.grace_period_ms {
            settings.shutdown_grace_period = Duration::from_millis(grace_period_ms);
        }
        if self.refund_on_failure {
            settings.reservation_policy = ReservationPolicy::RefundOnFailure;
        }
        settings
    }

    fn loader(&self) -> Loader {
        match self.prepare_time_ms {
            Some(prepare_time_ms) => Loader::new().with_prepare_time_ms(prepare_time_ms),
            None => Loader::new(),
        }
    }
}

/// Pedidos a correr: los indicados, los aleatorios, o uno por bebida si no se pidio ninguno.
fn requests(cli: &Cli, machine: &CoffeeMachine) -> Vec<ServeRequest> {
    let beverages: Vec<&str> = machine.beverage_names().collect();
    let outlets = machine.outlet_count();
    let mut requests = cli.requests.clone();

    let mut rng = thread_rng();
    for _ in 0..cli.random.unwrap_or(0) {
        if let Some(beverage) = beverages.choose(&mut rng) {
            requests.push(ServeRequest {
                outlet: rng.gen_range(1, outlets + 1),
                beverage: beverage.to_string(),
            });
        }
    }

    if requests.is_empty() {
        requests = beverages
            .iter()
            .enumerate()
            .map(|(i, beverage)| ServeRequest {
                outlet: i % outlets + 1,
                beverage: beverage.to_string(),
            })
            .collect();
    }
    if cli.shuffle {
        requests.shuffle(&mut rng);
    }
    requests
}

fn refill_all(machine: &CoffeeMachine, refills: &[Refill]) -> Result<(), MachineError> {
    for refill in refills {
        match machine.add_ingredient_quantity(&refill.ingredient, refill.quantity) {
            Ok(()) => {
                if let Some(ingredient) = machine.ingredient(&refill.ingredient)? {
                    println!("Refilled {}", ingredient);
                }
            }
            Err(err @ MachineError::InvalidArgument(_)) => println!("{}", err),
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn serve_all<M: BeverageDispenser>(machine: &M, requests: &[ServeRequest], pause: Duration) -> Result<(), MachineError> {
    for request in requests {
        match machine.serve(request.outlet, &request.beverage) {
            Ok(ServeOutcome::Dispatched(id)) => {
                println!("Serving {} at OUTLET({}) (task {})", request.beverage, request.outlet, id)
            }
            Ok(ServeOutcome::Dropped) => {
                println!("Coffee Machine busy, {} at OUTLET({}) ignored", request.beverage, request.outlet)
            }
            Err(err) if err.is_recoverable() => println!("{}", err),
            Err(err @ MachineError::InvalidArgument(_)) => println!("{}", err),
            Err(err) => return Err(err),
        }
        thread::sleep(pause);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), MachineError> {
    let definition = cli.loader().from_file(&cli.config)?;
    let machine = CoffeeMachine::new(&cli.name, definition, cli.settings());
    let requests = requests(cli, &machine);

    refill_all(&machine, &cli.refills)?;
    machine.start()?;
    println!("{}", reporter::render_details(&machine.snapshot()?));

    let served = serve_all(&machine, &requests, Duration::from_millis(cli.pause_ms));
    if let Err(err) = served {
        let _ = machine.close();
        return Err(err);
    }

    let low = machine.show_low_quantity_ingredients()?;
    println!("{}", reporter::render_low_quantity(low.as_deref()));

    machine.close()?;
    let snapshot = machine.snapshot()?;
    println!("{}", reporter::render_details(&snapshot));
    println!("{}", reporter::render_statistics(&snapshot.statistics));
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = SimpleLogger::new().with_level(cli.log_level).init() {
        eprintln!("Could not start the logger: {}", err);
    }

    if let Err(err) = run(&cli) {
        error!("{}", err);
        eprintln!("{}", err);
        process::exit(1);
    }
}
