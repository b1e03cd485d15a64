//! Parametros de configuracion de la cafetera

/// Cantidad por debajo de la cual se avisa que un ingrediente se esta acabando
pub const MINIMUM_INGREDIENT_QUANTITY: i64 = 50;

/// Tiempo que se tarda en preparar cualquier bebida, salvo que el archivo de configuracion diga otra cosa
pub const DEFAULT_PREPARE_TIME_MS: u64 = 5000;

/// Cantidad de hilos trabajadores por salida
pub const WORKERS_PER_OUTLET: usize = 2;

/// Una preparacion espera su salida a lo sumo esta cantidad de veces el tiempo de preparacion de la receta
pub const OUTLET_WAIT_FACTOR: u64 = 2;

/// Cuanto espera `close` a las preparaciones en curso antes de cancelarlas, y otra vez despues de cancelarlas
pub const SHUTDOWN_GRACE_PERIOD_MS: u64 = 60_000;

/// Archivo de configuracion que se lee si no se indica otro
pub const DEFAULT_CONFIGURATION_PATH: &str = "machine.json";

/// Pausa entre dos pedidos de la secuencia de demostracion
pub const DEFAULT_PAUSE_BETWEEN_REQUESTS_MS: u64 = 100;
