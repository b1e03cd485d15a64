//! Trabajador de la cafetera. Procesa las preparaciones.
use std::sync::{Arc, Condvar, Mutex};

use log::{debug, error, info, warn};

use crate::{
    errors::MachineError,
    preparation::PreparationTask,
    preparation_queue::PreparationQueue,
    settings::ReservationPolicy,
    shutdown::ShutdownSignal,
    statistics::{Event, Statistics},
    stock::Stock,
};

/// Lo que comparten los trabajadores de un encendido: el stock (para devolver ingredientes),
/// las estadisticas, la senal de cancelacion y la politica de reserva.
pub struct PreparationContext {
    pub stock: Arc<Mutex<Stock>>,
    pub statistics: Arc<Statistics>,
    pub signal: ShutdownSignal,
    pub policy: ReservationPolicy,
}

impl PreparationContext {
    pub fn new(
        stock: Arc<Mutex<Stock>>,
        statistics: Arc<Statistics>,
        policy: ReservationPolicy,
    ) -> PreparationContext {
        PreparationContext {
            stock,
            statistics,
            signal: ShutdownSignal::new(),
            policy,
        }
    }

    /// Corre una preparacion. Los errores no salen de aca, se loguean y se cuentan.
    pub fn run(&self, task: &PreparationTask) {
        let result = task.outlet.prepare(&task.beverage, &self.signal);
        let event = match &result {
            Ok(()) => Event::Prepared,
            Err(MachineError::OutletTimeout { .. }) => Event::TimedOut,
            Err(MachineError::PreparationCancelled { .. }) => Event::Cancelled,
            Err(err) => {
                error!("[TASK {}] Failed preparing {}: {}", task.id, task.beverage.name(), err);
                Event::Cancelled
            }
        };
        self.count(event);
        if result.is_err() {
            self.give_back(task);
        }
    }

    /// Para las preparaciones que seguian encoladas cuando la cafetera dejo de esperarlas.
    pub fn abandon(&self, task: &PreparationTask) {
        warn!(
            "[TASK {}] Dropped {} for {} before it started",
            task.id,
            task.beverage.name(),
            task.outlet
        );
        self.count(Event::Cancelled);
        self.give_back(task);
    }

    fn give_back(&self, task: &PreparationTask) {
        if self.policy != ReservationPolicy::RefundOnFailure {
            debug!(
                "[TASK {}] Ingredients of {} are not given back",
                task.id,
                task.beverage.name()
            );
            return;
        }
        match self.stock.lock() {
            Ok(mut stock) => {
                stock.refund(task.beverage.recipe());
                info!(
                    "[TASK {}] Gave back the ingredients of {}",
                    task.id,
                    task.beverage.name()
                );
                self.count(Event::Refunded);
            }
            Err(_) => error!("[TASK {}] Error while taking the stock lock", task.id),
        }
    }

    fn count(&self, event: Event) {
        if let Err(err) = self.statistics.record(event) {
            error!("Error recording {:?}: {}", event, err);
        }
    }
}

/// Representa a un trabajador de la cafetera.
/// Tiene referencias a la cola de preparaciones (junto con su variable condicional) y al contexto del encendido.
pub struct Worker {
    id: usize,
    queue: Arc<Mutex<PreparationQueue>>,
    queue_cond: Arc<Condvar>,
    context: Arc<PreparationContext>,
}

impl Worker {
    pub fn new(
        id: usize,
        queue: Arc<Mutex<PreparationQueue>>,
        queue_cond: Arc<Condvar>,
        context: Arc<PreparationContext>,
    ) -> Worker {
        Worker {
            id,
            queue,
            queue_cond,
            context,
        }
    }

    /// Toma preparaciones hasta que la cola este terminada y vacia.
    pub fn handle_tasks(&self) -> Result<(), MachineError> {
        loop {
            let task = {
                let mut queue = self
                    .queue_cond
                    .wait_while(self.queue.lock()?, |queue| {
                        queue.is_empty() && !queue.finished
                    })?;

                match queue.pop() {
                    Some(task) => task,
                    None => {
                        debug!("[WORKER {}] No more tasks", self.id);
                        return Ok(());
                    }
                }
            };

            debug!(
                "[WORKER {}] Takes task {} ({} at {})",
                self.id,
                task.id,
                task.beverage.name(),
                task.outlet
            );
            self.context.run(&task);
        }
    }
}
