//! Pool fijo de hilos trabajadores que corren las preparaciones.
use std::{
    sync::{Arc, Condvar, Mutex},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use log::{debug, error, info, warn};

use crate::{
    errors::MachineError,
    preparation::PreparationTask,
    preparation_queue::PreparationQueue,
    worker::{PreparationContext, Worker},
};

/// Cantidad de trabajadores que siguen corriendo.
#[derive(Default)]
struct LiveWorkers {
    count: Mutex<usize>,
    cond: Condvar,
}

/// Lo tiene cada trabajador. Al liberarlo, incluso en un panic, el trabajador cuenta como terminado.
struct LiveToken {
    live: Arc<LiveWorkers>,
}

impl Drop for LiveToken {
    fn drop(&mut self) {
        match self.live.count.lock() {
            Ok(mut count) => *count = count.saturating_sub(1),
            Err(poisoned) => {
                let mut count = poisoned.into_inner();
                *count = count.saturating_sub(1);
            }
        }
        self.live.cond.notify_all();
    }
}

impl LiveWorkers {
    fn token(self: &Arc<Self>) -> Result<LiveToken, MachineError> {
        *self.count.lock()? += 1;
        Ok(LiveToken { live: self.clone() })
    }

    /// Espera a que terminen todos o pase `timeout`. Devuelve cuantos siguen corriendo.
    fn wait_all_gone(&self, timeout: Duration) -> Result<usize, MachineError> {
        let (count, _) = self
            .cond
            .wait_timeout_while(self.count.lock()?, timeout, |count| *count > 0)?;
        Ok(*count)
    }
}

pub struct WorkerPool {
    queue: Arc<Mutex<PreparationQueue>>,
    queue_cond: Arc<Condvar>,
    context: Arc<PreparationContext>,
    live: Arc<LiveWorkers>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn start(workers: usize, context: Arc<PreparationContext>) -> Result<WorkerPool, MachineError> {
        let mut pool = WorkerPool {
            queue: Arc::new(Mutex::new(PreparationQueue::new())),
            queue_cond: Arc::new(Condvar::new()),
            context,
            live: Arc::new(LiveWorkers::default()),
            handles: Vec::with_capacity(workers),
        };

        for id in 1..=workers {
            let token = pool.live.token()?;
            let worker = Worker::new(
                id,
                pool.queue.clone(),
                pool.queue_cond.clone(),
                pool.context.clone(),
            );
            let spawned = thread::Builder::new()
                .name(format!("worker-{}", id))
                .spawn(move || {
                    let _token = token;
                    if let Err(err) = worker.handle_tasks() {
                        error!("[WORKER {}] Stopped: {}", id, err);
                    }
                });
            match spawned {
                Ok(handle) => pool.handles.push(handle),
                Err(err) => {
                    pool.release();
                    return Err(MachineError::Lifecycle(format!(
                        "Could not start worker {}: {}",
                        id, err
                    )));
                }
            }
        }
        debug!("[POOL] Started {} workers", workers);
        Ok(pool)
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Encola una preparacion para el primer trabajador libre. No espera a que termine.
    pub fn submit(&self, task: PreparationTask) -> Result<(), MachineError> {
        let mut queue = self.queue.lock()?;
        if queue.finished {
            return Err(MachineError::Lifecycle(format!(
                "Cannot prepare {}, the machine is shutting down!",
                task.beverage.name()
            )));
        }
        let id = task.id;
        queue.push(task);
        debug!("[POOL] Queued task {} ({} waiting)", id, queue.len());
        self.queue_cond.notify_one();
        Ok(())
    }

    /// Deja que los trabajadores terminen lo encolado en segundo plano, sin esperarlos.
    pub fn release(self) {
        match self.queue.lock() {
            Ok(mut queue) => queue.finished = true,
            Err(poisoned) => poisoned.into_inner().finished = true,
        }
        self.queue_cond.notify_all();
        debug!("[POOL] Released {} workers", self.size());
    }

    /// Deja que los trabajadores terminen lo encolado, esperando a lo sumo `grace`. Pasado ese tiempo
    /// se descartan las pendientes, se cancelan las que corren, se llama a `interrupt` para despertar
    /// a los que esperan, y los trabajadores tienen otro `grace` para terminar.
    pub fn shutdown(mut self, grace: Duration, interrupt: impl Fn()) -> Result<(), MachineError> {
        let started = Instant::now();
        self.queue.lock()?.finished = true;
        self.queue_cond.notify_all();

        let mut running = self.live.wait_all_gone(grace)?;
        if running > 0 {
            let pending = self.queue.lock()?.drain();
            warn!(
                "[POOL] {} workers still busy after {}ms, cancelling them and {} queued tasks",
                running,
                grace.as_millis(),
                pending.len()
            );
            for task in &pending {
                self.context.abandon(task);
            }
            self.context.signal.cancel();
            interrupt();
            self.queue_cond.notify_all();
            running = self.live.wait_all_gone(grace)?;
        }

        if running > 0 {
            return Err(MachineError::Lifecycle(format!(
                "Unable to turn off Coffee Machine after {}ms, {} workers still running!",
                started.elapsed().as_millis(),
                running
            )));
        }

        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                error!("[POOL] A worker panicked");
            }
        }
        info!("[POOL] Every worker stopped");
        Ok(())
    }
}
