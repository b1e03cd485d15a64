//! Representacion de la cola de preparaciones
use std::collections::VecDeque;

use crate::preparation::PreparationTask;

/// Cola de preparaciones a realizar. Se le agrega el campo `finished` para indicar que no se van a estar cargando más preparaciones a la cola.
#[derive(Default)]
pub struct PreparationQueue {
    tasks: VecDeque<PreparationTask>,
    pub finished: bool,
}

impl PreparationQueue {
    pub fn new() -> PreparationQueue {
        PreparationQueue {
            tasks: VecDeque::new(),
            finished: false,
        }
    }

    pub fn push(&mut self, task: PreparationTask) {
        self.tasks.push_back(task);
    }

    pub fn pop(&mut self) -> Option<PreparationTask> {
        self.tasks.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Saca todas las preparaciones pendientes y deja la cola vacia.
    pub fn drain(&mut self) -> Vec<PreparationTask> {
        self.tasks.drain(..).collect()
    }
}
