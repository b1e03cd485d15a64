use std::sync::Arc;

use crate::{beverage::Beverage, outlet::Outlet};

/// Bebida con los ingredientes ya reservados, esperando a prepararse en su salida.
#[derive(Debug, Clone)]
pub struct PreparationTask {
    pub id: usize,
    pub outlet: Arc<Outlet>,
    pub beverage: Arc<Beverage>,
}

impl PreparationTask {
    pub fn new(id: usize, outlet: Arc<Outlet>, beverage: Arc<Beverage>) -> PreparationTask {
        PreparationTask { id, outlet, beverage }
    }
}
