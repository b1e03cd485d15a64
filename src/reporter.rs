//! Reportes en texto del estado de la cafetera
use std::fmt::Write;

use crate::{
    ingredient::Ingredient,
    machine::MachineSnapshot,
    statistics::StatisticsSnapshot,
};

pub fn render_details(snapshot: &MachineSnapshot) -> String {
    let mut details = String::new();
    let state = if snapshot.running { "on" } else { "off" };
    let _ = writeln!(details, "Name = {} ({})", snapshot.description, state);

    let _ = writeln!(details, "\nOutlets = {}", snapshot.outlets.len());
    for outlet in &snapshot.outlets {
        let busy = if outlet.busy { " busy" } else { "" };
        let _ = writeln!(details, "OUTLET({}){}", outlet.id, busy);
    }

    let _ = writeln!(details, "\nIngredients = {}", snapshot.ingredients.len());
    for ingredient in &snapshot.ingredients {
        let _ = writeln!(details, "{} consumed={}", ingredient, ingredient.consumed());
    }

    let _ = writeln!(details, "\nBeverages = {}", snapshot.beverages.len());
    for beverage in &snapshot.beverages {
        let _ = write!(details, "{}", beverage);
    }
    details
}

/// `None` indica que el reporte se salteo porque el stock estaba en uso.
pub fn render_low_quantity(low: Option<&[Ingredient]>) -> String {
    match low {
        None => "Coffee Machine is busy, low quantity report skipped".to_string(),
        Some([]) => "Coffee Machine has enough quantity of each ingredient!".to_string(),
        Some(ingredients) => {
            let mut report = "Following ingredients are low in quantity".to_string();
            for ingredient in ingredients {
                let _ = write!(report, "\n\t{}", ingredient);
            }
            report
        }
    }
}

pub fn render_statistics(statistics: &StatisticsSnapshot) -> String {
    format!(
        "[STATISTICS] dispatched={} | in flight={} | prepared={} | timed out={} | cancelled={} | rejected={} | dropped={} | refunded={}",
        statistics.dispatched,
        statistics.in_flight(),
        statistics.prepared,
        statistics.timed_out,
        statistics.cancelled,
        statistics.rejected,
        statistics.dropped,
        statistics.refunded
    )
}
