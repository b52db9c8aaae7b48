use comfy_table::{Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{ArrangementTotals, MonthlyOptimum, WindowOptimum},
    dataset::SkyCondition,
    quantity::WattHoursPerSquareMetre,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn total_cell(total: WattHoursPerSquareMetre, best: WattHoursPerSquareMetre) -> Cell {
    let cell = Cell::new(total).set_alignment(CellAlignment::Right);
    if total == best { cell.fg(Color::Green) } else { cell }
}

#[must_use]
pub fn build_arrangement_table(totals: &[ArrangementTotals]) -> Table {
    let best_cloudy =
        totals.iter().map(|row| row.cloudy).max().unwrap_or(WattHoursPerSquareMetre::ZERO);
    let best_clear =
        totals.iter().map(|row| row.clear).max().unwrap_or(WattHoursPerSquareMetre::ZERO);

    let mut table = new_table();
    table.set_header(vec!["Arrangement", "Cloudy sky GHI", "Clear sky GHI"]);
    for row in totals {
        table.add_row(vec![
            Cell::new(&row.label),
            total_cell(row.cloudy, best_cloudy),
            total_cell(row.clear, best_clear),
        ]);
    }
    table
}

#[must_use]
pub fn build_monthly_optima_table(rows: &[MonthlyOptimum]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Month",
        "Cloudy tilt",
        "Cloudy GHI",
        "Clear tilt",
        "Clear GHI",
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.month.short_name()),
            Cell::new(format!("{}°", row.cloudy.tilt_degrees))
                .set_alignment(CellAlignment::Right),
            Cell::new(row.cloudy.total).set_alignment(CellAlignment::Right),
            Cell::new(format!("{}°", row.clear.tilt_degrees))
                .set_alignment(CellAlignment::Right),
            Cell::new(row.clear.total).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_window_table(sky: SkyCondition, windows: &[WindowOptimum]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Window".to_owned(), format!("Optimal tilt ({sky})")]);
    for window in windows {
        table.add_row(vec![
            Cell::new(&window.label),
            Cell::new(format!("{}°", window.optimum.tilt_degrees))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
