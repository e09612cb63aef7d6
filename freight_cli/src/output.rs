use comfy_table::{Cell, Table, presets::UTF8_FULL};
use freight_estimator::{
    gazetteer::Gazetteer,
    view::{EstimateView, SurfaceView},
};

fn table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table
}

pub fn locations_table(gazetteer: &Gazetteer) -> Table {
    let mut table = table();
    table.set_header(vec!["Location", "Longitude", "Latitude"]);

    for location in gazetteer.locations() {
        table.add_row(vec![
            Cell::new(&location.name),
            Cell::new(format!("{:.4}", location.lon)),
            Cell::new(format!("{:.4}", location.lat)),
        ]);
    }

    table
}

/// Summary tiles as a single row, labels in the header.
pub fn tiles_table(view: &EstimateView) -> Table {
    let mut table = table();
    table.set_header(view.tiles.iter().map(|tile| Cell::new(&tile.label)));
    table.add_row(view.tiles.iter().map(|tile| Cell::new(&tile.value)));
    table
}

pub fn breakdown_table(view: &EstimateView) -> Table {
    let mut table = table();
    table.set_header(vec!["Item", "Formula", "Amount"]);

    for row in &view.breakdown {
        table.add_row(vec![
            Cell::new(&row.category),
            Cell::new(&row.formula),
            Cell::new(&row.amount),
        ]);
    }

    table
}

pub fn surface_note(surface: &SurfaceView) -> String {
    format!(
        "Surface data: {} paved, {} unpaved, {} unknown segments. \
         The unpaved surcharge (x{}) is not applied to the estimate.",
        surface.paved_segments,
        surface.unpaved_segments,
        surface.unknown_segments,
        surface.unpaved_surcharge_factor
    )
}
