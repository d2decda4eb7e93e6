use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::formatting::Cell;
use crate::interfaces::view_models::snapshot_view_model::{
    ColumnHeader, DashboardView, GroupView,
};
use eframe::egui;

/// Renders the central panel content for the current view.
pub fn render_dashboard(ui: &mut egui::Ui, view: &DashboardView) {
    match view {
        DashboardView::Loading { date } => {
            ui.add_space(DesignSystem::SPACING_MEDIUM);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(
                    egui::RichText::new(format!("Loading snapshots for {}...", date))
                        .color(DesignSystem::TEXT_SECONDARY),
                );
            });
        }
        DashboardView::NoData { message, .. } => {
            ui.add_space(DesignSystem::SPACING_MEDIUM);
            ui.label(
                egui::RichText::new(message)
                    .size(16.0)
                    .color(DesignSystem::TEXT_SECONDARY),
            );
        }
        DashboardView::Groups {
            headers,
            comparison_headers,
            groups,
            ..
        } => {
            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for group in groups {
                        render_group(ui, headers, comparison_headers, group);
                        ui.add_space(DesignSystem::SPACING_MEDIUM);
                    }
                });
        }
    }
}

fn render_group(
    ui: &mut egui::Ui,
    headers: &[ColumnHeader],
    comparison_headers: &[ColumnHeader],
    group: &GroupView,
) {
    DesignSystem::card_frame().show(ui, |ui| {
        ui.label(
            egui::RichText::new(&group.title)
                .strong()
                .size(14.0)
                .color(DesignSystem::ACCENT_SECONDARY),
        );
        ui.add_space(DesignSystem::SPACING_SMALL);

        egui::Grid::new(("group_grid", group.index))
            .striped(true)
            .min_col_width(DesignSystem::CELL_MIN_WIDTH)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                header_row(ui, headers);

                for row in &group.rows {
                    cell_row(ui, headers, row, false);
                }

                if let Some(previous) = &group.previous_summary {
                    cell_row_labelled(ui, "Previous group", headers, previous);
                }
                cell_row_labelled(ui, "Group total", headers, &group.summary);
            });

        ui.add_space(DesignSystem::SPACING_SMALL);
        ui.separator();

        egui::Grid::new(("comparison_grid", group.index))
            .min_col_width(DesignSystem::CELL_MIN_WIDTH * 1.5)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                header_row(ui, comparison_headers);
                cell_row(ui, comparison_headers, &group.comparison, true);
            });

        if !group.comparison_data.has_previous() {
            ui.label(
                egui::RichText::new("First group: nothing to compare against")
                    .small()
                    .color(DesignSystem::TEXT_MUTED),
            );
        }
    });
}

fn header_row(ui: &mut egui::Ui, headers: &[ColumnHeader]) {
    for header in headers {
        ui.label(
            egui::RichText::new(header.label)
                .strong()
                .color(DesignSystem::TEXT_SECONDARY),
        );
    }
    ui.end_row();
}

fn cell_row(ui: &mut egui::Ui, headers: &[ColumnHeader], cells: &[Cell], emphasize: bool) {
    for (header, cell) in headers.iter().zip(cells) {
        let mut text = egui::RichText::new(cell.to_string());
        if header.signed {
            text = text.color(DesignSystem::tone_color(cell.tone()));
        } else if cell.is_absent() {
            text = text.color(DesignSystem::TEXT_MUTED);
        }
        if emphasize {
            text = text.strong();
        }
        ui.label(text);
    }
    ui.end_row();
}

/// Summary rows carry their label in the time column.
fn cell_row_labelled(ui: &mut egui::Ui, label: &str, headers: &[ColumnHeader], cells: &[Cell]) {
    let mut cells = cells.to_vec();
    if let Some(first) = cells.first_mut() {
        let time = match first {
            Cell::Text(time) => format!("{} (to {})", label, time),
            _ => label.to_string(),
        };
        *first = Cell::Text(time);
    }

    cell_row(ui, headers, &cells, true);
}
