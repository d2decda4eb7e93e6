use crate::application::agents::dashboard_agent::DashboardAgent;
use crate::domain::analytics::ChunkSize;
use crate::domain::market::{TradingDate, Underlying};
use crate::interfaces::dashboard::render_dashboard;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::snapshot_view_model::{DashboardView, SnapshotViewModel};
use eframe::egui;
use std::time::Duration;

impl eframe::App for DashboardAgent {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(DesignSystem::theme());

        // --- 1. Drain captured logs ---
        self.update();

        let dataset = self.dataset();
        let view = SnapshotViewModel::build(&dataset, self.underlying.as_str(), self.chunk_size);

        // --- 2. Top bar: date selection and table controls ---
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(DesignSystem::SPACING_SMALL);
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("Open Interest").strong());
                ui.separator();
                render_date_controls(ui, self);
                ui.separator();
                render_table_controls(ui, self);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.toggle_value(&mut self.show_logs, "Logs");
                    let poll_secs = self.client.poll_interval().as_secs();
                    let status = match dataset.fetched_at {
                        Some(at) => {
                            format!("Updated {} · every {}s", at.format("%H:%M:%S"), poll_secs)
                        }
                        None => "Waiting for data".to_string(),
                    };
                    ui.label(
                        egui::RichText::new(status)
                            .small()
                            .color(DesignSystem::TEXT_MUTED),
                    );
                });
            });
            if let Some(error) = &self.date_input_error {
                ui.label(
                    egui::RichText::new(error)
                        .small()
                        .color(DesignSystem::DANGER),
                );
            }
            ui.add_space(DesignSystem::SPACING_SMALL);
        });

        // --- 3. Right sidebar: logs ---
        if self.show_logs {
            egui::SidePanel::right("log_panel")
                .default_width(360.0)
                .min_width(250.0)
                .resizable(true)
                .show(ctx, |ui| {
                    ui.heading("System Logs");
                    ui.separator();
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for line in &self.log_history {
                                ui.label(
                                    egui::RichText::new(line)
                                        .monospace()
                                        .small()
                                        .color(DesignSystem::log_color(line)),
                                );
                            }
                        });
                });
        }

        // --- 4. Central panel: one table per group ---
        egui::CentralPanel::default().show(ctx, |ui| {
            if let DashboardView::Groups {
                date, record_count, ..
            } = &view
            {
                ui.label(
                    egui::RichText::new(format!(
                        "{} · {} snapshots on {}",
                        self.underlying, record_count, date
                    ))
                    .color(DesignSystem::TEXT_SECONDARY),
                );
                ui.add_space(DesignSystem::SPACING_SMALL);
            }
            render_dashboard(ui, &view);
        });

        // Datasets arrive from the background runtime without an input event
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

fn render_date_controls(ui: &mut egui::Ui, agent: &mut DashboardAgent) {
    if ui.button("◀").on_hover_text("Previous day").clicked() {
        agent.previous_day();
    }

    let response = ui.add(
        egui::TextEdit::singleline(&mut agent.date_input)
            .desired_width(96.0)
            .hint_text("YYYY-MM-DD"),
    );
    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        agent.apply_date_input();
    }

    if ui.button("▶").on_hover_text("Next day").clicked() {
        agent.next_day();
    }
    if ui.button("Today").clicked() {
        agent.select_date(TradingDate::today());
    }
}

fn render_table_controls(ui: &mut egui::Ui, agent: &mut DashboardAgent) {
    egui::ComboBox::from_id_salt("underlying")
        .selected_text(agent.underlying.as_str())
        .show_ui(ui, |ui| {
            for underlying in Underlying::all() {
                ui.selectable_value(&mut agent.underlying, underlying, underlying.as_str());
            }
        });

    let mut size = agent.chunk_size.get() as i64;
    let slider = egui::Slider::new(&mut size, ChunkSize::MIN as i64..=ChunkSize::MAX as i64)
        .text("rows per group");
    if ui.add(slider).changed() {
        agent.set_chunk_size(size);
    }

    if ui.button("⟳ Refresh").clicked() {
        agent.refresh();
    }
}
