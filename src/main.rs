use oiboard::application::agents::dashboard_agent::DashboardAgent;
use oiboard::application::client::DashboardClient;
use oiboard::application::system::Application;
use oiboard::config::Config;

use tracing::{Level, info};
use tracing_subscriber::prelude::*;

// Forwards formatted log lines to the UI log panel
struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).to_string();
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 0. Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // 1. Log channel for the UI
    let (log_tx, log_rx) = crossbeam_channel::unbounded();

    // 2. Logging: stdout + UI
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory { sender: log_tx })
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    info!("Initializing oiboard...");

    // 3. Tokio runtime on a background thread; the UI owns the main thread
    let (system_tx, system_rx) = crossbeam_channel::bounded(1);

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("Failed to build Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async move {
            info!("Background Runtime Started.");

            let config = match Config::from_env() {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!("Failed to load config: {:#}", e);
                    return;
                }
            };

            let app = match Application::build(config) {
                Ok(app) => app,
                Err(e) => {
                    tracing::error!("Failed to build application: {:#}", e);
                    return;
                }
            };

            let (handle, service) = app.start();
            let _ = system_tx.send(handle);
            info!("Snapshot service running.");

            // The service stops once the UI drops its side of the channels
            if let Err(e) = service.await {
                tracing::error!("Snapshot service terminated: {}", e);
            }
        });
    });

    // 4. Wait for the system handle
    info!("Waiting for System to boot...");
    let system_handle = system_rx
        .recv()
        .map_err(|_| anyhow::anyhow!("Background runtime exited before the system started"))?;
    info!("System Connected. Launching UI.");

    // 5. UI state
    let client = DashboardClient::new(system_handle, log_rx);
    let agent = DashboardAgent::new(client);

    // 6. Run UI (blocks the main thread)
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 860.0])
            .with_title("oiboard: Open Interest Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "oiboard",
        native_options,
        Box::new(|_cc| Ok(Box::new(agent))),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}
