//! Watch command implementation

use crate::api::{HttpMonitorApi, MonitorApi};
use crate::cli::output::{format_notice, format_screen};
use crate::config::SitewatchConfig;
use crate::dashboard::{DashboardRuntime, Notice, Screen, Surface, UserCommand};
use crate::push::PushChannel;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const PUSH_BUFFER: usize = 32;
const INPUT_BUFFER: usize = 16;

/// ANSI: clear screen, cursor home
const CLEAR: &str = "\x1B[2J\x1B[H";

/// Draws the dashboard on stdout.
pub struct TerminalSurface {
    server: String,
    /// Notices shown under the next frame
    notices: Vec<String>,
}

impl TerminalSurface {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            notices: Vec::new(),
        }
    }

    fn write(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout
            .write_all(text.as_bytes())
            .and_then(|_| stdout.flush())
        {
            tracing::debug!(error = %e, "Failed to write to terminal");
        }
    }
}

impl Surface for TerminalSurface {
    fn draw(&mut self, screen: &Screen) {
        let mut text = String::from(CLEAR);
        text.push_str(&format_screen(screen, &self.server));
        text.push('\n');
        for notice in &self.notices {
            text.push_str(notice);
            text.push('\n');
        }
        text.push_str("> ");
        self.write(&text);
    }

    fn notify(&mut self, notice: &Notice) {
        let line = format_notice(notice);
        self.write(&format!("\n{}\n> ", line));

        // Help and prompts are only interesting until the next command
        if matches!(notice, Notice::Validation(_) | Notice::RequestFailed(_)) {
            self.notices.push(line);
            if self.notices.len() > 3 {
                self.notices.remove(0);
            }
        }
    }
}

/// Read stdin lines on a dedicated thread.
///
/// A blocking read would otherwise keep the runtime alive after the dashboard
/// has quit.
fn spawn_stdin_reader(tx: mpsc::Sender<UserCommand>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::debug!(error = %e, "Stopped reading stdin");
                    break;
                }
            };
            if let Some(command) = UserCommand::parse(&line) {
                if tx.blocking_send(command).is_err() {
                    break;
                }
            }
        }
    });
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
        _ = cancel_token.cancelled() => return,
    }

    cancel_token.cancel();
}

/// Main watch command handler
pub async fn run_watch(config: SitewatchConfig) -> Result<(), Box<dyn std::error::Error>> {
    let api: Arc<dyn MonitorApi> = Arc::new(HttpMonitorApi::new(&config.server)?);
    let cancel_token = CancellationToken::new();

    // 1. Push channel
    let ws_url = config.server.websocket_url();
    tracing::info!(url = %ws_url, "Starting push channel");
    let (push_tx, push_rx) = mpsc::channel(PUSH_BUFFER);
    let push_handle = PushChannel::new(ws_url, config.reconnect.clone())
        .start(push_tx, cancel_token.clone());

    // 2. User input
    let (input_tx, input_rx) = mpsc::channel(INPUT_BUFFER);
    spawn_stdin_reader(input_tx);

    // 3. Signals
    let signal_handle = tokio::spawn(shutdown_signal(cancel_token.clone()));

    // 4. Event loop
    let surface = TerminalSurface::new(config.server.base_url.clone());
    let mut runtime = DashboardRuntime::new(api, surface);
    runtime.run(push_rx, input_rx, cancel_token.clone()).await;

    // 5. Cleanup
    cancel_token.cancel();
    push_handle.await?;
    signal_handle.await?;

    println!();
    tracing::info!("Dashboard stopped");
    Ok(())
}
