//! Event loop driving a [`Dashboard`].
//!
//! One task owns the dashboard and handles push messages, user commands and
//! request completions strictly one at a time. Server requests run on spawned
//! tasks and report back over an unbounded channel, so the loop itself never
//! waits on the network.

use super::{Dashboard, DashboardEvent, Effect, Notice, Surface, UserCommand};
use crate::api::MonitorApi;
use crate::mutation::{MutationKind, MutationOutcome};
use crate::push::PushEvent;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub struct DashboardRuntime<S: Surface> {
    dashboard: Dashboard,
    api: Arc<dyn MonitorApi>,
    surface: S,
    completions_tx: mpsc::UnboundedSender<DashboardEvent>,
    completions_rx: mpsc::UnboundedReceiver<DashboardEvent>,
    in_flight: usize,
}

impl<S: Surface> DashboardRuntime<S> {
    pub fn new(api: Arc<dyn MonitorApi>, surface: S) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            dashboard: Dashboard::new(),
            api,
            surface,
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Run until cancelled, until the user quits, or until both the push and
    /// input channels are closed and every outstanding request has reported
    /// back.
    pub async fn run(
        &mut self,
        mut push_rx: mpsc::Receiver<PushEvent>,
        mut input_rx: mpsc::Receiver<UserCommand>,
        cancel: CancellationToken,
    ) {
        self.surface.draw(&self.dashboard.screen());

        let mut push_open = true;
        let mut input_open = true;

        loop {
            if !push_open && !input_open && self.in_flight == 0 {
                tracing::debug!("Dashboard inputs closed");
                break;
            }

            let event = tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    tracing::info!("Dashboard shutting down");
                    break;
                }
                Some(event) = self.completions_rx.recv() => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    event
                }
                push = push_rx.recv(), if push_open => match push {
                    Some(push) => DashboardEvent::Push(push),
                    None => {
                        push_open = false;
                        continue;
                    }
                },
                command = input_rx.recv(), if input_open => match command {
                    Some(command) => DashboardEvent::Input(command),
                    None => {
                        input_open = false;
                        continue;
                    }
                },
            };

            let effects = self.dashboard.handle(event);
            if !self.apply(effects) {
                break;
            }
        }
    }

    /// Carry out effects. Returns false when the dashboard should stop.
    fn apply(&mut self, effects: Vec<Effect>) -> bool {
        let mut redraw = false;

        for effect in effects {
            match effect {
                Effect::Redraw => redraw = true,
                Effect::FetchStatistics => self.spawn_request(|api| async move {
                    DashboardEvent::StatisticsLoaded(api.fetch_statistics().await)
                }),
                Effect::Create { url } => self.spawn_request(|api| async move {
                    let result = api.create_target(&url).await;
                    DashboardEvent::MutationCompleted(MutationOutcome {
                        kind: MutationKind::Add,
                        url,
                        result,
                    })
                }),
                Effect::Delete { url } => self.spawn_request(|api| async move {
                    let result = api.remove_target(&url).await;
                    DashboardEvent::MutationCompleted(MutationOutcome {
                        kind: MutationKind::Remove,
                        url,
                        result,
                    })
                }),
                Effect::Notify(notice) => self.surface.notify(&notice),
                Effect::OpenExport(format) => {
                    let notice = Notice::Info(format!(
                        "Download the {} export from {}",
                        format.to_string().to_uppercase(),
                        self.api.export_url(format)
                    ));
                    self.surface.notify(&notice);
                }
                Effect::Quit => return false,
            }
        }

        // One draw per event, however many effects asked for it
        if redraw {
            self.surface.draw(&self.dashboard.screen());
        }
        true
    }

    fn spawn_request<F, Fut>(&mut self, request: F)
    where
        F: FnOnce(Arc<dyn MonitorApi>) -> Fut,
        Fut: Future<Output = DashboardEvent> + Send + 'static,
    {
        let fut = request(Arc::clone(&self.api));
        let tx = self.completions_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let event = fut.await;
            // Receiver only goes away when the dashboard has stopped
            let _ = tx.send(event);
        });
    }
}
