//! Event dispatcher: drains the position queue into the reporter.
//!
//! One dispatcher runs per `Active` period. It consumes [`SourceEvent`]s one
//! at a time, so deliveries from the two channels never overlap.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::context::SessionContext;
use crate::position::SourceEvent;
use crate::report::{DeliveryOutcome, Reporter, TrackTransport};
use crate::status::StatusSink;

/// Consumer side of the position queue.
pub(crate) struct Dispatcher<T> {
    reporter: Reporter<T>,
    context: Arc<SessionContext>,
    events: mpsc::Receiver<SourceEvent>,
    status: StatusSink,
}

impl<T: TrackTransport + 'static> Dispatcher<T> {
    pub(crate) fn new(
        reporter: Reporter<T>,
        context: Arc<SessionContext>,
        events: mpsc::Receiver<SourceEvent>,
        status: StatusSink,
    ) -> Self {
        Self {
            reporter,
            context,
            events,
            status,
        }
    }

    pub(crate) fn start(self) -> DispatchHandle {
        let cancellation = CancellationToken::new();
        let token = cancellation.clone();
        let task = tokio::spawn(async move {
            self.run(token).await;
        });

        DispatchHandle { cancellation, task }
    }

    async fn run(mut self, cancellation: CancellationToken) {
        debug!(context = %self.context, "Dispatcher started");

        loop {
            tokio::select! {
                biased;
                _ = cancellation.cancelled() => break,
                event = self.events.recv() => match event {
                    // The delivery is awaited inside the arm, so a cancel
                    // during it only takes effect afterwards
                    Some(event) => self.handle(event).await,
                    None => break,
                },
            }
        }

        debug!("Dispatcher stopped");
    }

    async fn handle(&self, event: SourceEvent) {
        match event {
            SourceEvent::Position { channel, position } => {
                let outcome = self.reporter.deliver(position, &self.context).await;
                match outcome {
                    DeliveryOutcome::Ok { .. } => {
                        let now = chrono::Local::now().format("%H:%M:%S");
                        self.status.set(format!("{} sent @ {}", channel.tag(), now));
                    }
                    DeliveryOutcome::Failed { reason } => {
                        // The reporter already wrote the last attempt's status
                        warn!(channel = %channel, reason = %reason, "Position dropped");
                    }
                }
            }
            SourceEvent::Error { channel, reason } => {
                debug!(channel = %channel, reason = %reason, "Position source error");
                self.status
                    .set(format!("{} error: {}", channel.tag(), reason));
            }
        }
    }
}

/// Owner of a running dispatcher. Dropping it cancels the loop.
#[derive(Debug)]
pub(crate) struct DispatchHandle {
    cancellation: CancellationToken,
    task: JoinHandle<()>,
}

impl DispatchHandle {
    pub(crate) fn cancel(&self) {
        self.cancellation.cancel();
    }

    #[cfg(test)]
    pub(crate) fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for DispatchHandle {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}
