use request_history::HistoryLog;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tokio::sync::{Mutex, Notify};
use tracing::{info, warn};

pub struct ShutdownCoordinator {
    notify: Arc<Notify>,
    shutting_down: AtomicBool,
    inner: Mutex<Option<ShutdownInner>>,
}

struct ShutdownInner {
    history: HistoryLog,
}

impl ShutdownCoordinator {
    pub fn new(history: HistoryLog) -> Self {
        Self {
            notify: Arc::new(Notify::new()),
            shutting_down: AtomicBool::new(false),
            inner: Mutex::new(Some(ShutdownInner { history })),
        }
    }

    pub async fn wait_for_shutdown(&self) {
        let notified = self.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a concurrent shutdown is not
        // missed.
        notified.as_mut().enable();

        if self.is_shutting_down() {
            return;
        }
        notified.await;
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::Relaxed)
    }

    pub async fn shutdown(&self) {
        // Take ownership of the inner data
        let inner = match self.inner.lock().await.take() {
            Some(inner) => inner,
            None => {
                warn!("Shutdown already called");
                return;
            }
        };

        self.shutting_down.store(true, Ordering::Relaxed);
        info!("Initiating graceful shutdown sequence");

        // Notify all waiting tasks
        self.notify.notify_waiters();

        // Requests still draining keep reading the history, so it is left
        // intact and dropped with the process.
        let records = inner.history.len();
        info!(records, "Request history is not persisted");

        info!("Graceful shutdown sequence complete");
    }
}

pub async fn listen_for_shutdown_signals() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received SIGTERM signal");
        }
    }

    info!("signal received, starting graceful shutdown");
}
