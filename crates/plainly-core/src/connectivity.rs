//! Online/offline notifications

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::runner::WorkflowRunner;
use crate::types::Connectivity;

/// Publishes connectivity changes to whoever subscribed
#[derive(Clone)]
pub struct ConnectivityMonitor {
    sender: Arc<watch::Sender<Connectivity>>,
}

impl ConnectivityMonitor {
    pub fn new(initial: Connectivity) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn set(&self, connectivity: Connectivity) {
        let changed = self.sender.send_if_modified(|current| {
            if *current == connectivity {
                false
            } else {
                *current = connectivity;
                true
            }
        });
        if changed {
            tracing::info!(?connectivity, "connectivity changed");
        }
    }

    pub fn set_online(&self) {
        self.set(Connectivity::Online);
    }

    pub fn set_offline(&self) {
        self.set(Connectivity::Offline);
    }

    pub fn current(&self) -> Connectivity {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Connectivity> {
        self.sender.subscribe()
    }

    /// Forward every change to the runner's workflow until the monitor is dropped
    pub fn attach(&self, runner: WorkflowRunner) -> JoinHandle<()> {
        let mut rx = self.subscribe();
        runner.set_connectivity(*rx.borrow_and_update());

        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let connectivity = *rx.borrow_and_update();
                runner.set_connectivity(connectivity);
            }
        })
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(Connectivity::Online)
    }
}
