//! Listener lifecycle
//!
//! [`start`] binds eagerly and hands serving off to a background task, so a
//! bind failure surfaces as a [`StartError`] before anything runs. The
//! returned [`RunningServer`] decides how long the process stays up.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::error::StartError;

/// A bound, serving listener
///
/// Dropping it detaches the server, which keeps running until the runtime
/// shuts down.
#[derive(Debug)]
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl RunningServer {
    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `signal` resolves, then shut down gracefully
    pub async fn run_until<F>(self, signal: F)
    where
        F: Future<Output = ()>,
    {
        signal.await;
        self.shutdown().await;
    }

    /// Serve until the serving task ends on its own
    pub async fn wait(self) {
        let RunningServer {
            shutdown_tx: _shutdown_tx,
            handle,
            ..
        } = self;
        if let Err(e) = handle.await {
            error!("Server task failed: {}", e);
        }
    }

    /// Stop accepting connections and wait for in-flight requests
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.handle.await {
            error!("Server task failed: {}", e);
        }
        info!("Server on port {} stopped", self.local_addr.port());
    }
}

fn start_failed(port: u16, err: StartError) -> StartError {
    warn!("Server failed to start on {}: {}", port, err);
    err
}

/// Bind `0.0.0.0:{port}` and start serving `router`
pub async fn start(port: u16, router: Router) -> Result<RunningServer, StartError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| start_failed(port, StartError::Bind { port, source: e }))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| start_failed(port, StartError::LocalAddr(e)))?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        let shutdown = async move {
            // A dropped sender means the server was detached, not stopped
            if shutdown_rx.await.is_err() {
                std::future::pending::<()>().await;
            }
        };
        if let Err(e) = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
        {
            error!("Server error: {}", e);
        }
    });

    info!("Server started on port {}", local_addr.port());
    Ok(RunningServer {
        local_addr,
        shutdown_tx,
        handle,
    })
}

/// Resolves on Ctrl-C; never resolves if the signal cannot be installed
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
