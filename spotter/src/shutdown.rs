use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tracing::info;

/// Cooperative stop flag shared between the signal listener and the loop.
///
/// Only ever goes from unset to set.
#[derive(Clone, Debug, Default)]
pub struct ShutdownToken {
    flag: Arc<AtomicBool>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop. Repeat calls do nothing.
    pub fn request_stop(&self) {
        if !self.flag.swap(true, Ordering::SeqCst) {
            info!("stop requested");
        }
    }

    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Trip `token` on every interrupt or terminate notification.
///
/// Runs until the task is dropped or signal registration fails.
pub async fn listen_for_signals(token: ShutdownToken) -> io::Result<()> {
    let mut signals = Signals::new()?;
    loop {
        let name = signals.recv().await?;
        info!(signal = name, "shutdown signal received");
        token.request_stop();
    }
}

struct Signals {
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl Signals {
    #[cfg(unix)]
    fn new() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};
        Ok(Self {
            terminate: signal(SignalKind::terminate())?,
        })
    }

    #[cfg(not(unix))]
    fn new() -> io::Result<Self> {
        Ok(Self {})
    }

    #[cfg(unix)]
    async fn recv(&mut self) -> io::Result<&'static str> {
        tokio::select! {
            res = tokio::signal::ctrl_c() => res.map(|_| "SIGINT"),
            _ = self.terminate.recv() => Ok("SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    async fn recv(&mut self) -> io::Result<&'static str> {
        tokio::signal::ctrl_c().await.map(|_| "ctrl-c")
    }
}
