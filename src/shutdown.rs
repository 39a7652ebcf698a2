use {
  std::time::Duration,
  tokio::{
    signal,
    sync::watch,
    time::sleep
  }
};

/// Blocks until SIGINT/SIGTERM arrives, then broadcasts the stop signal
/// so background tasks can finish their current cycle and release their
/// resources before the process exits.
pub async fn gracefully_shutdown(shutdown: watch::Sender<bool>) -> bool {
  let ctrl_c = async {
    signal::ctrl_c().await.expect("Failed to install the Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("Failed to install the SIGTERM handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => println!("Process[Shutdown] SIGINT received"),
    _ = terminate => println!("Process[Shutdown] SIGTERM received")
  }

  let _ = shutdown.send(true);

  // Let the task scheduler observe the signal before the process goes away
  sleep(Duration::from_millis(1500)).await;
  println!("Process[Shutdown] Background tasks stopped, exiting");

  true
}
