use clap::Parser;
use spotter::{Cli, JsonLines, ShutdownToken, init_logging, listen_for_signals, report_fatal, serve};
use std::process::ExitCode;
use tracing::warn;
use vision::load_detector;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging();

    let shutdown = ShutdownToken::new();
    let signals = tokio::spawn({
        let token = shutdown.clone();
        async move {
            if let Err(e) = listen_for_signals(token).await {
                warn!(error = %e, "signal handlers unavailable");
            }
        }
    });

    let mut sink = JsonLines::new(std::io::stdout()).announcing(cli.announce);

    let mut detector = match cli.model_spec().and_then(|spec| load_detector(&spec)) {
        Ok(detector) => detector,
        Err(e) => return Ok(report_fatal(&mut sink, e)?),
    };

    let config = cli.loop_config();
    let code =
        tokio::task::spawn_blocking(move || serve(config, shutdown, &mut detector, &mut sink))
            .await??;
    signals.abort();
    Ok(code)
}
