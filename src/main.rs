use chrono::Utc;
use monday_survey::{
    Config, Controller, FileStorage, HttpApi, Poller, Slot, Surface, TextSurface, View,
};
use std::io::Write;
use tokio::{io::BufReader, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Text surface that reprints itself after every batch of writes. Output
/// stops after the first failed write.
struct Terminal<W> {
    surface: TextSurface,
    out: W,
    closed: bool,
}

impl<W: Write> Terminal<W> {
    fn new(out: W) -> Self {
        Self {
            surface: TextSurface::new(),
            out,
            closed: false,
        }
    }
}

impl<W: Write> Surface for Terminal<W> {
    fn slot(&mut self, slot: Slot) -> Option<&mut String> {
        self.surface.slot(slot)
    }

    fn show(&mut self, view: View) {
        self.surface.show(view);
    }

    fn flush(&mut self) {
        if self.closed {
            return;
        }
        let written = writeln!(self.out, "{}", self.surface.render())
            .and_then(|()| self.out.flush());
        if let Err(err) = written {
            warn!("failed to write to output, no further updates will be shown: {err}");
            self.closed = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    let storage = FileStorage::new(&config.store_path);
    storage.prepare().await?;

    info!(
        endpoint = %config.endpoint,
        store = %config.store_path.display(),
        "starting survey"
    );

    let terminal = Terminal::new(std::io::stdout());
    let mut controller = Controller::new(storage, HttpApi::new(config.endpoint.clone()), terminal)
        .with_poller(Poller::new(config.poll_period));
    let input = BufReader::new(tokio::io::stdin());

    tokio::select! {
        result = controller.run(input, Utc::now) => {
            if let Err(err) = result {
                error!("survey stopped: {err}");
                return Err(err.into());
            }
        }
        _ = signal::ctrl_c() => info!("interrupted, shutting down"),
    }

    Ok(())
}
