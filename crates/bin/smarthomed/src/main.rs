use std::io::BufReader;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use smarthome_adapter_virtual::VirtualSensors;
use smarthome_app::event_bus::InProcessEventBus;
use smarthome_app::services::smart_home::SmartHome;
use smarthomed::config::Config;
use smarthomed::console;
use smarthomed::driver::Driver;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .with_writer(std::io::stderr)
        .init();

    // Core
    let initial = config.initial_reading();
    let sensors = match config.sensors.seed {
        Some(seed) => VirtualSensors::seeded(initial, seed),
        None => VirtualSensors::new(initial),
    };
    let mut home = SmartHome::with_engine(sensors, config.engine()?);

    // Event bus
    let event_bus = InProcessEventBus::new(256);
    home.connect(event_bus.clone());
    let printer = tokio::spawn(console::print_events(
        event_bus.subscribe(),
        config.console.format,
    ));

    // Console input runs on a plain thread so a pending read never blocks shutdown.
    let (tx, rx) = mpsc::channel(32);
    std::thread::spawn(move || {
        console::read_commands(BufReader::new(std::io::stdin()), &tx, std::io::stdout());
    });

    tracing::info!(format = %config.console.format, "smarthomed started");
    println!("{}", console::HELP);

    let home = Driver::new(home, config.schedule(), rx)
        .run(shutdown_signal())
        .await;

    printer.abort();
    print!("{}", home.dashboard());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for ctrl-c, stop with `quit`");
        std::future::pending::<()>().await;
    }
}
