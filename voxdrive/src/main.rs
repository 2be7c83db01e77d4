use anyhow::Context;
use clap::Parser;
use log::info;
use voxdrive::cli::Args;
use voxdrive::session::drive::TestDrive;
use voxdrive::session::sink::{LogSink, VolumeSummary};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = Args::parse();

    let config = args.resolve_config().context("Failed to resolve configuration")?;
    info!("Configuration: {:?}", config);

    let mut drive = TestDrive::new(config).with_sink(LogSink::new());
    let outcome = drive.run().context("Test drive failed")?;

    if args.json {
        let summary = VolumeSummary::new(&outcome.grid, &outcome.spots);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
