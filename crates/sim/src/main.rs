use anyhow::Result;
use rotation_runtime::{Bard, Engine};
use rotation_sim::{SimConfig, run};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SimConfig::from_env();
    let mut engine = Engine::builder()
        .config(config.engine_config()?)
        .rotation(Bard::new(config.kit()?))
        .build()?;

    let json = config.json;
    let report = run(&mut engine, &config, |record| {
        if !json {
            return;
        }
        match serde_json::to_string(record) {
            Ok(line) => println!("{line}"),
            Err(err) => tracing::warn!(error = %err, "failed to encode decision"),
        }
    });

    if !json {
        println!("{:<20} {:>5}", "action", "uses");
        for (action, count) in &report.issued {
            println!("{:<20} {:>5}", action.as_ref(), count);
        }
        println!();
        println!("dot uptime        {:>6.1}%", report.dot_uptime * 100.0);
        println!("deferred          {:>6}", report.deferred);
        println!("lost charges      {:>6}", report.waste.spender_charges);
        println!("lost soul voice   {:>6}", report.waste.soul_voice);
        println!("lost repertoire   {:>6}", report.waste.repertoire);
    }
    Ok(())
}
