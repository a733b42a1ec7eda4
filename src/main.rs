use anyhow::{Context, Result};
use asymmetry_fit::analysis::{AnalysisConfig, run_analysis};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AnalysisConfig::default();
    let outcome = run_analysis(&config).with_context(|| {
        format!(
            "asymmetry analysis of '{}' (histogram to '{}')",
            config.input.display(),
            config.output.display()
        )
    })?;

    println!("{}", outcome.render());
    Ok(())
}
