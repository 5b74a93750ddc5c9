use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use pcrforge::workflows::statistics::{self, Summary};
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct SampleRow {
    melting_temperature: f64,
    gc_percent: f64,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    if args.samples == 0 {
        return Err(CliError::Argument("--samples must be at least 1".to_string()));
    }

    info!(
        length = args.length,
        samples = args.samples,
        "Sampling random sequences."
    );
    let mut rng = rand::thread_rng();
    let (temperatures, gc_percents) =
        statistics::sample_statistics(args.length, args.samples, &mut rng);

    let (Some(tm), Some(gc)) = (
        Summary::from_samples(&temperatures),
        Summary::from_samples(&gc_percents),
    ) else {
        return Err(CliError::Argument("no samples were drawn".to_string()));
    };

    println!(
        "Analysis Results for {}bp sequences ({} samples):",
        args.length, tm.count
    );
    println!("Temperature: {:.2} ± {:.2}°C", tm.mean, tm.std_dev);
    println!("GC content: {:.2} ± {:.2}%", gc.mean, gc.std_dev);
    println!("Temperature range: {:.1} - {:.1}°C", tm.min, tm.max);
    println!("GC content range: {:.1} - {:.1}%", gc.min, gc.max);
    println!(
        "Temperature quartiles: {:.1} / {:.1} / {:.1}°C",
        tm.q25, tm.median, tm.q75
    );
    println!(
        "GC content quartiles: {:.1} / {:.1} / {:.1}%",
        gc.q25, gc.median, gc.q75
    );

    if let Some(path) = &args.output {
        write_samples(path, &temperatures, &gc_percents)?;
        println!("Samples written to: {}", path.display());
    }
    Ok(())
}

fn write_samples(path: &Path, temperatures: &[f64], gc_percents: &[f64]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (&melting_temperature, &gc_percent) in temperatures.iter().zip(gc_percents) {
        writer.serialize(SampleRow {
            melting_temperature,
            gc_percent,
        })?;
    }
    writer.flush()?;
    info!(rows = temperatures.len(), "Wrote samples to {:?}", path);
    Ok(())
}
