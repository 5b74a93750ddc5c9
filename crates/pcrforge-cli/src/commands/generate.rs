use crate::cli::GenerateArgs;
use crate::config::PartialExperimentConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use pcrforge::Candidate;
use pcrforge::engine::progress::ProgressReporter;
use pcrforge::engine::search;
use pcrforge::workflows::batch;
use tracing::{info, warn};

pub fn run(args: GenerateArgs) -> Result<()> {
    if args.count == 0 {
        return Err(CliError::Argument("--count must be at least 1".to_string()));
    }

    let partial_config = PartialExperimentConfig::from_optional_file(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(
        &args.layout,
        &args.constraints,
        &args.search,
        &args.set_values,
    )?;
    super::warn_on_degenerate_layout(&config.layout);

    info!(
        count = args.count,
        seq_length = config.layout.seq_length,
        primer_length = config.layout.primer_length,
        probe_length = config.layout.probe_length,
        probe_gap = config.layout.probe_gap,
        target_primer_tm = config.layout.target_primer_tm,
        max_iterations = config.search.max_iterations,
        "Generating template(s)."
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    if args.count == 1 {
        let template = search::run_experiment(&config, &reporter).ok_or_else(|| {
            CliError::NoSolution(format!(
                "Failed to generate template within {} iterations",
                config.search.max_iterations
            ))
        })?;
        print_template(template, &args);
        return Ok(());
    }

    let templates = batch::generate_multiple(args.count, &config, &reporter);
    if templates.is_empty() {
        return Err(CliError::NoSolution(
            "Failed to generate any templates".to_string(),
        ));
    }
    if templates.len() < args.count {
        warn!(
            "Only {} of {} requested templates met the target cost.",
            templates.len(),
            args.count
        );
    }

    let generated = templates.len();
    for (i, template) in templates.into_iter().enumerate() {
        println!("Template {}:", i + 1);
        print_template(template, &args);
        println!();
    }

    if args.report {
        let success_rate = generated as f64 / args.count as f64 * 100.0;
        println!(
            "Generated {}/{} templates ({:.1}% success rate)",
            generated, args.count, success_rate
        );
    }
    Ok(())
}

fn print_template(mut template: Candidate, args: &GenerateArgs) {
    println!("{}", template.display());
    if !args.report {
        return;
    }

    let cost = template.cost();
    println!("\nFinal cost: {:.2}", cost);
    if args.all_rules {
        println!("Rules:");
        print!("{}", template.rule_info(true));
    } else if cost > 0.0 {
        println!("Rule violations:");
        print!("{}", template.rule_info(false));
    }
}
