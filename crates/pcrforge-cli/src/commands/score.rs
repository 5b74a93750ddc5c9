use crate::cli::{ScoreArgs, SearchArgs};
use crate::config::PartialExperimentConfig;
use crate::error::Result;
use pcrforge::Candidate;
use tracing::info;

pub fn run(args: ScoreArgs) -> Result<()> {
    let partial_config = PartialExperimentConfig::from_optional_file(args.config.as_deref())?;
    let mut config = partial_config.merge_with_cli(
        &args.layout,
        &args.constraints,
        &SearchArgs::default(),
        &args.set_values,
    )?;

    let sequence = args.sequence.trim();
    if sequence.len() != config.layout.seq_length {
        info!(
            configured = config.layout.seq_length,
            actual = sequence.len(),
            "Using the sequence length as the template length."
        );
        config.layout.seq_length = sequence.len();
    }
    super::warn_on_degenerate_layout(&config.layout);

    let mut template = Candidate::from_sequence(config.layout, config.constraints, sequence)?;
    let cost = template.cost();
    info!(cost, "Scored template.");

    println!("{}", template.display());
    println!("\nTotal cost: {:.2}", cost);
    if args.all_rules {
        println!("Rules:");
        print!("{}", template.rule_info(true));
    } else if cost > 0.0 {
        println!("Rule violations:");
        print!("{}", template.rule_info(false));
    } else {
        println!("All rules satisfied.");
    }
    Ok(())
}
