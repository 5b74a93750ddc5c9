use crate::core::models::candidate::Candidate;
use crate::engine::config::ExperimentConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::search;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Attempts allowed per requested template.
pub const ATTEMPTS_PER_TEMPLATE: usize = 3;

/// Collects up to `count` templates that meet the target cost.
///
/// Runs at most `count * ATTEMPTS_PER_TEMPLATE` independent searches and
/// returns whatever succeeded, possibly fewer than requested or none at all.
/// Searches run in rounds sized to the remaining shortfall, so no more than
/// `count` templates are ever returned. Each search seeds its own RNG.
#[instrument(skip_all, name = "batch_generation", fields(count = count))]
pub fn generate_multiple(
    count: usize,
    config: &ExperimentConfig,
    reporter: &ProgressReporter,
) -> Vec<Candidate> {
    reporter.report(Progress::PhaseStart {
        name: "Batch Generation",
    });
    reporter.report(Progress::TaskStart {
        total_steps: count as u64,
    });

    let max_attempts = attempt_budget(count);
    let mut templates = Vec::new();
    let mut attempts = 0;

    while templates.len() < count && attempts < max_attempts {
        let round = (count - templates.len()).min(max_attempts - attempts);

        #[cfg(not(feature = "parallel"))]
        let iterator = 0..round;

        #[cfg(feature = "parallel")]
        let iterator = (0..round).into_par_iter();

        let found: Vec<Option<Candidate>> = iterator
            .map(|_| {
                let mut rng = StdRng::from_entropy();
                search::run(config, &ProgressReporter::new(), &mut rng).into_candidate()
            })
            .collect();
        attempts += round;

        let before = templates.len();
        for template in found.into_iter().flatten() {
            templates.push(template);
            reporter.report(Progress::TaskIncrement);
        }
        debug!(
            round,
            succeeded = templates.len() - before,
            attempts,
            "Finished generation round."
        );
        if templates.len() < count {
            reporter.report(Progress::StatusUpdate {
                text: format!(
                    "{}/{} templates after {} attempts",
                    templates.len(),
                    count,
                    attempts
                ),
            });
        }
    }

    reporter.report(Progress::TaskFinish);
    info!(
        generated = templates.len(),
        requested = count,
        attempts,
        "Batch generation finished."
    );
    reporter.report(Progress::PhaseFinish);
    templates
}

fn attempt_budget(count: usize) -> usize {
    count.saturating_mul(ATTEMPTS_PER_TEMPLATE)
}
