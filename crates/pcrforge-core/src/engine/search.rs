use super::config::{ExperimentConfig, SearchStrategy};
use super::progress::{Progress, ProgressReporter};
use super::state::{SearchOutcome, StopReason};
use crate::core::models::candidate::Candidate;
use rand::{Rng, thread_rng};
use tracing::{debug, info, instrument};

/// Searches for one template meeting the target cost, using the thread-local RNG.
///
/// Returns `None` when the iteration budget runs out or the search stagnates
/// first. That outcome is routine rather than an error.
pub fn run_experiment(
    config: &ExperimentConfig,
    reporter: &ProgressReporter,
) -> Option<Candidate> {
    info!(
        seq_length = config.layout.seq_length,
        max_iterations = config.search.max_iterations,
        target_cost = config.search.target_cost,
        "Starting search."
    );
    let mut rng = thread_rng();
    let outcome = run(config, reporter, &mut rng);
    info!(
        iterations = outcome.iterations,
        best_cost = outcome.best_cost,
        stop_reason = ?outcome.stop_reason,
        "Search finished."
    );
    outcome.into_candidate()
}

/// Stochastic local search from a random starting template.
///
/// Each iteration copies the current template, mutates between one and
/// `max_mutations` positions and rescores. The best candidate only ever moves
/// on a strict cost decrease. The loop ends when the best cost reaches the
/// target, the iteration budget is spent, or more than a tenth of the budget
/// passes without improvement.
#[instrument(
    skip_all,
    name = "template_search",
    fields(
        seq_length = config.layout.seq_length,
        max_iterations = config.search.max_iterations,
        target_cost = config.search.target_cost
    )
)]
pub fn run(
    config: &ExperimentConfig,
    reporter: &ProgressReporter,
    rng: &mut impl Rng,
) -> SearchOutcome {
    let search = &config.search;
    let stagnation_limit = search.stagnation_limit();
    let max_mutations = search.max_mutations.max(1);

    let mut best = Candidate::random(config.layout, config.constraints, rng);
    let mut best_cost = best.cost();
    let mut current = best.clone();
    let mut current_cost = best_cost;
    let mut trial = best.clone();

    let mut temperature = match search.strategy {
        SearchStrategy::Greedy => None,
        SearchStrategy::Annealing(annealing) => Some(annealing.initial_temperature),
    };

    debug!(initial_cost = best_cost, "Starting search.");
    reporter.report(Progress::TaskStart {
        total_steps: search.max_iterations as u64,
    });

    let mut iteration = 0;
    let mut stagnation = 0;
    let mut stagnated = false;

    while best_cost > search.target_cost && iteration < search.max_iterations {
        trial.copy_symbols_from(&current);
        let mutations = rng.gen_range(1..=max_mutations);
        trial.mutate(mutations, rng);
        let trial_cost = trial.cost();

        if trial_cost < best_cost {
            best.clone_from(&trial);
            best_cost = trial_cost;
            stagnation = 0;
            debug!(iteration, cost = best_cost, "Found cheaper template.");
            reporter.report(Progress::Improvement {
                iteration,
                cost: best_cost,
            });
        }

        let delta = trial_cost - current_cost;
        let accepted = match temperature {
            None => delta < 0.0,
            Some(t) => delta < 0.0 || rng.r#gen::<f64>() < (-delta / t).exp(),
        };
        if accepted {
            current.copy_symbols_from(&trial);
            current_cost = trial_cost;
        }

        if let (Some(t), SearchStrategy::Annealing(annealing)) = (temperature, search.strategy) {
            temperature = Some((t * annealing.cooling_rate).max(annealing.final_temperature));
        }

        iteration += 1;
        stagnation += 1;
        reporter.report(Progress::TaskIncrement);

        if stagnation > stagnation_limit {
            stagnated = true;
            break;
        }
    }

    reporter.report(Progress::TaskFinish);

    let stop_reason = if best_cost <= search.target_cost {
        StopReason::TargetReached
    } else if stagnated {
        StopReason::Stagnation
    } else {
        StopReason::IterationLimit
    };

    debug!(
        iterations = iteration,
        best_cost,
        stop_reason = ?stop_reason,
        "Search finished."
    );

    SearchOutcome {
        best,
        best_cost,
        target_cost: search.target_cost,
        iterations: iteration,
        stop_reason,
    }
}
