use thiserror::Error;

pub use crate::core::models::constraints::DesignConstraints;
pub use crate::core::models::layout::{LayoutError, TemplateLayout};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Geometry(#[from] LayoutError),
}

/// Metropolis acceptance with a geometric cooling schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealingConfig {
    pub initial_temperature: f64,
    pub final_temperature: f64,
    pub cooling_rate: f64,
}

/// How the optimizer decides whether to move to a trial candidate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SearchStrategy {
    /// Move only on strict improvement; ties and worse trials are discarded.
    #[default]
    Greedy,
    /// Also move to worse trials with probability `exp(-Δ/T)`.
    Annealing(AnnealingConfig),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub max_iterations: usize,
    pub target_cost: f64,
    /// Upper bound of the uniform per-iteration mutation count (lower bound is 1).
    pub max_mutations: usize,
    pub strategy: SearchStrategy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            target_cost: 1.0,
            max_mutations: 8,
            strategy: SearchStrategy::Greedy,
        }
    }
}

impl SearchConfig {
    /// Iterations without improvement after which the search gives up.
    pub fn stagnation_limit(&self) -> usize {
        self.max_iterations / 10
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExperimentConfig {
    pub layout: TemplateLayout,
    pub constraints: DesignConstraints,
    pub search: SearchConfig,
}

#[derive(Default)]
pub struct ExperimentConfigBuilder {
    layout: Option<TemplateLayout>,
    constraints: Option<DesignConstraints>,
    max_iterations: Option<usize>,
    target_cost: Option<f64>,
    max_mutations: Option<usize>,
    annealing: Option<AnnealingConfig>,
}

impl ExperimentConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(mut self, layout: TemplateLayout) -> Self {
        self.layout = Some(layout);
        self
    }
    pub fn constraints(mut self, constraints: DesignConstraints) -> Self {
        self.constraints = Some(constraints);
        self
    }
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn target_cost(mut self, cost: f64) -> Self {
        self.target_cost = Some(cost);
        self
    }
    pub fn max_mutations(mut self, mutations: usize) -> Self {
        self.max_mutations = Some(mutations);
        self
    }
    pub fn annealing(mut self, annealing: Option<AnnealingConfig>) -> Self {
        self.annealing = annealing;
        self
    }

    /// Validates search parameters. Layout geometry is deliberately left
    /// unchecked; see [`TemplateLayout::check_geometry`].
    pub fn build(self) -> Result<ExperimentConfig, ConfigError> {
        let defaults = SearchConfig::default();

        let target_cost = self.target_cost.unwrap_or(defaults.target_cost);
        if !target_cost.is_finite() {
            return Err(invalid("target_cost", "must be a finite number"));
        }

        let max_mutations = self.max_mutations.unwrap_or(defaults.max_mutations);
        if max_mutations == 0 {
            return Err(invalid("max_mutations", "must be at least 1"));
        }

        let strategy = match self.annealing {
            Some(annealing) => {
                validate_annealing(&annealing)?;
                SearchStrategy::Annealing(annealing)
            }
            None => SearchStrategy::Greedy,
        };

        Ok(ExperimentConfig {
            layout: self.layout.unwrap_or_default(),
            constraints: self.constraints.unwrap_or_default(),
            search: SearchConfig {
                max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
                target_cost,
                max_mutations,
                strategy,
            },
        })
    }
}

fn invalid(parameter: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter,
        reason: reason.to_string(),
    }
}

fn validate_annealing(annealing: &AnnealingConfig) -> Result<(), ConfigError> {
    if !(annealing.initial_temperature.is_finite() && annealing.initial_temperature > 0.0) {
        return Err(invalid("initial_temperature", "must be positive"));
    }
    if !(annealing.final_temperature > 0.0
        && annealing.final_temperature <= annealing.initial_temperature)
    {
        return Err(invalid(
            "final_temperature",
            "must be positive and not above the initial temperature",
        ));
    }
    if !(annealing.cooling_rate > 0.0 && annealing.cooling_rate < 1.0) {
        return Err(invalid("cooling_rate", "must lie strictly between 0 and 1"));
    }
    Ok(())
}
