use crate::cli::{ConstraintArgs, LayoutArgs, SearchArgs};
use crate::error::{CliError, Result};
use pcrforge::engine::config::{
    AnnealingConfig, DesignConstraints, ExperimentConfig, ExperimentConfigBuilder, SearchConfig,
    TemplateLayout,
};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialLayoutConfig {
    seq_length: Option<usize>,
    primer_length: Option<usize>,
    probe_length: Option<usize>,
    probe_gap: Option<usize>,
    target_primer_tm: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialConstraintsConfig {
    overall_gc_min: Option<f64>,
    overall_gc_max: Option<f64>,
    primer_gc_min: Option<f64>,
    primer_gc_max: Option<f64>,
    primer_tm_tolerance: Option<f64>,
    gc_clamp_min: Option<f64>,
    gc_clamp_max: Option<f64>,
    probe_tm_delta_min: Option<f64>,
    probe_tm_delta_max: Option<f64>,
    probe_gc_min: Option<f64>,
    probe_gc_max: Option<f64>,
    max_run_length: Option<usize>,
    unique_end_length: Option<usize>,
    max_secondary_length: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialAnnealingConfig {
    initial_temperature: Option<f64>,
    final_temperature: Option<f64>,
    cooling_rate: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialSearchConfig {
    max_iterations: Option<usize>,
    target_cost: Option<f64>,
    max_mutations: Option<usize>,
    annealing: Option<PartialAnnealingConfig>,
}

/// Experiment settings as read from a TOML file; every field is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialExperimentConfig {
    layout: Option<PartialLayoutConfig>,
    constraints: Option<PartialConstraintsConfig>,
    search: Option<PartialSearchConfig>,
}

impl PartialExperimentConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_optional_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves every setting with precedence flag > `-S` > file > default.
    pub fn merge_with_cli(
        mut self,
        layout_args: &LayoutArgs,
        constraint_args: &ConstraintArgs,
        search_args: &SearchArgs,
        set_values: &[String],
    ) -> Result<ExperimentConfig> {
        self.apply_set_values(set_values)?;

        let layout = Self::merge_layout(self.layout.take().unwrap_or_default(), layout_args);
        let constraints = Self::merge_constraints(
            self.constraints.take().unwrap_or_default(),
            constraint_args,
        );
        let search_file = self.search.take().unwrap_or_default();
        let search_defaults = SearchConfig::default();

        let annealing = Self::merge_annealing(search_args.no_annealing, search_file.annealing)?;

        ExperimentConfigBuilder::new()
            .layout(layout)
            .constraints(constraints)
            .max_iterations(
                search_args
                    .max_iterations
                    .or(search_file.max_iterations)
                    .unwrap_or(search_defaults.max_iterations),
            )
            .target_cost(
                search_args
                    .target_cost
                    .or(search_file.target_cost)
                    .unwrap_or(search_defaults.target_cost),
            )
            .max_mutations(
                search_file
                    .max_mutations
                    .unwrap_or(search_defaults.max_mutations),
            )
            .annealing(annealing)
            .build()
            .map_err(CliError::from)
    }

    fn merge_layout(file: PartialLayoutConfig, args: &LayoutArgs) -> TemplateLayout {
        let defaults = TemplateLayout::default();
        TemplateLayout {
            seq_length: args
                .seq_length
                .or(file.seq_length)
                .unwrap_or(defaults.seq_length),
            primer_length: args
                .primer_length
                .or(file.primer_length)
                .unwrap_or(defaults.primer_length),
            probe_length: args
                .probe_length
                .or(file.probe_length)
                .unwrap_or(defaults.probe_length),
            probe_gap: args
                .probe_gap
                .or(file.probe_gap)
                .unwrap_or(defaults.probe_gap),
            target_primer_tm: args
                .target_primer_tm
                .or(file.target_primer_tm)
                .unwrap_or(defaults.target_primer_tm),
        }
    }

    fn merge_constraints(
        file: PartialConstraintsConfig,
        args: &ConstraintArgs,
    ) -> DesignConstraints {
        let d = DesignConstraints::default();
        DesignConstraints {
            overall_gc_min: args
                .overall_gc_min
                .or(file.overall_gc_min)
                .unwrap_or(d.overall_gc_min),
            overall_gc_max: args
                .overall_gc_max
                .or(file.overall_gc_max)
                .unwrap_or(d.overall_gc_max),
            primer_gc_min: args
                .primer_gc_min
                .or(file.primer_gc_min)
                .unwrap_or(d.primer_gc_min),
            primer_gc_max: args
                .primer_gc_max
                .or(file.primer_gc_max)
                .unwrap_or(d.primer_gc_max),
            primer_tm_tolerance: args
                .primer_tm_tolerance
                .or(file.primer_tm_tolerance)
                .unwrap_or(d.primer_tm_tolerance),
            gc_clamp_min: args
                .gc_clamp_min
                .or(file.gc_clamp_min)
                .unwrap_or(d.gc_clamp_min),
            gc_clamp_max: args
                .gc_clamp_max
                .or(file.gc_clamp_max)
                .unwrap_or(d.gc_clamp_max),
            probe_tm_delta_min: args
                .probe_tm_delta_min
                .or(file.probe_tm_delta_min)
                .unwrap_or(d.probe_tm_delta_min),
            probe_tm_delta_max: args
                .probe_tm_delta_max
                .or(file.probe_tm_delta_max)
                .unwrap_or(d.probe_tm_delta_max),
            probe_gc_min: args
                .probe_gc_min
                .or(file.probe_gc_min)
                .unwrap_or(d.probe_gc_min),
            probe_gc_max: args
                .probe_gc_max
                .or(file.probe_gc_max)
                .unwrap_or(d.probe_gc_max),
            max_run_length: args
                .max_run_length
                .or(file.max_run_length)
                .unwrap_or(d.max_run_length),
            unique_end_length: args
                .unique_end_length
                .or(file.unique_end_length)
                .unwrap_or(d.unique_end_length),
            max_secondary_length: args
                .max_secondary_length
                .or(file.max_secondary_length)
                .unwrap_or(d.max_secondary_length),
        }
    }

    fn merge_annealing(
        cli_no_annealing: bool,
        partial: Option<PartialAnnealingConfig>,
    ) -> Result<Option<AnnealingConfig>> {
        if cli_no_annealing {
            return Ok(None);
        }
        let Some(p) = partial else {
            return Ok(None);
        };
        let require = |value: Option<f64>, key: &str| {
            value.ok_or_else(|| {
                CliError::Config(format!("`search.annealing` requires `{}`", key))
            })
        };
        Ok(Some(AnnealingConfig {
            initial_temperature: require(p.initial_temperature, "initial-temperature")?,
            final_temperature: require(p.final_temperature, "final-temperature")?,
            cooling_rate: require(p.cooling_rate, "cooling-rate")?,
        }))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                "layout.seq-length" => {
                    self.layout.get_or_insert_with(Default::default).seq_length =
                        Some(parse_value(key, value)?)
                }
                "layout.primer-length" => {
                    self.layout.get_or_insert_with(Default::default).primer_length =
                        Some(parse_value(key, value)?)
                }
                "layout.probe-length" => {
                    self.layout.get_or_insert_with(Default::default).probe_length =
                        Some(parse_value(key, value)?)
                }
                "layout.probe-gap" => {
                    self.layout.get_or_insert_with(Default::default).probe_gap =
                        Some(parse_value(key, value)?)
                }
                "layout.target-primer-tm" => {
                    self.layout.get_or_insert_with(Default::default).target_primer_tm =
                        Some(parse_value(key, value)?)
                }
                "constraints.overall-gc-min" => {
                    self.constraints.get_or_insert_with(Default::default).overall_gc_min =
                        Some(parse_value(key, value)?)
                }
                "constraints.overall-gc-max" => {
                    self.constraints.get_or_insert_with(Default::default).overall_gc_max =
                        Some(parse_value(key, value)?)
                }
                "constraints.primer-gc-min" => {
                    self.constraints.get_or_insert_with(Default::default).primer_gc_min =
                        Some(parse_value(key, value)?)
                }
                "constraints.primer-gc-max" => {
                    self.constraints.get_or_insert_with(Default::default).primer_gc_max =
                        Some(parse_value(key, value)?)
                }
                "constraints.primer-tm-tolerance" => {
                    self.constraints.get_or_insert_with(Default::default).primer_tm_tolerance =
                        Some(parse_value(key, value)?)
                }
                "constraints.gc-clamp-min" => {
                    self.constraints.get_or_insert_with(Default::default).gc_clamp_min =
                        Some(parse_value(key, value)?)
                }
                "constraints.gc-clamp-max" => {
                    self.constraints.get_or_insert_with(Default::default).gc_clamp_max =
                        Some(parse_value(key, value)?)
                }
                "constraints.probe-tm-delta-min" => {
                    self.constraints.get_or_insert_with(Default::default).probe_tm_delta_min =
                        Some(parse_value(key, value)?)
                }
                "constraints.probe-tm-delta-max" => {
                    self.constraints.get_or_insert_with(Default::default).probe_tm_delta_max =
                        Some(parse_value(key, value)?)
                }
                "constraints.probe-gc-min" => {
                    self.constraints.get_or_insert_with(Default::default).probe_gc_min =
                        Some(parse_value(key, value)?)
                }
                "constraints.probe-gc-max" => {
                    self.constraints.get_or_insert_with(Default::default).probe_gc_max =
                        Some(parse_value(key, value)?)
                }
                "constraints.max-run-length" => {
                    self.constraints.get_or_insert_with(Default::default).max_run_length =
                        Some(parse_value(key, value)?)
                }
                "constraints.unique-end-length" => {
                    self.constraints.get_or_insert_with(Default::default).unique_end_length =
                        Some(parse_value(key, value)?)
                }
                "constraints.max-secondary-length" => {
                    self.constraints.get_or_insert_with(Default::default).max_secondary_length =
                        Some(parse_value(key, value)?)
                }
                "search.max-iterations" => {
                    self.search.get_or_insert_with(Default::default).max_iterations =
                        Some(parse_value(key, value)?)
                }
                "search.target-cost" => {
                    self.search.get_or_insert_with(Default::default).target_cost =
                        Some(parse_value(key, value)?)
                }
                "search.max-mutations" => {
                    self.search.get_or_insert_with(Default::default).max_mutations =
                        Some(parse_value(key, value)?)
                }
                "search.annealing.initial-temperature" => {
                    self.annealing_mut().initial_temperature = Some(parse_value(key, value)?)
                }
                "search.annealing.final-temperature" => {
                    self.annealing_mut().final_temperature = Some(parse_value(key, value)?)
                }
                "search.annealing.cooling-rate" => {
                    self.annealing_mut().cooling_rate = Some(parse_value(key, value)?)
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn annealing_mut(&mut self) -> &mut PartialAnnealingConfig {
        self.search
            .get_or_insert_with(Default::default)
            .annealing
            .get_or_insert_with(Default::default)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid {} value for {}: {}",
            std::any::type_name::<T>(),
            key,
            value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use pcrforge::engine::config::SearchStrategy;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn write_config_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let file_path = dir.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn resolve(args: &[&str]) -> Result<ExperimentConfig> {
        let cli = Cli::parse_from(args);
        let Commands::Generate(generate) = cli.command else {
            panic!("Expected 'generate' subcommand");
        };
        let partial = PartialExperimentConfig::from_optional_file(generate.config.as_deref())?;
        partial.merge_with_cli(
            &generate.layout,
            &generate.constraints,
            &generate.search,
            &generate.set_values,
        )
    }

    #[test]
    fn no_file_and_no_flags_yield_library_defaults() {
        let config = resolve(&["pcrforge", "generate"]).unwrap();
        assert_eq!(config, ExperimentConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "file.toml",
            r#"
        [layout]
        seq-length = 90
        target-primer-tm = 58.0

        [constraints]
        max-run-length = 4
        probe-gc-max = 55.0

        [search]
        max-iterations = 2000
        "#,
        );
        let config = resolve(&["pcrforge", "generate", "-c", path.to_str().unwrap()]).unwrap();

        assert_eq!(config.layout.seq_length, 90);
        assert_eq!(config.layout.target_primer_tm, 58.0);
        assert_eq!(config.layout.primer_length, 22);
        assert_eq!(config.constraints.max_run_length, 4);
        assert_eq!(config.constraints.probe_gc_max, 55.0);
        assert_eq!(config.constraints.probe_gc_min, 48.0);
        assert_eq!(config.search.max_iterations, 2000);
        assert_eq!(config.search.target_cost, 1.0);
    }

    #[test]
    fn cli_flags_override_set_values_and_file() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "override.toml",
            r#"
        [layout]
        primer-length = 18 # Will be overridden

        [search]
        max-iterations = 2000 # Will be overridden
        "#,
        );
        let config = resolve(&[
            "pcrforge",
            "generate",
            "-c",
            path.to_str().unwrap(),
            "--primer-length",
            "20",
            "-S",
            "layout.primer-length=19",
            "-S",
            "search.max-iterations=3000",
            "--max-iterations",
            "4000",
        ])
        .unwrap();

        assert_eq!(config.layout.primer_length, 20);
        assert_eq!(config.search.max_iterations, 4000);
    }

    #[test]
    fn set_values_override_file() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "set.toml",
            r#"
        [constraints]
        overall-gc-min = 45.0 # Will be overridden by --set
        "#,
        );
        let config = resolve(&[
            "pcrforge",
            "generate",
            "-c",
            path.to_str().unwrap(),
            "-S",
            "constraints.overall-gc-min=40",
            "-S",
            "search.target-cost=2.5",
        ])
        .unwrap();

        assert_eq!(config.constraints.overall_gc_min, 40.0);
        assert_eq!(config.search.target_cost, 2.5);
    }

    #[test]
    fn annealing_section_selects_annealing_strategy() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "annealing.toml",
            r#"
        [search.annealing]
        initial-temperature = 5.0
        final-temperature = 0.1
        cooling-rate = 0.99
        "#,
        );
        let config = resolve(&["pcrforge", "generate", "-c", path.to_str().unwrap()]).unwrap();
        assert_eq!(
            config.search.strategy,
            SearchStrategy::Annealing(AnnealingConfig {
                initial_temperature: 5.0,
                final_temperature: 0.1,
                cooling_rate: 0.99,
            })
        );

        let greedy = resolve(&[
            "pcrforge",
            "generate",
            "-c",
            path.to_str().unwrap(),
            "--no-annealing",
        ])
        .unwrap();
        assert_eq!(greedy.search.strategy, SearchStrategy::Greedy);
    }

    #[test]
    fn incomplete_annealing_section_returns_error() {
        let result = resolve(&[
            "pcrforge",
            "generate",
            "-S",
            "search.annealing.cooling-rate=0.9",
        ]);
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("initial-temperature")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_annealing_parameters_are_rejected_by_builder() {
        let result = resolve(&[
            "pcrforge",
            "generate",
            "-S",
            "search.annealing.initial-temperature=1.0",
            "-S",
            "search.annealing.final-temperature=0.1",
            "-S",
            "search.annealing.cooling-rate=1.5",
        ]);
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("cooling_rate")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_set_key_returns_error() {
        let result = resolve(&["pcrforge", "generate", "-S", "layout.width=3"]);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("layout.width")));
    }

    #[test]
    fn malformed_set_value_returns_error() {
        let missing_eq = resolve(&["pcrforge", "generate", "-S", "layout.seq-length"]);
        assert!(matches!(missing_eq, Err(CliError::Config(msg)) if msg.contains("KEY=VALUE")));

        let not_a_number = resolve(&["pcrforge", "generate", "-S", "layout.seq-length=long"]);
        assert!(matches!(not_a_number, Err(CliError::Config(msg)) if msg.contains("seq-length")));
    }

    #[test]
    fn unknown_file_keys_fail_to_parse() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "unknown.toml",
            r#"
        [layout]
        seq-lenght = 80
        "#,
        );
        let result = PartialExperimentConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_file_returns_io_error() {
        let dir = tempdir().unwrap();
        let result = PartialExperimentConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
