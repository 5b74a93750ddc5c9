/// Numeric bounds for every rule a candidate is scored against.
///
/// GC bounds are percentages, temperatures are °C, lengths are bases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignConstraints {
    pub overall_gc_min: f64,
    pub overall_gc_max: f64,
    pub primer_gc_min: f64,
    pub primer_gc_max: f64,
    /// Allowed deviation of each primer Tm from the layout's target.
    pub primer_tm_tolerance: f64,
    pub gc_clamp_min: f64,
    pub gc_clamp_max: f64,
    /// Probe Tm window, relative to the target primer Tm.
    pub probe_tm_delta_min: f64,
    pub probe_tm_delta_max: f64,
    pub probe_gc_min: f64,
    pub probe_gc_max: f64,
    pub max_run_length: usize,
    pub unique_end_length: usize,
    pub max_secondary_length: usize,
}

impl Default for DesignConstraints {
    fn default() -> Self {
        Self {
            overall_gc_min: 49.0,
            overall_gc_max: 51.0,
            primer_gc_min: 49.0,
            primer_gc_max: 51.0,
            primer_tm_tolerance: 0.5,
            gc_clamp_min: 55.0,
            gc_clamp_max: 79.0,
            probe_tm_delta_min: 8.0,
            probe_tm_delta_max: 10.0,
            probe_gc_min: 48.0,
            probe_gc_max: 52.0,
            max_run_length: 3,
            unique_end_length: 4,
            max_secondary_length: 4,
        }
    }
}
