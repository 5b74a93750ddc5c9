use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error(
        "Template length {seq_length} is shorter than the {required} bases needed for two primers, the probe and the probe gap"
    )]
    TooShort { seq_length: usize, required: usize },
}

/// Region geometry of a template. Regions are derived by index arithmetic on demand.
///
/// ```text
/// 0        primer                                    len-primer       len
/// |--fwd---|------spacer------|----probe----|--gap--|----rev primer----|
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateLayout {
    pub seq_length: usize,
    pub primer_length: usize,
    pub probe_length: usize,
    pub probe_gap: usize,
    /// Target primer melting temperature in °C; the probe window is relative to it.
    pub target_primer_tm: f64,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            seq_length: 75,
            primer_length: 22,
            probe_length: 25,
            probe_gap: 3,
            target_primer_tm: 54.6,
        }
    }
}

impl TemplateLayout {
    /// Minimum template length for non-degenerate regions.
    pub fn required_length(&self) -> usize {
        2 * self.primer_length + self.probe_length + self.probe_gap
    }

    /// Unassigned bases between the forward primer and the probe.
    pub fn spacer_length(&self) -> usize {
        self.seq_length.saturating_sub(self.required_length())
    }

    /// Reports layouts whose regions would overlap, run backwards or be empty.
    ///
    /// Nothing calls this implicitly: a candidate built from a degenerate layout
    /// still scores, usually misleadingly low.
    pub fn check_geometry(&self) -> Result<(), LayoutError> {
        let required = self.required_length();
        if self.seq_length < required {
            return Err(LayoutError::TooShort {
                seq_length: self.seq_length,
                required,
            });
        }
        Ok(())
    }

    pub(crate) fn probe_offsets(&self) -> (isize, isize) {
        let tail = (self.primer_length + self.probe_gap) as isize;
        (-(tail + self.probe_length as isize), -tail)
    }
}

/// Sub-slice with end-relative offsets: negative positions count back from the
/// end, out-of-range positions clamp, and a reversed range is empty.
pub(crate) fn window(seq: &[u8], start: isize, end: Option<isize>) -> &[u8] {
    let len = seq.len();
    let resolve = |position: isize| -> usize {
        if position < 0 {
            len.saturating_sub(position.unsigned_abs())
        } else {
            (position as usize).min(len)
        }
    };
    let start = resolve(start);
    let end = end.map_or(len, resolve);
    if start >= end { &[] } else { &seq[start..end] }
}

/// The last `n` symbols. A zero `n` selects the whole slice.
pub(crate) fn tail(seq: &[u8], n: usize) -> &[u8] {
    window(seq, -(n.min(seq.len()) as isize), None)
}
