//! Scheduler configuration.
//!
//! These values are fixed constants of the scheduling algorithms
//! themselves (buffer size, heap growth, tier quanta) rather than leaving
//! them tunable per deployment. They are still collected here, the way
//! `maker_web`'s `limits.rs` collects its tunables into documented structs,
//! so a reader has one place to look instead of magic numbers scattered
//! across `policy/*.rs`. No code path lets these diverge from
//! [`SchedulerConfig::default`] in the shipped binary.

/// Stack buffer size used by every `serve_slice` implementation to read one
/// slice/quantum at a time. A `const` rather than a [`SchedulerConfig`] field
/// because it sizes a fixed-size array on the stack; it is numerically equal
/// to [`SchedulerConfig::default`]'s `slice_bytes`.
pub(crate) const SLICE_BUF_CAP: usize = 8192;

/// Fixed parameters shared by the scheduling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Bytes read/written per I/O iteration (one "quantum" of RR, one
    /// "slice" of SJF/MLQF). Fixed at 8192 across all three policies.
    pub slice_bytes: usize,

    /// Initial capacity of SJF's heap-backed array before it first needs to
    /// grow. Matches `NUM_RCBS` in the original C scheduler.
    pub sjf_initial_capacity: usize,

    /// Number of 8192-byte slices a request may consume per `serve_slice`
    /// call while resident in MLQF tier `T0` before being promoted.
    pub mlqf_t0_slices: usize,
    /// As `mlqf_t0_slices`, for tier `T1` (~64 KiB budget).
    pub mlqf_t1_slices: usize,
    /// As `mlqf_t0_slices`, for tier `T2`. `T2` never promotes further, so
    /// this is also the quantum a request round-robins on once it reaches
    /// the terminal tier.
    pub mlqf_t2_slices: usize,
}

impl Default for SchedulerConfig {
    #[inline]
    fn default() -> Self {
        SchedulerConfig {
            slice_bytes: 8192,
            sjf_initial_capacity: 100,
            mlqf_t0_slices: 1,
            mlqf_t1_slices: 8,
            mlqf_t2_slices: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_constants() {
        let cfg = SchedulerConfig::default();
        assert_eq!(cfg.slice_bytes, 8192);
        assert_eq!(cfg.sjf_initial_capacity, 100);
        assert_eq!(cfg.mlqf_t0_slices, 1);
        assert_eq!(cfg.mlqf_t1_slices, 8);
        assert_eq!(cfg.mlqf_t2_slices, 8);
    }
}
