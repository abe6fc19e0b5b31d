//! # Pool Statistics
//!
//! Diagnostic snapshots of pool state.

use std::fmt;

use serde::Serialize;

use crate::config::PoolMode;

/// How often one call site acquired from a pool while tracing was on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AcquireTrace {
    /// Source location of the call, `file:line:column`.
    pub site: String,
    /// Number of acquisitions from that site.
    pub count: u64,
}

/// Snapshot of one pool's counters.
///
/// Informational only; nothing in the pool reads these back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// The pooled type's name.
    pub type_name: String,
    /// The pool's mode.
    pub mode: PoolMode,
    /// Instances available for acquire.
    pub free: usize,
    /// Instances currently checked out.
    pub used: usize,
    /// Instances the pool has ever constructed.
    pub total_created: usize,
    /// Number of automatic expansions.
    pub expansions: u64,
    /// Acquisition counts per call site, busiest first. Empty unless tracing.
    pub traces: Vec<AcquireTrace>,
}

impl fmt::Display for PoolStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            PoolMode::Dual => write!(
                f,
                "{} (free: {} used: {})",
                self.type_name, self.free, self.used
            )?,
            PoolMode::Simple => write!(f, "{} stats: {} free.", self.type_name, self.free)?,
        }
        if !self.traces.is_empty() {
            f.write_str("\nTRACING")?;
            for trace in &self.traces {
                write!(f, "\n{} ({})", trace.site, trace.count)?;
            }
        }
        Ok(())
    }
}
