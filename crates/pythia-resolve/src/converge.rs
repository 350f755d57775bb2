//! Bounded filter convergence loop.
//!
//! Filters are chained, and a later filter's output can change what an
//! earlier filter would have produced, so one pass over the chain is not
//! enough. The loop re-applies the full chain until a pass changes nothing.
//! Misbehaving or circular filters would iterate forever, so the loop is
//! capped: liveness is prioritized over strict correctness in pathological
//! filter configurations.
//!
//! Single-key and full-map resolution drive the same routine: a single-key
//! pass simply hands in a one-entry working set.

use std::sync::Arc;

use indexmap::IndexMap;
use pythia_core::{FilterContext, FilterScope, PropertyFilter};

/// Maximum number of passes over the filter chain before giving up.
pub const MAX_FILTER_PASSES: usize = 10;

/// Outcome of a convergence run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// The values stabilized.
    Stable {
        /// Number of passes executed, including the final pass that observed
        /// no change.
        passes: usize,
    },
    /// The pass cap was reached without stabilizing; the working set holds
    /// the last computed values.
    CapReached,
}

/// Drives `entries` to a fixed point under the filter chain.
///
/// Each pass applies every filter in chain order to every entry. An entry
/// value is an `Option<String>`: `None` means the property is suppressed, and
/// a `None`↔`Some` transition counts as a change exactly like a textual one.
/// Suppression propagates: once a filter returns `None` the old value is
/// never resurrected by the loop itself.
///
/// On cap exhaustion a warning is emitted and the last computed values are
/// kept; this is deliberately not an error.
pub fn converge(
    filters: &[Arc<dyn PropertyFilter>],
    scope: FilterScope,
    entries: &mut IndexMap<String, Option<String>>,
) -> Convergence {
    if filters.is_empty() || entries.is_empty() {
        return Convergence::Stable { passes: 0 };
    }

    let keys: Vec<String> = entries.keys().cloned().collect();
    for pass in 1..=MAX_FILTER_PASSES {
        let mut changed = false;
        for key in &keys {
            let before = entries.get(key).cloned().unwrap_or(None);
            let mut value = before.clone();
            for filter in filters {
                let ctx = FilterContext::new(key, scope);
                value = filter.filter(value.as_deref(), &ctx);
            }
            if value != before {
                entries.insert(key.clone(), value);
                changed = true;
            }
        }
        if !changed {
            return Convergence::Stable { passes: pass };
        }
    }

    tracing::warn!(
        ?scope,
        passes = MAX_FILTER_PASSES,
        "filter chain did not converge, using last computed values"
    );
    Convergence::CapReached
}
