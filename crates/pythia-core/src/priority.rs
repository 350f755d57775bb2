//! Deterministic highest-priority-wins selection.
//!
//! When multiple implementations are available for the same single-valued
//! extension point, exactly one must win, and the choice must be reproducible
//! across environments. Selection picks the strictly highest priority; a tie
//! at the top is a configuration ambiguity and fails fast.

use crate::ConfigError;

/// Default priority assigned to implementations that do not specify one.
pub const DEFAULT_PRIORITY: i32 = 1;

/// Selects the single highest-priority candidate.
///
/// The `priority_of` and `name_of` closures extract the priority and the
/// diagnostic name from each candidate. A lone candidate is selected without
/// any tie check.
///
/// # Errors
///
/// - [`ConfigError::NotRegistered`] if `candidates` is empty.
/// - [`ConfigError::PriorityConflict`] if two or more candidates tie at the
///   highest priority.
///
/// # Example
///
/// ```
/// use pythia_core::select_highest;
///
/// let services = vec![("a", 5), ("b", 3)];
/// let winner = select_highest("Service", &services, |s| s.1, |s| s.0.to_string()).unwrap();
/// assert_eq!(winner.0, "a");
/// ```
pub fn select_highest<'a, T>(
    extension_point: &'static str,
    candidates: &'a [T],
    priority_of: impl Fn(&T) -> i32,
    name_of: impl Fn(&T) -> String,
) -> Result<&'a T, ConfigError> {
    let Some(first) = candidates.first() else {
        return Err(ConfigError::not_registered(extension_point));
    };
    if candidates.len() == 1 {
        return Ok(first);
    }

    let mut best = first;
    let mut best_priority = priority_of(first);
    let mut tied: Vec<&T> = vec![first];
    for candidate in &candidates[1..] {
        let priority = priority_of(candidate);
        if priority > best_priority {
            best = candidate;
            best_priority = priority;
            tied.clear();
            tied.push(candidate);
        } else if priority == best_priority {
            tied.push(candidate);
        }
    }

    if tied.len() > 1 {
        return Err(ConfigError::priority_conflict(
            extension_point,
            best_priority,
            tied.iter().map(|c| name_of(c)).collect(),
        ));
    }
    Ok(best)
}
