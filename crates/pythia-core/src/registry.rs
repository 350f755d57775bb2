//! Explicit, priority-aware extension-point registry.
//!
//! The registry replaces reflective service discovery: the host application
//! registers implementations programmatically at startup, each with a name
//! and an integer priority. Single-valued resolution applies the
//! highest-priority-wins rule with fail-fast ambiguity detection; multi-valued
//! resolution returns all implementations in deterministic priority order.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::priority::{select_highest, DEFAULT_PRIORITY};
use crate::ConfigError;

/// A registered implementation of some extension point.
#[derive(Clone)]
struct Registration {
    priority: i32,
    name: String,
    instance: Arc<dyn Any + Send + Sync>,
}

/// Registry from extension-point type to prioritized implementations.
///
/// Services are stored `Arc`-wrapped and keyed by their concrete type. The
/// registry is populated once at startup and is cheap to clone into immutable
/// snapshots.
///
/// # Example
///
/// ```
/// use pythia_core::ServiceRegistry;
/// use std::sync::Arc;
///
/// struct Codec;
///
/// let mut registry = ServiceRegistry::new();
/// registry.register_with_priority("fast", Arc::new(Codec), 5);
/// registry.register_with_priority("slow", Arc::new(Codec), 3);
///
/// // Highest priority wins; distinct priorities never conflict.
/// let codec: Arc<Codec> = registry.resolve().unwrap();
/// # let _ = codec;
/// ```
#[derive(Default, Clone)]
pub struct ServiceRegistry {
    services: HashMap<TypeId, Vec<Registration>>,
}

impl ServiceRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
        }
    }

    /// Registers an implementation at [`DEFAULT_PRIORITY`].
    pub fn register<T: Send + Sync + 'static>(&mut self, name: impl Into<String>, instance: Arc<T>) {
        self.register_with_priority(name, instance, DEFAULT_PRIORITY);
    }

    /// Registers an implementation with an explicit priority.
    pub fn register_with_priority<T: Send + Sync + 'static>(
        &mut self,
        name: impl Into<String>,
        instance: Arc<T>,
        priority: i32,
    ) {
        self.services
            .entry(TypeId::of::<T>())
            .or_default()
            .push(Registration {
                priority,
                name: name.into(),
                instance,
            });
    }

    /// Resolves the single highest-priority implementation of `T`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotRegistered`] if no implementation of `T` exists.
    /// - [`ConfigError::PriorityConflict`] if two or more implementations tie
    ///   at the highest priority.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ConfigError> {
        let extension_point = std::any::type_name::<T>();
        let registrations = self
            .services
            .get(&TypeId::of::<T>())
            .map(Vec::as_slice)
            .unwrap_or_default();
        let winner = select_highest(
            extension_point,
            registrations,
            |r| r.priority,
            |r| r.name.clone(),
        )?;
        winner
            .instance
            .clone()
            .downcast::<T>()
            .map_err(|_| ConfigError::not_registered(extension_point))
    }

    /// Returns all implementations of `T`, highest priority first.
    ///
    /// Implementations with equal priority are ordered by name, so the result
    /// is stable for identical registration sets regardless of registration
    /// order.
    #[must_use]
    pub fn resolve_all<T: Send + Sync + 'static>(&self) -> Vec<Arc<T>> {
        let Some(registrations) = self.services.get(&TypeId::of::<T>()) else {
            return Vec::new();
        };
        let mut ordered: Vec<&Registration> = registrations.iter().collect();
        ordered.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));
        ordered
            .into_iter()
            .filter_map(|r| r.instance.clone().downcast::<T>().ok())
            .collect()
    }

    /// Checks whether any implementation of `T` is registered.
    #[must_use]
    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.services
            .get(&TypeId::of::<T>())
            .is_some_and(|v| !v.is_empty())
    }

    /// Returns the number of extension points with at least one registration.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("extension_points", &self.services.len())
            .finish()
    }
}
