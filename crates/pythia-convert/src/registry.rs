//! Per-type converter registry.
//!
//! The registry maps a target type to an ordered list of converters for that
//! type. Trial order is priority descending; converters registered with equal
//! priority keep their insertion order (the sort is stable), so "insertion
//! order unless an explicit priority overrides it" holds exactly.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use pythia_core::DEFAULT_PRIORITY;

use crate::PropertyConverter;

/// A converter together with its registration priority.
pub struct RankedConverter<T> {
    priority: i32,
    converter: Arc<dyn PropertyConverter<T>>,
}

impl<T> RankedConverter<T> {
    /// Returns the registration priority.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the converter.
    #[must_use]
    pub fn converter(&self) -> &dyn PropertyConverter<T> {
        self.converter.as_ref()
    }
}

impl<T> Clone for RankedConverter<T> {
    fn clone(&self) -> Self {
        Self {
            priority: self.priority,
            converter: Arc::clone(&self.converter),
        }
    }
}

/// One type-erased slot: the converters registered for a single target type.
#[derive(Clone)]
struct ConverterSlot {
    target_type: &'static str,
    // Holds an Arc<Vec<RankedConverter<T>>> for the slot's T.
    entries: Arc<dyn Any + Send + Sync>,
}

/// Registry from target type to its ordered converter list.
///
/// Cloning the registry is cheap (slot lists are shared behind `Arc`s), which
/// is what lets context snapshots copy it on every rebuild.
///
/// # Example
///
/// ```
/// use pythia_convert::{ConverterRegistry, ConversionContext, PropertyConverter};
/// use std::sync::Arc;
///
/// struct Hex;
///
/// impl PropertyConverter<u32> for Hex {
///     fn convert(&self, raw: &str, _: &ConversionContext<'_>) -> anyhow::Result<Option<u32>> {
///         Ok(u32::from_str_radix(raw.trim_start_matches("0x"), 16).ok())
///     }
/// }
///
/// let mut registry = ConverterRegistry::new();
/// registry.register(Arc::new(Hex));
/// assert!(registry.contains::<u32>());
/// ```
#[derive(Default, Clone)]
pub struct ConverterRegistry {
    slots: HashMap<TypeId, ConverterSlot>,
}

impl ConverterRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Registers a converter for `T` at [`DEFAULT_PRIORITY`].
    pub fn register<T: 'static>(&mut self, converter: Arc<dyn PropertyConverter<T>>) {
        self.register_with_priority(converter, DEFAULT_PRIORITY);
    }

    /// Registers a converter for `T` with an explicit priority.
    ///
    /// Higher priority converters are tried first; equal priorities keep
    /// their registration order.
    pub fn register_with_priority<T: 'static>(
        &mut self,
        converter: Arc<dyn PropertyConverter<T>>,
        priority: i32,
    ) {
        let slot = self
            .slots
            .entry(TypeId::of::<T>())
            .or_insert_with(|| ConverterSlot {
                target_type: std::any::type_name::<T>(),
                entries: Arc::new(Vec::<RankedConverter<T>>::new()),
            });
        let mut entries: Vec<RankedConverter<T>> = slot
            .entries
            .clone()
            .downcast::<Vec<RankedConverter<T>>>()
            .map(|list| list.as_ref().clone())
            .unwrap_or_default();
        entries.push(RankedConverter {
            priority,
            converter,
        });
        // Stable sort: equal priorities keep insertion order.
        entries.sort_by(|a, b| b.priority.cmp(&a.priority));
        slot.entries = Arc::new(entries);
    }

    /// Removes every converter registered for `T`.
    pub fn unregister<T: 'static>(&mut self) {
        self.slots.remove(&TypeId::of::<T>());
    }

    /// Returns the ordered converter list for `T`, if any converter is
    /// registered.
    #[must_use]
    pub fn converters_for<T: 'static>(&self) -> Option<Arc<Vec<RankedConverter<T>>>> {
        self.slots
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.entries.clone().downcast::<Vec<RankedConverter<T>>>().ok())
    }

    /// Checks whether any converter is registered for `T`.
    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of target types with registered converters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no converter is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the names of all target types with registered converters.
    #[must_use]
    pub fn target_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.slots.values().map(|s| s.target_type).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("target_types", &self.target_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConversionContext;

    struct Fixed(i32);

    impl PropertyConverter<i32> for Fixed {
        fn convert(&self, _raw: &str, _ctx: &ConversionContext<'_>) -> anyhow::Result<Option<i32>> {
            Ok(Some(self.0))
        }
    }

    fn convert_all(registry: &ConverterRegistry, raw: &str) -> Vec<i32> {
        let ctx = ConversionContext::new("k", "i32");
        registry
            .converters_for::<i32>()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| e.converter().convert(raw, &ctx).ok().flatten())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_registry() {
        let registry = ConverterRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains::<i32>());
        assert!(registry.converters_for::<i32>().is_none());
    }

    #[test]
    fn test_insertion_order_preserved_for_equal_priority() {
        let mut registry = ConverterRegistry::new();
        registry.register(Arc::new(Fixed(1)));
        registry.register(Arc::new(Fixed(2)));
        registry.register(Arc::new(Fixed(3)));

        assert_eq!(convert_all(&registry, ""), vec![1, 2, 3]);
    }

    #[test]
    fn test_priority_overrides_insertion_order() {
        let mut registry = ConverterRegistry::new();
        registry.register_with_priority(Arc::new(Fixed(1)), 1);
        registry.register_with_priority(Arc::new(Fixed(2)), 5);
        registry.register_with_priority(Arc::new(Fixed(3)), 1);

        assert_eq!(convert_all(&registry, ""), vec![2, 1, 3]);
    }

    #[test]
    fn test_unregister_clears_type() {
        let mut registry = ConverterRegistry::new();
        registry.register(Arc::new(Fixed(1)));
        assert!(registry.contains::<i32>());

        registry.unregister::<i32>();
        assert!(!registry.contains::<i32>());
    }

    #[test]
    fn test_clone_shares_slots() {
        let mut registry = ConverterRegistry::new();
        registry.register(Arc::new(Fixed(7)));

        let snapshot = registry.clone();
        registry.register(Arc::new(Fixed(8)));

        // The clone is unaffected by later registrations.
        assert_eq!(convert_all(&snapshot, ""), vec![7]);
        assert_eq!(convert_all(&registry, ""), vec![7, 8]);
    }

    #[test]
    fn test_target_types() {
        let mut registry = ConverterRegistry::new();
        registry.register(Arc::new(Fixed(1)));
        assert_eq!(registry.target_types(), vec!["i32"]);
    }
}
