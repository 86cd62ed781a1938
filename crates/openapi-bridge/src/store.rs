// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Container-scoped state shared by every request served through one bridge.

use std::fmt;

use container_context::AttributeValue;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Initialization parameters and attributes of a bridge instance.
///
/// Initialization parameters are set once per key: the first writer wins and
/// later writers are told so through a `false` return. Attributes can be
/// replaced and removed freely. Every operation is atomic per key.
#[derive(Default)]
pub struct ContainerState {
    init_parameters: DashMap<String, String>,
    attributes: DashMap<String, AttributeValue>,
}

impl fmt::Debug for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerState")
            .field("init_parameters", &self.init_parameters)
            .field("attributes", &self.attribute_names())
            .finish()
    }
}

impl ContainerState {
    /// Create empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of an initialization parameter.
    pub fn init_parameter(&self, name: &str) -> Option<String> {
        self.init_parameters.get(name).map(|entry| entry.value().clone())
    }

    /// Install an initialization parameter if `name` is not yet present.
    ///
    /// Returns false and leaves the stored value untouched when `name` is
    /// already set, even if `value` is equal to it.
    pub fn set_init_parameter(&self, name: &str, value: &str) -> bool {
        match self.init_parameters.entry(name.to_string()) {
            Entry::Occupied(_) => {
                tracing::debug!(name, "Init parameter already set, keeping existing value");
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(value.to_string());
                true
            }
        }
    }

    /// Snapshot of the initialization parameter names.
    pub fn init_parameter_names(&self) -> Vec<String> {
        self.init_parameters
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Attribute bound to `name`.
    pub fn attribute(&self, name: &str) -> Option<AttributeValue> {
        self.attributes.get(name).map(|entry| entry.value().clone())
    }

    /// Bind or replace an attribute. `None` removes the binding.
    pub fn set_attribute(&self, name: &str, value: Option<AttributeValue>) {
        match value {
            Some(value) => {
                self.attributes.insert(name.to_string(), value);
            }
            None => self.remove_attribute(name),
        }
    }

    /// Bind `value` unless `name` is bound, returning whichever value is bound.
    pub fn attribute_or_insert(&self, name: &str, value: AttributeValue) -> AttributeValue {
        self.attributes
            .entry(name.to_string())
            .or_insert(value)
            .value()
            .clone()
    }

    /// Remove an attribute. Removing an unbound name does nothing.
    pub fn remove_attribute(&self, name: &str) {
        self.attributes.remove(name);
    }

    /// Snapshot of the bound attribute names.
    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use proptest::prelude::*;

    use super::*;

    fn value<T: Send + Sync + 'static>(v: T) -> Option<AttributeValue> {
        Some(Arc::new(v))
    }

    #[test]
    fn test_first_init_parameter_write_wins() {
        let state = ContainerState::new();
        assert!(state.set_init_parameter("openapi.context.id", "first"));
        assert!(!state.set_init_parameter("openapi.context.id", "second"));
        assert!(!state.set_init_parameter("openapi.context.id", "first"));
        assert_eq!(
            state.init_parameter("openapi.context.id").as_deref(),
            Some("first")
        );
        assert_eq!(state.init_parameter("missing"), None);
    }

    #[test]
    fn test_attribute_set_replace_and_remove() {
        let state = ContainerState::new();
        state.set_attribute("count", value(1u32));
        state.set_attribute("count", value(2u32));
        let stored = state.attribute("count").unwrap().downcast::<u32>().unwrap();
        assert_eq!(*stored, 2);

        state.set_attribute("count", None);
        assert!(state.attribute("count").is_none());

        state.remove_attribute("never-set");
        assert!(state.attribute_names().is_empty());
    }

    #[test]
    fn test_concurrent_init_parameter_writers_have_one_winner() {
        let state = ContainerState::new();
        let winners: Vec<bool> = thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|i| {
                    let state = &state;
                    s.spawn(move || state.set_init_parameter("key", &format!("writer-{i}")))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(winners.iter().filter(|won| **won).count(), 1);
        let winner = winners.iter().position(|won| *won).unwrap();
        assert_eq!(
            state.init_parameter("key"),
            Some(format!("writer-{winner}"))
        );
    }

    #[test]
    fn test_attribute_or_insert_keeps_existing_binding() {
        let state = ContainerState::new();
        let first: AttributeValue = Arc::new(1u32);
        let bound = state.attribute_or_insert("count", first.clone());
        assert!(Arc::ptr_eq(&bound, &first));

        let bound = state.attribute_or_insert("count", Arc::new(2u32));
        assert!(Arc::ptr_eq(&bound, &first));
        assert_eq!(*state.attribute("count").unwrap().downcast::<u32>().unwrap(), 1);
    }

    #[test]
    fn test_concurrent_attribute_or_insert_has_one_winner() {
        let state = ContainerState::new();
        let bound: Vec<AttributeValue> = thread::scope(|s| {
            let handles: Vec<_> = (0..16u32)
                .map(|i| {
                    let state = &state;
                    s.spawn(move || state.attribute_or_insert("shared", Arc::new(i)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let stored = state.attribute("shared").unwrap();
        assert!(bound.iter().all(|value| Arc::ptr_eq(value, &stored)));
    }

    #[test]
    fn test_concurrent_attribute_writers_lose_nothing() {
        let state = ContainerState::new();
        thread::scope(|s| {
            for i in 0..8 {
                let state = &state;
                s.spawn(move || {
                    for j in 0..50 {
                        state.set_attribute(&format!("attr-{i}-{j}"), value(j));
                    }
                });
            }
        });

        let names: HashSet<String> = state.attribute_names().into_iter().collect();
        assert_eq!(names.len(), 8 * 50);
    }

    proptest! {
        #[test]
        fn prop_unset_key_accepts_value(key in "[a-z.]{1,16}", v in ".*") {
            let state = ContainerState::new();
            prop_assert!(state.set_init_parameter(&key, &v));
            prop_assert_eq!(state.init_parameter(&key), Some(v));
        }

        #[test]
        fn prop_set_key_rejects_overwrite(key in "[a-z.]{1,16}", v1 in ".*", v2 in ".*") {
            let state = ContainerState::new();
            state.set_init_parameter(&key, &v1);
            prop_assert!(!state.set_init_parameter(&key, &v2));
            prop_assert_eq!(state.init_parameter(&key), Some(v1));
            prop_assert_eq!(state.init_parameter_names(), vec![key]);
        }
    }
}
