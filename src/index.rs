//! Bidirectional resource name index.
//!
//! Bodies reference resources by whichever form the contributor typed,
//! short or full, in any casing. The index is built once from the catalog
//! and resolves either form to the canonical full name at load time.

use clap::ValueEnum;
use std::collections::HashMap;

use crate::error::DataError;
use crate::model::Resource;

/// What to do when a catalog entry collides with an already-indexed name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DuplicatePolicy {
    /// Fail the run. Names must be case-insensitively unique.
    #[default]
    Reject,
    /// Later catalog entries win.
    Overwrite,
}

/// Case-insensitive short-name ↔ full-name mapping. Read-only after build.
pub struct ResourceIndex {
    /// lowercased short or full name -> canonical full name
    full_names: HashMap<String, String>,
    /// lowercased short or full name -> canonical short name
    short_names: HashMap<String, String>,
}

impl ResourceIndex {
    pub fn build(catalog: &[Resource], policy: DuplicatePolicy) -> Result<Self, DataError> {
        let mut index = Self {
            full_names: HashMap::new(),
            short_names: HashMap::new(),
        };

        for resource in catalog {
            index.insert(&resource.short_name, resource, policy)?;
            if resource.short_name.to_lowercase() != resource.resource.to_lowercase() {
                index.insert(&resource.resource, resource, policy)?;
            }
        }

        Ok(index)
    }

    fn insert(
        &mut self,
        key: &str,
        resource: &Resource,
        policy: DuplicatePolicy,
    ) -> Result<(), DataError> {
        let key = key.to_lowercase();
        if self.full_names.contains_key(&key) && policy == DuplicatePolicy::Reject {
            return Err(DataError::DuplicateResource {
                name: key,
            });
        }
        self.full_names.insert(key.clone(), resource.resource.clone());
        self.short_names.insert(key, resource.short_name.clone());
        Ok(())
    }

    /// Resolve a short or full name, in any casing, to the canonical full
    /// name.
    pub fn resolve(&self, name: &str) -> Result<&str, DataError> {
        self.full_names
            .get(&name.to_lowercase())
            .map(String::as_str)
            .ok_or_else(|| DataError::UnknownResource {
                name: name.to_string(),
            })
    }

    /// Resolve a short or full name, in any casing, to the short name.
    pub fn short_name(&self, name: &str) -> Result<&str, DataError> {
        self.short_names
            .get(&name.to_lowercase())
            .map(String::as_str)
            .ok_or_else(|| DataError::UnknownResource {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(full: &str, short: &str) -> Resource {
        Resource {
            resource: full.to_string(),
            short_name: short.to_string(),
            rarity: "Common".to_string(),
            resource_type: "Inorganic".to_string(),
            mass: 0.5,
            value: 10,
            value_to_mass: 20.0,
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive_for_both_forms() {
        let index =
            ResourceIndex::build(&[resource("Iron", "Fe")], DuplicatePolicy::Reject).unwrap();
        assert_eq!(index.resolve("fe").unwrap(), "Iron");
        assert_eq!(index.resolve("IRON").unwrap(), "Iron");
        assert_eq!(index.short_name("iron").unwrap(), "Fe");
        assert_eq!(index.short_name("FE").unwrap(), "Fe");
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let index =
            ResourceIndex::build(&[resource("Iron", "Fe")], DuplicatePolicy::Reject).unwrap();
        assert!(matches!(
            index.resolve("Unobtanium"),
            Err(DataError::UnknownResource { .. })
        ));
    }

    #[test]
    fn test_reject_policy_fails_on_collision() {
        let catalog = [resource("Iron", "Fe"), resource("Ferrium", "FE")];
        let result = ResourceIndex::build(&catalog, DuplicatePolicy::Reject);
        assert!(matches!(result, Err(DataError::DuplicateResource { .. })));
    }

    #[test]
    fn test_overwrite_policy_lets_later_entries_win() {
        let catalog = [resource("Iron", "Fe"), resource("Ferrium", "FE")];
        let index = ResourceIndex::build(&catalog, DuplicatePolicy::Overwrite).unwrap();
        assert_eq!(index.resolve("fe").unwrap(), "Ferrium");
        // Keys only reachable through the first entry still resolve to it.
        assert_eq!(index.resolve("iron").unwrap(), "Iron");
    }

    #[test]
    fn test_short_name_equal_to_full_name_is_not_a_self_collision() {
        let index =
            ResourceIndex::build(&[resource("Water", "Water")], DuplicatePolicy::Reject).unwrap();
        assert_eq!(index.resolve("water").unwrap(), "Water");
    }
}
