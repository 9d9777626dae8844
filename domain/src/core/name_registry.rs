//! Collision-free name allocation.

use std::collections::HashSet;

/// Hands out names that are unique within one registry.
///
/// Allocation order for a wanted name `n` and qualifier `q`:
/// `n`, then `q_n`, then `q_n_1`, `q_n_2`, and so on.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    taken: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a unique name, preferring `wanted`, then `<qualifier>_<wanted>`.
    pub fn allocate(&mut self, wanted: &str, qualifier: &str) -> String {
        let name = if !self.taken.contains(wanted) {
            wanted.to_string()
        } else {
            let qualified = format!("{qualifier}_{wanted}");
            if !self.taken.contains(&qualified) {
                qualified
            } else {
                (1..)
                    .map(|counter| format!("{qualified}_{counter}"))
                    .find(|candidate| !self.taken.contains(candidate))
                    .unwrap_or(qualified)
            }
        };
        self.taken.insert(name.clone());
        name
    }

    /// Mark a name as used without allocating it.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.taken.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_allocation_keeps_name() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.allocate("customers", "Customer"), "customers");
        assert!(registry.contains("customers"));
    }

    #[test]
    fn test_collision_order() {
        let mut registry = NameRegistry::new();
        let names: Vec<String> = (0..4)
            .map(|_| registry.allocate("customers", "Customer"))
            .collect();
        assert_eq!(
            names,
            vec![
                "customers",
                "Customer_customers",
                "Customer_customers_1",
                "Customer_customers_2"
            ]
        );
    }

    #[test]
    fn test_different_qualifiers() {
        let mut registry = NameRegistry::new();
        registry.allocate("orders", "Shop");
        assert_eq!(registry.allocate("orders", "Billing"), "Billing_orders");
        assert_eq!(registry.allocate("orders", "Shop"), "Shop_orders");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_reserved_names_are_skipped() {
        let mut registry = NameRegistry::new();
        registry.reserve("Address");
        registry.reserve("customers_Address");
        assert_eq!(registry.allocate("Address", "customers"), "customers_Address_1");
    }
}
