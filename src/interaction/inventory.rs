use bevy::prelude::*;

/// One named entry in an inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    pub name: String,
    pub quantity: u32,
}

/// Ordered item collection carried by the player.
///
/// Names are unique and empty stacks are dropped, so every entry has a
/// quantity of at least one.
#[derive(Component, Debug, Default, Clone)]
pub struct Inventory {
    items: Vec<ItemStack>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` of `name`, appending a new entry if needed.
    pub fn add(&mut self, name: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|stack| stack.name == name) {
            Some(stack) => stack.quantity = stack.quantity.saturating_add(quantity),
            None => self.items.push(ItemStack {
                name: name.to_string(),
                quantity,
            }),
        }
    }

    /// Removes `quantity` of `name`. Returns false and leaves the inventory
    /// untouched if there is not enough of it.
    pub fn remove(&mut self, name: &str, quantity: u32) -> bool {
        let Some(index) = self.items.iter().position(|stack| stack.name == name) else {
            return quantity == 0;
        };
        let stack = &mut self.items[index];
        if stack.quantity < quantity {
            return false;
        }
        stack.quantity -= quantity;
        if stack.quantity == 0 {
            self.items.remove(index);
        }
        true
    }

    pub fn quantity(&self, name: &str) -> u32 {
        self.items
            .iter()
            .find(|stack| stack.name == name)
            .map_or(0, |stack| stack.quantity)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.quantity(name) > 0
    }

    pub fn items(&self) -> &[ItemStack] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_merges_existing_names_and_keeps_order() {
        let mut inventory = Inventory::new();
        inventory.add("Key", 1);
        inventory.add("Coin", 5);
        inventory.add("Key", 2);

        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.items()[0].name, "Key");
        assert_eq!(inventory.quantity("Key"), 3);
        assert_eq!(inventory.quantity("Coin"), 5);
    }

    #[test]
    fn adding_zero_creates_no_entry() {
        let mut inventory = Inventory::new();
        inventory.add("Dust", 0);
        assert!(inventory.is_empty());
    }

    #[test]
    fn removing_everything_drops_the_entry() {
        let mut inventory = Inventory::new();
        inventory.add("Coin", 2);

        assert!(inventory.remove("Coin", 2));
        assert!(!inventory.contains("Coin"));
        assert!(inventory.is_empty());
    }

    #[test]
    fn removing_more_than_held_fails_without_change() {
        let mut inventory = Inventory::new();
        inventory.add("Coin", 2);

        assert!(!inventory.remove("Coin", 3));
        assert!(!inventory.remove("Gem", 1));
        assert_eq!(inventory.quantity("Coin"), 2);
    }
}
