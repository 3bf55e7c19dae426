//! In-flight item registry
//!
//! Items are kept in spawn (id) order. Removal is two-phase: the collision
//! pass only marks items resolved, [`ItemRegistry::compact`] drops them after.

use super::state::FallingItem;

#[derive(Debug, Clone)]
pub struct ItemRegistry {
    items: Vec<FallingItem>,
    next_id: u32,
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID (never reused within a registry)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, item: FallingItem) {
        self.items.push(item);
    }

    /// Move every unresolved item down by its own fall speed
    pub fn advance(&mut self) {
        for item in self.items.iter_mut().filter(|item| !item.resolved) {
            item.pos.y += item.fall_speed;
        }
    }

    /// Drop resolved items and anything below the floor; returns removed ids
    pub fn compact(&mut self, floor_y: f32) -> Vec<u32> {
        let mut removed = Vec::new();
        self.items.retain(|item| {
            let keep = !item.resolved && item.top_y() <= floor_y;
            if !keep {
                removed.push(item.id);
            }
            keep
        });
        removed
    }

    /// Drop everything; returns removed ids
    pub fn clear(&mut self) -> Vec<u32> {
        self.items.drain(..).map(|item| item.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FallingItem> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FallingItem> {
        self.items.iter_mut()
    }

    pub fn get(&self, id: u32) -> Option<&FallingItem> {
        self.items.iter().find(|item| item.id == id)
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
    use crate::sim::state::ItemKind;
    use glam::Vec2;

    fn item(registry: &mut ItemRegistry, y: f32, speed: f32) -> u32 {
        let id = registry.next_entity_id();
        registry.insert(FallingItem {
            id,
            kind: ItemKind::SmallCoin,
            pos: Vec2::new(100.0, y),
            size: Vec2::splat(25.0),
            fall_speed: speed,
            resolved: false,
        });
        id
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut registry = ItemRegistry::new();
        let a = item(&mut registry, 0.0, 1.0);
        let b = item(&mut registry, 0.0, 1.0);
        registry.clear();
        let c = item(&mut registry, 0.0, 1.0);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_advance_uses_per_item_speed() {
        let mut registry = ItemRegistry::new();
        let slow = item(&mut registry, -25.0, 2.0);
        let fast = item(&mut registry, -25.0, 5.71);
        registry.advance();
        registry.advance();
        assert_eq!(registry.get(slow).map(|i| i.top_y()), Some(-21.0));
        assert!((registry.get(fast).map(|i| i.top_y()).unwrap_or(0.0) - (-13.58)).abs() < 1e-4);
    }

    #[test]
    fn test_resolved_items_do_not_move() {
        let mut registry = ItemRegistry::new();
        let id = item(&mut registry, 10.0, 2.0);
        registry.iter_mut().for_each(|i| i.resolved = true);
        registry.advance();
        assert_eq!(registry.get(id).map(|i| i.top_y()), Some(10.0));
    }

    #[test]
    fn test_compact_two_phase() {
        let mut registry = ItemRegistry::new();
        let keep = item(&mut registry, 100.0, 2.0);
        let caught = item(&mut registry, 200.0, 2.0);
        let fell = item(&mut registry, 601.0, 2.0);
        for i in registry.iter_mut() {
            if i.id == caught {
                i.resolved = true;
            }
        }
        let removed = registry.compact(600.0);
        assert_eq!(removed, vec![caught, fell]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(keep).is_some());
    }
}
