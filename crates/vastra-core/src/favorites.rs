use tracing::debug;

use crate::models::Product;
use crate::storage::Storage;

/// Persisted key holding the favorites array.
const FAVORITES_KEY: &str = "favorites";

/// Saved products, unique by id, in the order they were added.
///
/// The whole record is stored, not just the id, so favorites survive
/// catalog changes. Every mutation writes through to storage before
/// returning; there is no write queue.
#[derive(Debug, Default)]
pub struct Favorites {
    items: Vec<Product>,
}

impl Favorites {
    /// Hydrate from storage; empty when nothing usable is stored.
    pub fn load(storage: &Storage) -> Self {
        let items: Vec<Product> = storage.load(FAVORITES_KEY, Vec::new());
        debug!(count = items.len(), "hydrated favorites");
        Self { items }
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a product id is already saved.
    pub fn contains(&self, id: i64) -> bool {
        self.items.iter().any(|p| p.id == id)
    }

    /// Save a product; a no-op when its id is already present.
    pub fn add(&mut self, storage: &Storage, product: Product) {
        if self.contains(product.id) {
            return;
        }
        debug!(id = product.id, "added favorite");
        self.items.push(product);
        storage.save(FAVORITES_KEY, &self.items);
    }

    /// Drop a product by id; a no-op when absent.
    pub fn remove(&mut self, storage: &Storage, id: i64) {
        let before = self.items.len();
        self.items.retain(|p| p.id != id);
        if self.items.len() != before {
            debug!(id, "removed favorite");
            storage.save(FAVORITES_KEY, &self.items);
        }
    }

    /// Flip membership: remove when saved, save otherwise. Returns the new
    /// membership state.
    pub fn toggle(&mut self, storage: &Storage, product: Product) -> bool {
        if self.contains(product.id) {
            self.remove(storage, product.id);
            false
        } else {
            self.add(storage, product);
            true
        }
    }

    /// Empty the list and drop the persisted key.
    pub fn clear_all(&mut self, storage: &Storage) {
        self.items.clear();
        storage.clear(FAVORITES_KEY);
    }

    /// Re-persist the current state; the teardown path.
    pub fn flush(&self, storage: &Storage) {
        storage.save(FAVORITES_KEY, &self.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tee(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.into(),
            price: 500.0,
            original_price: 800.0,
            image: format!("/images/{id}.jpg"),
            category: "T-Shirts".into(),
            colors: vec!["Black".into(), "White".into()],
            sizes: vec!["S".into(), "M".into(), "L".into(), "XL".into()],
            description: "A tee.".into(),
            is_new: false,
            is_best_seller: false,
            minimum_sets: None,
            wholesale_discount: None,
            stock_available: None,
            inventory_status: None,
            launch_date: None,
            arrival_date: None,
        }
    }

    #[test]
    fn test_add_twice_keeps_one_entry() {
        let storage = Storage::open_memory().unwrap();
        let mut favorites = Favorites::load(&storage);

        favorites.add(&storage, tee(1, "Crew Tee"));
        favorites.add(&storage, tee(1, "Crew Tee"));

        assert_eq!(favorites.len(), 1);
        assert!(favorites.contains(1));
    }

    #[test]
    fn test_toggle_is_an_involution() {
        let storage = Storage::open_memory().unwrap();
        let mut favorites = Favorites::load(&storage);

        assert!(favorites.toggle(&storage, tee(1, "Crew Tee")));
        assert!(favorites.contains(1));
        assert!(!favorites.toggle(&storage, tee(1, "Crew Tee")));
        assert!(!favorites.contains(1));

        // Starting from the saved state works the same way.
        favorites.add(&storage, tee(2, "Polo"));
        assert!(!favorites.toggle(&storage, tee(2, "Polo")));
        assert!(favorites.toggle(&storage, tee(2, "Polo")));
        assert!(favorites.contains(2));
    }

    #[test]
    fn test_remove_absent_is_a_noop() {
        let storage = Storage::open_memory().unwrap();
        let mut favorites = Favorites::load(&storage);

        favorites.add(&storage, tee(1, "Crew Tee"));
        favorites.remove(&storage, 99);

        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let storage = Storage::open_memory().unwrap();
        let mut favorites = Favorites::load(&storage);

        favorites.add(&storage, tee(3, "Chinos"));
        favorites.add(&storage, tee(1, "Crew Tee"));
        favorites.add(&storage, tee(2, "Polo"));

        let ids: Vec<i64> = favorites.items().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_persists_across_reload() {
        let storage = Storage::open_memory().unwrap();
        let mut favorites = Favorites::load(&storage);
        favorites.add(&storage, tee(1, "Crew Tee"));
        favorites.add(&storage, tee(2, "Polo"));

        let reloaded = Favorites::load(&storage);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains(1));
        assert_eq!(reloaded.items()[1].name, "Polo");
    }

    #[test]
    fn test_clear_all_empties_store_and_storage() {
        let storage = Storage::open_memory().unwrap();
        let mut favorites = Favorites::load(&storage);
        favorites.add(&storage, tee(1, "Crew Tee"));

        favorites.clear_all(&storage);
        assert!(favorites.is_empty());

        let reloaded = Favorites::load(&storage);
        assert!(reloaded.is_empty());
    }
}
