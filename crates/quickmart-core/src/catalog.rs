//! # Catalog
//!
//! Owns every product for the session, in insertion order. The cart only
//! keeps snapshots plus a [`ProductId`]; stock changes go through here.

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::product::{Product, ProductId};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product and returns its id.
    pub fn insert(&mut self, product: Product) -> ProductId {
        let id = product.id();
        debug!(%id, name = product.name(), stock = product.quantity(), "catalog insert");
        self.products.push(product);
        id
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id() == id)
    }

    /// Like [`Catalog::get`], but a missing id is an error.
    pub fn require(&self, id: ProductId) -> CoreResult<&Product> {
        self.get(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// First product with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name() == name)
    }

    /// Deducts stock from one product.
    pub fn deduct(&mut self, id: ProductId, amount: u32) -> CoreResult<()> {
        self.get_mut(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?
            .deduct_quantity(amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_insert_and_lookup() {
        let mut catalog = Catalog::new();
        let id = catalog.insert(Product::non_expirable("Gum", Money::from_major(1), 4).unwrap());

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.require(id).unwrap().name(), "Gum");
        assert_eq!(catalog.find_by_name("Gum").unwrap().id(), id);
        assert!(catalog.find_by_name("Tea").is_none());
    }

    #[test]
    fn test_deduct() {
        let mut catalog = Catalog::new();
        let id = catalog.insert(Product::non_expirable("Gum", Money::from_major(1), 4).unwrap());

        catalog.deduct(id, 3).unwrap();
        assert_eq!(catalog.require(id).unwrap().quantity(), 1);
        assert!(catalog.deduct(id, 2).is_err());
        assert_eq!(catalog.require(id).unwrap().quantity(), 1);
    }

    #[test]
    fn test_unknown_id() {
        let mut catalog = Catalog::new();
        let stray = ProductId::new();
        assert!(matches!(catalog.require(stray), Err(CoreError::ProductNotFound(_))));
        assert!(matches!(catalog.deduct(stray, 1), Err(CoreError::ProductNotFound(_))));
    }
}
