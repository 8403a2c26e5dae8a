use crate::catalog::CatalogItem;
use crate::checkout::OrderConfirmation;
use crate::price::Price;
use serde::{Deserialize, Serialize};

/// One line of the cart: a catalog item and how many of it were picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u32,
    pub title: String,
    pub price: Price,
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line, `price × quantity`.
    pub fn subtotal(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The in-memory list of cart lines.
///
/// Every line has a quantity of at least one; lowering a quantity to zero
/// removes the line.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLedger {
    items: Vec<CartItem>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds one unit of a catalog item, merging with an existing line.
    pub fn add(&mut self, item: &CatalogItem) {
        match self.items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.items.push(CartItem {
                id: item.id,
                title: item.title.to_string(),
                price: item.price,
                quantity: 1,
            }),
        }
    }

    /// Removes the line with the given id, if any.
    pub fn remove(&mut self, id: u32) {
        self.items.retain(|line| line.id != id);
    }

    /// Replaces a line's quantity. Zero or negative quantities remove the line.
    pub fn set_quantity(&mut self, id: u32, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.items.iter_mut().find(|line| line.id == id) {
            line.quantity = quantity;
        }
    }

    /// Sum of every line's subtotal.
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: u32) -> Option<&CartItem> {
        self.items.iter().find(|line| line.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Hands the current lines and total to a confirmation with a fresh order code.
    /// An empty cart cannot be checked out.
    pub fn checkout(&self) -> Option<OrderConfirmation> {
        if self.is_empty() {
            return None;
        }
        Some(OrderConfirmation::new(self.items.clone(), self.total()))
    }
}
