//! Order confirmation shown after checkout.
//!
//! The order code is for display only; nothing stores or validates it.

use crate::cart::CartItem;
use crate::price::Price;
use rand::Rng;

const ORDER_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ORDER_CODE_LEN: usize = 8;

/// Snapshot of the cart at checkout time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub code: String,
    pub items: Vec<CartItem>,
    pub total: Price,
}

impl OrderConfirmation {
    pub fn new(items: Vec<CartItem>, total: Price) -> Self {
        Self {
            code: generate_order_code(),
            items,
            total,
        }
    }
}

/// Generates an 8 character order code from `A-Z0-9`.
pub fn generate_order_code() -> String {
    generate_order_code_with(&mut rand::rng())
}

pub fn generate_order_code_with<R: Rng>(rng: &mut R) -> String {
    (0..ORDER_CODE_LEN)
        .map(|_| {
            let index = rng.random_range(0..ORDER_CODE_ALPHABET.len());
            ORDER_CODE_ALPHABET[index] as char
        })
        .collect()
}
