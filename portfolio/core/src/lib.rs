//! Domain models for the portfolio demos: a shopping cart and a task manager.
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod price;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;

pub use cart::{CartItem, CartLedger};
pub use catalog::CatalogItem;
pub use checkout::OrderConfirmation;
pub use price::Price;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::TaskStore;
pub use task::{ParseEnumError, Priority, Task, TaskDraft, TaskError};
pub use view::{PriorityFilter, StatusFilter};
