//! Persistence collaborators: a key/value option store for gateway settings and
//! an order repository. Both are traits so hosts can back them with their own
//! storage; in-memory implementations are provided.

pub mod error;
pub mod option_store;
pub mod order_repository;

pub use error::{StoreError, StoreResult};
pub use option_store::{InMemoryOptionStore, OptionStore, OptionStoreExt};
pub use order_repository::{InMemoryOrderRepository, OrderRepository};
