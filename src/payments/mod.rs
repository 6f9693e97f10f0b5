pub mod capabilities;
pub mod error;
pub mod form;
pub mod gateway;
pub mod providers;
pub mod refunds;
pub mod registry;
pub mod render;
pub mod types;
