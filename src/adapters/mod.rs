// Adapters layer: concrete implementations of the domain ports (HTTP backend, local storage).

pub mod gas_client;
pub mod storage;

pub use gas_client::GasClient;
pub use storage::LocalStorage;
