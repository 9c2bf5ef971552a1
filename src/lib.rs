pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{GasClient, LocalStorage};
pub use config::{AppConfig, OrderFile};
pub use core::{
    AdminBoard, Cart, Catalog, FlowState, MemberSession, OrderComposer, ReservationFlow,
};
pub use domain::ports::{ConfigProvider, OrderBackend, Storage};
pub use utils::error::{OrderError, Result, ValidationError};
