pub mod admin;
pub mod booking;
pub mod cart;
pub mod catalog;
pub mod composer;
pub mod member;
pub mod reservation_flow;

pub use crate::domain::model::{CartLine, CatalogItem, Reservation, ReservationReceipt};
pub use crate::domain::ports::{ConfigProvider, OrderBackend, Storage};
pub use crate::utils::error::Result;
pub use admin::{AdminBoard, PendingStatusChange};
pub use booking::{BookingForm, BookingInfo};
pub use cart::Cart;
pub use catalog::Catalog;
pub use composer::{ModifierSelection, OrderComposer};
pub use member::MemberSession;
pub use reservation_flow::{FlowState, ReservationFlow};
