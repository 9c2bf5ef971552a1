// Domain layer: records, fixed option tables and ports. No I/O here.

pub mod model;
pub mod options;
pub mod ports;
pub mod serde_helpers;
