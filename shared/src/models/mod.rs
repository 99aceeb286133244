//! Data models
//!
//! Wire types shared by the client and the CLI. Field names follow the
//! backend JSON exactly; the dish category travels as `type`.

pub mod course;
pub mod menu_item;
pub mod reservation;
pub mod zenchef;

// Re-exports
pub use course::*;
pub use menu_item::*;
pub use reservation::*;
pub use zenchef::*;
