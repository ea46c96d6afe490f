//! Data models for the VendorLink marketplace.
//!
//! These models match the frontend TypeScript interfaces for seamless interoperability.

mod group_order;
mod notification;
mod supplier;
mod user;

pub use group_order::*;
pub use notification::*;
pub use supplier::*;
pub use user::*;
