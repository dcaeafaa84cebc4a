//! Integration layer - External collaborator seams.
//!
//! This module contains the capability traits the dispatcher is handed at
//! construction time:
//! - Delivery of outbound replies
//! - Administrator permission lookup

pub mod capability;

pub use capability::{
    BoxedDelivery, BoxedPermissionLookup, DeliveryCapability, EventPermissions,
    PermissionCapability,
};
