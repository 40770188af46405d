//! Reference data models

pub mod category;
pub mod child;
pub mod courier_charge;

pub use category::{Category, CategoryKind, DynamicPricing};
pub use child::{ChildCreate, ChildDependent, ChildUpdate};
pub use courier_charge::{CourierChargeEntry, CourierRegion};
