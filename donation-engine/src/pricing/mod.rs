//! Donation Pricing Module
//!
//! Pure, synchronous computation behind the donation form:
//! line-item resolution, region classification and order totals.

pub mod item_calculator;
mod money;
pub mod order_calculator;
pub mod region;

pub use item_calculator::*;
pub use money::{MAX_AMOUNT, MAX_QUANTITY, format_amount, multiply, to_decimal, to_f64};
pub use order_calculator::*;
pub use region::*;
