//! Browser-side half of the donation flow: start a hosted checkout, then
//! confirm the payment when the donor comes back.

pub mod api;
pub mod checkout_initiator;
pub mod config;
pub mod confirmation;
pub mod status_reconciler;
