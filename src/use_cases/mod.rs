pub mod create_checkout;
pub mod dto;
pub mod errors;
pub mod get_donation_status;
