pub mod donation;
pub mod gateway;
pub mod money;
pub mod payment_status;
pub mod repository;
