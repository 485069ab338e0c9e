pub mod redis_donation_repository;
