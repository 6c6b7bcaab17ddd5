pub mod booking_repository;
pub mod car_repository;
pub mod contract_repository;
pub mod payment_repository;
