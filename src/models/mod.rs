pub mod auth;
pub mod booking;
pub mod car;
pub mod contract;
pub mod payment;
