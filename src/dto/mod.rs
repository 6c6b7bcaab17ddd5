pub mod booking_dto;
pub mod car_dto;
pub mod common;
pub mod contract_dto;
pub mod payment_dto;
