pub mod booking_controller;
pub mod car_controller;
pub mod contract_controller;
pub mod payment_controller;
