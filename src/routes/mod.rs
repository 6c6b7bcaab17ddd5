pub mod booking_routes;
pub mod car_routes;
pub mod contract_routes;
pub mod payment_routes;
