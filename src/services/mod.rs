pub mod availability;
pub mod payment_gateway;
pub mod pricing;
