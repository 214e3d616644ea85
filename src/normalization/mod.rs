pub mod deal;
pub mod expiration;
pub mod price;
