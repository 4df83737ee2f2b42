pub mod admin;
pub mod availability;
pub mod booking;
pub mod contact;
