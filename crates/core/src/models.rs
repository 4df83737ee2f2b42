pub mod booking;
pub mod contact;
pub mod meeting;
pub mod slot;
