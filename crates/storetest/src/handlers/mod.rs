pub mod error;
pub mod health;
pub mod items;
pub mod pages;
pub mod uploads;

pub use error::AppError;
