//! USDA FoodData Central integration

pub mod client;

pub use client::{FdcClient, FdcError, FdcFood, API_KEY_ENV, DEFAULT_BASE_URL};
