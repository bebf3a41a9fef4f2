pub mod blocks;
pub mod error;
pub mod pages;
pub mod repos;
pub mod trust;
