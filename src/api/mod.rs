//! HTTP handlers for the catalog pages

pub mod authors;
pub mod books;
pub mod catalog;
pub mod health;
