pub mod auth;
pub mod bumbu;
pub mod content;
pub mod health;
pub mod potong;
pub mod user;
