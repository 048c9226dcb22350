pub mod auth;
pub mod bumbu;
pub mod content;
pub mod potong;
pub mod shared;
pub mod user;
