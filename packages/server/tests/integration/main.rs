mod bumbu;
mod common;
mod failures;
mod health;
mod user;
