pub mod auth;
pub mod pagination;
pub mod role;
pub mod user;
