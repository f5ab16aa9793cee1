pub mod articles;
pub mod auth;
pub(crate) mod confirm;
pub mod shell;
