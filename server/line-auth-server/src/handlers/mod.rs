pub mod health;
pub mod line_auth;
