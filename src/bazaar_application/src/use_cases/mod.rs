pub mod admin;
pub mod login;
pub mod profile;
pub mod request_password_reset;
pub mod reset_password;
pub mod session;
pub mod signup;

mod shared;
