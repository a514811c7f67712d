pub mod auth_token;
pub mod email;
pub mod password;
pub mod phone;
pub mod reset_token;
pub mod role;
pub mod user;
pub mod user_error;
pub mod user_id;
