pub mod auth_validator;
pub mod role_gate;
