pub mod local_jwt_validator;
