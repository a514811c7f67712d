//! Request bodies and their conversion into validated domain input.

use bazaar_core::{Email, NewUser, Password, Phone, Profile, Role, UserError, UserPatch};
use secrecy::Secret;
use serde::Deserialize;

/// Body of signup, first-admin bootstrap and admin user creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub username: Option<String>,
    pub profile_image: Option<String>,
}

fn required(value: String, field: &'static str) -> Result<String, UserError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(UserError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

impl TryFrom<NewUserRequest> for NewUser {
    type Error = UserError;

    fn try_from(request: NewUserRequest) -> Result<Self, Self::Error> {
        let mut profile = Profile::new(
            required(request.first_name, "firstName")?,
            required(request.last_name, "lastName")?,
        );
        profile.username = request.username;
        profile.profile_image = request.profile_image;

        Ok(NewUser {
            email: Email::try_from(request.email)?,
            password: Password::try_from(request.password)?,
            phone: Phone::parse(request.phone)?,
            profile,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: Secret<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: Secret<String>,
    pub new_password: Secret<String>,
}

/// Body of both profile and admin updates. Absent fields stay untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatchRequest {
    pub email: Option<Secret<String>>,
    pub phone: Option<String>,
    pub password: Option<Secret<String>>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub profile_image: Option<String>,
    pub is_active: Option<bool>,
    pub role: Option<Role>,
}

impl TryFrom<UserPatchRequest> for UserPatch {
    type Error = UserError;

    fn try_from(request: UserPatchRequest) -> Result<Self, Self::Error> {
        Ok(UserPatch {
            email: request.email.map(Email::try_from).transpose()?,
            phone: request.phone.map(Phone::parse).transpose()?,
            password: request.password.map(Password::try_from).transpose()?,
            first_name: request
                .first_name
                .map(|name| required(name, "firstName"))
                .transpose()?,
            last_name: request
                .last_name
                .map(|name| required(name, "lastName"))
                .transpose()?,
            username: request.username,
            profile_image: request.profile_image,
            is_active: request.is_active,
            role: request.role,
        })
    }
}
