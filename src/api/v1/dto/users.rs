/*
 * Responsibility
 * - Users の request/response DTO (password hash is never serialized)
 * - CreateUserRequest is parsed loosely and validated by into_new_user()
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{NewUser, ValidationError};

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl CreateUserRequest {
    pub fn into_new_user(self) -> Result<NewUser, ValidationError> {
        NewUser::parse(
            self.username.as_deref(),
            self.name.as_deref(),
            self.password.as_deref(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct UserBlog {
    pub id: String, // encoded
    pub title: String,
    pub author: Option<String>,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<UserBlog>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_body_is_validated() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"username":"root","name":"Superuser","password":"sekret"}"#)
                .unwrap();
        let user = req.into_new_user().unwrap();
        assert_eq!(user.username, "root");
        assert_eq!(user.name.as_deref(), Some("Superuser"));

        let req: CreateUserRequest = serde_json::from_str(r#"{"username":"root"}"#).unwrap();
        assert_eq!(
            req.into_new_user().unwrap_err(),
            ValidationError::MissingRequiredField("password")
        );
    }
}
