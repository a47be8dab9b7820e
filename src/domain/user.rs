use uuid::Uuid;

use super::error::ValidationError;

/// A user as stored by the directory.
///
/// `username` uniqueness is a storage constraint, not checked here.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub name: Option<String>,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the password hash
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("name", &self.name)
            .finish()
    }
}

/// Shortest password accepted at registration, in characters.
pub const MIN_PASSWORD_LEN: usize = 3;

/// Input of a registration, after validation. The password is still plain text.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl NewUser {
    /// `username` and `password` are required; the password needs
    /// `MIN_PASSWORD_LEN` characters. A blank `name` is dropped.
    pub fn parse(
        username: Option<&str>,
        name: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let username = username
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingRequiredField("username"))?;
        let password = password
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingRequiredField("password"))?;

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }

        Ok(Self {
            username: username.to_string(),
            name: name
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            password: password.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_and_password_are_required() {
        let err = NewUser::parse(None, Some("Sami"), Some("secret")).unwrap_err();
        assert_eq!(err, ValidationError::MissingRequiredField("username"));

        let err = NewUser::parse(Some("sami"), None, None).unwrap_err();
        assert_eq!(err, ValidationError::MissingRequiredField("password"));

        let err = NewUser::parse(Some("sami"), None, Some("")).unwrap_err();
        assert_eq!(err, ValidationError::MissingRequiredField("password"));
    }

    #[test]
    fn short_password_is_rejected() {
        let err = NewUser::parse(Some("sami"), None, Some("ab")).unwrap_err();
        assert_eq!(err, ValidationError::PasswordTooShort { min: 3 });

        assert!(NewUser::parse(Some("sami"), None, Some("abc")).is_ok());
    }

    #[test]
    fn debug_hides_password() {
        let user = NewUser::parse(Some(" sami "), Some("  "), Some("hunter22")).unwrap();

        assert_eq!(user.username, "sami");
        assert_eq!(user.name, None);
        assert!(!format!("{user:?}").contains("hunter22"));
    }
}
