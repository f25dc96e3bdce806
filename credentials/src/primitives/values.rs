use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use argon2::password_hash::SaltString;

use crate::primitives::errors::InputPasswordError;
use crate::primitives::errors::PasswordHashError;
use crate::primitives::errors::PepperError;
use crate::primitives::errors::SaltError;
use crate::primitives::errors::ScopeError;
use crate::primitives::errors::UserNameError;

/// User name value type
///
/// Ensures the name is 4-30 characters and free of quote and ampersand,
/// which are rejected everywhere credentials are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    const MIN_LENGTH: usize = 4;
    const MAX_LENGTH: usize = 30;

    /// Create a validated user name.
    ///
    /// The input is trimmed before validation.
    ///
    /// # Errors
    /// * `TooShort` - Name shorter than 4 characters
    /// * `TooLong` - Name longer than 30 characters
    /// * `ForbiddenCharacters` - Contains `'` or `&`
    pub fn new(name: impl Into<String>) -> Result<Self, UserNameError> {
        let name = name.into().trim().to_string();
        let name = Self::with_valid_length(name)?;
        let name = Self::with_valid_chars(name)?;
        Ok(Self(name))
    }

    fn with_valid_length(name: String) -> Result<String, UserNameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UserNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UserNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(name)
        }
    }

    fn with_valid_chars(name: String) -> Result<String, UserNameError> {
        if name.chars().any(|c| c == '\'' || c == '&') {
            Err(UserNameError::ForbiddenCharacters)
        } else {
            Ok(name)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password supplied by a client.
///
/// Exists only in memory for the duration of a registration or login
/// request; never serialized, never stored. Debug output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct InputPassword(String);

impl InputPassword {
    const MIN_LENGTH: usize = 12;

    /// Create a validated plaintext password.
    ///
    /// The input is trimmed before validation.
    ///
    /// # Errors
    /// * `TooShort` - Password shorter than 12 characters
    /// * `ForbiddenCharacters` - Contains `'` or `&`
    pub fn new(password: impl Into<String>) -> Result<Self, InputPasswordError> {
        let password = password.into().trim().to_string();
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(InputPasswordError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if password.chars().any(|c| c == '\'' || c == '&') {
            return Err(InputPasswordError::ForbiddenCharacters);
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for InputPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InputPassword(<redacted>)")
    }
}

/// Per-user random salt mixed into the password hash.
///
/// Generated once at registration and stored alongside the account record;
/// never regenerated afterwards. Held as the base64 form accepted by the
/// key derivation function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt(String);

impl Salt {
    const MIN_LENGTH: usize = 32;
    const GENERATED_BYTES: usize = 32;

    /// Generate a fresh salt from the operating system CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; Self::GENERATED_BYTES];
        OsRng.fill_bytes(&mut bytes);
        // 32 bytes encode to 43 base64 characters, comfortably above the minimum;
        // encoding a fixed-size buffer cannot exceed the salt length limit
        let encoded =
            SaltString::encode_b64(&bytes).expect("32-byte salt is within the encoder limit");
        Self(encoded.as_str().to_string())
    }

    /// Reconstruct a salt from its stored representation.
    ///
    /// # Errors
    /// * `TooShort` - Stored value shorter than 32 characters
    /// * `Malformed` - Stored value is not valid base64
    pub fn new(value: impl Into<String>) -> Result<Self, SaltError> {
        let value = value.into();
        let length = value.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(SaltError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        SaltString::from_b64(&value).map_err(|e| SaltError::Malformed(e.to_string()))?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Application-wide secret mixed into every password hash.
///
/// Loaded once from configuration at process start and shared read-only by
/// all requests; never persisted per user. Debug output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Pepper(String);

impl Pepper {
    const MIN_LENGTH: usize = 32;

    /// Create a validated pepper.
    ///
    /// # Errors
    /// * `TooShort` - Value shorter than 32 characters; hashing must never
    ///   proceed with a weak or missing pepper
    pub fn new(value: impl Into<String>) -> Result<Self, PepperError> {
        let value = value.into();
        let length = value.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PepperError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pepper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pepper(<redacted>)")
    }
}

/// The two-part secret handed to the hasher: the per-user salt and the
/// process-wide pepper.
#[derive(Debug, Clone)]
pub struct PasswordVector {
    salt: Salt,
    pepper: Pepper,
}

impl PasswordVector {
    pub fn new(salt: Salt, pepper: Pepper) -> Self {
        Self { salt, pepper }
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    pub fn pepper(&self) -> &Pepper {
        &self.pepper
    }
}

/// Password digest in PHC string format (algorithm tag, parameters, salt,
/// digest). Compared only through hash verification, never by string
/// equality.
#[derive(Debug, Clone)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Reconstruct a hash from its stored representation.
    ///
    /// # Errors
    /// * `Malformed` - Value does not parse as a PHC string
    pub fn new(value: impl Into<String>) -> Result<Self, PasswordHashError> {
        let value = value.into();
        argon2::password_hash::PasswordHash::new(&value)
            .map_err(|e| PasswordHashError::Malformed(e.to_string()))?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Caller role carried in the token's scope claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Manager,
}

impl Role {
    const USER_SCOPE: &'static str = "is:user";
    const MANAGER_SCOPE: &'static str = "is:manager";

    /// Scope claim value for this role.
    pub fn as_scope(&self) -> &'static str {
        match self {
            Role::User => Self::USER_SCOPE,
            Role::Manager => Self::MANAGER_SCOPE,
        }
    }

    /// Parse a scope claim value back into a role.
    ///
    /// # Errors
    /// * `Unknown` - Scope is neither `is:user` nor `is:manager`
    pub fn from_scope(scope: &str) -> Result<Self, ScopeError> {
        match scope {
            Self::USER_SCOPE => Ok(Role::User),
            Self::MANAGER_SCOPE => Ok(Role::Manager),
            other => Err(ScopeError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("USER"),
            Role::Manager => f.write_str("MANAGER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_valid() {
        let name = UserName::new("Otto").expect("valid name rejected");
        assert_eq!(name.as_str(), "Otto");
    }

    #[test]
    fn test_user_name_trimmed() {
        let name = UserName::new("  Otto  ").expect("valid name rejected");
        assert_eq!(name.as_str(), "Otto");
    }

    #[test]
    fn test_user_name_too_short() {
        assert_eq!(
            UserName::new("Ott"),
            Err(UserNameError::TooShort { min: 4, actual: 3 })
        );
    }

    #[test]
    fn test_user_name_too_long() {
        let result = UserName::new("a".repeat(31));
        assert_eq!(
            result,
            Err(UserNameError::TooLong {
                max: 30,
                actual: 31
            })
        );
    }

    #[test]
    fn test_user_name_forbidden_characters() {
        assert_eq!(
            UserName::new("O'Brien"),
            Err(UserNameError::ForbiddenCharacters)
        );
        assert_eq!(
            UserName::new("Tom&Jerry"),
            Err(UserNameError::ForbiddenCharacters)
        );
    }

    #[test]
    fn test_input_password_minimum_length() {
        assert!(InputPassword::new("myVerySecretlySecret").is_ok());
        assert_eq!(
            InputPassword::new("elevenchars"),
            Err(InputPasswordError::TooShort {
                min: 12,
                actual: 11
            })
        );
    }

    #[test]
    fn test_input_password_forbidden_characters() {
        assert_eq!(
            InputPassword::new("twelve'chars'"),
            Err(InputPasswordError::ForbiddenCharacters)
        );
    }

    #[test]
    fn test_input_password_debug_redacted() {
        let password = InputPassword::new("myVerySecretlySecret").unwrap();
        assert_eq!(format!("{:?}", password), "InputPassword(<redacted>)");
    }

    #[test]
    fn test_salt_generate_is_long_enough_and_unique() {
        let first = Salt::generate();
        let second = Salt::generate();
        assert!(first.as_str().len() >= 32);
        assert_ne!(first, second);
    }

    #[test]
    fn test_salt_round_trips_through_storage() {
        let generated = Salt::generate();
        let restored = Salt::new(generated.as_str()).expect("generated salt rejected");
        assert_eq!(generated, restored);
    }

    #[test]
    fn test_salt_rejects_short_values() {
        assert!(matches!(
            Salt::new("tooshort"),
            Err(SaltError::TooShort { .. })
        ));
    }

    #[test]
    fn test_pepper_rejects_short_values() {
        assert!(matches!(
            Pepper::new("short"),
            Err(PepperError::TooShort { .. })
        ));
        assert!(Pepper::new("a-pepper-that-is-at-least-32-characters").is_ok());
    }

    #[test]
    fn test_pepper_debug_redacted() {
        let pepper = Pepper::new("a-pepper-that-is-at-least-32-characters").unwrap();
        assert_eq!(format!("{:?}", pepper), "Pepper(<redacted>)");
    }

    #[test]
    fn test_password_hash_rejects_non_phc_strings() {
        assert!(matches!(
            PasswordHash::new("not-a-phc-string"),
            Err(PasswordHashError::Malformed(_))
        ));
    }

    #[test]
    fn test_role_scope_round_trip() {
        assert_eq!(Role::User.as_scope(), "is:user");
        assert_eq!(Role::Manager.as_scope(), "is:manager");
        assert_eq!(Role::from_scope("is:user"), Ok(Role::User));
        assert_eq!(Role::from_scope("is:manager"), Ok(Role::Manager));
        assert!(matches!(
            Role::from_scope("is:admin"),
            Err(ScopeError::Unknown(_))
        ));
    }
}
