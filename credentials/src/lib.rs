//! Credential and token handling library
//!
//! Provides the security core shared by the trainer services:
//! - Credential value types (user name, password, salt, pepper, role)
//! - Password hashing over a per-user salt and a process-wide pepper
//! - JWT issuing and validation (HS512)
//! - A clock abstraction so expiry math is deterministic under test
//!
//! No HTTP and no storage live here; services adapt these primitives behind
//! their own ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use credentials::{InputPassword, PasswordHasher, PasswordVector, Pepper, Salt};
//!
//! let pepper = Pepper::new("a-pepper-that-is-at-least-32-characters").unwrap();
//! let vector = PasswordVector::new(Salt::generate(), pepper);
//! let password = InputPassword::new("myVerySecretlySecret").unwrap();
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash(&password, &vector).unwrap();
//! assert!(hasher.verify(&password, &vector, &hash).is_ok());
//! ```
//!
//! ## Token Issuing and Validation
//! ```
//! use std::sync::Arc;
//! use credentials::{JwtManager, JwtSettings, Role, SystemClock, TokenIdentity};
//!
//! let manager = JwtManager::new(
//!     JwtSettings {
//!         secret: "a-signing-key-of-at-least-32-bytes!!".to_string(),
//!         subject: "vocab-trainer".to_string(),
//!         audience: "vocab-trainer-spa".to_string(),
//!         lifetime_seconds: 7200,
//!     },
//!     Arc::new(SystemClock),
//! )
//! .unwrap();
//!
//! let token = manager
//!     .issue(&TokenIdentity {
//!         user_name: "Otto".to_string(),
//!         first_name: "Otto".to_string(),
//!         last_name: "Normalverbraucher".to_string(),
//!         role: Role::User,
//!     })
//!     .unwrap();
//! let payload = manager.validate(token.as_str()).unwrap();
//! assert_eq!(payload.user_name, "Otto");
//! ```

pub mod clock;
pub mod jwt;
pub mod password;
pub mod primitives;

// Re-export commonly used items
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JsonWebToken;
pub use jwt::JwtError;
pub use jwt::JwtManager;
pub use jwt::JwtSettings;
pub use jwt::TokenIdentity;
pub use jwt::TokenPayload;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use primitives::InputPassword;
pub use primitives::InputPasswordError;
pub use primitives::PasswordHash;
pub use primitives::PasswordHashError;
pub use primitives::PasswordVector;
pub use primitives::Pepper;
pub use primitives::PepperError;
pub use primitives::Role;
pub use primitives::Salt;
pub use primitives::SaltError;
pub use primitives::ScopeError;
pub use primitives::UserName;
pub use primitives::UserNameError;
