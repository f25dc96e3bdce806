use argon2::password_hash::PasswordHash as PhcHash;
use argon2::password_hash::PasswordHasher as ArgonHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;
use crate::primitives::InputPassword;
use crate::primitives::PasswordHash;
use crate::primitives::PasswordVector;
use crate::primitives::Pepper;

/// Password hashing over a two-part secret.
///
/// The per-user salt drives the key derivation; the process-wide pepper is
/// appended to the plaintext before derivation, so a leaked database alone
/// is not enough to mount an offline attack. Argon2id with library default
/// parameters, emitting a self-describing PHC string.
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Derive the hash of a password under the given salt/pepper vector.
    ///
    /// The input password has already passed length and charset validation
    /// at construction.
    ///
    /// # Errors
    /// * `HashingFailed` - Salt is unusable or the derivation itself failed
    pub fn hash(
        &self,
        password: &InputPassword,
        vector: &PasswordVector,
    ) -> Result<PasswordHash, PasswordError> {
        let salt = SaltString::from_b64(vector.salt().as_str())
            .map_err(|e| PasswordError::HashingFailed(format!("Invalid salt: {}", e)))?;
        let peppered = Self::peppered(password, vector.pepper());
        let argon2 = Argon2::default();

        let digest = argon2
            .hash_password(peppered.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        PasswordHash::new(digest.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The supplied vector's salt must be the salt the stored hash was
    /// derived under; the derivation is then recomputed and compared in
    /// constant time via the verifier. Mismatch and match are the only two
    /// observable outcomes.
    ///
    /// # Errors
    /// * `CredentialsInvalid` - Salt differs or the recomputed hash does not
    ///   match `stored`
    /// * `VerificationFailed` - Stored hash does not parse or carries no salt
    pub fn verify(
        &self,
        password: &InputPassword,
        vector: &PasswordVector,
        stored: &PasswordHash,
    ) -> Result<(), PasswordError> {
        let parsed = PhcHash::new(stored.as_str()).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;
        let embedded_salt = parsed.salt.ok_or_else(|| {
            PasswordError::VerificationFailed("Password hash carries no salt".to_string())
        })?;
        if embedded_salt.as_str() != vector.salt().as_str() {
            return Err(PasswordError::CredentialsInvalid);
        }
        let peppered = Self::peppered(password, vector.pepper());
        let argon2 = Argon2::default();

        argon2
            .verify_password(peppered.as_bytes(), &parsed)
            .map_err(|e| match e {
                argon2::password_hash::Error::Password => PasswordError::CredentialsInvalid,
                other => PasswordError::VerificationFailed(other.to_string()),
            })
    }

    fn peppered(password: &InputPassword, pepper: &Pepper) -> String {
        format!("{}{}", password.as_str(), pepper.as_str())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Salt;

    fn pepper() -> Pepper {
        Pepper::new("test-pepper-that-is-at-least-32-characters").unwrap()
    }

    fn password() -> InputPassword {
        InputPassword::new("myVerySecretlySecret").unwrap()
    }

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hasher = PasswordHasher::new();
        let vector = PasswordVector::new(Salt::generate(), pepper());

        let hash = hasher
            .hash(&password(), &vector)
            .expect("Failed to hash password");

        hasher
            .verify(&password(), &vector, &hash)
            .expect("Correct password rejected");
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hasher = PasswordHasher::new();
        let vector = PasswordVector::new(Salt::generate(), pepper());
        let hash = hasher.hash(&password(), &vector).unwrap();

        let wrong = InputPassword::new("wrongpassword!").unwrap();
        assert!(matches!(
            hasher.verify(&wrong, &vector, &hash),
            Err(PasswordError::CredentialsInvalid)
        ));
    }

    #[test]
    fn test_verify_rejects_different_salt() {
        let hasher = PasswordHasher::new();
        let vector = PasswordVector::new(Salt::generate(), pepper());
        let hash = hasher.hash(&password(), &vector).unwrap();

        // Same password and pepper, different per-user salt
        let other_vector = PasswordVector::new(Salt::generate(), pepper());
        assert!(matches!(
            hasher.verify(&password(), &other_vector, &hash),
            Err(PasswordError::CredentialsInvalid)
        ));
    }

    #[test]
    fn test_verify_rejects_salt_differing_in_one_character() {
        let hasher = PasswordHasher::new();
        let salt = Salt::generate();
        let vector = PasswordVector::new(salt.clone(), pepper());
        let hash = hasher.hash(&password(), &vector).unwrap();

        let mut perturbed = salt.as_str().to_string();
        let first = perturbed.remove(0);
        let flipped = if first == 'A' { 'B' } else { 'A' };
        perturbed.insert(0, flipped);

        let other_vector = PasswordVector::new(Salt::new(perturbed).unwrap(), pepper());
        assert!(matches!(
            hasher.verify(&password(), &other_vector, &hash),
            Err(PasswordError::CredentialsInvalid)
        ));
    }

    #[test]
    fn test_verify_rejects_different_pepper() {
        let hasher = PasswordHasher::new();
        let salt = Salt::generate();
        let vector = PasswordVector::new(salt.clone(), pepper());
        let hash = hasher.hash(&password(), &vector).unwrap();

        let other_pepper =
            Pepper::new("Test-pepper-that-is-at-least-32-characters").unwrap();
        let other_vector = PasswordVector::new(salt, other_pepper);
        assert!(matches!(
            hasher.verify(&password(), &other_vector, &hash),
            Err(PasswordError::CredentialsInvalid)
        ));
    }

    #[test]
    fn test_verify_rejects_tampered_digest() {
        let hasher = PasswordHasher::new();
        let vector = PasswordVector::new(Salt::generate(), pepper());
        let hash = hasher.hash(&password(), &vector).unwrap();

        // Flip the first character of the digest section
        let phc = hash.as_str();
        let digest_start = phc.rfind('$').unwrap() + 1;
        let first = phc.as_bytes()[digest_start] as char;
        let flipped = if first == 'A' { 'B' } else { 'A' };
        let mut tampered = phc.to_string();
        tampered.replace_range(digest_start..digest_start + 1, &flipped.to_string());

        let tampered = PasswordHash::new(tampered).unwrap();
        assert!(matches!(
            hasher.verify(&password(), &vector, &tampered),
            Err(PasswordError::CredentialsInvalid)
        ));
    }
}
