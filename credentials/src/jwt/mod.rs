pub mod claims;
pub mod errors;
pub mod manager;

pub use claims::Claims;
pub use claims::JsonWebToken;
pub use claims::TokenIdentity;
pub use claims::TokenPayload;
pub use errors::JwtError;
pub use manager::JwtManager;
pub use manager::JwtSettings;
