pub mod errors;
pub mod values;

pub use errors::InputPasswordError;
pub use errors::PasswordHashError;
pub use errors::PepperError;
pub use errors::SaltError;
pub use errors::ScopeError;
pub use errors::UserNameError;
pub use values::InputPassword;
pub use values::PasswordHash;
pub use values::PasswordVector;
pub use values::Pepper;
pub use values::Role;
pub use values::Salt;
pub use values::UserName;
