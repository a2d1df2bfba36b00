pub mod ownership;
pub mod password;
pub mod token;

pub use ownership::require_owner;
pub use password::{PasswordHasher, SaltedSha256Hasher};
pub use token::{Claims, TokenError, TokenService};
