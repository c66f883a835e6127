// Authentication exports
pub mod extractor;
pub mod jwt;
pub mod password;

pub use extractor::{bearer_token, AdminUser, AuthenticatedUser};
pub use jwt::{AuthError, Claims, TokenService};
pub use password::{hash_password, verify_password};
