pub mod email;
pub mod error;
pub mod jwt;
pub mod password;
pub mod password_reset;
pub mod service;

pub use email::{EmailMessage, EmailService};
pub use error::{AuthError, Result};
pub use jwt::{hash_token, Claims, JwtService};
pub use password::PasswordHasher;
pub use password_reset::PasswordResetService;
pub use service::{AuthResponse, AuthService, LoginRequest};
