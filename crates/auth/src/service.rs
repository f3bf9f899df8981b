use crate::error::{AuthError, Result};
use crate::jwt::{hash_token, JwtService};
use crate::password::PasswordHasher;
use rollcall_database::{Database, UserRepository};
use rollcall_models::user::{NewUser, Role, User, UserProfile};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub user: UserProfile,
}

pub struct AuthService {
    pub db: Database,
    pub jwt: JwtService,
    user_repo: UserRepository,
}

impl AuthService {
    pub fn new(db: Database, jwt: JwtService) -> Self {
        let pool = db.pool().clone();

        Self {
            db,
            jwt,
            user_repo: UserRepository::new(pool),
        }
    }

    /// Register a new user and issue a bearer token
    pub async fn register(&self, request: NewUser) -> Result<AuthResponse> {
        // Validate input
        request.validate()?;

        // Students must carry a roll number; admins never do
        let roll_number = match request.role {
            Role::Student => Some(
                request
                    .roll_number
                    .as_deref()
                    .ok_or(AuthError::RollNumberRequired)?,
            ),
            Role::Admin => None,
        };

        if self.user_repo.find_by_email(&request.email).await?.is_some() {
            return Err(AuthError::AlreadyExists("User already exists".to_string()));
        }

        // Hash password (validates strength)
        let password_hash = PasswordHasher::hash(&request.password)?;

        let user = self
            .user_repo
            .create(
                &request.name,
                &request.email,
                &password_hash,
                request.role,
                roll_number,
            )
            .await
            .map_err(|e| match e {
                rollcall_database::DatabaseError::DuplicateEntry(msg) => {
                    AuthError::AlreadyExists(msg)
                }
                other => other.into(),
            })?;

        self.issue_token(user).await
    }

    /// Login with email and password
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        // Validate input
        request.validate()?;

        // Unknown email and wrong password are indistinguishable to the caller
        let user = self
            .user_repo
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let is_valid = PasswordHasher::verify(&request.password, &user.password_hash)?;
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_token(user).await
    }

    /// Verify a bearer token and load the user it belongs to.
    ///
    /// Beyond signature/expiry, the token's hash must match the user's
    /// stored active token hash, so logout and token rotation revoke
    /// everything issued earlier.
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let claims = self.jwt.validate_token(token)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AuthError::InvalidToken("Invalid user id in token".to_string()))?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|_| AuthError::InvalidToken("Unknown user".to_string()))?;

        let presented_hash = hash_token(token);
        match &user.active_token_hash {
            Some(stored) if *stored == presented_hash => Ok(user),
            _ => Err(AuthError::InvalidToken("Token has been revoked".to_string())),
        }
    }

    /// Clear the active token (logout)
    pub async fn logout(&self, user_id: Uuid) -> Result<()> {
        self.user_repo.clear_active_token_hash(user_id).await?;
        Ok(())
    }

    async fn issue_token(&self, user: User) -> Result<AuthResponse> {
        let token = self.jwt.generate_token(&user)?;

        self.user_repo
            .set_active_token_hash(user.id, &hash_token(&token))
            .await?;

        Ok(AuthResponse {
            token,
            token_type: "Bearer".to_string(),
            user: user.into(),
        })
    }
}
