use crate::email::{templates, EmailMessage, EmailService};
use crate::error::{AuthError, Result};
use crate::jwt::hash_token;
use crate::password::PasswordHasher;
use chrono::{Duration, Utc};
use rand::RngCore;
use rollcall_database::{Database, UserRepository};

const RESET_TOKEN_TTL_HOURS: i64 = 1;

pub struct PasswordResetService {
    user_repo: UserRepository,
    email_service: EmailService,
    base_url: String,
}

impl PasswordResetService {
    pub fn new(db: Database, email_service: EmailService, base_url: String) -> Self {
        Self {
            user_repo: UserRepository::new(db.pool().clone()),
            email_service,
            base_url,
        }
    }

    /// Generate a secure random token
    fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Request a password reset. Always succeeds from the caller's point of
    /// view; whether the email exists is never revealed.
    pub async fn request_reset(&self, email: &str) -> Result<()> {
        let user = match self.user_repo.find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Password reset requested for unknown email: {}", email);
                return Ok(());
            }
        };

        let token = Self::generate_token();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);

        self.user_repo
            .set_reset_token(user.id, &hash_token(&token), expires_at)
            .await?;

        let reset_link = format!("{}/reset-password?token={}", self.base_url, token);
        let (subject, text_body, html_body) =
            templates::password_reset(&user.name, &reset_link, &expires_at);

        self.email_service
            .send(EmailMessage {
                to: user.email.clone(),
                to_name: Some(user.name.clone()),
                subject,
                text_body,
                html_body: Some(html_body),
            })
            .await?;

        tracing::info!("Password reset email sent: user_id={}", user.id);

        Ok(())
    }

    /// Reset the password with a previously emailed token. Consumes the
    /// token and revokes the user's active bearer token.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
        let user = self
            .user_repo
            .find_by_reset_token_hash(&hash_token(token), Utc::now())
            .await?
            .ok_or_else(|| AuthError::InvalidToken("Invalid or expired reset token".to_string()))?;

        let password_hash = PasswordHasher::hash(new_password)?;

        self.user_repo.update_password(user.id, &password_hash).await?;

        tracing::info!("Password reset completed: user_id={}", user.id);

        Ok(())
    }
}
