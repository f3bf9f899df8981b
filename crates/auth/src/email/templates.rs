use chrono::{DateTime, Utc};

/// Password reset template. Returns (subject, text body, html body).
pub fn password_reset(
    user_name: &str,
    reset_link: &str,
    expires_at: &DateTime<Utc>,
) -> (String, String, String) {
    let subject = "Reset your Rollcall password".to_string();

    let text = format!(
        r#"Hi {},

We received a request to reset your password. Click the link below to create a new password:

{}

This link will expire at {} UTC.

If you didn't request a password reset, please ignore this email and your password will remain unchanged.

Best regards,
The Rollcall Team
"#,
        user_name,
        reset_link,
        expires_at.format("%Y-%m-%d %H:%M")
    );

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .button {{ display: inline-block; padding: 12px 24px; background-color: #007bff; color: white; text-decoration: none; border-radius: 4px; margin: 20px 0; }}
        .footer {{ margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; font-size: 12px; color: #666; }}
    </style>
</head>
<body>
    <div class="container">
        <h2>Reset Your Password</h2>
        <p>Hi {},</p>
        <p>We received a request to reset your password. Click the button below to create a new password:</p>
        <a href="{}" class="button">Reset Password</a>
        <p>Or copy and paste this link into your browser:</p>
        <p style="word-break: break-all; color: #666;">{}</p>
        <p>This link will expire at <strong>{} UTC</strong>.</p>
        <p>If you didn't request a password reset, please ignore this email and your password will remain unchanged.</p>
        <div class="footer">
            <p>Best regards,<br>The Rollcall Team</p>
        </div>
    </div>
</body>
</html>"#,
        user_name,
        reset_link,
        reset_link,
        expires_at.format("%Y-%m-%d %H:%M")
    );

    (subject, text, html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_reset_template() {
        let expires = Utc::now();
        let (subject, text, html) =
            password_reset("Ada", "https://rollcall.dev/reset-password?token=abc", &expires);

        assert!(subject.contains("password"));
        assert!(text.contains("Ada"));
        assert!(text.contains("token=abc"));
        assert!(html.contains("token=abc"));
    }
}
