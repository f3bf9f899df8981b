use crate::error::{ClassroomError, Result};
use base64::Engine;
use image::Luma;
use qrcode::QrCode;

/// Render a session token as a QR code PNG, returned as a data URL the
/// dashboard can drop into an <img> tag. The payload is exactly the token.
pub fn render_data_url(token: &str) -> Result<String> {
    let qr = QrCode::new(token.as_bytes())
        .map_err(|e| ClassroomError::QrError(e.to_string()))?;

    let image = qr.render::<Luma<u8>>().min_dimensions(256, 256).build();

    let mut png_bytes = Vec::new();
    image::DynamicImage::ImageLuma8(image)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), image::ImageFormat::Png)
        .map_err(|e| ClassroomError::QrError(format!("PNG encoding failed: {}", e)))?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(&png_bytes);
    Ok(format!("data:image/png;base64,{}", encoded))
}

/// Generate the random opaque token embedded in a session's QR code:
/// 16 bytes from the OS RNG, hex-encoded.
pub fn generate_session_token() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = generate_session_token();
        assert_eq!(token.len(), 32); // 16 bytes hex-encoded
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_data_url_prefix() {
        let url = render_data_url("deadbeefdeadbeefdeadbeefdeadbeef").unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.len() > "data:image/png;base64,".len());
    }
}
