//! QR badge rendering

use qrcode::render::svg;
use qrcode::QrCode;
use school_core::events::NotificationAttachment;

use super::error::{ServiceError, ServiceResult};

pub const QR_CONTENT_TYPE: &str = "image/svg+xml";

const MIN_DIMENSION: u32 = 200;

/// Render a subject code as an SVG QR code
pub fn render_svg(code: &str) -> ServiceResult<String> {
    let qr = QrCode::new(code.as_bytes()).map_err(|e| ServiceError::internal(format!("QR encoding failed: {e}")))?;

    Ok(qr
        .render::<svg::Color<'_>>()
        .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
        .build())
}

/// QR badge as a mail attachment
pub fn badge_attachment(code: &str) -> ServiceResult<NotificationAttachment> {
    Ok(NotificationAttachment {
        filename: format!("{code}.svg"),
        content_type: QR_CONTENT_TYPE.to_string(),
        content: render_svg(code)?,
    })
}
