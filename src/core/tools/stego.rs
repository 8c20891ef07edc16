// src/core/tools/stego.rs

use serde::Serialize;
use std::time::Duration;
use strum::Display;
use tracing::info;

use crate::core::error::{ToolError, ToolResult};

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
/// Bytes of the file needed to tell the formats apart.
pub const MAGIC_LEN: usize = PNG_MAGIC.len();
const SAMPLE_MESSAGE: &str = "This is a secret hidden message extracted from the image!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum ImageFormat {
    #[strum(serialize = "PNG")]
    Png,
    #[strum(serialize = "JPEG")]
    Jpeg,
}

/// Identifies the cover image by its leading bytes.
pub fn sniff_format(bytes: &[u8]) -> ToolResult<ImageFormat> {
    if bytes.starts_with(PNG_MAGIC) {
        Ok(ImageFormat::Png)
    } else if bytes.starts_with(JPEG_MAGIC) {
        Ok(ImageFormat::Jpeg)
    } else {
        Err(ToolError::UnsupportedImage)
    }
}

#[derive(Debug, Clone)]
pub enum StegoOperation {
    Encode { message: String, passphrase: String },
    Decode { passphrase: String },
}

impl StegoOperation {
    /// The message shown when a required field is blank.
    pub fn missing_fields_message(&self) -> &'static str {
        match self {
            StegoOperation::Encode { .. } => {
                "Please select an image, enter a message, and provide a passphrase"
            }
            StegoOperation::Decode { .. } => "Please select an image and provide the passphrase",
        }
    }

    /// Checks the required fields before any file is touched.
    pub fn validated(self) -> ToolResult<Self> {
        let complete = match &self {
            StegoOperation::Encode { message, passphrase } => {
                !message.trim().is_empty() && !passphrase.trim().is_empty()
            }
            StegoOperation::Decode { passphrase } => !passphrase.trim().is_empty(),
        };
        if complete {
            Ok(self)
        } else {
            Err(ToolError::validation(self.missing_fields_message()))
        }
    }

    pub fn latency(&self) -> Duration {
        match self {
            StegoOperation::Encode { .. } => Duration::from_millis(2000),
            StegoOperation::Decode { .. } => Duration::from_millis(1500),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum StegoResult {
    Encoded,
    Extracted { message: String },
}

impl StegoResult {
    pub fn headline(&self) -> &'static str {
        match self {
            StegoResult::Encoded => "Your message has been hidden in the image successfully",
            StegoResult::Extracted { .. } => "Hidden message found and decoded successfully",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StegoOutcome {
    pub file_name: String,
    pub size_kb: u64,
    pub format: ImageFormat,
    pub result: StegoResult,
}

/// Simulates hiding or extracting a message in the given cover image.
pub fn process(
    file_name: &str,
    header: &[u8],
    size: u64,
    operation: &StegoOperation,
) -> ToolResult<StegoOutcome> {
    let format = sniff_format(header)?;
    info!(file_name, %format, size, "Processing cover image.");

    let result = match operation {
        StegoOperation::Encode { .. } => StegoResult::Encoded,
        StegoOperation::Decode { .. } => StegoResult::Extracted { message: SAMPLE_MESSAGE.to_string() },
    };

    Ok(StegoOutcome {
        file_name: file_name.to_string(),
        size_kb: (size + 512) / 1024,
        format,
        result,
    })
}
