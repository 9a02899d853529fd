use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Streaming destinations the panel can export to.
///
/// Declaration order is the display order of the selection list, so the
/// derived `Ord` also fixes the order in which exports run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlatformId {
    Roku,
    Hulu,
    Amazon,
    AppleTv,
    Peacock,
    Samsung,
    RokuChannel,
}

impl PlatformId {
    pub fn key(self) -> &'static str {
        match self {
            Self::Roku => "roku",
            Self::Hulu => "hulu",
            Self::Amazon => "amazon",
            Self::AppleTv => "appletv",
            Self::Peacock => "peacock",
            Self::Samsung => "samsung",
            Self::RokuChannel => "roku-channel",
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PlatformId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "roku" => Ok(Self::Roku),
            "hulu" => Ok(Self::Hulu),
            "amazon" => Ok(Self::Amazon),
            "appletv" => Ok(Self::AppleTv),
            "peacock" => Ok(Self::Peacock),
            "samsung" => Ok(Self::Samsung),
            "roku-channel" => Ok(Self::RokuChannel),
            other => Err(CatalogError::UnknownPlatform(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Mp4H264,
    Mp4H265,
    Mov,
    Webm,
}

impl FileFormat {
    pub fn key(self) -> &'static str {
        match self {
            Self::Mp4H264 => "MP4_H264",
            Self::Mp4H265 => "MP4_H265",
            Self::Mov => "MOV",
            Self::Webm => "WEBM",
        }
    }

    /// Label shown in the spec grid of an expanded row.
    pub fn label(self) -> &'static str {
        match self {
            Self::Mp4H264 => "MP4 (H.264)",
            Self::Mp4H265 => "MP4 (H.265)",
            Self::Mov => "MOV",
            Self::Webm => "WEBM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    P720,
    P1080,
    Uhd4k,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::P720 => "720p",
            Self::P1080 => "1080p",
            Self::Uhd4k => "4K",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSpec {
    pub format: FileFormat,
    pub resolution: Resolution,
    pub duration: &'static str,
    pub max_file_size: &'static str,
    pub max_file_size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub id: PlatformId,
    pub name: &'static str,
    pub logo_color: [u8; 3],
    pub logo_text: &'static str,
    pub spec: PlatformSpec,
}

/// The asset being exported. Supplied by the host and only displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInfo {
    pub duration: String,
    pub aspect_ratio: String,
    pub framerate: String,
    pub estimated_size: Option<u64>,
}

impl Default for AssetInfo {
    fn default() -> Self {
        Self {
            duration: "0:30".to_string(),
            aspect_ratio: "16:9".to_string(),
            framerate: "29.97 fps".to_string(),
            estimated_size: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Outcome of exporting to a single platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub success: bool,
    pub platform: PlatformId,
    pub file_url: Option<String>,
    pub error: Option<String>,
}

impl ExportResult {
    pub fn succeeded(platform: PlatformId, file_url: String) -> Self {
        Self {
            success: true,
            platform,
            file_url: Some(file_url),
            error: None,
        }
    }

    pub fn failed(platform: PlatformId, error: String) -> Self {
        Self {
            success: false,
            platform,
            file_url: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub platforms: Vec<PlatformId>,
    pub format: Option<FileFormat>,
    pub resolution: Option<Resolution>,
    /// Informational only, the simulator does not act on it.
    pub include_content_credentials: bool,
}

impl ExportOptions {
    pub fn new(platforms: Vec<PlatformId>) -> Self {
        Self {
            platforms,
            format: None,
            resolution: None,
            include_content_credentials: true,
        }
    }
}
