use crate::error::CatalogError;
use crate::models::{FileFormat, Platform, PlatformId, PlatformSpec, Resolution};

const MB: u64 = 1024 * 1024;

pub const PLATFORM_ORDER: [PlatformId; 7] = [
    PlatformId::Roku,
    PlatformId::Hulu,
    PlatformId::Amazon,
    PlatformId::AppleTv,
    PlatformId::Peacock,
    PlatformId::Samsung,
    PlatformId::RokuChannel,
];

const fn ctv_spec(max_file_size: &'static str, max_mb: u64) -> PlatformSpec {
    PlatformSpec {
        format: FileFormat::Mp4H264,
        resolution: Resolution::P1080,
        duration: "0:30 — accepted",
        max_file_size,
        max_file_size_bytes: max_mb * MB,
    }
}

// Indexed by PlatformId discriminant, same order as PLATFORM_ORDER.
static PLATFORMS: [Platform; 7] = [
    Platform {
        id: PlatformId::Roku,
        name: "Roku",
        logo_color: [0x6B, 0x2D, 0x8B],
        logo_text: "ROKU",
        spec: ctv_spec("42 MB / 1 GB", 42),
    },
    Platform {
        id: PlatformId::Hulu,
        name: "Hulu",
        logo_color: [0x1C, 0xE7, 0x83],
        logo_text: "hulu",
        spec: ctv_spec("142 MB / 200 MB", 142),
    },
    Platform {
        id: PlatformId::Amazon,
        name: "Amazon Fire TV",
        logo_color: [0xFF, 0x99, 0x00],
        logo_text: "fire\ntv",
        spec: ctv_spec("500 MB / 2 GB", 500),
    },
    Platform {
        id: PlatformId::AppleTv,
        name: "Apple TV+",
        logo_color: [0x00, 0x00, 0x00],
        logo_text: "tv\n+",
        spec: ctv_spec("100 MB / 1 GB", 100),
    },
    Platform {
        id: PlatformId::Peacock,
        name: "Peacock",
        logo_color: [0x00, 0x00, 0x00],
        logo_text: "P",
        spec: ctv_spec("200 MB / 1 GB", 200),
    },
    Platform {
        id: PlatformId::Samsung,
        name: "Samsung Ads",
        logo_color: [0x00, 0x00, 0x00],
        logo_text: "SAMSUNG\nads",
        spec: ctv_spec("150 MB / 500 MB", 150),
    },
    Platform {
        id: PlatformId::RokuChannel,
        name: "The Roku Channel",
        logo_color: [0x4F, 0x11, 0x82],
        logo_text: "RC",
        spec: ctv_spec("300 MB / 1 GB", 300),
    },
];

pub fn platform(id: PlatformId) -> &'static Platform {
    &PLATFORMS[id as usize]
}

pub fn spec(id: PlatformId) -> &'static PlatformSpec {
    &platform(id).spec
}

/// Looks a platform up by its key. An unknown key is a caller bug, not
/// something to show the user.
pub fn lookup(key: &str) -> Result<&'static Platform, CatalogError> {
    let id: PlatformId = key.parse()?;
    Ok(platform(id))
}

pub fn all() -> impl Iterator<Item = &'static Platform> {
    PLATFORM_ORDER.iter().map(|&id| platform(id))
}
