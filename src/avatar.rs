//! Player head image
//!
//! The simulation never looks at pixels; the avatar only decides what the
//! presentation layer draws on the player's circle.

use crate::error::GameError;

/// Gray RGBA fill used when no avatar was chosen
pub const PLACEHOLDER_COLOR: [u8; 4] = [128, 128, 128, 255];

/// An RGBA8 image supplied by the host (camera roll, generated avatar, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl AvatarImage {
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, GameError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(GameError::InvalidAvatar {
                expected,
                got: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }
}

/// What to draw for the player's head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadTexture<'a> {
    Image(&'a AvatarImage),
    /// Plain filled circle
    Placeholder { color: [u8; 4] },
}

impl<'a> HeadTexture<'a> {
    pub fn for_avatar(avatar: Option<&'a AvatarImage>) -> Self {
        match avatar {
            Some(image) => HeadTexture::Image(image),
            None => HeadTexture::Placeholder {
                color: PLACEHOLDER_COLOR,
            },
        }
    }
}
