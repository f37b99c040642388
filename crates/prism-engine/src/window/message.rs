use crate::input::InputEvent;

/// Sub-code of a size-changed notification.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SizeKind {
    Restored,
    Minimized,
    Maximized,
}

/// Raw window-system message as seen by a window instance.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowMessage {
    /// Client area changed. `packed` holds width in the low 16 bits and height
    /// in the high 16 bits.
    Size { kind: SizeKind, packed: u32 },

    /// Translated input, offered to the input handler first.
    Input(InputEvent),
}

impl WindowMessage {
    /// Builds a size message, saturating each dimension to 16 bits.
    pub fn size(kind: SizeKind, width: u32, height: u32) -> Self {
        WindowMessage::Size {
            kind,
            packed: pack_size(width, height),
        }
    }
}

/// Packs width/height into one word: width low, height high.
pub fn pack_size(width: u32, height: u32) -> u32 {
    let w = width.min(u32::from(u16::MAX));
    let h = height.min(u32::from(u16::MAX));
    (h << 16) | w
}

#[inline]
pub fn loword(packed: u32) -> u32 {
    packed & 0xFFFF
}

#[inline]
pub fn hiword(packed: u32) -> u32 {
    packed >> 16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_width_low_height_high() {
        let packed = pack_size(1024, 768);
        assert_eq!(packed, (768 << 16) | 1024);
        assert_eq!((loword(packed), hiword(packed)), (1024, 768));
    }

    #[test]
    fn oversized_dimensions_saturate() {
        let packed = pack_size(70_000, 3);
        assert_eq!((loword(packed), hiword(packed)), (65_535, 3));
    }

    #[test]
    fn size_constructor_packs() {
        assert_eq!(
            WindowMessage::size(SizeKind::Maximized, 5, 6),
            WindowMessage::Size {
                kind: SizeKind::Maximized,
                packed: (6 << 16) | 5,
            }
        );
    }
}
