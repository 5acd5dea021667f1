// Popup anchor geometry
//
// The host measures the editor (and the frame hosting it, when embedded) and
// the suggestion popup is placed directly below the editor, full width.

/// Client-space rectangle reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostGeometry {
    /// Editor bounds in its own frame's coordinates
    pub anchor: Rect,
    /// Bounds of the enclosing frame in the outer document, when embedded
    pub frame: Option<Rect>,
}

/// Fixed-position placement for the popup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorRect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
}

pub fn anchor_rect(host: &HostGeometry, gap: f32) -> AnchorRect {
    let (dx, dy) = host
        .frame
        .map(|f| (f.left, f.top))
        .unwrap_or((0.0, 0.0));

    AnchorRect {
        top: dy + host.anchor.bottom() + gap,
        left: dx + host.anchor.left,
        width: host.anchor.width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDITOR: Rect = Rect { top: 100.0, left: 20.0, width: 300.0, height: 36.0 };

    #[test]
    fn test_below_anchor() {
        let host = HostGeometry { anchor: EDITOR, frame: None };
        assert_eq!(
            anchor_rect(&host, 4.0),
            AnchorRect { top: 140.0, left: 20.0, width: 300.0 }
        );
    }

    #[test]
    fn test_offset_by_frame() {
        let host = HostGeometry {
            anchor: EDITOR,
            frame: Some(Rect { top: 50.0, left: 10.0, width: 800.0, height: 600.0 }),
        };
        assert_eq!(
            anchor_rect(&host, 4.0),
            AnchorRect { top: 190.0, left: 30.0, width: 300.0 }
        );
    }
}
