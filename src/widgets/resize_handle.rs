use egui::{CursorIcon, Pos2, Rect, Vec2};

/// Represents a corner of a selection box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Order in which handle hit-tests check the corners.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "nw",
            Corner::TopRight => "ne",
            Corner::BottomLeft => "sw",
            Corner::BottomRight => "se",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Corner::TopLeft => CursorIcon::ResizeNwSe,
            Corner::TopRight => CursorIcon::ResizeNeSw,
            Corner::BottomLeft => CursorIcon::ResizeNeSw,
            Corner::BottomRight => CursorIcon::ResizeNwSe,
        }
    }

    pub fn position_on(&self, rect: Rect) -> Pos2 {
        match self {
            Corner::TopLeft => rect.left_top(),
            Corner::TopRight => rect.right_top(),
            Corner::BottomLeft => rect.left_bottom(),
            Corner::BottomRight => rect.right_bottom(),
        }
    }

    /// True if dragging this corner moves the left edge.
    pub fn moves_left(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// True if dragging this corner moves the top edge.
    pub fn moves_top(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// Handles on the crop rectangle: four corners and four edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropHandle {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl CropHandle {
    pub const ALL: [CropHandle; 8] = [
        CropHandle::NorthWest,
        CropHandle::North,
        CropHandle::NorthEast,
        CropHandle::East,
        CropHandle::SouthEast,
        CropHandle::South,
        CropHandle::SouthWest,
        CropHandle::West,
    ];

    pub fn position_on(&self, rect: Rect) -> Pos2 {
        match self {
            CropHandle::NorthWest => rect.left_top(),
            CropHandle::North => rect.center_top(),
            CropHandle::NorthEast => rect.right_top(),
            CropHandle::East => rect.right_center(),
            CropHandle::SouthEast => rect.right_bottom(),
            CropHandle::South => rect.center_bottom(),
            CropHandle::SouthWest => rect.left_bottom(),
            CropHandle::West => rect.left_center(),
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            CropHandle::NorthWest | CropHandle::SouthEast => CursorIcon::ResizeNwSe,
            CropHandle::NorthEast | CropHandle::SouthWest => CursorIcon::ResizeNeSw,
            CropHandle::North | CropHandle::South => CursorIcon::ResizeVertical,
            CropHandle::East | CropHandle::West => CursorIcon::ResizeHorizontal,
        }
    }

    pub fn moves_left(&self) -> bool {
        matches!(
            self,
            CropHandle::NorthWest | CropHandle::West | CropHandle::SouthWest
        )
    }

    pub fn moves_right(&self) -> bool {
        matches!(
            self,
            CropHandle::NorthEast | CropHandle::East | CropHandle::SouthEast
        )
    }

    pub fn moves_top(&self) -> bool {
        matches!(
            self,
            CropHandle::NorthWest | CropHandle::North | CropHandle::NorthEast
        )
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(
            self,
            CropHandle::SouthWest | CropHandle::South | CropHandle::SouthEast
        )
    }
}

/// A grab point on a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeHandle {
    /// Bounding-box corner of a rectangle or circle.
    Corner(Corner),
    /// First endpoint of a line or arrow.
    Start,
    /// Second endpoint of a line or arrow.
    End,
    /// Vertex of a polygon, by index.
    Vertex(usize),
}

impl ShapeHandle {
    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            ShapeHandle::Corner(corner) => corner.cursor_icon(),
            ShapeHandle::Start | ShapeHandle::End | ShapeHandle::Vertex(_) => {
                CursorIcon::Crosshair
            }
        }
    }
}

/// Square hit area of side `size` centered on `center`.
pub fn handle_rect(center: Pos2, size: f32) -> Rect {
    Rect::from_center_size(center, Vec2::splat(size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_handles_sit_on_edges() {
        let rect = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 50.0));
        assert_eq!(CropHandle::North.position_on(rect), Pos2::new(50.0, 0.0));
        assert_eq!(CropHandle::East.position_on(rect), Pos2::new(100.0, 25.0));
        assert_eq!(CropHandle::SouthWest.position_on(rect), Pos2::new(0.0, 50.0));
    }

    #[test]
    fn each_crop_handle_moves_at_least_one_edge() {
        for handle in CropHandle::ALL {
            assert!(
                handle.moves_left() || handle.moves_right() || handle.moves_top() || handle.moves_bottom(),
                "{handle:?}"
            );
        }
    }
}
