/// Direction reported by a POV pad (d-pad / hat switch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PovDirection {
    #[default]
    Center,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl PovDirection {
    /// Value of this direction on the horizontal virtual axis (east = +1).
    pub fn horizontal(self) -> f32 {
        match self {
            PovDirection::East | PovDirection::NorthEast | PovDirection::SouthEast => 1.0,
            PovDirection::West | PovDirection::NorthWest | PovDirection::SouthWest => -1.0,
            PovDirection::Center | PovDirection::North | PovDirection::South => 0.0,
        }
    }

    /// Value of this direction on the vertical virtual axis (north = -1).
    pub fn vertical(self) -> f32 {
        match self {
            PovDirection::North | PovDirection::NorthEast | PovDirection::NorthWest => -1.0,
            PovDirection::South | PovDirection::SouthEast | PovDirection::SouthWest => 1.0,
            PovDirection::Center | PovDirection::East | PovDirection::West => 0.0,
        }
    }

    /// Value on the requested virtual axis. Diagonals are non-zero on both.
    pub fn axis_value(self, vertical: bool) -> f32 {
        if vertical {
            self.vertical()
        } else {
            self.horizontal()
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            PovDirection::NorthEast
                | PovDirection::NorthWest
                | PovDirection::SouthEast
                | PovDirection::SouthWest
        )
    }

    /// Builds a direction from the four d-pad switches. Opposing switches cancel out.
    pub fn from_dpad(up: bool, down: bool, left: bool, right: bool) -> Self {
        let vertical = (down as i8) - (up as i8);
        let horizontal = (right as i8) - (left as i8);

        match (horizontal, vertical) {
            (0, 0) => PovDirection::Center,
            (0, -1) => PovDirection::North,
            (0, 1) => PovDirection::South,
            (1, 0) => PovDirection::East,
            (-1, 0) => PovDirection::West,
            (1, -1) => PovDirection::NorthEast,
            (-1, -1) => PovDirection::NorthWest,
            (1, 1) => PovDirection::SouthEast,
            _ => PovDirection::SouthWest,
        }
    }
}

/// Read access to the live state of one physical controller.
///
/// Indices are raw hardware indices; unknown indices read as released / 0.0 / centered.
pub trait Controller {
    fn button(&self, index: u32) -> bool;

    fn axis(&self, index: u32) -> f32;

    fn pov(&self, index: u32) -> PovDirection;

    /// Identity key under which bindings for this controller are stored.
    fn name(&self) -> &str;
}

impl<T: Controller + ?Sized> Controller for &T {
    fn button(&self, index: u32) -> bool {
        (**self).button(index)
    }

    fn axis(&self, index: u32) -> f32 {
        (**self).axis(index)
    }

    fn pov(&self, index: u32) -> PovDirection {
        (**self).pov(index)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

// Raw physical input change, as delivered by a backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicalEvent {
    ButtonDown { button: u32 },
    ButtonUp { button: u32 },
    AxisMoved { axis: u32, value: f32 },
    PovMoved { pov: u32, direction: PovDirection },
}
