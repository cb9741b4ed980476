//! Compass headings and the turns between them.

/// Robot facing, in clockwise order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Heading {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Heading {
    /// All headings in clockwise order starting at North.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    const fn from_index(index: u8) -> Self {
        match index & 0b11 {
            0 => Heading::North,
            1 => Heading::East,
            2 => Heading::South,
            _ => Heading::West,
        }
    }

    /// Position of this heading in [`Heading::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Quarter turn clockwise.
    #[inline]
    pub const fn rotate_cw(self) -> Self {
        Self::from_index(self as u8 + 1)
    }

    /// Quarter turn counter-clockwise.
    #[inline]
    pub const fn rotate_ccw(self) -> Self {
        Self::from_index(self as u8 + 3)
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self as u8 + 2)
    }

    /// Single-letter tag used in debug lines.
    pub const fn letter(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::East => 'E',
            Heading::South => 'S',
            Heading::West => 'W',
        }
    }
}

/// Rotation needed to go from one heading to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Turn {
    Straight,
    /// 90° clockwise.
    Right,
    /// 180°.
    Around,
    /// 90° counter-clockwise.
    Left,
}

impl Turn {
    /// `(desired - current + 4) mod 4` as a named turn.
    pub const fn between(current: Heading, desired: Heading) -> Self {
        match (desired as u8 + 4 - current as u8) % 4 {
            0 => Turn::Straight,
            1 => Turn::Right,
            2 => Turn::Around,
            _ => Turn::Left,
        }
    }

    /// Heading after performing this turn from `from`.
    pub const fn apply(self, from: Heading) -> Heading {
        match self {
            Turn::Straight => from,
            Turn::Right => from.rotate_cw(),
            Turn::Around => from.opposite(),
            Turn::Left => from.rotate_ccw(),
        }
    }
}
