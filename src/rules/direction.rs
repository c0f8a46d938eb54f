//! Cardinal directions between adjacent board cells
//!
//! Directions follow screen conventions: north is decreasing y, south is
//! increasing y. Only the four cardinals exist, so an invalid direction is
//! unrepresentable.

use std::fmt;

/// One of the four cardinal directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward decreasing y
    North,
    /// Toward increasing x
    East,
    /// Toward increasing y
    South,
    /// Toward decreasing x
    West,
}

impl Direction {
    /// All four cardinals in scan order
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The direction pointing back the way this one came
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Position delta `[dx, dy]` of the neighboring cell in this direction
    pub const fn offset(self) -> [i32; 2] {
        match self {
            Self::North => [0, -1],
            Self::East => [1, 0],
            Self::South => [0, 1],
            Self::West => [-1, 0],
        }
    }

    /// Dense index used by direction-keyed storage
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Single-letter label matching the rule file key suffixes
    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::East => "E",
            Self::South => "S",
            Self::West => "W",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::Direction;

    #[test]
    fn test_opposite_is_involutive() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn test_opposite_offsets_cancel() {
        for direction in Direction::ALL {
            let forward = direction.offset();
            let back = direction.opposite().offset();
            assert_eq!(forward[0] + back[0], 0);
            assert_eq!(forward[1] + back[1], 0);
        }
    }
}
