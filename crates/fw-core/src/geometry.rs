//! Fixed intersection geometry: approaches, quadrants, turns, and the
//! quadrant set each path occupies.
//!
//! # Layout
//!
//! ```text
//!            N
//!       +----+----+
//!       | NW | NE |
//!    W  +----+----+  E
//!       | SW | SE |
//!       +----+----+
//!            S
//! ```
//!
//! Directions are headings of travel: a `^` car drives north, entering from
//! the south edge through `SW`.  Vehicles keep right, so every approach's
//! first quadrant is the one on its right-hand side.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

// ── Direction ─────────────────────────────────────────────────────────────────

/// Heading of travel, written `^ v > <` in scenarios and logs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Stable index used for per-direction arrays (gates).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East  => 2,
            Direction::West  => 3,
        }
    }

    /// The one-character symbol used in scenario files and log lines.
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Direction::North => '^',
            Direction::South => 'v',
            Direction::East  => '>',
            Direction::West  => '<',
        }
    }

    /// Parse a single symbol.  Accepts `^ v > <` and the letters `N S E W`
    /// in either case.
    pub fn from_symbol(c: char) -> CoreResult<Direction> {
        match c {
            '^' | 'N' | 'n' => Ok(Direction::North),
            'v' | 'V' | 'S' | 's' => Ok(Direction::South),
            '>' | 'E' | 'e' => Ok(Direction::East),
            '<' | 'W' | 'w' => Ok(Direction::West),
            other => Err(CoreError::InvalidDirection(other.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Direction> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Direction::from_symbol(c),
            _ => Err(CoreError::InvalidDirection(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ── Quadrant ──────────────────────────────────────────────────────────────────

/// One of the four lockable sub-areas of the box.
///
/// The discriminant order is the global lock order: quadrants are always
/// acquired in ascending index and released in descending index.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quadrant {
    NW = 0,
    NE = 1,
    SW = 2,
    SE = 3,
}

impl Quadrant {
    pub const COUNT: usize = 4;

    pub const ALL: [Quadrant; Quadrant::COUNT] =
        [Quadrant::NW, Quadrant::NE, Quadrant::SW, Quadrant::SE];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quadrant::NW => "NW",
            Quadrant::NE => "NE",
            Quadrant::SW => "SW",
            Quadrant::SE => "SE",
        };
        f.write_str(name)
    }
}

// ── TurnKind ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnKind {
    Straight,
    Left,
    Right,
}

impl TurnKind {
    /// Classify the movement from heading `origin` to heading `target`.
    ///
    /// Same heading is `Straight`; a 90° counter-clockwise change is `Left`;
    /// everything else (including a reversal) is treated as `Right`.
    pub fn between(origin: Direction, target: Direction) -> TurnKind {
        use Direction::*;
        if origin == target {
            return TurnKind::Straight;
        }
        match (origin, target) {
            (North, West) | (South, East) | (East, North) | (West, South) => TurnKind::Left,
            _ => TurnKind::Right,
        }
    }
}

impl fmt::Display for TurnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TurnKind::Straight => "straight",
            TurnKind::Left     => "left",
            TurnKind::Right    => "right",
        };
        f.write_str(name)
    }
}

// ── RegionSet ─────────────────────────────────────────────────────────────────

/// A set of quadrants, stored as a 4-bit mask.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct RegionSet(u8);

impl RegionSet {
    pub const EMPTY: RegionSet = RegionSet(0);

    pub fn of(quadrants: &[Quadrant]) -> RegionSet {
        quadrants
            .iter()
            .fold(RegionSet::EMPTY, |set, &q| set.with(q))
    }

    /// The quadrants a car heading `origin` occupies for the given turn.
    ///
    /// Right turns stay in the entry quadrant, straight runs add the next
    /// quadrant ahead, and left turns add the quadrant beyond that.
    pub fn for_path(origin: Direction, turn: TurnKind) -> RegionSet {
        use Quadrant::*;
        // Entry quadrant followed by the quadrants swept in travel order.
        let sweep: [Quadrant; 3] = match origin {
            Direction::North => [SW, NW, NE],
            Direction::South => [NE, SE, SW],
            Direction::East  => [NW, NE, SE],
            Direction::West  => [SE, SW, NW],
        };
        let depth = match turn {
            TurnKind::Right    => 1,
            TurnKind::Straight => 2,
            TurnKind::Left     => 3,
        };
        RegionSet::of(&sweep[..depth])
    }

    /// Convenience for `for_path(origin, TurnKind::between(origin, target))`.
    pub fn for_movement(origin: Direction, target: Direction) -> RegionSet {
        RegionSet::for_path(origin, TurnKind::between(origin, target))
    }

    #[inline]
    pub fn with(self, q: Quadrant) -> RegionSet {
        RegionSet(self.0 | q.bit())
    }

    #[inline]
    pub fn contains(self, q: Quadrant) -> bool {
        self.0 & q.bit() != 0
    }

    #[inline]
    pub fn intersects(self, other: RegionSet) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in ascending quadrant order (the acquisition order).
    pub fn iter(self) -> impl DoubleEndedIterator<Item = Quadrant> {
        Quadrant::ALL.into_iter().filter(move |&q| self.contains(q))
    }
}

impl fmt::Debug for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for q in self.iter() {
            if !first {
                f.write_str("+")?;
            }
            write!(f, "{q}")?;
            first = false;
        }
        Ok(())
    }
}
