//! Trap taxonomy and the trap-to-color assignment.

use serde::{Deserialize, Serialize};

use super::{Color, Coordinate, DIRECTIONS, GameRng};
use crate::schema::TrapConfig;

/// Hazard bound to a color; applied to every cell of that color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trap {
    /// The neighbor at this offset is lethal.
    Killer(Coordinate),
    /// Landing here teleports by this offset.
    Mover(Coordinate),
    /// Cannot be entered; lethal.
    Wall,
    /// No special effect.
    #[default]
    None,
}

impl Trap {
    #[inline]
    pub fn is_killer(&self) -> bool {
        matches!(self, Trap::Killer(_))
    }

    #[inline]
    pub fn is_mover(&self) -> bool {
        matches!(self, Trap::Mover(_))
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        matches!(self, Trap::Wall)
    }
}

/// Trap kinds, in assignment priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapKind {
    Killer,
    Mover,
    Wall,
}

impl TrapKind {
    pub const ALL: [TrapKind; 3] = [TrapKind::Killer, TrapKind::Mover, TrapKind::Wall];

    /// Directions a trap of this kind may be given.
    pub fn candidate_directions(self, config: &TrapConfig) -> Vec<Coordinate> {
        match self {
            TrapKind::Killer => DIRECTIONS.iter().copied().filter(|d| !d.is_zero()).collect(),
            TrapKind::Mover => {
                let r = config.teleport_range;
                (-r..=r)
                    .flat_map(|x| (-r..=r).map(move |y| Coordinate::new(x, y)))
                    .filter(|d| !d.is_zero())
                    .collect()
            }
            TrapKind::Wall => DIRECTIONS.to_vec(),
        }
    }

    /// Configured maximum instance count.
    pub fn max_traps(self, config: &TrapConfig) -> usize {
        match self {
            TrapKind::Killer => config.killers,
            TrapKind::Mover => config.movers,
            TrapKind::Wall => config.walls,
        }
    }

    /// Trap of this kind pointing in `direction`.
    pub fn with_direction(self, direction: Coordinate) -> Trap {
        match self {
            TrapKind::Killer => Trap::Killer(direction),
            TrapKind::Mover => Trap::Mover(direction),
            TrapKind::Wall => Trap::Wall,
        }
    }
}

/// Trap lookup indexed by color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrapTable {
    traps: Vec<Trap>,
}

impl TrapTable {
    /// Table with no traps for colors `0..colors`.
    pub fn empty(colors: usize) -> Self {
        Self {
            traps: vec![Trap::None; colors],
        }
    }

    /// Bind `trap` to `color`, growing the table if needed.
    pub fn set(&mut self, color: Color, trap: Trap) {
        let Ok(index) = usize::try_from(color) else {
            return;
        };
        if index >= self.traps.len() {
            self.traps.resize(index + 1, Trap::None);
        }
        self.traps[index] = trap;
    }

    /// Trap bound to `color` (`Trap::None` for unknown colors).
    #[inline]
    pub fn get(&self, color: Color) -> Trap {
        usize::try_from(color)
            .ok()
            .and_then(|index| self.traps.get(index).copied())
            .unwrap_or_default()
    }

    /// Iterate `(color, trap)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Color, Trap)> + '_ {
        self.traps
            .iter()
            .enumerate()
            .map(|(color, &trap)| (color as Color, trap))
    }
}

/// Bind traps to the front of `colors` and return the table plus the
/// leftover (safe) colors.
///
/// For each kind in priority order, up to its maximum count of directions is
/// drawn without replacement and paired with the next unused color.
pub fn assign_traps(
    rng: &mut GameRng,
    colors: &[Color],
    config: &TrapConfig,
) -> (TrapTable, Vec<Color>) {
    let mut table = TrapTable::empty(colors.len());
    let mut remaining = colors;

    for kind in TrapKind::ALL {
        let directions = rng.sample(&kind.candidate_directions(config), kind.max_traps(config));
        let used = directions.len().min(remaining.len());
        for (&direction, &color) in directions.iter().zip(remaining) {
            table.set(color, kind.with_direction(direction));
        }
        remaining = &remaining[used..];
    }

    (table, remaining.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_pool_sizes() {
        let config = TrapConfig::default();
        assert_eq!(TrapKind::Killer.candidate_directions(&config).len(), 8);
        assert_eq!(TrapKind::Mover.candidate_directions(&config).len(), 80);
        assert_eq!(TrapKind::Wall.candidate_directions(&config).len(), 9);
    }

    #[test]
    fn test_assignment_counts() {
        let config = TrapConfig::default();
        let colors: Vec<Color> = (0..16).collect();
        let mut rng = GameRng::new(42);
        let (table, safe) = assign_traps(&mut rng, &colors, &config);

        assert_eq!(safe, (8..16).collect::<Vec<_>>());
        let traps: Vec<Trap> = table.iter().map(|(_, t)| t).collect();
        assert_eq!(traps.iter().filter(|t| t.is_killer()).count(), 2);
        assert_eq!(traps.iter().filter(|t| t.is_mover()).count(), 4);
        assert_eq!(traps.iter().filter(|t| t.is_wall()).count(), 2);

        // Priority order: killers take the first colors, walls the last trapped ones.
        assert!(table.get(0).is_killer() && table.get(1).is_killer());
        assert!((2..6).all(|c| table.get(c).is_mover()));
        assert!(table.get(6).is_wall() && table.get(7).is_wall());
        assert_eq!(table.get(8), Trap::None);
    }

    #[test]
    fn test_assignment_follows_shuffled_colors() {
        let config = TrapConfig {
            killers: 1,
            movers: 0,
            walls: 1,
            teleport_range: 4,
        };
        let colors = vec![3, 0, 2, 1];
        let mut rng = GameRng::new(9);
        let (table, safe) = assign_traps(&mut rng, &colors, &config);

        assert!(table.get(3).is_killer());
        assert!(table.get(0).is_wall());
        assert_eq!(safe, vec![2, 1]);
    }

    #[test]
    fn test_killer_directions_distinct() {
        let config = TrapConfig {
            killers: 8,
            movers: 0,
            walls: 0,
            teleport_range: 4,
        };
        let colors: Vec<Color> = (0..8).collect();
        let mut rng = GameRng::new(5);
        let (table, safe) = assign_traps(&mut rng, &colors, &config);

        assert!(safe.is_empty());
        let mut directions: Vec<Coordinate> = table
            .iter()
            .filter_map(|(_, trap)| match trap {
                Trap::Killer(d) => Some(d),
                _ => None,
            })
            .collect();
        directions.sort();
        directions.dedup();
        assert_eq!(directions.len(), 8);
    }

    #[test]
    fn test_unknown_color_has_no_trap() {
        let table = TrapTable::empty(2);
        assert_eq!(table.get(-1), Trap::None);
        assert_eq!(table.get(99), Trap::None);
    }
}
