//! Per-turn simulation: scoring, aging, sensing, movement and hazards.

use serde::{Deserialize, Serialize};

use super::{Board, Coordinate, GameError, GameRng, Player, Specimen, Vision};

/// Turn-level rules taken from the run configuration.
#[derive(Debug, Clone, Copy)]
pub struct TurnRules {
    /// Turns a specimen lives without scoring.
    pub lifespan: u64,
    /// Bonus fitness granted on each score.
    pub finish_bonus: u64,
    /// Side length of the vision window.
    pub vision_width: usize,
}

/// What happened to the population during one turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStats {
    /// Specimens that reached the finish line and were sent back to start.
    pub scored: usize,
    /// Specimens removed for old age.
    pub aged_out: usize,
    /// Specimens removed by a lethal cell.
    pub killed: usize,
    /// Specimens that survived a move.
    pub moved: usize,
}

/// Where a single specimen ends up this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fate {
    Scored(Coordinate),
    AgedOut,
    Killed,
    Moved(Coordinate),
}

/// Resolve a move from `from` in `direction` to the specimen's final coordinate.
///
/// A move into a wall is rejected in full, so teleport and lethality are then
/// taken from the original cell.
pub fn resolve_move(board: &Board, from: Coordinate, direction: Coordinate) -> Coordinate {
    let target = from + direction;
    let tentative = if board.lookup(target).wall {
        from
    } else {
        target
    };
    tentative + board.lookup(tentative).teleport
}

/// Advance every specimen of the current population by one turn.
///
/// Results are written into the pending population, which then replaces
/// the current one. Returns the turn's statistics; `scored` is the number of
/// finish-line scoring events.
pub fn take_turn(
    board: &mut Board,
    turn: u64,
    player: &dyn Player,
    rules: &TurnRules,
    rng: &mut GameRng,
) -> Result<TurnStats, GameError> {
    let mut stats = TurnStats::default();

    for (coordinate, mut specimen) in board.population_snapshot() {
        match step_specimen(board, coordinate, &mut specimen, turn, player, rules, rng)? {
            Fate::Scored(start) => {
                stats.scored += 1;
                board.add_specimen(specimen, start);
            }
            Fate::AgedOut => stats.aged_out += 1,
            Fate::Killed => stats.killed += 1,
            Fate::Moved(destination) => {
                stats.moved += 1;
                board.add_specimen(specimen, destination);
            }
        }
    }

    board.advance_turn();
    log::debug!("Turn {}: {:?}", turn, stats);
    Ok(stats)
}

fn step_specimen(
    board: &Board,
    coordinate: Coordinate,
    specimen: &mut Specimen,
    turn: u64,
    player: &dyn Player,
    rules: &TurnRules,
    rng: &mut GameRng,
) -> Result<Fate, GameError> {
    if board.is_finish(coordinate) {
        specimen.birth = turn;
        specimen.bonus_fitness += rules.finish_bonus;
        let start = board
            .random_start(rng)
            .ok_or(GameError::NoStartingCoordinates)?;
        return Ok(Fate::Scored(start));
    }

    if specimen.age(turn) >= rules.lifespan {
        return Ok(Fate::AgedOut);
    }

    let vision = Vision::sense(board, coordinate, rules.vision_width);
    let direction = player.take_turn(specimen.genome, &vision);
    if !direction.is_unit_step() {
        return Err(GameError::InvalidDirection { direction });
    }

    let destination = resolve_move(board, coordinate, direction);
    if board.lookup(destination).lethal {
        Ok(Fate::Killed)
    } else {
        Ok(Fate::Moved(destination))
    }
}
