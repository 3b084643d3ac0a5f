//! Flood-fill reachability check and retry-driven board generation.

use std::collections::HashSet;

use super::{Board, Color, Coordinate, DIRECTIONS, GameError, GameRng};
use crate::schema::BoardConfig;

/// Starting coordinates in column 0 from which the finish line is reachable.
///
/// Each start is expanded breadth-first: every frontier cell steps in all
/// nine directions, the landing cell's teleport is applied, and lethal
/// landings are discarded. A start is safe as soon as any landing is on the
/// finish column or on a start already proven safe. Lethal start cells are
/// never candidates.
pub fn safe_starting_coordinates(board: &Board) -> Vec<Coordinate> {
    let mut safe = Vec::new();

    for y in 0..board.height() as i32 {
        let start = Coordinate::new(0, y);
        if board.lookup(start).lethal {
            continue;
        }
        if reaches_finish(board, start, &safe) {
            safe.push(start);
        }
    }

    safe
}

fn reaches_finish(board: &Board, start: Coordinate, known_safe: &[Coordinate]) -> bool {
    let mut frontier = vec![start];
    let mut visited: HashSet<Coordinate> = HashSet::from([start]);

    loop {
        let landed: Vec<Coordinate> = frontier
            .iter()
            .flat_map(|&c| DIRECTIONS.iter().map(move |&d| c + d))
            .map(|neighbor| neighbor + board.lookup(neighbor).teleport)
            .collect();

        if landed
            .iter()
            .any(|c| board.is_finish(*c) || known_safe.contains(c))
        {
            return true;
        }

        frontier = landed
            .into_iter()
            .filter(|&c| !board.lookup(c).lethal)
            .filter(|&c| visited.insert(c))
            .collect();

        if frontier.is_empty() {
            return false;
        }
    }
}

/// Generate boards until one has at least one safe start.
///
/// Each attempt draws a fresh board seed from `rng`; the accepted board
/// comes back with its starting coordinates filled in.
pub fn generate_board(
    rng: &mut GameRng,
    colors: &[Color],
    config: &BoardConfig,
) -> Result<(Board, u64), GameError> {
    retry_until_reachable(rng, config.max_attempts, |seed| {
        Board::generate(seed, colors, config)
    })
}

/// Build boards from fresh seeds until one has a safe start, giving up after
/// `max_attempts`.
fn retry_until_reachable<F>(
    rng: &mut GameRng,
    max_attempts: usize,
    mut build: F,
) -> Result<(Board, u64), GameError>
where
    F: FnMut(u64) -> Board,
{
    for attempt in 1..=max_attempts {
        let seed = rng.board_seed();
        let mut board = build(seed);
        let starts = safe_starting_coordinates(&board);

        if !starts.is_empty() {
            log::debug!(
                "Board {} accepted after {} attempt(s) with {} safe starts",
                seed,
                attempt,
                starts.len()
            );
            board.set_starting_coordinates(starts);
            return Ok((board, seed));
        }

        log::warn!("Bad board (seed {}), retrying...", seed);
    }

    Err(GameError::NoReachableBoard {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::Trap;
    use crate::compute::board::tests::{painted_board, small_config};

    #[test]
    fn test_open_board_all_starts_safe() {
        let board = painted_board(&[], 4, &[]);
        let starts = safe_starting_coordinates(&board);
        assert_eq!(starts.len(), 10);
        assert_eq!(starts[0], Coordinate::new(0, 0));
    }

    #[test]
    fn test_wall_column_blocks_everything() {
        let overrides: Vec<(Coordinate, Color)> =
            (0..10).map(|y| (Coordinate::new(5, y), 2)).collect();
        let board = painted_board(&[(2, Trap::Wall)], 4, &overrides);
        assert!(safe_starting_coordinates(&board).is_empty());
    }

    #[test]
    fn test_mover_jumps_over_wall() {
        let mut overrides: Vec<(Coordinate, Color)> =
            (0..10).map(|y| (Coordinate::new(5, y), 2)).collect();
        overrides.push((Coordinate::new(4, 3), 1));
        let board = painted_board(
            &[(1, Trap::Mover(Coordinate::new(2, 0))), (2, Trap::Wall)],
            4,
            &overrides,
        );
        assert_eq!(safe_starting_coordinates(&board).len(), 10);
    }

    #[test]
    fn test_enclosed_start_is_unsafe() {
        // Start (0, 0) is boxed in by walls at (1, 0), (0, 1) and (1, 1).
        let board = painted_board(
            &[(2, Trap::Wall)],
            4,
            &[
                (Coordinate::new(1, 0), 2),
                (Coordinate::new(0, 1), 2),
                (Coordinate::new(1, 1), 2),
            ],
        );
        let starts = safe_starting_coordinates(&board);
        assert!(!starts.contains(&Coordinate::new(0, 0)));
        assert_eq!(starts.len(), 8);
    }

    #[test]
    fn test_generated_boards_always_have_starts() {
        let config = small_config();
        let colors: Vec<Color> = vec![2, 0, 4, 1, 3];
        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let (board, _) = generate_board(&mut rng, &colors, &config).unwrap();
            assert!(!board.starting_coordinates().is_empty());
            assert!(board.starting_coordinates().iter().all(|c| c.x == 0));
        }
    }

    #[test]
    fn test_unreachable_boards_give_up() {
        let overrides: Vec<(Coordinate, Color)> =
            (0..10).map(|y| (Coordinate::new(5, y), 2)).collect();
        let mut built = 0;
        let mut rng = GameRng::new(1);
        let result = retry_until_reachable(&mut rng, 3, |_| {
            built += 1;
            painted_board(&[(2, Trap::Wall)], 4, &overrides)
        });

        assert!(matches!(
            result,
            Err(GameError::NoReachableBoard { attempts: 3 })
        ));
        assert_eq!(built, 3);
    }

    #[test]
    fn test_retry_stops_at_first_reachable_board() {
        let mut built = 0;
        let mut rng = GameRng::new(1);
        let (board, _) = retry_until_reachable(&mut rng, 5, |_| {
            built += 1;
            painted_board(&[], 4, &[])
        })
        .unwrap();

        assert_eq!(built, 1);
        assert_eq!(board.starting_coordinates().len(), 10);
    }
}
