// Integration tests for candidate selection and the fallback chain
//
// Each scenario is small enough to check by hand; comments note what rules the
// direct routes out.

use snake_pathfinder::board::Board;
use snake_pathfinder::config::Config;
use snake_pathfinder::game::Snake;
use snake_pathfinder::planner::{compute_moves, PlanOutcome, Planner};
use snake_pathfinder::search::SearchStrategy;
use snake_pathfinder::types::{Direction, Position};
use snake_pathfinder::PlanError;

fn p(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

fn planner(rows: i32, cols: i32) -> Planner {
    Planner::with_board(Config::default_hardcoded(), Board::new(rows, cols).unwrap())
}

#[test]
fn test_open_board_prefers_breadth_first() {
    let plan = planner(5, 5)
        .plan(p(2, 4), &[p(2, 2), p(2, 1), p(2, 0)])
        .unwrap();
    assert_eq!(plan.moves, vec![Direction::Right, Direction::Right]);
    assert_eq!(plan.outcome, PlanOutcome::Strategy(SearchStrategy::BreadthFirst));
    // Body covers too little of the board for stall mode to run
    assert_eq!(plan.candidates.len(), 3);
}

#[test]
fn test_body_hugging_route_keeps_space_open() {
    // The direct route leaves a third of the free cells reachable; turning right
    // first keeps all of them in reach.
    let body = vec![
        p(2, 1),
        p(1, 1),
        p(1, 2),
        p(0, 2),
        p(0, 1),
        p(0, 0),
        p(1, 0),
        p(2, 0),
    ];
    let plan = planner(4, 3).plan(p(3, 2), &body).unwrap();
    assert_eq!(plan.outcome, PlanOutcome::Strategy(SearchStrategy::BodyHugging));
    assert_eq!(plan.moves, vec![Direction::Right, Direction::Down]);
    assert_eq!(plan.candidates.len(), 1);
}

#[test]
fn test_seek_wins_tie_with_body_hugging() {
    // Both find the same safer five-move route; breadth-first's route is as long
    // but less safe.
    let body = vec![p(2, 2), p(1, 2), p(1, 1), p(1, 0)];
    let plan = planner(3, 5).plan(p(0, 1), &body).unwrap();
    assert_eq!(plan.outcome, PlanOutcome::Strategy(SearchStrategy::Seek));
    assert_eq!(
        plan.moves,
        vec![
            Direction::Left,
            Direction::Left,
            Direction::Up,
            Direction::Right,
            Direction::Up
        ]
    );

    let bfs = plan
        .candidates
        .iter()
        .find(|c| c.strategy == SearchStrategy::BreadthFirst)
        .unwrap();
    assert!((bfs.safety_ratio - 0.7).abs() < 1e-9);
    assert!((bfs.score - 0.82).abs() < 1e-9);
}

#[test]
fn test_stall_toward_tail_on_crowded_board() {
    // Every route to (0, 1) leaves one reachable cell out of two; heading for the
    // tail instead keeps all three free cells in reach.
    let body = vec![p(2, 0), p(3, 0), p(3, 1), p(2, 1), p(1, 1)];
    let plan = planner(4, 2).plan(p(0, 1), &body).unwrap();
    assert_eq!(plan.outcome, PlanOutcome::Strategy(SearchStrategy::Stall));
    assert_eq!(plan.moves, vec![Direction::Up, Direction::Right]);
}

#[test]
fn test_tail_chase_when_every_route_traps_the_head() {
    // The apple at (0, 1) is reachable, but eating it leaves one of three free
    // cells in reach.
    let plan = planner(3, 2).plan(p(0, 1), &[p(2, 1), p(1, 1)]).unwrap();
    assert_eq!(plan.outcome, PlanOutcome::TailChase);
    assert_eq!(
        plan.moves,
        vec![Direction::Left, Direction::Up, Direction::Right]
    );
    assert!(plan.candidates.is_empty());
}

#[test]
fn test_single_step_when_tail_is_cut_off() {
    let body = vec![p(2, 0), p(1, 0), p(1, 1), p(0, 1)];
    let plan = planner(3, 2).plan(p(0, 0), &body).unwrap();
    assert_eq!(plan.outcome, PlanOutcome::SingleStep);
    assert_eq!(plan.moves, vec![Direction::Right]);
}

#[test]
fn test_no_safe_move_when_boxed_in() {
    let body = vec![p(1, 0), p(0, 0), p(0, 1), p(1, 1)];
    let plan = planner(2, 3).plan(p(1, 2), &body).unwrap();
    assert_eq!(plan.outcome, PlanOutcome::NoSafeMove);
    assert!(plan.is_empty());
}

#[test]
fn test_plan_for_body_state() {
    let planner = Planner::new(Config::default_hardcoded()).unwrap();
    let snake = Snake::default();
    let plan = planner.plan_for(p(7, 8), &snake).unwrap();
    assert_eq!(plan.moves, vec![Direction::Right; 4]);
    assert_eq!(plan.outcome, PlanOutcome::Strategy(SearchStrategy::BreadthFirst));
}

#[test]
fn test_plan_for_empty_body_state_is_an_error() {
    let planner = planner(5, 5);
    assert_eq!(planner.plan_for(p(1, 1), &Vec::<Position>::new()), Err(PlanError::EmptyBody));
}

#[test]
fn test_compute_moves_reports_bad_input() {
    assert_eq!(
        compute_moves(p(9, 9), &[p(0, 0)], 5, 5),
        Err(PlanError::TargetOutOfBounds(p(9, 9)))
    );
    assert_eq!(compute_moves(p(1, 1), &[], 5, 5), Err(PlanError::EmptyBody));
}

#[test]
fn test_compute_moves_on_head() {
    assert_eq!(compute_moves(p(1, 1), &[p(1, 1)], 5, 5), Ok(Vec::new()));
}

#[test]
fn test_first_move_is_always_free_and_empty_only_when_boxed_in() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..400 {
        let board = Board::new(rng.random_range(3..=7), rng.random_range(3..=7)).unwrap();
        let len = rng.random_range(1..board.total_cells());

        // Self-avoiding walk; skip the case if it gets stuck
        let mut body = vec![p(
            rng.random_range(0..board.rows()),
            rng.random_range(0..board.cols()),
        )];
        while body.len() < len {
            let last = body[body.len() - 1];
            let options: Vec<Position> = board
                .neighbors(&last)
                .map(|(_, next)| next)
                .filter(|next| !body.contains(next))
                .collect();
            if options.is_empty() {
                break;
            }
            body.push(options[rng.random_range(0..options.len())]);
        }
        if body.len() < len {
            continue;
        }

        let free: Vec<Position> = board.cells().filter(|c| !body.contains(c)).collect();
        let target = free[rng.random_range(0..free.len())];

        let plan = Planner::with_board(Config::default_hardcoded(), board)
            .plan(target, &body)
            .unwrap();
        let open_neighbours = board
            .neighbors(&body[0])
            .filter(|(_, next)| !body.contains(next))
            .count();

        match plan.moves.first() {
            Some(dir) => {
                let next = dir.apply(&body[0]);
                assert!(board.in_bounds(&next));
                assert!(!body.contains(&next));
            }
            None => {
                assert_eq!(plan.outcome, PlanOutcome::NoSafeMove);
                assert_eq!(open_neighbours, 0);
            }
        }
    }
}
