//! Property tests for the simulation

use asteroid_belt::consts::OUT_OF_BOUNDS_X;
use asteroid_belt::sim::{GameState, Mode, TickInput, tick};
use proptest::prelude::*;

fn started(seed: u64) -> GameState {
    let mut state = GameState::new(seed);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
    );
    state
}

fn thrust(held: bool) -> TickInput {
    TickInput {
        thrust: held,
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn ship_velocity_follows_gravity_and_thrust(
        seed in any::<u64>(),
        inputs in prop::collection::vec(any::<bool>(), 1..120),
    ) {
        let mut state = started(seed);
        let gravity = state.tuning.gravity;
        let push = state.tuning.thrust;

        for held in inputs {
            if state.mode != Mode::Game {
                break;
            }
            let before = state.ship.vel.y;
            tick(&mut state, &thrust(held));
            let expected = before + gravity - if held { push } else { 0.0 };
            prop_assert!((state.ship.vel.y - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn distance_never_decreases_while_playing(
        seed in any::<u64>(),
        inputs in prop::collection::vec(any::<bool>(), 1..600),
    ) {
        let mut state = started(seed);
        let mut last = state.distance;
        for held in inputs {
            tick(&mut state, &TickInput { autopilot: true, thrust: held, ..Default::default() });
            if state.mode != Mode::Game {
                break;
            }
            prop_assert!(state.distance >= last);
            last = state.distance;
        }
    }

    #[test]
    fn nothing_survives_past_the_left_edge(
        seed in any::<u64>(),
        frames in 1usize..1500,
    ) {
        let mut state = started(seed);
        let input = TickInput { autopilot: true, ..Default::default() };
        for _ in 0..frames {
            tick(&mut state, &input);
            if state.mode != Mode::Game {
                break;
            }
            for sprite in state.spires.iter().chain(&state.asteroids).chain(&state.stars) {
                prop_assert!(sprite.pos.x > OUT_OF_BOUNDS_X);
            }
        }
    }

    #[test]
    fn ground_keeps_tile_count_and_coverage(
        seed in any::<u64>(),
        frames in 1usize..3000,
    ) {
        let mut state = started(seed);
        let top = state.top_ground.len();
        let bottom = state.bottom_ground.len();
        let input = TickInput { autopilot: true, ..Default::default() };

        for _ in 0..frames {
            tick(&mut state, &input);
            if state.mode != Mode::Game {
                break;
            }
        }

        prop_assert_eq!(state.top_ground.len(), top);
        prop_assert_eq!(state.bottom_ground.len(), bottom);
        for strip in [&state.top_ground, &state.bottom_ground] {
            let xs: Vec<f32> = strip.tiles().map(|t| t.pos.x).collect();
            let width = state.atlas.width(asteroid_belt::ImageId::Floor);
            prop_assert!(xs[0] <= 0.0);
            for pair in xs.windows(2) {
                prop_assert!((pair[1] - pair[0] - width).abs() < 1e-2);
            }
        }
    }

    #[test]
    fn restart_returns_to_initial_state(
        seed in any::<u64>(),
        inputs in prop::collection::vec(any::<bool>(), 1..400),
    ) {
        let fresh = GameState::new(seed);
        let mut state = started(seed);
        for held in inputs {
            tick(&mut state, &thrust(held));
        }
        // Fly into the floor if the run is still going
        while state.mode == Mode::Game {
            tick(&mut state, &TickInput::default());
        }
        tick(&mut state, &TickInput { restart: true, ..Default::default() });

        prop_assert_eq!(state.mode, Mode::Title);
        prop_assert_eq!(state.distance, 0);
        prop_assert_eq!(state.frame_count, 0);
        prop_assert_eq!(state.speed, fresh.speed);
        prop_assert!(!state.boosting);
        prop_assert_eq!(state.boost_speed, 0.0);
        prop_assert_eq!(state.entity_count(), 0);
        prop_assert!(state.shield.is_none());
        prop_assert_eq!(&state.ship, &fresh.ship);
        prop_assert_eq!(&state.top_ground, &fresh.top_ground);
        prop_assert_eq!(&state.bottom_ground, &fresh.bottom_ground);
        prop_assert_eq!(state.speed_increase_threshold, fresh.speed_increase_threshold);
    }

    #[test]
    fn same_seed_same_run(
        seed in any::<u64>(),
        inputs in prop::collection::vec(any::<bool>(), 1..300),
    ) {
        let mut a = started(seed);
        let mut b = started(seed);
        for held in inputs {
            tick(&mut a, &thrust(held));
            tick(&mut b, &thrust(held));
        }
        prop_assert_eq!(a.mode, b.mode);
        prop_assert_eq!(a.distance, b.distance);
        prop_assert_eq!(&a.ship, &b.ship);
        prop_assert_eq!(&a.asteroids, &b.asteroids);
        prop_assert_eq!(&a.stars, &b.stars);
    }
}
