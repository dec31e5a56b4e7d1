//! Property tests for the engine's algebraic guarantees

mod common;

use proptest::prelude::*;

use common::Always;
use nightfell::action::{resolve_attack, ActionEngine, AttackOutcome};
use nightfell::command::{Command, CommandCode};
use nightfell::core::config::GameConfig;
use nightfell::core::types::{Direction, LinkId, ObjectId, PlayerId, SpaceId};
use nightfell::entity::{Link, Object, Player, Space, Sprite};
use nightfell::game::GameState;
use nightfell::world::WorldModel;

/// Two spaces joined by one link in the given direction
fn corridor(open: bool, direction: Direction) -> GameState {
    let mut world = WorldModel::new(GameConfig::default());
    world
        .add_space(Space::new(SpaceId(1), "a", Sprite::empty()))
        .unwrap();
    world
        .add_space(Space::new(SpaceId(2), "b", Sprite::empty()))
        .unwrap();
    let mut link = Link::new(LinkId(1), "passage", SpaceId(1), SpaceId(2), direction);
    link.is_open = open;
    world.add_link(link).unwrap();
    world
        .add_player(Player::new(PlayerId(1), "p", SpaceId(1), 10, 3))
        .unwrap();
    GameState::new(world)
}

/// One room full of loose objects and a player with a bounded pack
fn cluttered_room(capacity: usize, object_count: usize) -> GameState {
    let mut world = WorldModel::new(GameConfig::default());
    world
        .add_space(Space::new(SpaceId(1), "storeroom", Sprite::empty()))
        .unwrap();
    for n in 0..object_count {
        let id = ObjectId(n as u32 + 1);
        world
            .add_object(Object::new(id, format!("thing{n}"), "a thing"))
            .unwrap();
        world.place_object_in_space(id, SpaceId(1)).unwrap();
    }
    world
        .add_player(Player::new(PlayerId(1), "p", SpaceId(1), 10, capacity))
        .unwrap();
    GameState::new(world)
}

proptest! {
    /// Movement commits iff the connection exists and is open
    #[test]
    fn prop_move_changes_location_iff_open(open in any::<bool>(), dir_index in 0usize..6) {
        let direction = Direction::ALL[dir_index];
        let mut state = corridor(open, direction);
        let mut engine = ActionEngine::new(GameConfig::default(), 1);

        let ok = engine.resolve(
            &mut state,
            &Command::with_arg(CommandCode::Move, direction.as_str()),
            &mut Always(false),
        );

        let location = state.world.player(PlayerId(1)).unwrap().location;
        prop_assert_eq!(ok, open);
        if open {
            prop_assert_eq!(location, SpaceId(2));
        } else {
            prop_assert_eq!(location, SpaceId(1));
        }
    }

    /// Moving in any direction with no link there never relocates
    #[test]
    fn prop_move_without_link_never_relocates(
        link_dir in 0usize..6,
        try_dir in 0usize..6,
    ) {
        prop_assume!(link_dir != try_dir);
        let mut state = corridor(true, Direction::ALL[link_dir]);
        let mut engine = ActionEngine::new(GameConfig::default(), 1);

        let ok = engine.resolve(
            &mut state,
            &Command::with_arg(CommandCode::Move, Direction::ALL[try_dir].as_str()),
            &mut Always(false),
        );

        prop_assert!(!ok);
        prop_assert_eq!(state.world.player(PlayerId(1)).unwrap().location, SpaceId(1));
    }

    /// No sequence of takes can push an inventory past its capacity, and
    /// every object stays in exactly one place
    #[test]
    fn prop_takes_never_exceed_capacity(
        capacity in 0usize..5,
        picks in proptest::collection::vec(0usize..8, 0..24),
    ) {
        let object_count = 8;
        let mut state = cluttered_room(capacity, object_count);
        let mut engine = ActionEngine::new(GameConfig::default(), 1);

        for pick in picks {
            let command = Command::with_arg(CommandCode::Take, format!("thing{pick}"));
            engine.resolve(&mut state, &command, &mut Always(false));

            let player = state.world.player(PlayerId(1)).unwrap();
            prop_assert!(player.inventory.len() <= capacity);

            for n in 0..object_count {
                let id = ObjectId(n as u32 + 1);
                let in_space = state.world.object_location(id).is_some();
                let carried = player.inventory.contains(id);
                prop_assert!(in_space != carried, "object must be in exactly one place");
            }
        }
    }

    /// Attack resolution is total and respects its bounds
    #[test]
    fn prop_attack_outcome_is_total(
        roll in 1u32..=10,
        victim in 0usize..16,
        team in 1usize..5,
        allies in 0usize..3,
    ) {
        match resolve_attack(roll, 3, victim, team, 1, allies) {
            AttackOutcome::Recoil { victim_index } => {
                prop_assert!(roll <= 3);
                prop_assert!(victim_index < team);
            }
            AttackOutcome::Strike { damage } => {
                prop_assert!(roll > 3);
                prop_assert_eq!(damage, team as i32 * (1 + allies as i32));
            }
        }
    }
}
