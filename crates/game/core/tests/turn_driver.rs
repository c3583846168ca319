use rogue_core::{
    AbilityTarget, ActorKind, ActorState, AiKind, Command, Controllers, Direction, DriverError, EntityId,
    GameConfig, GameEnv, GameState, GridMap, PcgRng, Position, RadiusVisibility, ScriptStep,
    ScriptedController, SessionEnd, StatusEffectKind, StepOutcome, TurnDriver,
};

fn waiting_player() -> Controllers {
    Controllers::new(ScriptedController::repeating(Command::Wait))
}

fn schedule_of(state: &GameState) -> Vec<EntityId> {
    state.schedule().iter().collect()
}

fn count_reports(state: &GameState, needle: &str) -> usize {
    state
        .log
        .messages()
        .iter()
        .filter(|message| message.contains(needle))
        .count()
}

#[test]
fn player_abort_reports_once_and_keeps_the_head() {
    let map = GridMap::new(8, 8);
    let config = GameConfig::default();
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    let player = state.add_player(&env, Position::new(1, 1)).unwrap();
    let totem = state.spawn(&env, ActorKind::Totem, Position::new(5, 5)).unwrap();

    let mut controllers = Controllers::new(ScriptedController::new([
        ScriptStep::Abort("You fumble.".into()),
        ScriptStep::Abort("Still fumbling.".into()),
        ScriptStep::Quit,
    ]));
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    assert_eq!(driver.step(), Ok(StepOutcome::Ended(SessionEnd::Quit)));
    drop(driver);

    assert_eq!(schedule_of(&state), vec![player, totem]);
    assert_eq!(state.log.messages(), ["You fumble.", "Still fumbling."]);
    assert_eq!(state.turn.passes, 0);
    assert_eq!(state.turn.player_turns, 0);
}

#[test]
fn invalid_player_move_is_retried_without_rotation() {
    let map = GridMap::new(4, 4);
    let config = GameConfig::default();
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    let player = state.add_player(&env, Position::new(0, 0)).unwrap();
    let totem = state.spawn(&env, ActorKind::Totem, Position::new(3, 3)).unwrap();

    let mut controllers = Controllers::new(ScriptedController::new([
        ScriptStep::Do(Command::Move(Direction::North)),
        ScriptStep::Do(Command::Move(Direction::East)),
    ]));
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    assert_eq!(
        driver.step(),
        Ok(StepOutcome::Acted {
            entity: player,
            rotated: true
        })
    );
    drop(driver);

    assert_eq!(count_reports(&state, "You cannot leave the map."), 1);
    assert_eq!(state.actor(player).unwrap().position(), Position::new(1, 0));
    assert_eq!(schedule_of(&state), vec![totem, player]);
    assert_eq!(state.turn.nonce, 2);
}

#[test]
fn npc_retries_are_bounded() {
    let map = GridMap::new(6, 6);
    let config = GameConfig::default().with_max_npc_retries(2);
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    state.add_player(&env, Position::new(0, 0)).unwrap();
    let grunt = state.spawn(&env, ActorKind::Grunt, Position::new(4, 4)).unwrap();

    let stubborn = ScriptedController::new((0..10).map(|_| ScriptStep::Abort("stuck".into())));
    let mut controllers = waiting_player().with_override(grunt, stubborn);
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    driver.step().unwrap();
    assert_eq!(
        driver.step(),
        Err(DriverError::RetryLimitExceeded {
            entity: grunt,
            attempts: 3,
            message: "stuck".into(),
        })
    );
    drop(driver);

    // NPC retries never reach the player's log.
    assert_eq!(count_reports(&state, "stuck"), 0);
}

#[test]
fn head_removed_during_its_own_turn_is_not_rotated() {
    let map = GridMap::new(12, 3);
    let config = GameConfig::default().with_bomb_timer(0);
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    let player = state.add_player(&env, Position::new(0, 1)).unwrap();
    let bomb = state.spawn(&env, ActorKind::Bomb, Position::new(5, 1)).unwrap();
    let grunt = state.spawn(&env, ActorKind::Grunt, Position::new(10, 1)).unwrap();

    let mut controllers = waiting_player();
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    driver.step().unwrap();
    assert_eq!(
        driver.step(),
        Ok(StepOutcome::Acted {
            entity: bomb,
            rotated: false
        })
    );
    drop(driver);

    assert!(state.actor(bomb).is_none());
    assert_eq!(state.schedule().peek(), Some(grunt));
    assert_eq!(schedule_of(&state), vec![grunt, player]);
}

#[test]
fn bomb_explodes_on_its_sixth_turn() {
    let map = GridMap::new(12, 12);
    let config = GameConfig::default();
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    let player = state.add_player(&env, Position::new(0, 0)).unwrap();
    let bomb = state.spawn(&env, ActorKind::Bomb, Position::new(6, 6)).unwrap();
    let bystander = state.spawn(&env, ActorKind::Grunt, Position::new(6, 7)).unwrap();
    state.actor_mut(bystander).unwrap().skip_turns = 100;

    let mut controllers = waiting_player();
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    for bomb_turn in 1..=6 {
        assert_eq!(
            driver.step(),
            Ok(StepOutcome::Acted {
                entity: player,
                rotated: true
            })
        );
        let outcome = driver.step().unwrap();
        if bomb_turn < 6 {
            assert_eq!(outcome, StepOutcome::Acted { entity: bomb, rotated: true });
            assert_eq!(driver.state().actor(bomb).unwrap().countdown, Some(5 - bomb_turn));
            assert_eq!(driver.step(), Ok(StepOutcome::Skipped { entity: bystander }));
        } else {
            assert_eq!(outcome, StepOutcome::Acted { entity: bomb, rotated: false });
        }
    }
    drop(driver);

    assert!(state.actor(bomb).is_none());
    assert!(state.actor(bystander).is_none());
    assert!(state.actor(player).is_some());
    assert_eq!(count_reports(&state, "explodes!"), 1);
    assert_eq!(count_reports(&state, "is caught in the blast."), 1);
}

#[test]
fn heat_detonates_a_bomb_immediately() {
    let map = GridMap::new(10, 4);
    let config = GameConfig::default();
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    let player = state.add_player(&env, Position::new(0, 1)).unwrap();
    let bomb = state.spawn(&env, ActorKind::Bomb, Position::new(3, 1)).unwrap();
    let grunt = state.spawn(&env, ActorKind::Grunt, Position::new(4, 2)).unwrap();
    let survivor = state.spawn(&env, ActorKind::Grunt, Position::new(8, 3)).unwrap();

    let mut controllers = Controllers::new(ScriptedController::new([ScriptStep::Do(
        Command::Cast {
            slot: 2,
            target: AbilityTarget::Direction(Direction::East),
        },
    )]));
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    assert_eq!(
        driver.step(),
        Ok(StepOutcome::Acted {
            entity: player,
            rotated: true
        })
    );
    drop(driver);

    assert!(state.actor(bomb).is_none());
    assert!(state.actor(grunt).is_none());
    assert_eq!(schedule_of(&state), vec![survivor, player]);
    assert_eq!(state.actor(player).unwrap().hp, 10);
    // Cast this turn, then ticked once at the end of it.
    assert_eq!(state.abilities.slot(2).unwrap().cooldown_left, 7);
}

#[test]
fn hunter_hits_the_player_for_two_and_spares_allies() {
    let map = GridMap::new(6, 6);
    let config = GameConfig::default();
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    let player = state.add_player(&env, Position::new(2, 2)).unwrap();
    let hunter = state.spawn(&env, ActorKind::Hunter, Position::new(3, 2)).unwrap();
    let ally = state.spawn(&env, ActorKind::Grunt, Position::new(3, 3)).unwrap();

    let mut controllers = waiting_player();
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    driver.step().unwrap();
    assert_eq!(
        driver.step(),
        Ok(StepOutcome::Acted {
            entity: hunter,
            rotated: true
        })
    );
    drop(driver);

    assert_eq!(state.actor(player).unwrap().hp, 8);
    assert_eq!(state.actor(ally).unwrap().hp, 10);
    assert_eq!(state.log.last(), Some("Player takes 2 damage."));
}

#[test]
fn skipped_actor_needs_k_plus_one_passes() {
    let map = GridMap::new(6, 6);
    let config = GameConfig::default();
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    let player = state.add_player(&env, Position::new(0, 0)).unwrap();
    let slow = ActorState::from_kind(EntityId(7), ActorKind::Totem, Position::new(4, 4), &config)
        .with_skip_turns(2);
    state.insert_actor(slow).unwrap();

    let mut controllers = waiting_player();
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    let mut slow_passes = Vec::new();
    for _ in 0..6 {
        match driver.step().unwrap() {
            StepOutcome::Acted { entity, .. } if entity == player => {}
            other => slow_passes.push((other, driver.state().actor(EntityId(7)).unwrap().skip_turns)),
        }
    }

    assert_eq!(
        slow_passes,
        vec![
            (StepOutcome::Skipped { entity: EntityId(7) }, 1),
            (StepOutcome::Skipped { entity: EntityId(7) }, 0),
            (
                StepOutcome::Acted {
                    entity: EntityId(7),
                    rotated: true
                },
                0
            ),
        ]
    );
}

#[test]
fn recovery_makes_an_actor_act_every_other_cycle() {
    let map = GridMap::new(6, 6);
    let config = GameConfig::default();
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    state.add_player(&env, Position::new(0, 0)).unwrap();
    let sloth = ActorState::from_kind(EntityId(3), ActorKind::Totem, Position::new(4, 4), &config)
        .with_recovery(1);
    state.insert_actor(sloth).unwrap();

    let mut controllers = waiting_player();
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    let mut pattern = Vec::new();
    for _ in 0..4 {
        driver.step().unwrap();
        pattern.push(matches!(driver.step().unwrap(), StepOutcome::Acted { .. }));
    }
    assert_eq!(pattern, vec![true, false, true, false]);
}

#[test]
fn lethal_attack_reports_one_death() {
    let map = GridMap::new(6, 6);
    let config = GameConfig::default();
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    let player = state.add_player(&env, Position::new(1, 1)).unwrap();
    let weak = ActorState::from_kind(EntityId(9), ActorKind::Grunt, Position::new(2, 1), &config).with_hp(2);
    state.insert_actor(weak).unwrap();

    let mut controllers = Controllers::new(ScriptedController::new([ScriptStep::Do(
        Command::Attack(EntityId(9)),
    )]));
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    driver.step().unwrap();
    drop(driver);

    assert!(state.actor(EntityId(9)).is_none());
    assert_eq!(schedule_of(&state), vec![player]);
    assert_eq!(count_reports(&state, "Grunt #9 dies."), 1);
}

#[test]
fn session_ends_when_the_player_dies() {
    let map = GridMap::new(6, 6);
    let config = GameConfig::default();
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    let player = state.add_player(&env, Position::new(2, 2)).unwrap();
    state.actor_mut(player).unwrap().hp = 3;
    state.spawn(&env, ActorKind::Hunter, Position::new(2, 3)).unwrap();

    let mut controllers = waiting_player();
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    assert_eq!(driver.run_steps(10), Ok(Some(SessionEnd::PlayerLost)));
    drop(driver);

    assert!(!state.is_player_alive());
    assert_eq!(count_reports(&state, "Player dies."), 1);
}

#[test]
fn standing_on_fire_burns_once_per_turn_and_cooldowns_tick() {
    let map = GridMap::from_rows(&["^...", "....", "...."]).unwrap();
    let config = GameConfig::default();
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    let player = state.add_player(&env, Position::new(0, 0)).unwrap();
    state.abilities.mark_used(1);

    let mut controllers = waiting_player();
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    assert_eq!(driver.run_steps(3), Ok(None));
    drop(driver);

    assert_eq!(state.actor(player).unwrap().hp, 7);
    assert_eq!(count_reports(&state, "Player takes 1 heat damage."), 3);
    assert_eq!(state.turn.player_turns, 3);
    assert_eq!(state.abilities.slot(1).unwrap().cooldown_left, 0);
}

#[test]
fn ice_freezes_for_one_pass_and_lets_the_actor_act_again() {
    let map = GridMap::from_rows(&["~...", "....", "...."]).unwrap();
    let config = GameConfig::default();
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    let player = state.add_player(&env, Position::new(0, 0)).unwrap();

    let mut controllers = waiting_player();
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    let mut acted = Vec::new();
    for _ in 0..9 {
        acted.push(matches!(driver.step().unwrap(), StepOutcome::Acted { .. }));
    }
    drop(driver);

    assert_eq!(
        acted,
        vec![true, false, true, false, true, false, true, false, true]
    );
    assert_eq!(state.actor(player).unwrap().hp, 5);
    assert_eq!(count_reports(&state, "Player is frozen in place."), 5);
}

#[test]
fn statuses_count_only_the_turns_an_actor_takes() {
    let map = GridMap::new(8, 8);
    let config = GameConfig::default();
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    state.add_player(&env, Position::new(0, 0)).unwrap();
    let slow = ActorState::from_kind(EntityId(4), ActorKind::Grunt, Position::new(7, 7), &config)
        .with_ai(AiKind::Idle)
        .with_recovery(1)
        .with_status(StatusEffectKind::Regenerating, 2);
    state.insert_actor(slow).unwrap();

    let mut controllers = waiting_player();
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    // player, grunt acts, player, grunt recovers
    assert_eq!(driver.run_steps(4), Ok(None));
    assert_eq!(
        driver
            .state()
            .actor(EntityId(4))
            .unwrap()
            .status
            .turns_left(StatusEffectKind::Regenerating),
        Some(1)
    );

    assert_eq!(driver.run_steps(2), Ok(None));
    drop(driver);
    assert_eq!(
        state
            .actor(EntityId(4))
            .unwrap()
            .status
            .turns_left(StatusEffectKind::Regenerating),
        None
    );
}

#[test]
fn visibility_is_refreshed_on_player_turns() {
    let map = GridMap::new(20, 3);
    let config = GameConfig {
        vision_radius: 2,
        ..GameConfig::default()
    };
    let env = GameEnv::new(&map, &PcgRng, &config);
    let mut state = GameState::new(1);
    state.add_player(&env, Position::new(0, 1)).unwrap();

    let mut controllers = Controllers::new(ScriptedController::new([
        ScriptStep::Do(Command::Move(Direction::East)),
        ScriptStep::Do(Command::Cast {
            slot: 8,
            target: AbilityTarget::None,
        }),
        ScriptStep::Do(Command::Wait),
    ]));
    let mut visibility = RadiusVisibility::new(config.vision_radius);
    let mut driver = TurnDriver::new(&mut state, env, &mut controllers, &mut visibility);

    driver.step().unwrap();
    driver.step().unwrap();
    driver.step().unwrap();
    drop(driver);

    assert!(visibility.is_visible(Position::new(19, 2)));
    assert!(visibility.is_explored(Position::new(3, 0)));
}
