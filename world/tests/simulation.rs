use room_crawl_core::{Command, Direction, Event, Health, MovementIntent, RoomCoord, FIXED_STEP};
use room_crawl_world::{self as world, query, World};

fn set_intent(world: &mut World, events: &mut Vec<Event>, intent: MovementIntent) {
    world::apply(world, Command::SetMovementIntent { intent }, events);
}

fn tick(world: &mut World, events: &mut Vec<Event>) {
    world::apply(world, Command::Tick { dt: FIXED_STEP }, events);
}

fn run_ticks(world: &mut World, events: &mut Vec<Event>, count: u32) {
    for _ in 0..count {
        tick(world, events);
    }
}

const UP: MovementIntent = MovementIntent::new(true, false, false, false);
const DOWN: MovementIntent = MovementIntent::new(false, true, false, false);
const RIGHT: MovementIntent = MovementIntent::new(false, false, false, true);
const IDLE: MovementIntent = MovementIntent::new(false, false, false, false);

#[test]
fn marching_north_crosses_one_doorway_and_stops_at_the_world_edge() {
    let mut world = World::new();
    let mut events = Vec::new();
    assert_eq!(query::current_room_coord(&world), RoomCoord::new(0, 1));

    set_intent(&mut world, &mut events, UP);
    run_ticks(&mut world, &mut events, 120);

    assert_eq!(query::current_room_coord(&world), RoomCoord::new(0, 0));
    let transitions: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::RoomChanged {
                direction,
                from,
                to,
            } => Some((*direction, *from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        vec![(
            Direction::North,
            RoomCoord::new(0, 1),
            RoomCoord::new(0, 0),
        )],
        "the world edge absorbs every later attempt"
    );

    // The player ends pressed into the top doorway of the edge room, held
    // back by the closed-world boundary.
    let player = query::player_snapshot(&world);
    assert_eq!(player.position.x(), 64.0);
    assert!(player.position.y() < 8.0);
    assert!(player.position.y() >= -1.0);
}

#[test]
fn transition_reposition_lands_inside_the_opposite_doorway() {
    let mut world = World::new();
    let mut events = Vec::new();

    set_intent(&mut world, &mut events, UP);
    let mut crossed = false;
    for _ in 0..90 {
        tick(&mut world, &mut events);
        if events
            .iter()
            .any(|event| matches!(event, Event::RoomChanged { .. }))
        {
            crossed = true;
            break;
        }
    }
    assert!(crossed, "the player never reached the doorway");

    // Just inside the south edge of the new room, centered on the doorway.
    let player = query::player_snapshot(&world);
    assert_eq!(player.position.x(), 64.0);
    assert_eq!(player.position.y(), 96.0);

    // The camera was recomputed against the new room in the same tick.
    let camera = query::camera_snapshot(&world);
    assert_eq!((camera.x, camera.y), (0.0, 0.0));
}

#[test]
fn melee_attack_brings_down_the_enemy() {
    let mut world = World::new();
    let mut events = Vec::new();

    // Walk right until level with the enemy column, then down to its row.
    set_intent(&mut world, &mut events, RIGHT);
    run_ticks(&mut world, &mut events, 36);
    set_intent(&mut world, &mut events, DOWN);
    run_ticks(&mut world, &mut events, 24);

    let player = query::player_snapshot(&world);
    assert!((player.position.x() - 112.0).abs() < 0.1);
    assert!((player.position.y() - 96.0).abs() < 0.1);

    // Strike rightward; the hitbox overlaps the enemy for its lifetime and
    // lands one hit per tick.
    set_intent(&mut world, &mut events, RIGHT);
    world::apply(&mut world, Command::PressAttack, &mut events);
    set_intent(&mut world, &mut events, IDLE);
    run_ticks(&mut world, &mut events, 4);

    let enemy = query::enemy_snapshot(&world);
    assert!(!enemy.alive);
    assert_eq!(enemy.health, Health::new(0));
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::EnemyDamaged { .. }))
            .count(),
        3,
    );
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::EnemyDied))
            .count(),
        1,
    );

    // Later strikes against the corpse change nothing.
    run_ticks(&mut world, &mut events, 14);
    world::apply(&mut world, Command::PressAttack, &mut events);
    run_ticks(&mut world, &mut events, 4);
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::EnemyDamaged { .. }))
            .count(),
        3,
    );
}

#[test]
fn identical_command_scripts_replay_identically() {
    let script: Vec<Command> = {
        let mut commands = Vec::new();
        commands.push(Command::SetMovementIntent {
            intent: MovementIntent::new(true, false, false, true),
        });
        for _ in 0..30 {
            commands.push(Command::Tick { dt: FIXED_STEP });
        }
        commands.push(Command::PressAttack);
        for _ in 0..30 {
            commands.push(Command::Tick { dt: FIXED_STEP });
        }
        commands
    };

    let mut first_world = World::new();
    let mut second_world = World::new();
    let mut first_events = Vec::new();
    let mut second_events = Vec::new();

    for command in &script {
        world::apply(&mut first_world, command.clone(), &mut first_events);
    }
    for command in &script {
        world::apply(&mut second_world, command.clone(), &mut second_events);
    }

    assert_eq!(first_events, second_events);
    assert_eq!(
        query::player_snapshot(&first_world),
        query::player_snapshot(&second_world),
    );
    assert_eq!(
        query::enemy_snapshot(&first_world),
        query::enemy_snapshot(&second_world),
    );
    assert_eq!(
        query::current_room_coord(&first_world),
        query::current_room_coord(&second_world),
    );
    assert_eq!(
        query::attack_view(&first_world).into_vec(),
        query::attack_view(&second_world).into_vec(),
    );
}
