use room_crawl_core::{Command, Event, MovementIntent, FIXED_STEP};
use room_crawl_system_player_control::{ControlFrame, PlayerControl};
use room_crawl_world::{self as world, query, World};

fn run_step(world: &mut World, control: &mut PlayerControl, events: &mut Vec<Event>) {
    let mut commands = Vec::new();
    control.emit_step_commands(&mut commands);
    commands.push(Command::Tick { dt: FIXED_STEP });
    for command in commands {
        world::apply(world, command, events);
    }
}

#[test]
fn held_movement_flags_reach_the_player() {
    let mut world = World::new();
    let mut control = PlayerControl::new();
    let mut events = Vec::new();

    let held = MovementIntent::new(false, false, false, true);
    control.register_frame(ControlFrame::new(held, false));
    run_step(&mut world, &mut control, &mut events);

    let player = query::player_snapshot(&world);
    assert_eq!(player.intent, held);
    assert!(player.position.x() > 64.0);
}

#[test]
fn latched_attack_spawns_on_the_next_step() {
    let mut world = World::new();
    let mut control = PlayerControl::new();
    let mut events = Vec::new();

    // The press arrives on a frame that drains no fixed steps.
    control.register_frame(ControlFrame::new(MovementIntent::default(), true));
    control.register_frame(ControlFrame::new(MovementIntent::default(), false));

    run_step(&mut world, &mut control, &mut events);

    assert_eq!(query::attack_view(&world).len(), 1);
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::AttackSpawned { .. }))
            .count(),
        1,
    );

    // Subsequent steps without a new press spawn nothing further.
    run_step(&mut world, &mut control, &mut events);
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::AttackSpawned { .. }))
            .count(),
        1,
    );
}
