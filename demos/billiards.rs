use planar_physics::*;

const TABLE: Rect = Rect {
    x: 0.0,
    y: 0.0,
    w: 400.0,
    h: 200.0,
};

fn main() {
    let mut world = PhysicsWorld::with_config(WorldConfig::default().with_bounds(TABLE));
    world.set_broadphase_cell_size(32.0);

    let events = EventCollector::new();
    world.set_collision_listener(events.clone());
    world.set_sensor_listener(events.clone());

    // Pockets are sensors: they report balls without stopping them.
    for &(x, y) in &[(0.0, 0.0), (200.0, 0.0), (400.0, 0.0), (0.0, 200.0), (200.0, 200.0), (400.0, 200.0)] {
        world.add_body(RigidBody::circle(x, y, 12.0).with_sensor(true).with_static(true));
    }

    let radius = 6.0;
    let mut rack = Vec::new();
    for row in 0..5 {
        for col in 0..=row {
            let x = 280.0 + row as f32 * radius * 1.8;
            let y = 100.0 + (col as f32 - row as f32 / 2.0) * radius * 2.05;
            let ball = RigidBody::circle(x, y, radius)
                .with_restitution(0.95)
                .with_friction(0.05)
                .with_linear_damping(0.3);
            rack.push(world.add_body(ball));
        }
    }

    let cue = world.add_body(
        RigidBody::circle(80.0, 100.0, radius)
            .with_restitution(0.95)
            .with_linear_damping(0.3)
            .with_velocity(600.0, 3.0),
    );

    let mut potted = 0;
    for _ in 0..600 {
        world.step(1000.0 / 60.0);
        for event in events.drain() {
            match event {
                PhysicsEvent::Trigger { other, .. } if other == cue => println!("scratch!"),
                PhysicsEvent::Trigger { other, .. } => {
                    if world.remove_body(other).is_some() {
                        potted += 1;
                    }
                }
                _ => {}
            }
        }
    }

    let moving = rack
        .iter()
        .filter_map(|&id| world.body(id))
        .filter(|ball| ball.velocity.length() > 1.0)
        .count();
    println!("{potted} balls potted, {moving} still rolling");
}
