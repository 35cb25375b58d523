use planar_physics::*;

fn main() {
    let config = WorldConfig::default()
        .with_gravity(0.0, 500.0)
        .with_bounds(Rect::new(0.0, 0.0, 320.0, 240.0))
        .with_static_rect(Rect::new(0.0, 200.0, 320.0, 40.0))
        .with_fixed_step(1000.0 / 120.0, 4);
    let mut world = PhysicsWorld::with_config(config);

    let events = EventCollector::new();
    world.set_collision_listener(events.clone());

    let ball = world.add_body(
        RigidBody::circle(60.0, 40.0, 8.0)
            .with_restitution(0.6)
            .with_velocity(80.0, 0.0),
    );
    world.add_body(RigidBody::rect(140.0, 20.0, 16.0, 16.0).with_friction(0.4));

    for frame in 0..120 {
        world.step(1000.0 / 60.0);
        for event in events.drain() {
            if let PhysicsEvent::StaticCollide { body, .. } = event {
                if body == ball {
                    println!("frame {frame}: ball touched the floor");
                }
            }
        }
    }

    if let Some(body) = world.body(ball) {
        println!(
            "Ball after two seconds: position {:?}, velocity {:?}",
            body.position(),
            body.velocity
        );
    }
    world.last_step_stats().report();
}
