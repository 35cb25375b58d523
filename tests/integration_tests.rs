use approx::assert_abs_diff_eq;
use planar_physics::*;

fn separation(a: &RigidBody, b: &RigidBody) -> f32 {
    (b.position() - a.position()).length()
}

#[test]
fn large_frame_delta_is_clamped_before_damping() {
    let mut world = PhysicsWorld::new();
    let id = world.add_body(
        RigidBody::rect(0.0, 0.0, 1.0, 1.0)
            .with_velocity(100.0, 0.0)
            .with_linear_damping(2.0),
    );

    world.step(200.0);

    let body = world.body(id).expect("body should exist");
    assert_abs_diff_eq!(body.position().x, 4.5, epsilon = 1e-3);
    assert_abs_diff_eq!(body.position().y, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(body.velocity.x, 90.0, epsilon = 1e-3);
}

#[test]
fn static_bodies_never_move() {
    let mut world = PhysicsWorld::new();
    world.set_gravity(0.0, 300.0);
    world.set_bounds(Some(Rect::new(-50.0, -50.0, 100.0, 100.0)));

    let anchor = world.add_body(
        RigidBody::rect(-10.0, 5.0, 20.0, 2.0)
            .with_static(true)
            .with_velocity(5.0, 5.0),
    );
    for i in 0..6 {
        world.add_body(
            RigidBody::circle(-6.0 + i as f32 * 2.5, 0.0, 1.0)
                .with_restitution(0.5)
                .with_velocity(3.0, 0.0),
        );
    }

    for _ in 0..120 {
        world.step(16.0);
    }

    let anchor = world.body(anchor).expect("anchor should exist");
    assert_eq!(anchor.position(), Vec2::new(-10.0, 5.0));
    assert_eq!(anchor.velocity, Vec2::new(5.0, 5.0));
}

#[test]
fn inelastic_ball_comes_to_rest_on_terrain() {
    let mut world = PhysicsWorld::new();
    world.set_gravity(0.0, 100.0);
    world.add_static_rect(Rect::new(-50.0, 10.0, 100.0, 5.0));
    let events = EventCollector::new();
    world.set_collision_listener(events.clone());

    let ball = world.add_body(RigidBody::circle(0.0, 8.0, 1.0).with_restitution(0.0));

    let mut previous_speed: Option<f32> = None;
    for _ in 0..100 {
        world.step(16.0);
        let speed = world.body(ball).expect("ball").velocity.length();
        let touched = events
            .snapshot()
            .iter()
            .any(|e| matches!(e, PhysicsEvent::StaticCollide { .. }));
        if touched {
            if let Some(previous) = previous_speed {
                assert!(speed <= previous + 1e-5, "speed grew from {previous} to {speed}");
            }
            previous_speed = Some(speed);
        }
    }

    let ball = world.body(ball).expect("ball");
    assert!(previous_speed.is_some(), "ball never reached the floor");
    assert!(ball.velocity.length() < 1e-3);
    assert_abs_diff_eq!(ball.position().y, 9.0, epsilon = 1e-3);
}

#[test]
fn box_on_floor_is_pushed_out_and_slowed_by_friction() {
    let mut world = PhysicsWorld::new();
    let floor = Rect::new(0.0, 0.0, 10.0, 1.0);
    world.add_static_rect(floor);
    let id = world.add_body(
        RigidBody::rect(1.0, 0.5, 1.0, 1.0)
            .with_friction(0.5)
            .with_velocity(4.0, -1.0),
    );

    world.step(16.0);

    let body = world.body(id).expect("body");
    assert!(body.velocity.x.abs() < 4.0);
    assert!(body.aabb().top() >= floor.bottom() - 0.001);
}

#[test]
fn sensors_report_overlap_without_response() {
    let mut world = PhysicsWorld::new();
    let events = EventCollector::new();
    world.set_sensor_listener(events.clone());

    let sensor = world.add_body(
        RigidBody::rect(-5.0, -5.0, 10.0, 10.0)
            .with_sensor(true)
            .with_static(true),
    );
    let mover = world.add_body(RigidBody::circle(0.0, 0.0, 1.0).with_velocity(10.0, 0.0));

    for step in 1..=3 {
        let before = world.body(mover).expect("mover").clone();
        world.step(16.0);
        let after = world.body(mover).expect("mover");

        assert_eq!(after.velocity, before.velocity);
        assert_abs_diff_eq!(after.position().x, before.position().x + 0.16, epsilon = 1e-5);
        assert_eq!(after.position().y, before.position().y);

        let triggers = events.snapshot();
        assert_eq!(triggers.len(), step, "one trigger per overlapping pair per step");
        assert_eq!(
            triggers.last(),
            Some(&PhysicsEvent::Trigger {
                sensor,
                other: mover
            })
        );
    }
}

#[test]
fn cleared_listeners_stop_receiving_events() {
    let mut world = PhysicsWorld::new();
    world.set_bounds(Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    let contacts = EventCollector::new();
    let triggers = EventCollector::new();
    world.set_collision_listener(contacts.clone());
    world.set_sensor_listener(triggers.clone());

    world.add_body(RigidBody::circle(5.0, 5.0, 4.0).with_sensor(true).with_static(true));
    world.add_body(RigidBody::circle(9.5, 5.0, 1.0).with_velocity(10.0, 0.0));

    world.step(16.0);
    assert!(!contacts.is_empty());
    assert_eq!(triggers.len(), 1);

    world.clear_collision_listener();
    world.clear_sensor_listener();
    contacts.drain();
    triggers.drain();
    for _ in 0..5 {
        world.step(16.0);
    }

    assert!(contacts.is_empty());
    assert!(triggers.is_empty());
    assert_eq!(world.last_step_stats().sensor_triggers, 1);
}

#[test]
fn overlapping_sensors_trigger_each_other() {
    let mut world = PhysicsWorld::new();
    let triggers = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = triggers.clone();
    world.set_sensor_listener(move |_: &RigidBody, _: &RigidBody| {
        counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    });

    world.add_body(RigidBody::circle(0.0, 0.0, 1.0).with_sensor(true));
    world.add_body(RigidBody::circle(0.5, 0.0, 1.0).with_sensor(true));
    world.step(16.0);

    assert_eq!(triggers.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[test]
fn right_boundary_reflects_elastic_circle() {
    let mut world = PhysicsWorld::new();
    let events = EventCollector::new();
    world.set_collision_listener(events.clone());
    world.set_bounds(Some(Rect::new(0.0, 0.0, 100.0, 100.0)));

    let id = world.add_body(
        RigidBody::circle(98.5, 50.0, 1.0)
            .with_velocity(100.0, 0.0)
            .with_restitution(1.0),
    );
    world.step(16.0);

    let body = world.body(id).expect("body");
    assert_abs_diff_eq!(body.velocity.x, -100.0, epsilon = 1e-4);
    assert_abs_diff_eq!(body.velocity.y, 0.0, epsilon = 1e-6);
    assert!(body.position().x + 1.0 <= 100.0 + 1e-4);
    assert_eq!(
        events.drain(),
        vec![PhysicsEvent::BoundsCollide {
            body: id,
            edge: BoundsEdge::Right
        }]
    );
}

#[test]
fn equal_mass_elastic_circles_swap_velocities() {
    let mut world = PhysicsWorld::new();
    let events = EventCollector::new();
    world.set_collision_listener(events.clone());

    let a = world.add_body(
        RigidBody::circle(0.0, 0.0, 1.0)
            .with_restitution(1.0)
            .with_velocity(1.0, 0.0),
    );
    let b = world.add_body(
        RigidBody::circle(1.9, 0.0, 1.0)
            .with_restitution(1.0)
            .with_velocity(-1.0, 0.0),
    );

    world.step(1.0);

    let body_a = world.body(a).expect("a");
    let body_b = world.body(b).expect("b");
    assert!(separation(body_a, body_b) >= 2.0 - 1e-4);
    assert_abs_diff_eq!(body_a.velocity.x, -1.0, epsilon = 1e-4);
    assert_abs_diff_eq!(body_b.velocity.x, 1.0, epsilon = 1e-4);

    match events.drain().as_slice() {
        [PhysicsEvent::BodiesCollide { a: ea, b: eb, normal }] => {
            assert_eq!((*ea, *eb), (a, b));
            assert_abs_diff_eq!(normal.x, 1.0, epsilon = 1e-5);
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn circle_and_box_separate_after_collision() {
    let mut world = PhysicsWorld::new();
    let circle = world.add_body(RigidBody::circle(0.5, 0.5, 0.5));
    let rect = world.add_body(RigidBody::rect(0.6, 0.5, 0.8, 0.8));

    world.step(16.0);

    let circle = world.body(circle).expect("circle");
    let rect = world.body(rect).expect("rect");
    let contact = NarrowPhase::collide(&circle.shape, &rect.shape);
    assert!(
        contact.map_or(true, |c| c.depth < 1e-4),
        "bodies should be separated, got {contact:?}"
    );
    assert!(circle.position().x < 0.5);
    assert!(rect.position().x > 0.6);
}

#[test]
fn overlapping_static_bodies_are_left_alone() {
    let mut world = PhysicsWorld::new();
    let events = EventCollector::new();
    world.set_collision_listener(events.clone());

    world.add_body(RigidBody::rect(0.0, 0.0, 2.0, 2.0).with_static(true));
    world.add_body(RigidBody::rect(1.0, 1.0, 2.0, 2.0).with_static(true));
    world.step(16.0);

    assert!(events.is_empty());
    assert_eq!(world.last_step_stats().contacts, 1);
}

#[test]
fn fixed_step_catch_up_is_bounded() {
    let mut world = PhysicsWorld::new();
    world.set_gravity(0.0, 10.0);
    world.set_max_step_ms(0.0);
    world.set_fixed_time_step_ms(10.0, 5);
    let id = world.add_body(RigidBody::circle(0.0, 0.0, 1.0));

    world.step(1000.0);

    assert_eq!(world.last_step_stats().substeps, 5);
    assert!(world.accumulator_ms() <= 10.0);
    // Five 10 ms substeps of gravity, not a hundred.
    assert_abs_diff_eq!(world.body(id).expect("body").velocity.y, 0.5, epsilon = 1e-4);
}

#[test]
fn fixed_step_accumulates_small_frames() {
    let mut world = PhysicsWorld::new();
    world.set_fixed_time_step_ms(10.0, 4);

    world.step(4.0);
    assert_eq!(world.last_step_stats().substeps, 0);
    world.step(4.0);
    assert_eq!(world.last_step_stats().substeps, 0);
    world.step(4.0);
    assert_eq!(world.last_step_stats().substeps, 1);
    assert_abs_diff_eq!(world.accumulator_ms(), 2.0, epsilon = 1e-4);
}

#[test]
fn negative_delta_does_nothing() {
    let mut world = PhysicsWorld::new();
    world.set_gravity(0.0, 10.0);
    let id = world.add_body(RigidBody::circle(0.0, 0.0, 1.0).with_velocity(1.0, 0.0));

    world.step(-16.0);

    let body = world.body(id).expect("body");
    assert_eq!(body.position(), Vec2::ZERO);
    assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
}

#[test]
fn removing_bodies_is_idempotent() {
    let mut world = PhysicsWorld::new();
    let a = world.add_body(RigidBody::circle(0.0, 0.0, 1.0));
    let b = world.add_body(RigidBody::circle(0.5, 0.0, 1.0));
    assert_eq!(world.potential_pairs().len(), 1);

    assert!(world.remove_body(a).is_some());
    assert!(world.remove_body(a).is_none());
    assert_eq!(world.body_count(), 1);
    assert!(world.potential_pairs().is_empty());

    world.step(16.0);
    assert!(world.body(b).is_some());
}

#[test]
fn candidate_pairs_are_stable_between_builds() {
    let mut world = PhysicsWorld::new();
    world.set_broadphase_cell_size(8.0);
    for i in 0..30 {
        let x = (i % 6) as f32 * 5.0;
        let y = (i / 6) as f32 * 5.0;
        if i % 2 == 0 {
            world.add_body(RigidBody::circle(x, y, 3.0));
        } else {
            world.add_body(RigidBody::rect(x, y, 4.0, 4.0));
        }
    }

    let first = world.potential_pairs();
    let second = world.potential_pairs();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn invalid_configuration_is_coerced() {
    let config = WorldConfig {
        broadphase_cell_size: -4.0,
        max_step_ms: -1.0,
        fixed_step_ms: -10.0,
        max_sub_steps: 0,
        ..WorldConfig::default()
    };
    let world = PhysicsWorld::with_config(config);

    let applied = world.config();
    assert_eq!(applied.broadphase_cell_size, 1.0);
    assert_eq!(applied.max_step_ms, 0.0);
    assert_eq!(applied.fixed_step_ms, 0.0);
    assert_eq!(applied.max_sub_steps, 1);
}

#[test]
fn config_round_trips_through_world() {
    let config = WorldConfig::default()
        .with_gravity(0.0, 9.8)
        .with_bounds(Rect::new(0.0, 0.0, 640.0, 480.0))
        .with_static_rect(Rect::new(0.0, 400.0, 640.0, 80.0))
        .with_fixed_step(1000.0 / 120.0, 4);

    let world = PhysicsWorld::with_config(config.clone());
    assert_eq!(world.config(), config);
    assert_eq!(world.static_rects().len(), 1);
}

#[test]
fn clearing_terrain_lets_bodies_fall_through() {
    let mut world = PhysicsWorld::new();
    world.set_gravity(0.0, 100.0);
    world.add_static_rect(Rect::new(-10.0, 2.0, 20.0, 2.0));
    let id = world.add_body(RigidBody::circle(0.0, 0.0, 1.0));

    for _ in 0..30 {
        world.step(16.0);
    }
    assert!(world.body(id).expect("body").position().y <= 1.0 + 1e-3);

    world.clear_static_rects();
    for _ in 0..30 {
        world.step(16.0);
    }
    assert!(world.body(id).expect("body").position().y > 2.0);
}
