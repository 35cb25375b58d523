use planar_physics::*;

fn main() {
    let mut world = PhysicsWorld::new();
    world.add_body(RigidBody::rect(40.0, -10.0, 20.0, 20.0).with_static(true));
    world.add_body(RigidBody::circle(20.0, 0.0, 4.0).with_sensor(true));
    world.add_body(RigidBody::circle(80.0, 0.0, 6.0));

    let query = RaycastQuery::from_coords(0.0, 0.0, 100.0, 0.0);
    if let Some(hit) = world.raycast_query(&query) {
        println!(
            "Ray hit body {:?} at {:?} (normal {:?}, distance {:.2})",
            hit.body, hit.point, hit.normal, hit.distance
        );
    }

    if let Some(hit) = world.raycast_with_filter(&query, |body| !body.is_sensor) {
        println!("Ignoring sensors, first solid hit at distance {:.2}", hit.distance);
    }

    match world.raycast(0.0, 50.0, 100.0, 50.0) {
        Some(hit) => println!("Unexpected hit {:?}", hit.body),
        None => println!("Ray above the scene hits nothing"),
    }
}
