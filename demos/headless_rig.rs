//! # Headless Rig Demo
//!
//! Drives a bounds rig through a scripted session without any renderer:
//! optionally loads an OBJ target, picks a corner with a ray, drags it
//! outward, releases, then rotates the target a quarter turn with an edge
//! handle. Run with `RUST_LOG=debug` to follow the rig's own logging.
//!
//! ```text
//! cargo run --example headless_rig -- [path/to/model.obj]
//! ```

use std::collections::HashMap;

use anyhow::Context;
use bounds_rig::prelude::*;
use cgmath::{Deg, One, Rotation, Rotation3};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let geometry: Box<dyn GeometrySource> = match std::env::args().nth(1) {
        Some(path) => Box::new(SceneGeometry::from_obj(&path).with_context(|| format!("loading {}", path))?),
        None => Box::new(SceneGeometry::new().with_root_collider(Aabb::new(
            Vector3::new(-0.5, -0.25, -0.5),
            Vector3::new(0.5, 0.25, 0.5),
        ))),
    };

    let config = RigConfig {
        activation: ActivationPolicy::OnStart,
        padding: Vector3::new(0.02, 0.02, 0.02),
        show_box_display: true,
        ..RigConfig::default()
    };

    let mut target = TargetTransform::default();
    let mut rig = BoundsRig::new(config, geometry);
    rig.init(&mut target)?;
    rig.subscribe(|event| println!("  event: {:?}", event));

    let built = rig.rig().context("rig was not built")?;
    println!("Bounds via {:?}, extents {:?}", built.bounds_method(), built.extents());

    // Pick the top-right-front corner with a ray from in front of the target
    let corner = built.corners()[7].world_position;
    let ray = Ray::new(corner + Vector3::new(0.0, 0.0, 3.0), -Vector3::unit_z());
    let picked = rig.pick(&ray).context("ray missed the rig")?;
    println!("Picked {:?} at {:?}", picked.handle, picked.hit.point);

    let pointer = Pointer {
        id: PointerId(0),
        source: SourceId(0),
        kind: PointerKind::Far,
        pose: PointerPose::new(ray.origin, Quaternion::one()),
        hit: Some(picked.hit),
    };
    rig.handle_event(&PointerEvent::Down(pointer), &target);

    let mut poses = HashMap::new();
    for frame in 1..=30 {
        let offset = Vector3::new(0.02, 0.02, 0.02) * frame as f32;
        poses.insert(pointer.id, PointerPose::new(ray.origin + offset, Quaternion::one()));
        rig.tick(1.0 / 60.0, &mut target, &poses);
    }
    println!("After drag: scale {:?}, position {:?}", target.scale, target.position);
    if let Some(tether) = rig.tether() {
        println!("Tether from {:?} to {:?}", tether.start, tether.end);
    }
    rig.handle_event(&PointerEvent::Up(pointer.id), &target);

    // Rotate a quarter turn about Y with the first Y edge handle
    let built = rig.rig().context("rig was dropped")?;
    let edge = built
        .edges()
        .iter()
        .find(|e| e.axis() == Some(CardinalAxis::Y))
        .context("no Y edge")?;
    let origin = built.frame().origin;
    let start = edge.world_position;
    let pointer = Pointer {
        id: PointerId(1),
        source: SourceId(0),
        kind: PointerKind::Near,
        pose: PointerPose::new(start, Quaternion::one()),
        hit: Some(PointerHit {
            object: edge.id,
            point: start,
        }),
    };
    rig.handle_event(&PointerEvent::Down(pointer), &target);

    poses.clear();
    for frame in 1..=9 {
        let turn = Quaternion::from_angle_y(Deg(10.0 * frame as f32));
        poses.insert(pointer.id, PointerPose::new(origin + turn.rotate_vector(start - origin), Quaternion::one()));
        rig.tick(1.0 / 60.0, &mut target, &poses);
    }
    rig.handle_event(&PointerEvent::SourceLost(SourceId(0)), &target);

    println!(
        "After rotate: +X now points {:?}",
        target.rotation.rotate_vector(Vector3::unit_x())
    );

    let instances = rig.instances();
    println!(
        "Drawing {} corners, {} edges, {} links, {} box ({} bytes of corner data)",
        instances.corners.len(),
        instances.edges.len(),
        instances.links.len(),
        instances.boxes.len(),
        RigInstances::bytes(&instances.corners).len()
    );

    rig.dispose();
    Ok(())
}
