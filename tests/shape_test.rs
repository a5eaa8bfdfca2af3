mod common;

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use common::fibonacci_directions;
use sdf_shapes::{
    Sdf, SdfShape, Shape, SignedDistance, TraceConfig,
    primitives::{Cone, Cube, Sphere},
    ray::Ray,
    types::{Point, Vector},
};

#[derive(Debug, PartialEq)]
struct Material {
    name: &'static str,
}

fn chalk() -> Arc<Material> {
    Arc::new(Material { name: "chalk" })
}

#[test]
fn ray_hits_unit_sphere() {
    let shape = SdfShape::new(Sphere::new(1.0), chalk());
    let ray = Ray::new(Point::new(0.0, 0.0, -5.0), Vector::z());
    let hit = shape.intersect(&ray).expect("ray should hit the sphere");
    assert_abs_diff_eq!(hit.t, 4.0, epsilon = 1e-3);
    assert_abs_diff_eq!(hit.position(&ray).z, -1.0, epsilon = 1e-3);
}

#[test]
fn hit_refers_back_to_its_shape() {
    let material = chalk();
    let shape = SdfShape::new(Sphere::new(1.0), Arc::clone(&material));
    let ray = Ray::new(Point::new(0.0, -4.0, 0.0), Vector::y());
    let hit = shape.intersect(&ray).unwrap();
    let p = hit.position(&ray);
    assert_abs_diff_eq!(hit.shape.normal_at(&p), -Vector::y(), epsilon = 1e-6);
    assert!(std::ptr::eq(hit.shape.material_at(&p), &*material));
}

#[test]
fn ray_pointing_away_misses() {
    let shape = SdfShape::new(Sphere::new(1.0), chalk());
    let ray = Ray::new(Point::new(10.0, 10.0, 10.0), Vector::new(1.0, 1.0, 1.0));
    assert!(shape.intersect(&ray).is_none());
}

#[test]
fn ray_beside_the_box_misses() {
    let shape = SdfShape::new(Sphere::new(1.0), chalk());
    let ray = Ray::new(Point::new(3.0, 0.0, -5.0), Vector::z());
    assert!(shape.intersect(&ray).is_none());
}

#[test]
fn ray_through_box_corner_misses_sphere() {
    // Enters the bounding box but passes the sphere, so marching leaves through t2.
    let shape = SdfShape::new(Sphere::new(1.0), chalk());
    let ray = Ray::new(Point::new(0.9, 0.9, -5.0), Vector::z());
    assert!(shape.intersect(&ray).is_none());
}

#[test]
fn ray_hits_cone_base_from_below() {
    let cone = Cone::new(1.0, 0.0, 2.0, 0.0).unwrap();
    let shape = SdfShape::new(cone, chalk());
    let ray = Ray::new(Point::new(0.0, 0.0, -5.0), Vector::z());
    let hit = shape.intersect(&ray).expect("ray should hit the base cap");
    assert_abs_diff_eq!(hit.t, 4.0, epsilon = 1e-3);
    assert_abs_diff_eq!(shape.normal_at(&hit.position(&ray)), -Vector::z(), epsilon = 1e-6);
}

#[test]
fn ray_hits_translated_composite() {
    let dimple = Sdf::from(Sphere::new(0.6)).translate(Vector::new(0.0, 0.0, -1.0));
    let sdf = Sdf::from(Cube::new(Vector::repeat(2.0)))
        .difference(dimple)
        .translate(Vector::new(0.0, 0.0, 2.0));
    let shape = SdfShape::new(sdf, chalk());

    // Down the axis the ray enters the dimple and stops at its floor.
    let axis = Ray::new(Point::new(0.0, 0.0, -5.0), Vector::z());
    let hit = shape.intersect(&axis).unwrap();
    assert_abs_diff_eq!(hit.t, 6.6, epsilon = 1e-3);

    // Away from the dimple it stops at the cube's front face.
    let offset = Ray::new(Point::new(0.7, 0.7, -5.0), Vector::z());
    let hit = shape.intersect(&offset).unwrap();
    assert_abs_diff_eq!(hit.t, 6.0, epsilon = 1e-3);
}

#[test]
fn start_on_surface_backs_out_once() {
    let shape = SdfShape::new(Sphere::new(1.0), chalk());
    let ray = Ray::new(Point::new(0.0, 0.0, -1.0), Vector::z());
    let hit = shape.intersect(&ray).unwrap();
    assert_abs_diff_eq!(hit.t, 0.0, epsilon = 1e-3);
}

#[test]
fn start_just_outside_surface_takes_minimum_step() {
    // Start 5e-4 outside the sphere, inside its box, heading straight in.
    let direction = Vector::new(-0.6, 0.0, 0.8);
    let origin = Point::from(-direction * 1.0005);
    let ray = Ray::new(origin, direction);
    let budget = |max_steps: usize| {
        SdfShape::new(Sphere::new(1.0), chalk()).with_config(TraceConfig {
            max_steps,
            ..Default::default()
        })
    };

    let shape = budget(1000);
    let hit = shape.intersect(&ray).expect("ray starts next to the surface");
    assert_abs_diff_eq!(hit.t, 5e-4, epsilon = 1e-5);
    assert!(shape.sdf().evaluate(&hit.position(&ray)).abs() < 1e-5);

    // The first step is clamped up to the jump size, overshoots into the
    // sphere and is backed out, so converging takes four evaluations.
    assert!(budget(3).intersect(&ray).is_none());
    assert!(budget(4).intersect(&ray).is_some());
}

#[test]
fn exhausting_the_step_budget_is_a_miss() {
    let far = Sdf::from(Sphere::new(1.0)).translate(Vector::new(0.0, 0.0, -10.0));
    let sdf = Sdf::from(Sphere::new(1.0)).union(far);
    let ray = Ray::new(Point::new(0.0, 0.0, -5.0), Vector::z());

    let patient = SdfShape::new(sdf.clone(), chalk());
    assert_abs_diff_eq!(patient.intersect(&ray).unwrap().t, 4.0, epsilon = 1e-3);

    let hasty = SdfShape::new(sdf, chalk()).with_config(TraceConfig {
        max_steps: 1,
        ..Default::default()
    });
    assert!(hasty.intersect(&ray).is_none());
}

#[test]
fn sphere_normals_point_outward() {
    let shape = SdfShape::new(Sphere::new(1.0), chalk());
    for d in fibonacci_directions(100) {
        let n = shape.normal_at(&Point::from(d));
        assert_abs_diff_eq!(n, d, epsilon = 1e-6);
    }
}

#[test]
fn flat_faces_have_axis_normals() {
    let shape = SdfShape::new(Cube::new(Vector::repeat(2.0)), chalk());
    assert_abs_diff_eq!(shape.normal_at(&Point::new(1.0, 0.2, -0.3)), Vector::x(), epsilon = 1e-9);
    assert_abs_diff_eq!(shape.normal_at(&Point::new(0.1, -1.0, 0.4)), -Vector::y(), epsilon = 1e-9);
}

#[test]
fn uv_and_material_are_constant() {
    let material = chalk();
    let mut shape = SdfShape::new(Sphere::new(1.0), Arc::clone(&material));
    shape.compile();
    for p in [Point::new(1.0, 0.0, 0.0), Point::new(0.0, 0.0, -1.0)] {
        assert_eq!(shape.uv(&p), Vector::zeros());
        assert_eq!(shape.material_at(&p), &Material { name: "chalk" });
    }
}

#[test]
fn shapes_trace_concurrently() {
    let shape = SdfShape::new(Sphere::new(1.0), chalk());
    std::thread::scope(|s| {
        let handles: Vec<_> = fibonacci_directions(8)
            .into_iter()
            .map(|d| {
                let shape = &shape;
                s.spawn(move || {
                    let ray = Ray::new(Point::from(d * 5.0), -d);
                    shape.intersect(&ray).map(|hit| hit.t)
                })
            })
            .collect();
        for handle in handles {
            let t = handle.join().unwrap().expect("every ray aims at the center");
            assert_abs_diff_eq!(t, 4.0, epsilon = 1e-3);
        }
    });
}
