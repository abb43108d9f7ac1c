//! # Polygon Tests

use super::*;
use crate::vertex_data::SideOrientation;
use approx::assert_relative_eq;

fn square_with_hole() -> Polygon2D {
    let outer = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(10.0, 10.0),
        Vec2::new(0.0, 10.0),
    ];
    let hole = vec![
        Vec2::new(3.0, 3.0),
        Vec2::new(3.0, 7.0),
        Vec2::new(7.0, 7.0),
        Vec2::new(7.0, 3.0),
    ];
    Polygon2D::with_holes(outer, vec![hole])
}

fn face_normal(data: &VertexData, [a, b, c]: [u32; 3]) -> Vec3 {
    let pa = data.position(a as usize);
    (data.position(b as usize) - pa).cross(data.position(c as usize) - pa)
}

#[test]
fn test_polygon2d_square() {
    let square = Polygon2D::square(Vec2::new(10.0, 20.0), false);
    assert_eq!(square.vertex_count(), 4);
    assert!(!square.has_holes());
    assert_eq!(square.outer[2], Vec2::new(10.0, 20.0));
}

#[test]
fn test_polygon2d_circle() {
    let circle = Polygon2D::circle(5.0, 32);
    assert_eq!(circle.vertex_count(), 32);
    assert_relative_eq!(circle.outer[0].x, 5.0);
    assert_relative_eq!(circle.outer[0].y, 0.0);
}

#[test]
fn test_flat_polygon_faces_up() {
    let data = create_polygon(&PolygonOptions {
        shape: Polygon2D::circle(1.0, 12),
        depth: 3.0,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(data.vertex_count(), 12);
    assert_eq!(data.triangle_count(), 10);
    for t in data.triangles() {
        assert!(face_normal(&data, t).y > 0.0);
    }
    assert!(data.validate().is_ok());
}

#[test]
fn test_clockwise_input_is_normalized() {
    let mut shape = Polygon2D::square(Vec2::splat(2.0), true);
    shape.outer.reverse();
    let data = create_polygon(&PolygonOptions {
        shape,
        ..Default::default()
    })
    .unwrap();
    for t in data.triangles() {
        assert!(face_normal(&data, t).y > 0.0);
    }
}

#[test]
fn test_closing_point_is_dropped() {
    let mut shape = Polygon2D::square(Vec2::splat(2.0), false);
    shape.outer.push(Vec2::ZERO);
    let data = create_polygon(&PolygonOptions {
        shape,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(data.vertex_count(), 4);
}

#[test]
fn test_extruded_square_counts() {
    let data = extrude_polygon(&PolygonOptions {
        shape: Polygon2D::square(Vec2::splat(10.0), true),
        depth: 2.0,
        ..Default::default()
    })
    .unwrap();
    // top 4 + bottom 4 + 4 walls of 4
    assert_eq!(data.vertex_count(), 24);
    assert_eq!(data.triangle_count(), 12);
    let (min, max) = data.bounding_box();
    assert_relative_eq!(min.y, -2.0);
    assert_relative_eq!(max.y, 0.0);
}

#[test]
fn test_extruded_faces_point_outward() {
    let data = extrude_polygon(&PolygonOptions {
        shape: Polygon2D::square(Vec2::splat(10.0), true),
        depth: 2.0,
        ..Default::default()
    })
    .unwrap();
    let center = Vec3::new(0.0, -1.0, 0.0);
    for t in data.triangles() {
        let centroid = t
            .iter()
            .map(|&i| data.position(i as usize))
            .sum::<Vec3>()
            / 3.0;
        assert!(face_normal(&data, t).dot(centroid - center) > 0.0);
    }
}

#[test]
fn test_extruded_hole_walls_face_the_hole() {
    let data = extrude_polygon(&PolygonOptions {
        shape: square_with_hole(),
        depth: 1.0,
        ..Default::default()
    })
    .unwrap();
    // top 8 + bottom 8 + 8 walls of 4
    assert_eq!(data.vertex_count(), 48);
    assert_eq!(data.triangle_count(), 8 + 8 + 16);

    // hole walls are the last 16 vertices; the hole is centered on (5, -5)
    let hole_center = Vec3::new(5.0, 0.0, -5.0);
    for i in 32..48 {
        let p = data.position(i);
        let toward = Vec3::new(hole_center.x - p.x, 0.0, hole_center.z - p.z);
        assert!(data.normal(i).dot(toward) > 0.0);
    }
}

#[test]
fn test_wall_uv_spans() {
    let options = PolygonOptions {
        shape: Polygon2D::square(Vec2::splat(10.0), false),
        depth: 1.0,
        ..Default::default()
    };
    let data = extrude_polygon(&options).unwrap();
    // last wall edge ends after the full perimeter: 40 / width 10
    assert_relative_eq!(data.uv(21).x, 4.0, epsilon = 1e-5);

    let wrapped = extrude_polygon(&PolygonOptions { wrap: true, ..options }).unwrap();
    assert_relative_eq!(wrapped.uv(21).x, 1.0, epsilon = 1e-5);
    assert_relative_eq!(wrapped.uv(21).y, 1.0);
    assert_relative_eq!(wrapped.uv(23).y, 0.0);
}

#[test]
fn test_face_colors_per_group() {
    let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
    let green = Vec4::new(0.0, 1.0, 0.0, 1.0);
    let blue = Vec4::new(0.0, 0.0, 1.0, 1.0);
    let data = extrude_polygon(&PolygonOptions {
        shape: Polygon2D::square(Vec2::splat(1.0), false),
        depth: 1.0,
        face_colors: Some([red, green, blue]),
        ..Default::default()
    })
    .unwrap();
    let colors = data.colors.as_ref().unwrap();
    assert_eq!(colors.len(), data.vertex_count() * 4);
    assert_eq!(&colors[0..4], &red.to_array());
    assert_eq!(&colors[4 * 4..4 * 4 + 4], &blue.to_array());
    assert_eq!(&colors[8 * 4..8 * 4 + 4], &green.to_array());
}

#[test]
fn test_double_sided_polygon() {
    let data = create_polygon(&PolygonOptions {
        shape: Polygon2D::square(Vec2::splat(1.0), false),
        sides: SideOptions::new(SideOrientation::Double),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(data.vertex_count(), 8);
    assert_eq!(data.triangle_count(), 4);
}

#[test]
fn test_too_few_points_is_invalid() {
    let result = create_polygon(&PolygonOptions {
        shape: Polygon2D::new(vec![Vec2::ZERO, Vec2::X]),
        ..Default::default()
    });
    assert!(matches!(result, Err(GeometryError::InvalidParameter { .. })));
}

struct FailingTriangulator;

impl Triangulator for FailingTriangulator {
    fn triangulate(&self, _: &[f64], _: &[usize]) -> GeometryResult<Vec<usize>> {
        Err(GeometryError::triangulation("self-intersecting contour"))
    }
}

struct OutOfRangeTriangulator;

impl Triangulator for OutOfRangeTriangulator {
    fn triangulate(&self, _: &[f64], _: &[usize]) -> GeometryResult<Vec<usize>> {
        Ok(vec![0, 1, 99])
    }
}

#[test]
fn test_triangulator_failure_is_propagated() {
    let options = PolygonOptions {
        shape: Polygon2D::square(Vec2::ONE, false),
        depth: 1.0,
        ..Default::default()
    };
    assert!(matches!(
        extrude_polygon_with(&options, &FailingTriangulator),
        Err(GeometryError::ExternalCollaborator { collaborator: "triangulator", .. })
    ));
    assert!(extrude_polygon_with(&options, &OutOfRangeTriangulator).is_err());
}
