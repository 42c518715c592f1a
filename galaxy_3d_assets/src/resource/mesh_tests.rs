/// Tests for the Mesh resource

use super::*;

#[test]
fn test_new_mesh_is_empty() {
    let mesh = Mesh::new();
    assert_eq!(mesh.kind(), ResourceKind::Mesh);
    assert_eq!(mesh.vertex_count(), 0);
    assert_eq!(mesh.footprint(), 0);
    assert!(mesh.bounds().is_none());
}

#[test]
fn test_quad_geometry() {
    let mesh = Mesh::quad();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    // 4 * 12 (positions) + 4 * 12 (normals) + 4 * 8 (uvs) + 6 * 4 (indices)
    assert_eq!(mesh.footprint(), 48 + 48 + 32 + 24);

    let bounds = mesh.bounds().unwrap();
    assert_eq!(bounds.center(), Vec3::ZERO);
    assert_eq!(bounds.extent(), Vec3::new(1.0, 1.0, 0.0));
}

#[test]
fn test_set_geometry_rejects_mismatched_attributes() {
    let mut mesh = Mesh::new();
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];

    let result = mesh.set_geometry(positions.clone(), vec![Vec3::Z], vec![], vec![0, 1, 2]);
    assert!(matches!(result, Err(Error::InvalidResource(_))));

    let result = mesh.set_geometry(positions.clone(), vec![], vec![Vec2::ZERO; 2], vec![0, 1, 2]);
    assert!(result.is_err());
}

#[test]
fn test_set_geometry_rejects_bad_indices() {
    let mut mesh = Mesh::new();
    let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];

    assert!(mesh.set_geometry(positions.clone(), vec![], vec![], vec![0, 1]).is_err());
    assert!(mesh.set_geometry(positions.clone(), vec![], vec![], vec![0, 1, 3]).is_err());
    assert!(mesh.set_geometry(positions, vec![], vec![], vec![0, 1, 2]).is_ok());
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn test_aabb_from_points() {
    let aabb = Aabb::from_points(&[Vec3::new(1.0, -2.0, 3.0), Vec3::new(-1.0, 4.0, 0.0)]).unwrap();
    assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
    assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 3.0));
    assert!(Aabb::from_points(&[]).is_none());
}

#[test]
fn test_unload_releases_geometry() {
    let mut mesh = Mesh::quad();
    let footprint = mesh.footprint();
    mesh.info_mut().mark_loaded(footprint);

    mesh.unload();

    assert!(!mesh.is_in_memory());
    assert_eq!(mesh.vertex_count(), 0);
    assert_eq!(mesh.footprint(), 0);
    assert_eq!(mesh.size(), footprint);
}
