use hashbrown::HashSet;
use nalgebra::Point3;
use zfight::clip::ClipDiagnostic;
use zfight::float_types::Real;
use zfight::{
    ConfigError, FaceId, FaceMesh, PolyMesh, Polygon, ZFightConfig, faces_would_z_fight,
    find_z_fighters, remove_z_fighters,
};

mod support;

use crate::support::{cube_loops, init_tracing, square_loop, unwelded_mesh};

#[test]
fn equal_areas_delete_the_later_face() {
    init_tracing();
    let mesh = unwelded_mesh(&[square_loop(0.0, 0.0, 1.0, 0.0), square_loop(0.0, 0.0, 1.0, 0.0)]);

    let report = find_z_fighters(&mesh, &ZFightConfig::default()).expect("valid config");
    assert_eq!(report.deletions, vec![FaceId(1)]);
    assert_eq!(report.fighting_pairs, 1);
}

#[test]
fn smaller_face_is_deleted_in_either_order() {
    init_tracing();
    let unit = square_loop(0.0, 0.0, 1.0, 0.0);
    let half = square_loop(0.0, 0.0, 0.5, 0.0);
    let config = ZFightConfig::default();

    let big_first = unwelded_mesh(&[unit.clone(), half.clone()]);
    let report = find_z_fighters(&big_first, &config).expect("valid config");
    assert_eq!(report.deletions, vec![FaceId(1)]);

    let small_first = unwelded_mesh(&[half, unit]);
    let report = find_z_fighters(&small_first, &config).expect("valid config");
    assert_eq!(report.deletions, vec![FaceId(0)]);
}

#[test]
fn losing_face_stops_its_own_scan() {
    init_tracing();
    // The half square loses to the first unit square and is never compared
    // against the second; the two unit squares then settle between themselves.
    let mesh = unwelded_mesh(&[
        square_loop(0.0, 0.0, 0.5, 0.0),
        square_loop(0.0, 0.0, 1.0, 0.0),
        square_loop(0.0, 0.0, 1.0, 0.0),
    ]);

    let report = find_z_fighters(&mesh, &ZFightConfig::default()).expect("valid config");
    assert_eq!(report.deletions, vec![FaceId(0), FaceId(2)]);
    assert_eq!(report.faces_scanned, 2);
    assert_eq!(report.pairs_tested, 2);
}

#[test]
fn edge_adjacent_faces_are_never_compared() {
    init_tracing();
    let big = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let inside = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.5, 0.5, 0.0),
    ];
    let config = ZFightConfig::default();

    // On their own the triangles would fight
    assert!(faces_would_z_fight(
        &Polygon::new(big.clone()),
        &Polygon::new(inside.clone()),
        &config
    ));

    let mesh = PolyMesh::from_polygon_soup(&[big, inside]).expect("valid mesh");
    assert_eq!(mesh.linked_faces(FaceId(0)), vec![FaceId(1)]);

    let report = find_z_fighters(&mesh, &config).expect("valid config");
    assert!(report.deletions.is_empty());
    assert_eq!(report.pairs_tested, 0);
}

#[test]
fn separated_planes_survive() {
    let config = ZFightConfig::default();
    let mesh = unwelded_mesh(&[
        square_loop(0.0, 0.0, 1.0, 0.0),
        square_loop(0.0, 0.0, 1.0, 1.5 * config.max_distance),
    ]);
    let report = find_z_fighters(&mesh, &config).expect("valid config");
    assert!(report.deletions.is_empty());
    assert_eq!(report.pairs_tested, 1);
}

fn cube_with_doubled_top() -> PolyMesh {
    let mut loops = cube_loops(1.0);
    let lifted: Vec<Point3<Real>> = loops[1]
        .iter()
        .map(|p| Point3::new(p.x, p.y, p.z + 0.001))
        .collect();
    loops.push(lifted);
    PolyMesh::from_polygon_soup(&loops).expect("valid mesh")
}

#[test]
fn doubled_cube_face_is_removed() {
    init_tracing();
    let mut mesh = cube_with_doubled_top();
    assert_eq!(mesh.face_count(), 7);
    assert_eq!(mesh.vertices().len(), 12);

    let report = remove_z_fighters(&mut mesh, &ZFightConfig::default()).expect("valid config");
    assert_eq!(report.deletions, vec![FaceId(6)]);
    assert_eq!(report.faces_scanned, 6);
    assert_eq!(report.pairs_tested, 5);
    assert!(report.diagnostics.is_empty());

    assert_eq!(mesh.face_count(), 6);
    assert_eq!(mesh.vertices().len(), 8);
    // Closed cube: every face has exactly four neighbours
    for id in mesh.face_ids() {
        assert_eq!(mesh.linked_faces(id).len(), 4);
    }
}

#[test]
fn scan_is_deterministic() {
    let mesh = cube_with_doubled_top();
    let config = ZFightConfig::default();
    let first = find_z_fighters(&mesh, &config).expect("valid config");
    let second = find_z_fighters(&mesh, &config).expect("valid config");
    assert_eq!(first, second);
}

#[test]
fn deletions_are_unique() {
    init_tracing();
    let mut loops = vec![square_loop(0.0, 0.0, 1.0, 0.0); 5];
    loops.push(square_loop(0.1, 0.1, 0.5, 0.0));
    loops.push(square_loop(-0.1, 0.1, 0.5, 0.01));
    let mut mesh = unwelded_mesh(&loops);

    let report = remove_z_fighters(&mut mesh, &ZFightConfig::default()).expect("valid config");
    let unique: HashSet<FaceId> = report.deletions.iter().copied().collect();
    assert_eq!(unique.len(), report.deletions.len());
    assert_eq!(
        report.deletions,
        (1..7).map(FaceId).collect::<Vec<_>>()
    );
    assert_eq!(mesh.face_count(), 1);
}

#[test]
fn invalid_config_leaves_mesh_untouched() {
    let mut mesh = unwelded_mesh(&[square_loop(0.0, 0.0, 1.0, 0.0), square_loop(0.0, 0.0, 1.0, 0.0)]);
    let config = ZFightConfig::default().with_min_overlap_area(-1.0);

    let result = remove_z_fighters(&mut mesh, &config);
    assert_eq!(
        result,
        Err(ConfigError::NegativeThreshold {
            name: "min_overlap_area",
            value: -1.0
        })
    );
    assert_eq!(mesh.face_count(), 2);
}

#[test]
fn strict_mode_ignores_lifted_copies() {
    let mesh = unwelded_mesh(&[
        square_loop(0.0, 0.0, 1.0, 0.0),
        square_loop(0.0, 0.0, 1.0, 0.001),
        square_loop(0.0, 0.0, 1.0, 0.0),
    ]);
    let report = find_z_fighters(&mesh, &ZFightConfig::strict()).expect("valid config");
    assert_eq!(report.deletions, vec![FaceId(2)]);
}

#[test]
fn clip_diagnostics_reach_the_report() {
    init_tracing();
    let sliver = vec![
        Point3::new(0.2, -1e-6, 0.0),
        Point3::new(0.8, -1e-6, 0.0),
        Point3::new(0.5, 0.5, 0.0),
    ];
    let mesh = unwelded_mesh(&[square_loop(0.5, 0.5, 1.0, 0.0), sliver]);

    let report = find_z_fighters(&mesh, &ZFightConfig::default()).expect("valid config");
    assert!(report.deletions.is_empty());
    assert_eq!(report.pairs_tested, 1);
    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(
        report.diagnostics[0],
        ClipDiagnostic::BehindPlane { current, previous } if current < 0.0 && previous < 0.0
    ));
}

/// Faces without any connectivity, deleted by filtering.
struct FaceSoup {
    faces: Vec<Polygon>,
}

impl FaceMesh for FaceSoup {
    fn face_ids(&self) -> Vec<FaceId> {
        (0..self.faces.len()).map(FaceId).collect()
    }

    fn face(&self, id: FaceId) -> &Polygon {
        &self.faces[id.0]
    }

    fn linked_faces(&self, _id: FaceId) -> Vec<FaceId> {
        Vec::new()
    }

    fn delete_faces(&mut self, faces: &HashSet<FaceId>) {
        let mut index = 0;
        self.faces.retain(|_| {
            let keep = !faces.contains(&FaceId(index));
            index += 1;
            keep
        });
    }
}

#[test]
fn works_with_any_face_mesh() {
    let mut soup = FaceSoup {
        faces: vec![
            Polygon::new(square_loop(0.0, 0.0, 0.5, 0.0)),
            Polygon::new(square_loop(5.0, 0.0, 1.0, 0.0)),
            Polygon::new(square_loop(0.0, 0.0, 1.0, 0.0)),
        ],
    };
    let report = remove_z_fighters(&mut soup, &ZFightConfig::default()).expect("valid config");
    assert_eq!(report.deletions, vec![FaceId(0)]);
    assert_eq!(soup.face_count(), 2);
    assert_eq!(soup.faces[0].vertices[0], Point3::new(4.5, -0.5, 0.0));
}
