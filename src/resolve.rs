//! The resolution scan: decides which faces of a mesh to delete.
//!
//! Every face is tested, in mesh order, against the faces that are still
//! unresolved and not edge-adjacent to it. For a fighting pair the smaller
//! face is deleted; on equal areas the later face goes. A face that lost is
//! never tested again, and a face that has been scanned is not offered as a
//! comparison partner to later faces.

use crate::clip::ClipDiagnostic;
use crate::config::ZFightConfig;
use crate::errors::ConfigError;
use crate::mesh::FaceId;
use crate::predicate::evaluate_pair;
use crate::traits::FaceMesh;
use hashbrown::HashSet;
use tracing::{debug, info, trace};

/// An ordered set of faces with idempotent removal.
///
/// Iteration follows insertion order, skipping removed faces.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    order: Vec<FaceId>,
    live: HashSet<FaceId>,
}

impl CandidateSet {
    pub fn new(faces: &[FaceId]) -> Self {
        CandidateSet {
            order: faces.to_vec(),
            live: faces.iter().copied().collect(),
        }
    }

    /// Remove `face` if present. Returns whether it was present.
    pub fn remove(&mut self, face: FaceId) -> bool {
        self.live.remove(&face)
    }

    pub fn contains(&self, face: FaceId) -> bool {
        self.live.contains(&face)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Remaining faces in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.order.iter().copied().filter(|f| self.live.contains(f))
    }

    /// A copy of the remaining faces, unaffected by later removals.
    pub fn snapshot(&self) -> Vec<FaceId> {
        self.iter().collect()
    }
}

/// `candidates` without `face` and without every face linked to it by an edge.
pub fn unlinked_candidates<M: FaceMesh + ?Sized>(
    mesh: &M,
    face: FaceId,
    candidates: &[FaceId],
) -> Vec<FaceId> {
    let mut excluded: HashSet<FaceId> = mesh.linked_faces(face).into_iter().collect();
    excluded.insert(face);
    candidates
        .iter()
        .copied()
        .filter(|f| !excluded.contains(f))
        .collect()
}

/// Result of a z-fight scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZFightReport {
    /// Faces to delete, duplicate-free, in the order they lost
    pub deletions: Vec<FaceId>,
    /// Faces that were scanned as the primary face
    pub faces_scanned: usize,
    /// Predicate evaluations performed
    pub pairs_tested: usize,
    /// Evaluations that found a fighting pair
    pub fighting_pairs: usize,
    /// Clipping anomalies collected from all evaluations
    pub diagnostics: Vec<ClipDiagnostic>,
}

impl ZFightReport {
    /// The deletions as a set, ready for [`FaceMesh::delete_faces`].
    pub fn deletion_set(&self) -> HashSet<FaceId> {
        self.deletions.iter().copied().collect()
    }
}

/// Decide which faces of `mesh` to delete, without modifying it.
///
/// ## Errors
/// If `config` fails [`ZFightConfig::validate`].
pub fn find_z_fighters<M: FaceMesh + ?Sized>(
    mesh: &M,
    config: &ZFightConfig,
) -> Result<ZFightReport, ConfigError> {
    config.validate()?;

    let faces = mesh.face_ids();
    info!("Scanning {} faces for z-fighting", faces.len());

    let mut outer = CandidateSet::new(&faces);
    let mut inner = CandidateSet::new(&faces);
    let mut report = ZFightReport::default();

    for &f1 in &faces {
        if !outer.contains(f1) {
            continue;
        }
        report.faces_scanned += 1;

        let partners = unlinked_candidates(mesh, f1, &inner.snapshot());
        let mut lost_outer = Vec::new();
        let mut f1_deleted = false;

        for f2 in partners {
            let evaluation = evaluate_pair(mesh.face(f1), mesh.face(f2), config);
            report.pairs_tested += 1;
            report.diagnostics.extend(evaluation.diagnostics);
            trace!(?f1, ?f2, verdict = ?evaluation.verdict, "pair evaluated");

            if !evaluation.verdict.is_fighting() {
                continue;
            }
            report.fighting_pairs += 1;

            if mesh.face_area(f1) >= mesh.face_area(f2) {
                debug!(?f1, ?f2, "faces fight, deleting the second");
                report.deletions.push(f2);
                inner.remove(f2);
                lost_outer.push(f2);
            } else {
                debug!(?f1, ?f2, "faces fight, deleting the first");
                report.deletions.push(f1);
                f1_deleted = inner.remove(f1);
                break;
            }
        }

        for f in lost_outer {
            outer.remove(f);
        }
        if !f1_deleted {
            inner.remove(f1);
        }
        debug!(
            face = ?f1,
            remaining = inner.len(),
            "face resolved"
        );
    }

    let mut seen = HashSet::new();
    report.deletions.retain(|f| seen.insert(*f));

    info!(
        "Found {} z-fighting faces after {} pair tests",
        report.deletions.len(),
        report.pairs_tested
    );
    Ok(report)
}

/// Find z-fighting faces and delete them from `mesh`.
///
/// ## Errors
/// If `config` fails [`ZFightConfig::validate`]; the mesh is left untouched.
pub fn remove_z_fighters<M: FaceMesh + ?Sized>(
    mesh: &mut M,
    config: &ZFightConfig,
) -> Result<ZFightReport, ConfigError> {
    let before = mesh.face_count();
    let report = find_z_fighters(&*mesh, config)?;
    mesh.delete_faces(&report.deletion_set());
    info!(
        "Deleted {} faces, mesh now has {} faces (was {})",
        report.deletions.len(),
        mesh.face_count(),
        before
    );
    Ok(report)
}
