//! Detection and removal of **z-fighting faces**: pairs of faces so nearly
//! coincident in position and orientation that they flicker when rendered.
//!
//! Two faces fight when their normals are (anti-)parallel within a tolerance,
//! they lie close to the same plane, and the area of their clipped
//! intersection is large enough. Faces sharing an edge are never compared,
//! so folds and hinges survive. Of a fighting pair the smaller face is
//! deleted.
//!
//! ```
//! use nalgebra::Point3;
//! use zfight::{FaceMesh, PolyMesh, ZFightConfig, remove_z_fighters};
//!
//! let mut mesh = PolyMesh::new(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!         Point3::new(0.25, 0.25, 0.0),
//!         Point3::new(0.75, 0.25, 0.0),
//!         Point3::new(0.75, 0.75, 0.0),
//!         Point3::new(0.25, 0.75, 0.0),
//!     ],
//!     vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]],
//! )?;
//!
//! let report = remove_z_fighters(&mut mesh, &ZFightConfig::default())?;
//! assert_eq!(report.deletions.len(), 1);
//! assert_eq!(mesh.face_count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//!
//! # Logging
//! Progress and clipping anomalies are emitted through `tracing`; install a
//! subscriber (e.g. `tracing_subscriber::fmt`) to see them.

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod clip;
pub mod config;
pub mod errors;
pub mod float_types;
pub mod mesh;
pub mod overlap;
pub mod plane;
pub mod polygon;
pub mod predicate;
pub mod resolve;
pub mod traits;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use config::{OverlapTest, ZFightConfig};
pub use errors::{ConfigError, MeshError};
pub use mesh::{FaceId, PolyMesh};
pub use polygon::Polygon;
pub use predicate::{PairVerdict, evaluate_pair, faces_would_z_fight};
pub use resolve::{ZFightReport, find_z_fighters, remove_z_fighters};
pub use traits::FaceMesh;
