// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Threshold below which a segment is treated as parallel to a plane.
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;
/// Threshold below which a segment is treated as parallel to a plane.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-8;

/// Lazily-initialized vertex tolerance used by the clipper.
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden:
///  1) **Build-time**: set env var `ZFIGHT_TOLERANCE` (e.g. `ZFIGHT_TOLERANCE=1e-5 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before building a [`ZFightConfig`](crate::ZFightConfig)
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        5e-6
    }
}

/// Returns the current vertex tolerance.
/// If not set yet, it tries `ZFIGHT_TOLERANCE` (parsed as the active `Real`) and
/// falls back to the precision default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("ZFIGHT_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `zfight::float_types::set_tolerance(1e-5);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}
