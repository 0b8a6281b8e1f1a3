//! Tolerance and sampling defaults.
//!
//! Policy
//! - Defaults are fixed constants mirroring the drawing unit conventions of
//!   the host (0.001 length units). `AreaCfg` carries them per request so
//!   callers can override without touching call sites.

/// Distance under which two sampled points are the same point.
pub const EPS: f64 = 1e-3;
/// Endpoint distance under which two open curves are considered joined.
pub const JOIN_TOLERANCE: f64 = 1e-3;
/// Closing gap above which a nearest-neighbour loop is reported as open.
pub const CLOSURE_TOLERANCE: f64 = 1e-3;
/// Interior samples per circular arc.
pub const ARC_SEGMENTS: usize = 8;
/// Segments per spline or elliptical arc.
pub const SPLINE_SEGMENTS: usize = 20;
