//! Area of selected drawing curves, open or closed.
//!
//! The crate turns a selection of 2D curves (lines, arcs, circles, ellipses,
//! splines, bulged polylines, hatch loops) into an enclosed area. Closed
//! curves contribute their exact area. Open curves are joined end-to-end
//! when they form a loop; otherwise their samples are reconciled into a
//! closed ring by a convex hull or, failing that, nearest-neighbour ordering.
//!
//! Layout
//! - `geom2`: point-level algorithms (dedup, Graham scan, nearest ordering,
//!   shoelace) and small 2D types (`Affine2`, `Bounds2`, `ClosedLoop`).
//! - `curves`: the closed `Curve` enum, sampling, bulge and NURBS math,
//!   hatch loops, joining of open curves.
//! - `entity`: JSON entity descriptors as stored alongside saved blocks.
//! - `area`: the per-request pipeline and its report.
//! - `preview`: block placement and thumbnail fitting.

pub mod api;
pub mod area;
pub mod curves;
pub mod entity;
pub mod error;
pub mod geom2;
pub mod preview;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{AreaCfg, Pt2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::area::{AreaMethod, AreaReport, AreaRequest, Contribution};
    pub use crate::curves::{Curve, HatchLoop};
    pub use crate::entity::{parse_descriptor_list, EntityDescriptor, StoredEntity};
    pub use crate::error::{AreaError, CurveError, EntityIssue, GeomError};
    pub use crate::geom2::{
        dedup_points, graham_scan, order_nearest_neighbor, shoelace_area, shoelace_signed,
        AreaCfg, ClosedLoop, Pt2,
    };
    pub use crate::preview::{Placement, Rgb, Thumbnail};
}
