//! Curated surface for callers embedding the area pipeline.
//!
//! Re-exports the types a host needs to build a request, read a report and
//! render a preview, so callers do not depend on the module layout.

// Point-level algorithms
pub use crate::geom2::{
    dedup_points, graham_scan, order_nearest_neighbor, shoelace_area, shoelace_signed, Affine2,
    AreaCfg, Bounds2, ClosedLoop, NearestLoop, Pt2,
};
// Curves
pub use crate::curves::{
    bulge_arc, join_open_curves, Arc, BulgeArc, Circle, Curve, Ellipse, HatchEdge, HatchLoop, Line,
    Polyline, Spline,
};
// Requests and reports
pub use crate::area::{AreaMethod, AreaReport, AreaRequest, AreaStage, Contribution};
// Stored blocks
pub use crate::entity::{
    curves_from_descriptors, parse_descriptor_list, EntityDescriptor, HatchLoopDescriptor,
    StoredEntity,
};
// Previews
pub use crate::preview::{fit_to_thumbnail, Placement, Rgb, Thumbnail};
pub use crate::error::{AreaError, CurveError, DescriptorError, EntityIssue, GeomError};
