//! Entity descriptors as persisted with saved blocks.
//!
//! A stored block row is `{ Id, Name, Data, CreatedAt }` where `Data` is the
//! JSON text of a descriptor list. Keys are PascalCase; points are `[x, y]`
//! or `[x, y, z]` arrays (z is ignored). Unknown keys are ignored so rows
//! written by newer tools still load.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::curves::{Arc, Circle, Curve, Ellipse, HatchEdge, HatchLoop, Line, Polyline, Spline};
use crate::error::{DescriptorError, EntityIssue};
use crate::geom2::{AreaCfg, Pt2};

/// One row of the stored-entities table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoredEntity {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// JSON text of a descriptor list.
    pub data: String,
    #[serde(default)]
    pub created_at: String,
}

impl StoredEntity {
    pub fn descriptors(&self) -> Result<Vec<EntityDescriptor>, DescriptorError> {
        parse_descriptor_list(&self.data)
    }

    /// Build a row from curves; `created_at` is left to the caller.
    pub fn from_curves(id: i64, name: impl Into<String>, curves: &[Curve]) -> Result<Self, DescriptorError> {
        let list: Vec<EntityDescriptor> = curves.iter().map(EntityDescriptor::from_curve).collect();
        Ok(Self {
            id,
            name: name.into(),
            data: serde_json::to_string(&list)?,
            created_at: String::new(),
        })
    }
}

/// Serialized description of one drawing entity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityDescriptor {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bulges: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_axis: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_param: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_param: Option<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub knots: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fit_points: Vec<Vec<f64>>,
    /// Direction of an arc edge inside a hatch loop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_clockwise: Option<bool>,
    /// Boundary loops of a hatch.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loops: Vec<HatchLoopDescriptor>,
}

/// One hatch boundary loop: either `Points`/`Bulges` or a list of `Edges`
/// (Line, Arc, Ellipse or Spline descriptors).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HatchLoopDescriptor {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bulges: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<EntityDescriptor>,
}

/// Parse the `Data` column: a JSON array of descriptors.
pub fn parse_descriptor_list(json: &str) -> Result<Vec<EntityDescriptor>, DescriptorError> {
    Ok(serde_json::from_str(json)?)
}

/// Convert descriptors, skipping the ones that do not describe a usable curve.
///
/// Returns the curves paired with their descriptor index, plus one issue per
/// skipped descriptor. A hatch yields one closed curve per boundary loop, all
/// under the hatch's index.
pub fn curves_from_descriptors(
    list: &[EntityDescriptor],
    cfg: &AreaCfg,
) -> (Vec<(usize, Curve)>, Vec<EntityIssue>) {
    let mut curves = Vec::with_capacity(list.len());
    let mut issues = Vec::new();
    for (i, d) in list.iter().enumerate() {
        match d.to_curves(cfg) {
            Ok(cs) => curves.extend(cs.into_iter().map(|c| (i, c))),
            Err(e) => {
                tracing::warn!(index = i, kind = %d.kind, error = %e, "skipping entity descriptor");
                issues.push(EntityIssue::new(i, e.to_string()));
            }
        }
    }
    (curves, issues)
}

fn point(v: &[f64]) -> Result<Pt2, DescriptorError> {
    match v {
        [x, y] | [x, y, _] => Ok(Vector2::new(*x, *y)),
        _ => Err(DescriptorError::BadPoint(v.len())),
    }
}

fn points(vs: &[Vec<f64>]) -> Result<Vec<Pt2>, DescriptorError> {
    vs.iter().map(|v| point(v)).collect()
}

fn required<T: Copy>(v: Option<T>, kind: &'static str, field: &'static str) -> Result<T, DescriptorError> {
    v.ok_or(DescriptorError::MissingField { kind, field })
}

impl HatchLoopDescriptor {
    fn to_hatch_loop(&self) -> Result<HatchLoop, DescriptorError> {
        if !self.edges.is_empty() {
            let edges = self
                .edges
                .iter()
                .map(EntityDescriptor::to_hatch_edge)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(HatchLoop::Edges(edges));
        }
        if self.points.is_empty() {
            return Err(DescriptorError::MissingField {
                kind: "Hatch",
                field: "Points",
            });
        }
        Ok(HatchLoop::Polyline {
            vertices: points(&self.points)?,
            bulges: self.bulges.clone(),
        })
    }
}

impl EntityDescriptor {
    /// Curves for this descriptor: one for a plain entity, one closed
    /// polyline per boundary loop for a hatch.
    pub fn to_curves(&self, cfg: &AreaCfg) -> Result<Vec<Curve>, DescriptorError> {
        if !self.kind.eq_ignore_ascii_case("hatch") {
            return Ok(vec![self.to_curve()?]);
        }
        let mut loops: Vec<HatchLoop> = self
            .loops
            .iter()
            .map(HatchLoopDescriptor::to_hatch_loop)
            .collect::<Result<_, _>>()?;
        if !self.points.is_empty() {
            loops.push(HatchLoop::Polyline {
                vertices: points(&self.points)?,
                bulges: self.bulges.clone(),
            });
        }
        if loops.is_empty() {
            return Err(DescriptorError::MissingField {
                kind: "Hatch",
                field: "Loops",
            });
        }
        loops
            .iter()
            .map(|l| l.to_curve(cfg).map_err(DescriptorError::from))
            .collect()
    }

    fn to_hatch_edge(&self) -> Result<HatchEdge, DescriptorError> {
        let ccw = self.counter_clockwise.unwrap_or(true);
        match self.to_curve()? {
            Curve::Line(l) => Ok(HatchEdge::Line {
                start: l.start,
                end: l.end,
            }),
            Curve::Arc(a) => Ok(HatchEdge::CircularArc {
                center: a.center,
                radius: a.radius,
                start_angle: a.start_angle,
                end_angle: a.end_angle,
                counter_clockwise: ccw,
            }),
            Curve::Ellipse(e) => Ok(HatchEdge::EllipticArc {
                center: e.center,
                major_axis: e.major_axis,
                ratio: e.ratio,
                start_angle: e.start_param,
                end_angle: e.end_param,
                counter_clockwise: ccw,
            }),
            Curve::Spline(sp) => Ok(HatchEdge::Spline(sp)),
            _ => Err(DescriptorError::UnknownType(format!("{} hatch edge", self.kind))),
        }
    }

    /// Build the curve this descriptor stands for and validate it.
    pub fn to_curve(&self) -> Result<Curve, DescriptorError> {
        let curve = match self.kind.to_ascii_lowercase().as_str() {
            "line" => {
                let pts = points(&self.points)?;
                if pts.len() < 2 {
                    return Err(DescriptorError::MissingField {
                        kind: "Line",
                        field: "Points",
                    });
                }
                Curve::Line(Line {
                    start: pts[0],
                    end: pts[1],
                })
            }
            "arc" => Curve::Arc(Arc {
                center: self.center_point("Arc")?,
                radius: required(self.radius, "Arc", "Radius")?,
                start_angle: required(self.start_angle, "Arc", "StartAngle")?,
                end_angle: required(self.end_angle, "Arc", "EndAngle")?,
            }),
            "circle" => Curve::Circle(Circle {
                center: self.center_point("Circle")?,
                radius: required(self.radius, "Circle", "Radius")?,
            }),
            "ellipse" => {
                let axis = self.major_axis.as_deref().ok_or(DescriptorError::MissingField {
                    kind: "Ellipse",
                    field: "MajorAxis",
                })?;
                Curve::Ellipse(Ellipse {
                    center: self.center_point("Ellipse")?,
                    major_axis: point(axis)?,
                    ratio: required(self.radius_ratio, "Ellipse", "RadiusRatio")?,
                    start_param: self.start_param.unwrap_or(0.0),
                    end_param: self.end_param.unwrap_or(std::f64::consts::TAU),
                })
            }
            "spline" => Curve::Spline(Spline {
                degree: self.degree.unwrap_or(3),
                control_points: points(&self.points)?,
                knots: self.knots.clone(),
                weights: self.weights.clone(),
                fit_points: points(&self.fit_points)?,
                closed: self.closed,
            }),
            "polyline" | "lwpolyline" | "polyline2d" => Curve::Polyline(Polyline {
                vertices: points(&self.points)?,
                bulges: self.bulges.clone(),
                closed: self.closed,
            }),
            _ => return Err(DescriptorError::UnknownType(self.kind.clone())),
        };
        curve.validate()?;
        Ok(curve)
    }

    fn center_point(&self, kind: &'static str) -> Result<Pt2, DescriptorError> {
        let c = self
            .center
            .as_deref()
            .ok_or(DescriptorError::MissingField { kind, field: "Center" })?;
        point(c)
    }

    /// Descriptor for `curve`, as written to the `Data` column.
    pub fn from_curve(curve: &Curve) -> Self {
        let xy = |p: &Pt2| vec![p.x, p.y];
        match curve {
            Curve::Line(l) => Self {
                kind: "Line".into(),
                points: vec![xy(&l.start), xy(&l.end)],
                ..Self::default()
            },
            Curve::Arc(a) => Self {
                kind: "Arc".into(),
                center: Some(xy(&a.center)),
                radius: Some(a.radius),
                start_angle: Some(a.start_angle),
                end_angle: Some(a.end_angle),
                ..Self::default()
            },
            Curve::Circle(c) => Self {
                kind: "Circle".into(),
                center: Some(xy(&c.center)),
                radius: Some(c.radius),
                ..Self::default()
            },
            Curve::Ellipse(e) => Self {
                kind: "Ellipse".into(),
                center: Some(xy(&e.center)),
                major_axis: Some(xy(&e.major_axis)),
                radius_ratio: Some(e.ratio),
                start_param: Some(e.start_param),
                end_param: Some(e.end_param),
                ..Self::default()
            },
            Curve::Spline(s) => Self {
                kind: "Spline".into(),
                points: s.control_points.iter().map(xy).collect(),
                degree: Some(s.degree),
                knots: s.knots.clone(),
                weights: s.weights.clone(),
                fit_points: s.fit_points.iter().map(xy).collect(),
                closed: s.closed,
                ..Self::default()
            },
            Curve::Polyline(p) => Self {
                kind: "Polyline".into(),
                points: p.vertices.iter().map(xy).collect(),
                bulges: p.bulges.clone(),
                closed: p.closed,
                ..Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurveError;
    use nalgebra::vector;

    const ROW_DATA: &str = r#"[
        {"Type": "Polyline", "Points": [[0,0,0],[4,0,0],[4,3,0],[0,3,0]], "Bulges": [0,0,0,0], "Closed": true},
        {"Type": "Arc", "Center": [0,0], "Radius": 2.0, "StartAngle": 0.0, "EndAngle": 1.5707963267948966},
        {"Type": "Ellipse", "Center": [1,1], "MajorAxis": [3,0], "RadiusRatio": 0.5, "StartParam": 0.0, "EndParam": 3.141592653589793},
        {"Type": "Spline", "Points": [[0,0],[1,2],[3,2],[4,0]], "Degree": 3},
        {"Type": "Text", "Value": "ignored"}
    ]"#;

    #[test]
    fn parses_descriptor_list_and_skips_unknown() {
        let list = parse_descriptor_list(ROW_DATA).unwrap();
        assert_eq!(list.len(), 5);
        let (curves, issues) = curves_from_descriptors(&list, &AreaCfg::default());
        assert_eq!(curves.len(), 4);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].index, 4);
        assert!(issues[0].reason.contains("Text"));
        match &curves[0].1 {
            Curve::Polyline(p) => {
                assert!(p.closed);
                assert_eq!(p.vertices[2], vector![4.0, 3.0]);
            }
            other => panic!("expected polyline, got {}", other.kind()),
        }
        assert!(matches!(curves[2].1, Curve::Ellipse(_)));
    }

    #[test]
    fn missing_fields_and_bad_points_are_reported() {
        let arc = EntityDescriptor {
            kind: "Arc".into(),
            center: Some(vec![0.0, 0.0]),
            radius: Some(1.0),
            ..Default::default()
        };
        assert!(matches!(
            arc.to_curve(),
            Err(DescriptorError::MissingField {
                kind: "Arc",
                field: "StartAngle"
            })
        ));
        let line = EntityDescriptor {
            kind: "Line".into(),
            points: vec![vec![0.0], vec![1.0, 1.0]],
            ..Default::default()
        };
        assert!(matches!(line.to_curve(), Err(DescriptorError::BadPoint(1))));
        let circle = EntityDescriptor {
            kind: "Circle".into(),
            center: Some(vec![0.0, 0.0]),
            radius: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            circle.to_curve(),
            Err(DescriptorError::Curve(CurveError::BadRadius(_)))
        ));
    }

    #[test]
    fn absurd_spline_degree_is_rejected_not_overflowed() {
        let list = parse_descriptor_list(
            r#"[
                {"Type": "Spline", "Points": [[0,0],[1,1]], "Degree": 18446744073709551615},
                {"Type": "Circle", "Center": [0,0], "Radius": 1}
            ]"#,
        )
        .unwrap();
        assert!(matches!(
            list[0].to_curve(),
            Err(DescriptorError::Curve(CurveError::TooFewControlPoints {
                needed: usize::MAX,
                got: 2,
                ..
            }))
        ));
        let (curves, issues) = curves_from_descriptors(&list, &AreaCfg::default());
        assert_eq!(curves.len(), 1);
        assert_eq!(issues[0].index, 0);
        let report = crate::area::AreaRequest::default()
            .run_descriptors(&list)
            .unwrap();
        assert!((report.total - std::f64::consts::PI).abs() < 1e-12);

        let spline = Spline {
            degree: usize::MAX,
            control_points: vec![vector![0.0, 0.0], vector![1.0, 1.0]],
            knots: vec![],
            weights: vec![],
            fit_points: vec![],
            closed: false,
        };
        assert!(spline.domain().is_none());
        assert!(crate::curves::clamped_uniform_knots(2, usize::MAX).is_empty());
    }

    #[test]
    fn hatch_descriptor_yields_one_curve_per_loop() {
        let list = parse_descriptor_list(
            r#"[{
                "Type": "Hatch",
                "Loops": [
                    {"Edges": [
                        {"Type": "Line", "Points": [[0,0],[2,0]]},
                        {"Type": "Arc", "Center": [1,0], "Radius": 1, "StartAngle": 0, "EndAngle": 3.141592653589793, "CounterClockwise": true}
                    ]},
                    {"Points": [[5,0],[6,0],[6,1],[5,1],[5,0]]}
                ]
            }]"#,
        )
        .unwrap();
        let cfg = AreaCfg::default();
        let curves = list[0].to_curves(&cfg).unwrap();
        assert_eq!(curves.len(), 2);
        let areas: Vec<f64> = curves
            .iter()
            .map(|c| c.enclosed_area(&cfg).unwrap())
            .collect();
        assert!((areas[0] - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!((areas[1] - 1.0).abs() < 1e-12);
        match &curves[1] {
            Curve::Polyline(p) => assert_eq!(p.vertices.len(), 4),
            other => panic!("expected polyline, got {}", other.kind()),
        }
    }

    #[test]
    fn malformed_hatches_are_reported() {
        let cfg = AreaCfg::default();
        let empty = EntityDescriptor {
            kind: "Hatch".into(),
            ..Default::default()
        };
        assert!(matches!(
            empty.to_curves(&cfg),
            Err(DescriptorError::MissingField {
                kind: "Hatch",
                field: "Loops"
            })
        ));
        let circle_edge = parse_descriptor_list(
            r#"[{"Type": "Hatch", "Loops": [{"Edges": [{"Type": "Circle", "Center": [0,0], "Radius": 1}]}]}]"#,
        )
        .unwrap();
        assert!(matches!(
            circle_edge[0].to_curves(&cfg),
            Err(DescriptorError::UnknownType(_))
        ));
        let single_vertex = parse_descriptor_list(r#"[{"Type": "Hatch", "Points": [[0,0]]}]"#).unwrap();
        assert!(matches!(
            single_vertex[0].to_curves(&cfg),
            Err(DescriptorError::Curve(CurveError::TooFewVertices(1)))
        ));
    }

    #[test]
    fn stored_row_roundtrips_through_curves() {
        let curves = vec![
            Curve::Circle(Circle {
                center: vector![1.0, 2.0],
                radius: 3.0,
            }),
            Curve::Polyline(Polyline {
                vertices: vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![1.0, 1.0]],
                bulges: vec![0.0, 0.5, 0.0],
                closed: false,
            }),
        ];
        let row = StoredEntity::from_curves(7, "block-a", &curves).unwrap();
        // Defaults are left out of the stored text.
        assert!(!row.data.contains("Closed"));
        let back: Vec<Curve> = row
            .descriptors()
            .unwrap()
            .iter()
            .map(|d| d.to_curve().unwrap())
            .collect();
        assert_eq!(back, curves);

        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"CreatedAt\""));
        let parsed: StoredEntity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, row);
    }
}
