//! Walk a few selections through the area pipeline and print the reports.
//!
//! Usage:
//!   cargo run -p curvearea --example area_demo
//!
//! Shows one selection per method: a closed circle, four lines joined into a
//! square, an open polyline closed by its hull, and collinear pieces ordered
//! by nearest neighbour.

use curvearea::api::{AreaCfg, AreaRequest, Circle, Curve, Line, Polyline, Pt2};

fn line(a: (f64, f64), b: (f64, f64)) -> Curve {
    Curve::Line(Line {
        start: Pt2::new(a.0, a.1),
        end: Pt2::new(b.0, b.1),
    })
}

fn main() {
    let selections: Vec<(&str, Vec<Curve>)> = vec![
        (
            "circle r=2",
            vec![Curve::Circle(Circle {
                center: Pt2::zeros(),
                radius: 2.0,
            })],
        ),
        (
            "four lines",
            vec![
                line((0.0, 0.0), (4.0, 0.0)),
                line((4.0, 0.0), (4.0, 4.0)),
                line((4.0, 4.0), (0.0, 4.0)),
                line((0.0, 4.0), (0.0, 0.0)),
            ],
        ),
        (
            "open polyline",
            vec![Curve::Polyline(Polyline {
                vertices: vec![Pt2::new(0.0, 0.0), Pt2::new(3.0, 0.0), Pt2::new(3.0, 2.0)],
                bulges: vec![0.0, 0.4, 0.0],
                closed: false,
            })],
        ),
        (
            "collinear pieces",
            vec![line((0.0, 0.0), (1.0, 0.0)), line((2.0, 0.0), (3.0, 0.0))],
        ),
    ];
    let request = AreaRequest::new(AreaCfg::default());
    for (name, curves) in selections {
        match request.run(&curves) {
            Ok(report) => {
                let methods: Vec<String> = report
                    .contributions
                    .iter()
                    .map(|c| format!("{:?}", c.method))
                    .collect();
                println!("{name:>18}: area={:.4} via [{}]", report.total, methods.join(", "));
                for w in &report.warnings {
                    println!("{:>18}  warning: {w}", "");
                }
            }
            Err(e) => println!("{name:>18}: failed: {e}"),
        }
    }
}
