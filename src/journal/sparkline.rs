//! Intraday cumulative P&L curve for a calendar cell.

pub const WIDTH: f64 = 100.0;
pub const HEIGHT: f64 = 30.0;
pub const PADDING: f64 = 2.0;

enum Shape {
    Empty,
    Flat,
    Curve(Vec<(f64, f64)>),
}

fn shape(results: &[f64]) -> Shape {
    if results.is_empty() {
        return Shape::Empty;
    }

    let mut points = Vec::with_capacity(results.len() + 1);
    let mut current = 0.0;
    points.push(current);
    for r in results {
        current += r;
        points.push(current);
    }

    let min = points.iter().copied().fold(f64::INFINITY, f64::min);
    let max = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range == 0.0 {
        return Shape::Flat;
    }

    let usable_height = HEIGHT - PADDING * 2.0;
    let last = (points.len() - 1) as f64;

    Shape::Curve(
        points
            .iter()
            .enumerate()
            .map(|(i, val)| {
                let x = i as f64 / last * WIDTH;
                let normalized = (val - min) / range;
                let y = (HEIGHT - PADDING) - normalized * usable_height;
                (x, y)
            })
            .collect(),
    )
}

/// Points in a `WIDTH x HEIGHT` box, y growing downward, so a rising
/// cumulative value moves up. The curve starts at 0 before the first
/// trade. A flat day is a single line at mid-height.
pub fn sparkline_points(results: &[f64]) -> Vec<(f64, f64)> {
    match shape(results) {
        Shape::Empty => Vec::new(),
        Shape::Flat => vec![(0.0, HEIGHT / 2.0), (WIDTH, HEIGHT / 2.0)],
        Shape::Curve(points) => points,
    }
}

/// SVG path data (`M x,y L x,y ...`) for the sparkline. Curve points
/// carry one decimal; the flat line uses the bare box coordinates.
pub fn sparkline_path(results: &[f64]) -> String {
    match shape(results) {
        Shape::Empty => String::new(),
        Shape::Flat => format!("M 0,{} L {},{}", HEIGHT / 2.0, WIDTH, HEIGHT / 2.0),
        Shape::Curve(points) => {
            let body = points
                .iter()
                .map(|(x, y)| format!("{:.1},{:.1}", x, y))
                .collect::<Vec<_>>()
                .join(" L ");
            format!("M {}", body)
        }
    }
}
