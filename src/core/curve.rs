use serde::{Deserialize, Serialize};

/// Named interpolation family used to connect projected points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurveType {
    /// Strict polyline.
    #[default]
    Linear,
    /// Cubic Hermite spline monotone in x; never overshoots between points.
    Monotone,
    /// Natural cubic spline through every point.
    Natural,
    /// Horizontal run to the midpoint, vertical change, horizontal run.
    Step,
    /// Vertical change first, then horizontal.
    StepBefore,
    /// Horizontal run first, then vertical change.
    StepAfter,
    /// Cubic Bezier with horizontal tangents at every point.
    Bump,
    /// Centripetal Catmull-Rom spline (alpha 0.5).
    CatmullRom,
    /// Polyline closed back to its first point.
    LinearClosed,
}

impl CurveType {
    /// Curve to use when the same points are walked backwards, as the lower
    /// edge of an area is.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::StepBefore => Self::StepAfter,
            Self::StepAfter => Self::StepBefore,
            Self::LinearClosed => Self::Linear,
            other => other,
        }
    }
}

/// How a curve enters its first point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentStart {
    Move,
    Line,
}

/// SVG path-data writer rounding coordinates to three decimals.
#[derive(Debug, Default)]
pub(crate) struct PathWriter {
    out: String,
}

impl PathWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn start(&mut self, start: SegmentStart, x: f64, y: f64) {
        match start {
            SegmentStart::Move => self.command('M', &[x, y]),
            SegmentStart::Line => self.command('L', &[x, y]),
        }
    }

    pub(crate) fn line_to(&mut self, x: f64, y: f64) {
        self.command('L', &[x, y]);
    }

    pub(crate) fn bezier_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.command('C', &[x1, y1, x2, y2, x, y]);
    }

    pub(crate) fn close(&mut self) {
        self.out.push('Z');
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    fn command(&mut self, name: char, values: &[f64]) {
        self.out.push(name);
        for (index, value) in values.iter().enumerate() {
            if index > 0 {
                self.out.push(',');
            }
            let rounded = (value * 1000.0).round() / 1000.0;
            // Avoid emitting `-0`.
            let rounded = if rounded == 0.0 { 0.0 } else { rounded };
            self.out.push_str(&rounded.to_string());
        }
    }
}

/// Writes one continuous run of points with `curve`.
pub(crate) fn write_curve(
    curve: CurveType,
    points: &[(f64, f64)],
    start: SegmentStart,
    path: &mut PathWriter,
) {
    let Some(&(x0, y0)) = points.first() else {
        return;
    };

    match curve {
        CurveType::Linear | CurveType::LinearClosed => {
            path.start(start, x0, y0);
            for &(x, y) in &points[1..] {
                path.line_to(x, y);
            }
        }
        CurveType::Step => write_step(points, 0.5, start, path),
        CurveType::StepBefore => write_step(points, 0.0, start, path),
        CurveType::StepAfter => write_step(points, 1.0, start, path),
        CurveType::Bump => {
            path.start(start, x0, y0);
            for pair in points.windows(2) {
                let (px, py) = pair[0];
                let (x, y) = pair[1];
                let mid = (px + x) / 2.0;
                path.bezier_to(mid, py, mid, y, x, y);
            }
        }
        CurveType::Natural => write_natural(points, start, path),
        CurveType::Monotone => write_monotone(points, start, path),
        CurveType::CatmullRom => {
            let mut state = CatmullRom::new(0.5, start);
            for &(x, y) in points {
                state.point(path, x, y);
            }
            state.line_end(path);
        }
    }
}

fn write_step(points: &[(f64, f64)], t: f64, start: SegmentStart, path: &mut PathWriter) {
    let (x0, y0) = points[0];
    path.start(start, x0, y0);
    for pair in points.windows(2) {
        let (px, py) = pair[0];
        let (x, y) = pair[1];
        if t <= 0.0 {
            path.line_to(px, y);
            path.line_to(x, y);
        } else {
            let x1 = px * (1.0 - t) + x * t;
            path.line_to(x1, py);
            path.line_to(x1, y);
        }
    }
    if t > 0.0 && t < 1.0 && points.len() >= 2 {
        let (x, y) = points[points.len() - 1];
        path.line_to(x, y);
    }
}

fn write_natural(points: &[(f64, f64)], start: SegmentStart, path: &mut PathWriter) {
    let (x0, y0) = points[0];
    path.start(start, x0, y0);
    match points.len() {
        1 => {}
        2 => path.line_to(points[1].0, points[1].1),
        _ => {
            let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
            let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
            let (ax, bx) = natural_control_points(&xs);
            let (ay, by) = natural_control_points(&ys);
            for i in 0..points.len() - 1 {
                let (x, y) = points[i + 1];
                path.bezier_to(ax[i], ay[i], bx[i], by[i], x, y);
            }
        }
    }
}

/// First and second Bezier control points of a natural cubic spline through `x`.
fn natural_control_points(x: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = x.len() - 1;
    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    let mut r = vec![0.0; n];

    a[0] = 0.0;
    b[0] = 2.0;
    r[0] = x[0] + 2.0 * x[1];
    for i in 1..n - 1 {
        a[i] = 1.0;
        b[i] = 4.0;
        r[i] = 4.0 * x[i] + 2.0 * x[i + 1];
    }
    a[n - 1] = 2.0;
    b[n - 1] = 7.0;
    r[n - 1] = 8.0 * x[n - 1] + x[n];

    for i in 1..n {
        let m = a[i] / b[i - 1];
        b[i] -= m;
        r[i] -= m * r[i - 1];
    }
    a[n - 1] = r[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        a[i] = (r[i] - a[i + 1]) / b[i];
    }
    b[n - 1] = (x[n] + a[n - 1]) / 2.0;
    for i in 0..n - 1 {
        b[i] = 2.0 * x[i + 1] - a[i + 1];
    }
    (a, b)
}

fn sign(value: f64) -> f64 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// Tangent at `p1` limited so the spline stays monotone (Steffen's method).
fn monotone_slope3(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let h0 = p1.0 - p0.0;
    let h1 = p2.0 - p1.0;
    let zero_guard = |h: f64, other: f64| {
        if h != 0.0 {
            h
        } else if other < 0.0 {
            -0.0
        } else {
            0.0
        }
    };
    let s0 = (p1.1 - p0.1) / zero_guard(h0, h1);
    let s1 = (p2.1 - p1.1) / zero_guard(h1, h0);
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let slope = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if slope.is_nan() { 0.0 } else { slope }
}

/// One-sided tangent at an end point given the tangent at its neighbour.
fn monotone_slope2(p0: (f64, f64), p1: (f64, f64), t: f64) -> f64 {
    let h = p1.0 - p0.0;
    if h != 0.0 {
        (3.0 * (p1.1 - p0.1) / h - t) / 2.0
    } else {
        t
    }
}

fn write_monotone(points: &[(f64, f64)], start: SegmentStart, path: &mut PathWriter) {
    let mut unique: Vec<(f64, f64)> = Vec::with_capacity(points.len());
    for &point in points {
        if unique.last() != Some(&point) {
            unique.push(point);
        }
    }

    let (x0, y0) = unique[0];
    path.start(start, x0, y0);
    let n = unique.len();
    if n == 1 {
        return;
    }
    if n == 2 {
        path.line_to(unique[1].0, unique[1].1);
        return;
    }

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = monotone_slope3(unique[i - 1], unique[i], unique[i + 1]);
    }
    tangents[0] = monotone_slope2(unique[0], unique[1], tangents[1]);
    tangents[n - 1] = monotone_slope2(unique[n - 2], unique[n - 1], tangents[n - 2]);

    for i in 0..n - 1 {
        let (xa, ya) = unique[i];
        let (xb, yb) = unique[i + 1];
        let dx = (xb - xa) / 3.0;
        path.bezier_to(
            xa + dx,
            ya + dx * tangents[i],
            xb - dx,
            yb - dx * tangents[i + 1],
            xb,
            yb,
        );
    }
}

const CATMULL_ROM_EPSILON: f64 = 1e-12;

/// Streaming centripetal Catmull-Rom state; each point completes the segment
/// ending at the previous one.
struct CatmullRom {
    alpha: f64,
    start: SegmentStart,
    count: usize,
    x: [f64; 3],
    y: [f64; 3],
    l01_a: f64,
    l12_a: f64,
    l23_a: f64,
    l01_2a: f64,
    l12_2a: f64,
    l23_2a: f64,
}

impl CatmullRom {
    fn new(alpha: f64, start: SegmentStart) -> Self {
        Self {
            alpha,
            start,
            count: 0,
            x: [f64::NAN; 3],
            y: [f64::NAN; 3],
            l01_a: 0.0,
            l12_a: 0.0,
            l23_a: 0.0,
            l01_2a: 0.0,
            l12_2a: 0.0,
            l23_2a: 0.0,
        }
    }

    fn point(&mut self, path: &mut PathWriter, x: f64, y: f64) {
        if self.count > 0 {
            let x23 = self.x[2] - x;
            let y23 = self.y[2] - y;
            self.l23_2a = (x23 * x23 + y23 * y23).powf(self.alpha);
            self.l23_a = self.l23_2a.sqrt();
        }

        match self.count {
            0 => {
                self.count = 1;
                path.start(self.start, x, y);
            }
            1 => self.count = 2,
            _ => {
                self.count = 3;
                self.segment(path, x, y);
            }
        }

        self.l01_a = self.l12_a;
        self.l12_a = self.l23_a;
        self.l01_2a = self.l12_2a;
        self.l12_2a = self.l23_2a;
        self.x = [self.x[1], self.x[2], x];
        self.y = [self.y[1], self.y[2], y];
    }

    fn line_end(&mut self, path: &mut PathWriter) {
        match self.count {
            2 => path.line_to(self.x[2], self.y[2]),
            3 => {
                let (x, y) = (self.x[2], self.y[2]);
                self.point(path, x, y);
            }
            _ => {}
        }
    }

    fn segment(&self, path: &mut PathWriter, x: f64, y: f64) {
        let [x0, mut x1, mut x2] = self.x;
        let [y0, mut y1, mut y2] = self.y;

        if self.l01_a > CATMULL_ROM_EPSILON {
            let a = 2.0 * self.l01_2a + 3.0 * self.l01_a * self.l12_a + self.l12_2a;
            let n = 3.0 * self.l01_a * (self.l01_a + self.l12_a);
            x1 = (x1 * a - x0 * self.l12_2a + self.x[2] * self.l01_2a) / n;
            y1 = (y1 * a - y0 * self.l12_2a + self.y[2] * self.l01_2a) / n;
        }
        if self.l23_a > CATMULL_ROM_EPSILON {
            let b = 2.0 * self.l23_2a + 3.0 * self.l23_a * self.l12_a + self.l12_2a;
            let m = 3.0 * self.l23_a * (self.l23_a + self.l12_a);
            x2 = (x2 * b + self.x[1] * self.l23_2a - x * self.l12_2a) / m;
            y2 = (y2 * b + self.y[1] * self.l23_2a - y * self.l12_2a) / m;
        }
        path.bezier_to(x1, y1, x2, y2, self.x[2], self.y[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::{CurveType, PathWriter, SegmentStart, monotone_slope3, write_curve};

    fn render(curve: CurveType, points: &[(f64, f64)]) -> String {
        let mut path = PathWriter::new();
        write_curve(curve, points, SegmentStart::Move, &mut path);
        path.finish()
    }

    #[test]
    fn linear_is_a_polyline() {
        assert_eq!(
            render(CurveType::Linear, &[(0.0, 0.0), (1.0, 2.0), (2.0, 1.0)]),
            "M0,0L1,2L2,1"
        );
    }

    #[test]
    fn step_variants_place_the_vertical_change() {
        let points = [(0.0, 0.0), (2.0, 4.0)];
        assert_eq!(render(CurveType::Step, &points), "M0,0L1,0L1,4L2,4");
        assert_eq!(render(CurveType::StepBefore, &points), "M0,0L0,4L2,4");
        assert_eq!(render(CurveType::StepAfter, &points), "M0,0L2,0L2,4");
    }

    #[test]
    fn bump_uses_horizontal_tangents() {
        assert_eq!(
            render(CurveType::Bump, &[(0.0, 0.0), (2.0, 4.0)]),
            "M0,0C1,0,1,4,2,4"
        );
    }

    #[test]
    fn monotone_tangent_is_zero_at_local_extrema() {
        assert_eq!(monotone_slope3((0.0, 0.0), (1.0, 5.0), (2.0, 0.0)), 0.0);
    }

    #[test]
    fn coordinates_are_rounded_to_three_decimals() {
        assert_eq!(
            render(CurveType::Linear, &[(0.12345, -0.0001), (1.0 / 3.0, 2.0)]),
            "M0.123,0L0.333,2"
        );
    }

    #[test]
    fn smoothing_curves_pass_through_every_point() {
        let points = [(0.0, 0.0), (1.0, 3.0), (2.0, 1.0), (3.0, 4.0)];
        for curve in [CurveType::Natural, CurveType::Monotone, CurveType::CatmullRom] {
            let path = render(curve, &points);
            assert!(path.starts_with("M0,0C"), "{curve:?}: {path}");
            assert!(path.ends_with(",3,4"), "{curve:?}: {path}");
            assert_eq!(path.matches('C').count(), 3, "{curve:?}: {path}");
        }
    }
}
