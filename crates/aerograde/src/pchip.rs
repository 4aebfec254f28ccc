//! Shape-preserving piecewise cubic Hermite interpolation (Fritsch–Carlson).

/// Interpolates `ys` over `xs` at `query`.
///
/// Non-finite samples are discarded and duplicate abscissae collapse onto the
/// later sample. Queries outside the sampled range extrapolate linearly along
/// the endpoint tangent. Returns `None` when fewer than two distinct samples
/// remain or the query is not finite.
pub fn pchip(xs: &[f64], ys: &[f64], query: f64) -> Option<f64> {
    let (x, y) = prepare_samples(xs, ys);
    let n = x.len();
    if n < 2 || !query.is_finite() {
        return None;
    }

    let mut h = Vec::with_capacity(n - 1);
    let mut delta = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let dx = x[i + 1] - x[i];
        if dx == 0.0 {
            return None;
        }
        h.push(dx);
        delta.push((y[i + 1] - y[i]) / dx);
    }

    let m = tangents(&h, &delta);

    if query <= x[0] {
        return Some(y[0] + m[0] * (query - x[0]));
    }
    if query >= x[n - 1] {
        return Some(y[n - 1] + m[n - 1] * (query - x[n - 1]));
    }

    let mut idx = 0;
    while idx < n - 2 && query > x[idx + 1] {
        idx += 1;
    }

    let t = (query - x[idx]) / h[idx];
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    Some(
        h00 * y[idx]
            + h10 * h[idx] * m[idx]
            + h01 * y[idx + 1]
            + h11 * h[idx] * m[idx + 1],
    )
}

fn prepare_samples(xs: &[f64], ys: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut points: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| (x, y))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    // Stable, so equal abscissae keep input order and the later one wins below.
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut unique: Vec<(f64, f64)> = Vec::with_capacity(points.len());
    for (x, y) in points {
        match unique.last_mut() {
            Some(last) if (x - last.0).abs() <= f64::EPSILON => last.1 = y,
            _ => unique.push((x, y)),
        }
    }

    unique.into_iter().unzip()
}

fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

fn tangents(h: &[f64], delta: &[f64]) -> Vec<f64> {
    let n = h.len() + 1;
    let mut m = vec![0.0; n];

    if n == 2 {
        m[0] = delta[0];
        m[1] = delta[0];
        return m;
    }

    let m0 = ((2.0 * h[0] + h[1]) * delta[0] - h[0] * delta[1]) / (h[0] + h[1]);
    let mn = ((2.0 * h[n - 2] + h[n - 3]) * delta[n - 2] - h[n - 2] * delta[n - 3])
        / (h[n - 2] + h[n - 3]);
    m[0] = clamp_endpoint(m0, delta[0], delta[1]);
    m[n - 1] = clamp_endpoint(mn, delta[n - 2], delta[n - 3]);

    for i in 1..n - 1 {
        let (left, right) = (delta[i - 1], delta[i]);
        m[i] = if left == 0.0 || right == 0.0 || sign(left) != sign(right) {
            0.0
        } else {
            let w1 = 2.0 * h[i] + h[i - 1];
            let w2 = h[i] + 2.0 * h[i - 1];
            (w1 + w2) / (w1 / left + w2 / right)
        };
    }

    m
}

/// Endpoint tangent limited so the end segments cannot overshoot.
fn clamp_endpoint(value: f64, nearest: f64, next: f64) -> f64 {
    if !value.is_finite() || nearest == 0.0 {
        return 0.0;
    }
    if sign(value) != sign(nearest) {
        return 0.0;
    }
    if sign(nearest) != sign(next) && value.abs() > (3.0 * nearest).abs() {
        return 3.0 * nearest;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: Option<f64>, expected: f64) -> bool {
        actual.is_some_and(|value| (value - expected).abs() < 1e-9)
    }

    #[test]
    fn two_points_interpolate_linearly() {
        let xs = [0.0, 10.0];
        let ys = [1.0, 6.0];
        assert!(close(pchip(&xs, &ys, 4.0), 3.0));
        assert!(close(pchip(&xs, &ys, -2.0), 0.0));
        assert!(close(pchip(&xs, &ys, 12.0), 7.0));
    }

    #[test]
    fn passes_through_every_sample() {
        let xs = [40.0, 60.0, 80.0, 100.0, 120.0];
        let ys = [0.62, 0.71, 0.85, 1.02, 1.31];
        for (x, y) in xs.iter().zip(ys) {
            assert!(close(pchip(&xs, &ys, *x), y), "sample at {x}");
        }
    }

    #[test]
    fn extrapolates_along_endpoint_tangents() {
        // delta = [2, 1]; left tangent ((2+1)*2 - 1)/2 = 2.5.
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 2.0, 3.0];
        assert!(close(pchip(&xs, &ys, -1.0), -2.5));

        // delta = [1, 3]; right tangent ((2+1)*3 - 1)/2 = 4, left clamps to 0.
        let ys = [0.0, 1.0, 4.0];
        assert!(close(pchip(&xs, &ys, 3.0), 8.0));
        assert!(close(pchip(&xs, &ys, -1.0), 0.0));
    }

    #[test]
    fn increasing_samples_never_overshoot() {
        let xs = [0.0, 1.0, 1.5, 4.0, 4.2, 7.0];
        let ys = [0.0, 0.1, 3.0, 3.05, 6.0, 6.2];
        let mut previous = f64::NEG_INFINITY;
        let mut x = 0.0;
        while x <= 7.0 {
            let value = pchip(&xs, &ys, x).expect("defined inside domain");
            assert!(value + 1e-12 >= previous, "decreased at x={x}");
            assert!((0.0 - 1e-12..=6.2 + 1e-12).contains(&value));
            previous = value;
            x += 0.01;
        }
    }

    #[test]
    fn local_extremum_gets_flat_tangent() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 1.0, 0.0];
        let peak = pchip(&xs, &ys, 1.0).expect("defined");
        assert!(close(Some(peak), 1.0));
        let near = pchip(&xs, &ys, 0.99).expect("defined");
        assert!(near <= 1.0);
    }

    #[test]
    fn degenerate_inputs_are_undefined() {
        assert_eq!(pchip(&[1.0], &[2.0], 1.0), None);
        assert_eq!(pchip(&[1.0, 1.0], &[2.0, 3.0], 1.0), None);
        assert_eq!(pchip(&[0.0, 1.0], &[0.0, 1.0], f64::NAN), None);
        assert_eq!(pchip(&[0.0, f64::NAN], &[0.0, 1.0], 0.5), None);
        assert_eq!(pchip(&[], &[], 0.0), None);
    }

    #[test]
    fn duplicate_abscissae_keep_the_later_sample() {
        let xs = [0.0, 1.0, 1.0, 2.0];
        let ys = [0.0, 5.0, 1.0, 2.0];
        assert!(close(pchip(&xs, &ys, 1.0), 1.0));
    }

    #[test]
    fn unsorted_samples_are_ordered_first() {
        let xs = [2.0, 0.0, 1.0];
        let ys = [3.0, 0.0, 2.0];
        assert!(close(pchip(&xs, &ys, -1.0), -2.5));
    }
}
