//! Differencing and its inverse.
//!
//! **Not part of the public API.**

/// Applies the first-difference operator `d` times.
pub(crate) fn difference(data: &[f64], d: usize) -> Vec<f64> {
    let mut out = data.to_vec();
    for _ in 0..d {
        out = out.windows(2).map(|w| w[1] - w[0]).collect();
    }
    out
}

/// Last value of each differencing level `0..d`, level 0 being the data.
pub(crate) fn level_tails(data: &[f64], d: usize) -> Vec<f64> {
    let mut tails = Vec::with_capacity(d);
    let mut level = data.to_vec();
    for _ in 0..d {
        tails.push(level.last().copied().unwrap_or(0.0));
        level = difference(&level, 1);
    }
    tails
}

/// Turns a forecast of the d-times differenced series back into levels.
///
/// `tails[k]` is the last observed value of the k-times differenced series.
pub(crate) fn integrate(forecast: &[f64], tails: &[f64]) -> Vec<f64> {
    let mut out = forecast.to_vec();
    for &last in tails.iter().rev() {
        let mut acc = last;
        for v in out.iter_mut() {
            acc += *v;
            *v = acc;
        }
    }
    out
}

/// `y_t - Δ^d y_t` for `t >= d`, indexed from `t = d`.
///
/// Adding a prediction of `Δ^d y_t` to this offset gives a prediction of
/// `y_t` from observations before `t`.
pub(crate) fn level_offsets(data: &[f64], d: usize) -> Vec<f64> {
    let w = difference(data, d);
    data[d..].iter().zip(w.iter()).map(|(y, w)| y - w).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difference_orders() {
        let y = [1.0, 4.0, 9.0, 16.0, 25.0];
        assert_eq!(difference(&y, 0), y.to_vec());
        assert_eq!(difference(&y, 1), vec![3.0, 5.0, 7.0, 9.0]);
        assert_eq!(difference(&y, 2), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn integrate_inverts_difference() {
        let y = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        for d in 0..3 {
            let (head, tail) = y.split_at(5);
            let tails = level_tails(head, d);
            let w_full = difference(&y, d);
            let future_w = &w_full[w_full.len() - tail.len()..];
            assert_eq!(integrate(future_w, &tails), tail.to_vec(), "d = {d}");
        }
    }

    #[test]
    fn level_tails_per_order() {
        let y = [1.0, 4.0, 9.0, 16.0];
        assert_eq!(level_tails(&y, 0), Vec::<f64>::new());
        assert_eq!(level_tails(&y, 2), vec![16.0, 7.0]);
    }

    #[test]
    fn level_offsets_d1_is_previous_value() {
        let y = [2.0, 5.0, 4.0, 8.0];
        assert_eq!(level_offsets(&y, 1), vec![2.0, 5.0, 4.0]);
    }

    #[test]
    fn level_offsets_d2() {
        // y_t - Δ²y_t = 2 y_{t-1} - y_{t-2}
        let y = [1.0, 3.0, 2.0, 7.0];
        assert_eq!(level_offsets(&y, 2), vec![5.0, 1.0]);
    }
}
