use rand::distributions::Open01;
use rand::Rng;
use std::fmt::Debug;

use crate::result::{Error, Result};

/// Convert a Vector to a printable string
///
/// # Example
///
/// ```rust
/// # use mixgibbs::misc::vec_to_string;
/// let xs: Vec<u8> = vec![0, 1, 2, 3, 4, 5];
///
/// assert_eq!(vec_to_string(&xs, 6).as_str(), "[0, 1, 2, 3, 4, 5]");
/// assert_eq!(vec_to_string(&xs, 5).as_str(), "[0, 1, 2, 3, ... , 5]");
/// ```
pub fn vec_to_string<T: Debug>(xs: &[T], max_entries: usize) -> String {
    let mut out = String::new();
    out += "[";
    let n = xs.len();
    xs.iter().enumerate().for_each(|(i, x)| {
        let to_push = if i + 1 < max_entries && i + 1 < n {
            format!("{:?}, ", x)
        } else if i + 1 == max_entries && n > max_entries {
            String::from("... , ")
        } else if i + 1 == n {
            format!("{:?}", x)
        } else {
            String::new()
        };

        out.push_str(to_push.as_str());
    });
    out += "]";

    out
}

/// Safely compute `log(sum(exp(xs))`
///
/// Returns `-∞` if `xs` is empty or every entry is `-∞`.
///
/// # Example
///
/// ```rust
/// # use mixgibbs::misc::logsumexp;
/// let xs: Vec<f64> = vec![-1000.0, -1000.0];
/// let lse = logsumexp(&xs);
/// assert!((lse - (-1000.0 + 2.0_f64.ln())).abs() < 1E-10);
/// ```
pub fn logsumexp(xs: &[f64]) -> f64 {
    xs.iter().logsumexp()
}

/// Iterator extension for numerically stable log-sum-exp.
pub trait LogSumExp {
    fn logsumexp(self) -> f64;
}

impl<I, T> LogSumExp for I
where
    I: Iterator<Item = T> + Clone,
    T: std::borrow::Borrow<f64>,
{
    fn logsumexp(self) -> f64 {
        let maxval = self
            .clone()
            .map(|x| *x.borrow())
            .fold(f64::NEG_INFINITY, f64::max);

        // empty, all -∞, or contains +∞
        if !maxval.is_finite() {
            return maxval;
        }

        self.map(|x| (*x.borrow() - maxval).exp()).sum::<f64>().ln() + maxval
    }
}

/// Convert unnormalized log weights into probabilities that sum to one.
///
/// The maximum is subtracted before exponentiating, so weights far below
/// `f64::MIN_POSITIVE` in linear space are handled without underflowing
/// all entries to zero.
///
/// # Example
///
/// ```rust
/// # use mixgibbs::misc::normalize_ln_weights;
/// let ps = normalize_ln_weights(&[-1001.0, -1000.0]).unwrap();
/// assert!((ps[0] + ps[1] - 1.0).abs() < 1E-12);
/// assert!(ps[1] > ps[0]);
/// ```
pub fn normalize_ln_weights(ln_weights: &[f64]) -> Result<Vec<f64>> {
    let z = logsumexp(ln_weights);
    if !z.is_finite() {
        return Err(Error::invariant(format!(
            "cannot normalize log weights {}",
            vec_to_string(ln_weights, 10)
        )));
    }
    Ok(ln_weights.iter().map(|w| (w - z).exp()).collect())
}

#[inline]
fn binary_search(cws: &[f64], r: f64) -> usize {
    let mut left: usize = 0;
    let mut right: usize = cws.len();
    while left < right {
        let mid = (left + right) / 2;
        if cws[mid] < r {
            left = mid + 1;
        } else {
            right = mid;
        }
    }
    left
}

#[inline]
fn catflip(cws: &[f64], r: f64) -> usize {
    let ix = if cws.len() > 9 {
        binary_search(cws, r)
    } else {
        cws.iter().position(|&w| w > r).unwrap_or(cws.len())
    };

    if ix < cws.len() {
        ix
    } else {
        // The total fell short of r from rounding. Take the last category
        // that has any weight.
        last_positive(cws)
    }
}

#[inline]
fn last_positive(cws: &[f64]) -> usize {
    (1..cws.len())
        .rev()
        .find(|&ix| cws[ix] > cws[ix - 1])
        .unwrap_or(0)
}

/// Draw `n` indices according to log-domain weights
///
/// If `normed` is `true` then exp(`ln_weights`) is assumed to sum to 1.
///
/// # Examples
///
/// ```rust
/// use mixgibbs::misc::ln_pflip;
///
/// let weights: Vec<f64> = vec![0.4, 0.2, 0.3, 0.1];
/// let ln_weights: Vec<f64> = weights.iter().map(|&w| w.ln()).collect();
///
/// let xs = ln_pflip(&ln_weights, 100, true, &mut rand::thread_rng()).unwrap();
///
/// assert_eq!(xs.len(), 100);
/// assert!(xs.iter().all(|&x| x <= 3));
/// ```
pub fn ln_pflip<R: Rng>(
    ln_weights: &[f64],
    n: usize,
    normed: bool,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if ln_weights.is_empty() {
        return Err(Error::invalid_parameter("empty weights"));
    }

    let mut cws: Vec<f64> = if normed {
        ln_weights.iter().map(|w| w.exp()).collect()
    } else {
        normalize_ln_weights(ln_weights)?
    };

    for i in 1..cws.len() {
        cws[i] += cws[i - 1];
    }

    Ok((0..n)
        .map(|_| {
            let r: f64 = rng.sample(Open01);
            catflip(&cws, r)
        })
        .collect())
}
