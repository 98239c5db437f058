//! Order statistics shared by imputation and the box-plot view.
//!
//! Medians and quartiles go through polars with `QuantileMethod::Linear`:
//! for `n` sorted values and probability `p`, `h = (n - 1) * p` and the
//! result interpolates between `x[floor(h)]` and `x[floor(h) + 1]`.
//! The categorical mode stays here because it needs a first-occurrence tie
//! order.

use polars::prelude::{ChunkQuantile, Float64Chunked, NewChunkedArray, QuantileMethod};

/// Wrap `values` as a named polars column.
pub fn column(name: &str, values: &[f64]) -> Float64Chunked {
    Float64Chunked::from_slice(name.into(), values)
}

/// Linear-interpolation quantile; `None` for an empty column.
pub fn quantile(ca: &Float64Chunked, p: f64) -> Option<f64> {
    ca.quantile(p.clamp(0.0, 1.0), QuantileMethod::Linear)
        .ok()
        .flatten()
}

pub fn median(name: &str, values: &[f64]) -> Option<f64> {
    column(name, values).median()
}

/// Most frequent value; ties go to the value that occurs first.
pub fn mode<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    // (value, count) in first-occurrence order
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for v in values {
        match counts.iter_mut().find(|(seen, _)| *seen == v) {
            Some((_, c)) => *c += 1,
            None => counts.push((v, 1)),
        }
    }
    let mut best: Option<(&str, usize)> = None;
    for (v, c) in counts {
        if best.map_or(true, |(_, bc)| c > bc) {
            best = Some((v, c));
        }
    }
    best.map(|(v, _)| v)
}
