//! Edge-preserving smoothing.
//!
//! Window radius is `ceil(3 * spatial_sigma)`, capped at `max(width, height) - 1`
//! since taps past that never land inside the image. Neighbors outside the
//! image are skipped rather than padded, and the weight sum is renormalized
//! over the in-bounds samples only. With `spatial_sigma <= 0` the window is a
//! single pixel and the filter is the identity.
//!
//! The spatial Gaussian is separable, so only one row of weights is stored.

use eg_core::{Image, ImageView};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Weight sums below this fall back to the unfiltered center value.
const MIN_WEIGHT_SUM: f32 = 1e-12;

struct BilateralKernel {
    radius: usize,
    /// Per-axis spatial weights, indexed by `offset + radius`.
    spatial: Vec<f32>,
    range: [f32; 256],
}

/// `ceil(3 * sigma)` clamped to `max_radius`; the comparison happens in
/// floating point so huge or infinite sigmas never saturate the cast.
fn window_radius(spatial_sigma: f32, max_radius: usize) -> usize {
    if spatial_sigma.is_nan() || spatial_sigma <= 0.0 {
        return 0;
    }
    let reach = (3.0 * spatial_sigma).ceil();
    if reach >= max_radius as f32 {
        max_radius
    } else {
        reach as usize
    }
}

impl BilateralKernel {
    fn new(spatial_sigma: f32, range_sigma: f32, max_radius: usize) -> Self {
        let radius = window_radius(spatial_sigma, max_radius);

        let mut spatial = vec![1.0f32; 2 * radius + 1];
        if radius > 0 {
            let denom = 2.0 * spatial_sigma * spatial_sigma;
            for (i, w) in spatial.iter_mut().enumerate() {
                let d = i as f32 - radius as f32;
                *w = (-(d * d) / denom).exp();
            }
        }

        let mut range = [0.0f32; 256];
        range[0] = 1.0;
        if range_sigma > 0.0 {
            let denom = 2.0 * range_sigma * range_sigma;
            for (d, w) in range.iter_mut().enumerate().skip(1) {
                let df = d as f32;
                *w = (-(df * df) / denom).exp();
            }
        }

        Self {
            radius,
            spatial,
            range,
        }
    }

    fn filter_pixel(&self, img: &ImageView<'_, u8>, x: usize, y: usize) -> u8 {
        let center = img.at(x, y);
        let r = self.radius;

        let y0 = y.saturating_sub(r);
        let y1 = (y + r).min(img.height() - 1);
        let x0 = x.saturating_sub(r);
        let x1 = (x + r).min(img.width() - 1);

        let mut acc = 0.0f32;
        let mut wsum = 0.0f32;
        for ny in y0..=y1 {
            let row = img.row(ny);
            let wy = self.spatial[ny + r - y];
            for nx in x0..=x1 {
                let v = row[nx];
                let w = wy * self.spatial[nx + r - x] * self.range[v.abs_diff(center) as usize];
                acc += w * v as f32;
                wsum += w;
            }
        }

        if wsum < MIN_WEIGHT_SUM {
            return center;
        }
        (acc / wsum).round().clamp(0.0, 255.0) as u8
    }
}

/// Parameters are taken as given: a non-positive or NaN `spatial_sigma` yields
/// a copy and `range_sigma <= 0` keeps only exact matches. Callers that take
/// user input check it with `PipelineConfig::validate` first.
pub fn bilateral_filter(
    img: &ImageView<'_, u8>,
    spatial_sigma: f32,
    range_sigma: f32,
) -> Image<u8> {
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 || spatial_sigma.is_nan() || spatial_sigma <= 0.0 {
        return img.to_image();
    }

    let kernel = BilateralKernel::new(spatial_sigma, range_sigma, w.max(h) - 1);
    let mut out = vec![0u8; w * h];

    let filter_row = |(y, dst): (usize, &mut [u8])| {
        for (x, px) in dst.iter_mut().enumerate() {
            *px = kernel.filter_pixel(img, x, y);
        }
    };

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(w).enumerate().for_each(filter_row);
    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(w).enumerate().for_each(filter_row);

    Image::from_vec(w, h, out).expect("output sized to input dimensions")
}
