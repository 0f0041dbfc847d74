//! Zernike moment masks for a 7x7 neighborhood.
//!
//! The unit disk is inscribed in the window, so its radius is 3.5 pixels.
//! Entry `(r, c)` is the integral of the basis function over the part of pixel
//! `(c - 3, r - 3)` that lies inside the disk, in unit-disk area units. Masks
//! are not normalized by `(n + 1) / pi`: for a uniform patch of value `v`,
//! `Z00 = v * pi`.

/// Row-major 7x7 mask, indexed `[row][col]`.
pub type Mask = [[f64; 7]; 7];

/// Half-width of the window in pixels; maps a unit-disk radius to pixels.
pub const DISK_RADIUS_PX: f64 = 3.5;

/// `V00 = 1`
pub const Z00: Mask = [
    [0.0000, 0.0287, 0.0686, 0.0807, 0.0686, 0.0287, 0.0000],
    [0.0287, 0.0815, 0.0816, 0.0816, 0.0816, 0.0815, 0.0287],
    [0.0686, 0.0816, 0.0816, 0.0816, 0.0816, 0.0816, 0.0686],
    [0.0807, 0.0816, 0.0816, 0.0816, 0.0816, 0.0816, 0.0807],
    [0.0686, 0.0816, 0.0816, 0.0816, 0.0816, 0.0816, 0.0686],
    [0.0287, 0.0815, 0.0816, 0.0816, 0.0816, 0.0815, 0.0287],
    [0.0000, 0.0287, 0.0686, 0.0807, 0.0686, 0.0287, 0.0000],
];

/// `Re V11 = x`
pub const Z11_RE: Mask = [
    [0.0000, -0.0150, -0.0190, 0.0000, 0.0190, 0.0150, 0.0000],
    [-0.0224, -0.0466, -0.0233, 0.0000, 0.0233, 0.0466, 0.0224],
    [-0.0573, -0.0466, -0.0233, 0.0000, 0.0233, 0.0466, 0.0573],
    [-0.0690, -0.0466, -0.0233, 0.0000, 0.0233, 0.0466, 0.0690],
    [-0.0573, -0.0466, -0.0233, 0.0000, 0.0233, 0.0466, 0.0573],
    [-0.0224, -0.0466, -0.0233, 0.0000, 0.0233, 0.0466, 0.0224],
    [0.0000, -0.0150, -0.0190, 0.0000, 0.0190, 0.0150, 0.0000],
];

/// `Im V11 = y` (y downward)
pub const Z11_IM: Mask = [
    [0.0000, -0.0224, -0.0573, -0.0690, -0.0573, -0.0224, 0.0000],
    [-0.0150, -0.0466, -0.0466, -0.0466, -0.0466, -0.0466, -0.0150],
    [-0.0190, -0.0233, -0.0233, -0.0233, -0.0233, -0.0233, -0.0190],
    [0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000, 0.0000],
    [0.0190, 0.0233, 0.0233, 0.0233, 0.0233, 0.0233, 0.0190],
    [0.0150, 0.0466, 0.0466, 0.0466, 0.0466, 0.0466, 0.0150],
    [0.0000, 0.0224, 0.0573, 0.0690, 0.0573, 0.0224, 0.0000],
];

/// `V20 = 2r^2 - 1`
pub const Z20: Mask = [
    [0.0000, 0.0224, 0.0394, 0.0396, 0.0394, 0.0224, 0.0000],
    [0.0224, 0.0271, -0.0128, -0.0261, -0.0128, 0.0271, 0.0224],
    [0.0394, -0.0128, -0.0528, -0.0661, -0.0528, -0.0128, 0.0394],
    [0.0396, -0.0261, -0.0661, -0.0794, -0.0661, -0.0261, 0.0396],
    [0.0394, -0.0128, -0.0528, -0.0661, -0.0528, -0.0128, 0.0394],
    [0.0224, 0.0271, -0.0128, -0.0261, -0.0128, 0.0271, 0.0224],
    [0.0000, 0.0224, 0.0394, 0.0396, 0.0394, 0.0224, 0.0000],
];

/// `V40 = 6r^4 - 6r^2 + 1`
pub const Z40: Mask = [
    [0.0000, 0.0129, 0.0056, -0.0018, 0.0056, 0.0129, 0.0000],
    [0.0129, -0.0186, -0.0323, -0.0239, -0.0323, -0.0186, 0.0129],
    [0.0056, -0.0323, 0.0125, 0.0406, 0.0125, -0.0323, 0.0056],
    [-0.0018, -0.0239, 0.0406, 0.0751, 0.0406, -0.0239, -0.0018],
    [0.0056, -0.0323, 0.0125, 0.0406, 0.0125, -0.0323, 0.0056],
    [0.0129, -0.0186, -0.0323, -0.0239, -0.0323, -0.0186, 0.0129],
    [0.0000, 0.0129, 0.0056, -0.0018, 0.0056, 0.0129, 0.0000],
];
