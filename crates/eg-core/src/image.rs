use serde::{Deserialize, Serialize};

use crate::Error;

/// Owned row-major image. Stages allocate a fresh `Image` rather than writing
/// into their input.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

/// 8-bit luminance raster, the pipeline's input and filter output type.
pub type LumaBuffer = Image<u8>;

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds an image by evaluating `f(x, y)` at every pixel in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width.saturating_mul(height));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }

        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        let len = width.checked_mul(height).expect("image size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }
}

impl<T: Copy + PartialOrd + Default> Image<T> {
    /// Largest element, or `T::default()` for an empty image.
    pub fn max_value(&self) -> T {
        self.data
            .iter()
            .copied()
            .fold(T::default(), |acc, v| if v > acc { v } else { acc })
    }
}

/// Borrowed image with element stride, so ROIs of a larger frame can be
/// processed without copying.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::InvalidStride);
        }

        let min_len = if width == 0 || height == 0 {
            0
        } else {
            (height - 1)
                .checked_mul(stride)
                .and_then(|v| v.checked_add(width))
                .ok_or(Error::SizeMismatch {
                    expected: usize::MAX,
                    actual: data.len(),
                })?
        };

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }

    /// Pixel at `(x, y)`. Panics when out of bounds; stage loops only call it
    /// with indices they have already bounded.
    pub fn at(&self, x: usize, y: usize) -> T
    where
        T: Copy,
    {
        assert!(x < self.width && y < self.height, "pixel index out of bounds");
        self.data[y * self.stride + x]
    }

    pub fn subview(&self, roi: Roi) -> Result<ImageView<'a, T>, Error> {
        if !roi.fits_within(self.width, self.height) {
            return Err(Error::RoiOutOfBounds);
        }

        let start = roi.y * self.stride + roi.x;
        let tail = self.data.get(start..).ok_or(Error::RoiOutOfBounds)?;
        ImageView::from_slice(roi.width, roi.height, self.stride, tail)
            .map_err(|_| Error::RoiOutOfBounds)
    }

    pub fn to_image(&self) -> Image<T>
    where
        T: Copy,
    {
        let mut data = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            data.extend_from_slice(self.row(y));
        }

        Image {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// Axis-aligned pixel rectangle inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Roi {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Roi {
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Centered square whose side is `percent` of the frame height, capped by
    /// the frame width.
    pub fn centered_square(width: usize, height: usize, percent: f32) -> Self {
        let pct = percent.clamp(0.0, 100.0);
        let side = ((height as f32 * pct / 100.0) as usize).min(width);

        let x = (width / 2).saturating_sub(side / 2).min(width - side);
        let y = (height / 2).saturating_sub(side / 2).min(height.saturating_sub(side));

        Self {
            x,
            y,
            width: side,
            height: side,
        }
    }

    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.x <= width
            && self.y <= height
            && self.width <= width - self.x
            && self.height <= height - self.y
    }
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageView, Roi};
    use crate::Error;

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Image::from_vec(3, 2, vec![0u8; 5]).unwrap_err();
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn from_fn_is_row_major() {
        let img = Image::from_fn(3, 2, |x, y| (10 * y + x) as u8);
        assert_eq!(img.data(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(img.get(2, 1), Some(&12));
        assert_eq!(img.get(3, 1), None);
        assert_eq!(img.max_value(), 12);
    }

    #[test]
    fn strided_view_rows_and_subview() {
        let data = vec![
            10u8, 11, 12, 13, 99, // row 0
            20, 21, 22, 23, 98, // row 1
            30, 31, 32, 33, 97, // row 2
        ];
        let parent = ImageView::from_slice(4, 3, 5, &data).expect("valid parent");
        assert_eq!(parent.row(1), &[20, 21, 22, 23]);

        let roi = Roi {
            x: 1,
            y: 1,
            width: 3,
            height: 2,
        };
        let sub = parent.subview(roi).expect("valid subview");
        assert_eq!(sub.width(), 3);
        assert_eq!(sub.row(0), &[21, 22, 23]);
        assert_eq!(sub.at(2, 1), 33);
        assert_eq!(sub.to_image().data(), &[21, 22, 23, 31, 32, 33]);
    }

    #[test]
    fn subview_outside_frame_is_rejected() {
        let img = Image::new_fill(4, 4, 0u8);
        let roi = Roi {
            x: 2,
            y: 0,
            width: 3,
            height: 4,
        };
        assert_eq!(img.as_view().subview(roi).unwrap_err(), Error::RoiOutOfBounds);
        assert!(ImageView::from_slice(5, 1, 4, img.data()).is_err());
    }

    #[test]
    fn centered_square_roi_stays_inside_frame() {
        let roi = Roi::centered_square(640, 480, 50.0);
        assert_eq!(roi.width, 240);
        assert_eq!(roi.height, 240);
        assert_eq!(roi.x, 200);
        assert_eq!(roi.y, 120);
        assert!(roi.fits_within(640, 480));

        let tall = Roi::centered_square(100, 400, 100.0);
        assert_eq!(tall.width, 100);
        assert!(tall.fits_within(100, 400));
    }
}
