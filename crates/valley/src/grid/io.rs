//! Adapters that build a [`CostMatrix`] from frame data held outside the core:
//! whitespace-delimited numeric text (`.dat` frames) and image buffers.

use std::path::Path;

use image::{GrayImage, ImageBuffer, Luma};

use super::CostMatrix;
use crate::error::LoadError;

impl CostMatrix {
    /// Parse whitespace-delimited rows, one matrix row per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. Every row must
    /// have the same number of values as the first.
    pub fn from_text(text: &str) -> Result<Self, LoadError> {
        let mut values = Vec::new();
        let mut n_rows = 0usize;
        let mut n_cols = 0usize;

        for (line_idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let before = values.len();
            for token in line.split_whitespace() {
                let v = token.parse::<f64>().map_err(|_| LoadError::Parse {
                    line: line_idx + 1,
                    token: token.to_string(),
                })?;
                values.push(v);
            }
            let got = values.len() - before;
            if n_rows == 0 {
                n_cols = got;
            } else if got != n_cols {
                return Err(LoadError::Ragged {
                    line: line_idx + 1,
                    expected: n_cols,
                    got,
                });
            }
            n_rows += 1;
        }

        if n_rows == 0 {
            return Err(LoadError::Empty);
        }
        Ok(Self::from_row_slice(n_rows, n_cols, &values)?)
    }

    /// Read and parse a numeric text frame from disk.
    pub fn from_text_file(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        let costs = Self::from_text(&text)?;
        tracing::debug!(
            "loaded {}x{} cost matrix from {}",
            costs.rows(),
            costs.cols(),
            path.display()
        );
        Ok(costs)
    }

    /// Single-channel float image; row = y, col = x.
    pub fn from_luma_f32(img: &ImageBuffer<Luma<f32>, Vec<f32>>) -> Result<Self, LoadError> {
        let (w, h) = img.dimensions();
        let values: Vec<f64> = img.pixels().map(|p| f64::from(p[0])).collect();
        Ok(Self::from_row_slice(h as usize, w as usize, &values)?)
    }

    /// 8-bit grayscale image scaled to [0, 1]; row = y, col = x.
    pub fn from_gray(img: &GrayImage) -> Result<Self, LoadError> {
        let (w, h) = img.dimensions();
        let values: Vec<f64> = img.pixels().map(|p| f64::from(p[0]) / 255.0).collect();
        Ok(Self::from_row_slice(h as usize, w as usize, &values)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, GridShape};
    use crate::TraceError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn parses_text_frame() {
        let text = "# frame 1\n0.1 0.2 0.3\n\n  1e-2\t4 5 \n";
        let m = CostMatrix::from_text(text).unwrap();
        assert_eq!(m.shape(), GridShape::new(2, 3));
        assert_abs_diff_eq!(m.cost(Cell::new(1, 0)), 0.01);
        assert_abs_diff_eq!(m.cost(Cell::new(0, 2)), 0.3);
    }

    #[test]
    fn text_errors_carry_line_numbers() {
        match CostMatrix::from_text("1 2\n3 x\n") {
            Err(LoadError::Parse { line, token }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected: {:?}", other),
        }
        match CostMatrix::from_text("1 2\n\n3\n") {
            Err(LoadError::Ragged {
                line,
                expected,
                got,
            }) => assert_eq!((line, expected, got), (3, 2, 1)),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            CostMatrix::from_text("# only comments\n\n"),
            Err(LoadError::Empty)
        ));
        assert!(matches!(
            CostMatrix::from_text("1 -2\n"),
            Err(LoadError::Matrix(TraceError::InvalidCost { .. }))
        ));
    }

    #[test]
    fn image_rows_are_y() {
        let mut img = GrayImage::new(3, 2);
        img.put_pixel(2, 1, Luma([255]));
        let m = CostMatrix::from_gray(&img).unwrap();
        assert_eq!(m.shape(), GridShape::new(2, 3));
        assert_abs_diff_eq!(m.cost(Cell::new(1, 2)), 1.0);
        assert_abs_diff_eq!(m.cost(Cell::new(0, 0)), 0.0);

        let mut f = ImageBuffer::<Luma<f32>, Vec<f32>>::new(2, 3);
        f.put_pixel(0, 2, Luma([0.25]));
        let m = CostMatrix::from_luma_f32(&f).unwrap();
        assert_eq!(m.shape(), GridShape::new(3, 2));
        assert_abs_diff_eq!(m.cost(Cell::new(2, 0)), 0.25);
    }

    #[test]
    fn reads_frame_file() {
        let path = std::env::temp_dir().join(format!("valley_io_{}.dat", std::process::id()));
        std::fs::write(&path, "1 2\n3 4\n").unwrap();
        let m = CostMatrix::from_text_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(m.cost(Cell::new(1, 1)), 4.0);

        let missing = std::env::temp_dir().join("valley_io_missing_frame.dat");
        assert!(matches!(
            CostMatrix::from_text_file(&missing),
            Err(LoadError::Io(_))
        ));
    }
}
