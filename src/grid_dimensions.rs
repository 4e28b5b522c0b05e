use log::debug;
use std::cmp;

use crate::errors::*;
use crate::units::{Height, NodesCount, Width};

/// The largest width or height a grid may have. Larger requests are clamped to it.
pub const MAX_GRID_DIMENSION: usize = 50;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GridDimensions {
    width: Width,
    height: Height,
}

impl GridDimensions {
    /// Zero is rejected with `InvalidDimension`; anything over `MAX_GRID_DIMENSION` is
    /// silently truncated.
    pub fn new(width: usize, height: usize) -> Result<GridDimensions> {
        if width == 0 {
            bail!(ErrorKind::InvalidDimension("width", width));
        }
        if height == 0 {
            bail!(ErrorKind::InvalidDimension("height", height));
        }

        let clamped_width = cmp::min(width, MAX_GRID_DIMENSION);
        let clamped_height = cmp::min(height, MAX_GRID_DIMENSION);
        if clamped_width != width || clamped_height != height {
            debug!("[GridDimensions] clamped {}x{} to {}x{}",
                   width,
                   height,
                   clamped_width,
                   clamped_height);
        }

        Ok(GridDimensions {
            width: Width(clamped_width),
            height: Height(clamped_height),
        })
    }

    #[inline(always)]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.width.0 * self.height.0)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn zero_dimensions_are_rejected() {
        match GridDimensions::new(0, 5) {
            Err(Error(ErrorKind::InvalidDimension("width", 0), _)) => {}
            other => panic!("expected invalid width, got {:?}", other),
        }
        match GridDimensions::new(5, 0) {
            Err(Error(ErrorKind::InvalidDimension("height", 0), _)) => {}
            other => panic!("expected invalid height, got {:?}", other),
        }
    }

    #[test]
    fn oversized_dimensions_are_clamped() {
        let dims = GridDimensions::new(51, 1000).expect("clamping never fails");
        assert_eq!(dims.width(), Width(MAX_GRID_DIMENSION));
        assert_eq!(dims.height(), Height(MAX_GRID_DIMENSION));

        let dims = GridDimensions::new(50, 7).unwrap();
        assert_eq!(dims.width(), Width(50));
        assert_eq!(dims.height(), Height(7));
    }
}
