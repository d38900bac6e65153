//! The standard vertical grid that every sounding is resampled onto before stations are
//! compared with each other.
use crate::error::{AnalysisError, Result};
use metfor::{HectoPascal, Quantity};

/// Most levels a grid may have. A finer step is almost certainly a units mistake.
pub const MAX_LEVELS: usize = 10_000;

/// Evenly spaced pressure levels from `start` down to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureGrid {
    start: HectoPascal,
    end: HectoPascal,
    step: HectoPascal,
}

impl Default for PressureGrid {
    /// 1000 hPa to 100 hPa every 10 hPa.
    fn default() -> Self {
        PressureGrid {
            start: HectoPascal(1000.0),
            end: HectoPascal(100.0),
            step: HectoPascal(10.0),
        }
    }
}

impl PressureGrid {
    /// Create a new grid.
    ///
    /// The start must be greater than the end, and both and the step must be positive. The step
    /// may not split the span into more than [`MAX_LEVELS`] levels.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metfor::HectoPascal;
    /// use sounding_cross_section::PressureGrid;
    ///
    /// let grid = PressureGrid::new(HectoPascal(1000.0), HectoPascal(500.0), HectoPascal(100.0))
    ///     .unwrap();
    /// assert_eq!(grid.levels(), vec![1000.0, 900.0, 800.0, 700.0, 600.0, 500.0]);
    ///
    /// // Upside down grids are rejected.
    /// assert!(PressureGrid::new(HectoPascal(100.0), HectoPascal(1000.0), HectoPascal(10.0))
    ///     .is_err());
    /// ```
    pub fn new<P>(start: P, end: P, step: P) -> Result<Self>
    where
        HectoPascal: From<P>,
        P: metfor::Pressure,
    {
        let (start, end, step) = (
            HectoPascal::from(start),
            HectoPascal::from(end),
            HectoPascal::from(step),
        );

        let all_finite = [start, end, step].iter().all(|p| p.unpack().is_finite());
        if !all_finite
            || end.unpack() <= 0.0
            || step.unpack() <= 0.0
            || start.unpack() <= end.unpack()
        {
            return Err(AnalysisError::InvalidInput);
        }
        if <HectoPascal as std::ops::Sub<HectoPascal>>::sub(start, end).unpack() / step.unpack() > MAX_LEVELS as f64 {
            return Err(AnalysisError::InvalidInput);
        }

        Ok(PressureGrid { start, end, step })
    }

    /// Pressure of the bottom level.
    #[inline]
    pub fn start(&self) -> HectoPascal {
        self.start
    }

    /// Pressure of the top level, only included in the levels if it falls on a step.
    #[inline]
    pub fn end(&self) -> HectoPascal {
        self.end
    }

    /// Spacing between levels.
    #[inline]
    pub fn step(&self) -> HectoPascal {
        self.step
    }

    /// Number of levels on the grid.
    pub fn len(&self) -> usize {
        let span = (self.start - self.end).unpack();
        // A hair of tolerance so 1000 to 100 by 10 gives 91 levels despite rounding.
        (span / self.step.unpack() + 1.0e-9).floor() as usize + 1
    }

    /// Always false, a valid grid has at least two levels.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The pressure levels in hPa, strictly decreasing.
    pub fn levels(&self) -> Vec<f64> {
        let (start, step) = (self.start.unpack(), self.step.unpack());
        (0..self.len()).map(|i| start - step * i as f64).collect()
    }
}
