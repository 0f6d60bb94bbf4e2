//! Main-axis space negotiation for linear stacks.
//!
//! This module holds the axis-agnostic math: given each visible child's
//! `(min, max)` extent along the main axis and whether it opted into
//! `Fill`, decide how much main-axis space every child receives. The
//! stack itself measures children and positions them; `distribute` only
//! does arithmetic, which keeps it easy to test in isolation.

use super::length::Alignment;

/// Main-axis input for one visible child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MainRange {
    pub min: f32,
    pub max: f32,
    /// Child is `Fill` on the main axis.
    pub fill: bool,
}

impl MainRange {
    pub fn new(min: f32, max: f32, fill: bool) -> Self {
        Self { min, max, fill }
    }

    /// A child whose size cannot change (`min == max`).
    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }
}

/// Which negotiation case applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Nothing to distribute.
    Empty,
    /// Available main extent is unbounded; every child takes its max.
    Unbounded,
    /// Everything fits at max size.
    Fits,
    /// Even minimum sizes overflow.
    Shrink,
    /// Between the two: interpolate each child between min and max.
    Interpolate,
}

/// Result of `distribute`.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    /// Assigned main extent per input, in order.
    pub sizes: Vec<f32>,
    pub branch: Branch,
    /// `Σ min + spacing`.
    pub total_min: f32,
    /// `Σ max + spacing`.
    pub total_max: f32,
    /// Whether any input was `Fill`.
    pub has_fill: bool,
    /// Children were stretched to exactly cover the available extent.
    pub fills_axis: bool,
}

impl Distribution {
    /// Sum of assigned sizes plus spacing.
    pub fn used(&self, spacing_total: f32) -> f32 {
        self.sizes.iter().sum::<f32>() + spacing_total
    }
}

/// `weight * space / denominator`, or an equal split when the denominator
/// is zero.
#[inline]
fn share(weight: f32, space: f32, denominator: f32, count: usize) -> f32 {
    if denominator > f32::EPSILON {
        weight * space / denominator
    } else if count > 0 {
        space / count as f32
    } else {
        0.0
    }
}

/// Negotiate main-axis sizes for a stack's visible children.
///
/// * `available` - main-axis extent offered to the stack (may be infinite)
/// * `spacing_total` - spacing between visible children, already summed
/// * `along` - the stack's main-axis distribution policy
pub fn distribute(
    inputs: &[MainRange],
    available: f32,
    spacing_total: f32,
    along: Alignment,
) -> Distribution {
    let sum_min: f32 = inputs.iter().map(|i| i.min).sum();
    let sum_max: f32 = inputs.iter().map(|i| i.max).sum();
    let total_min = sum_min + spacing_total;
    let total_max = sum_max + spacing_total;
    let has_fill = inputs.iter().any(|i| i.fill);

    let fill_count = inputs.iter().filter(|i| i.fill).count();
    let fill_max: f32 = inputs.iter().filter(|i| i.fill).map(|i| i.max).sum();
    let non_fill_min: f32 = inputs.iter().filter(|i| !i.fill).map(|i| i.min).sum();
    let non_fill_max: f32 = inputs.iter().filter(|i| !i.fill).map(|i| i.max).sum();

    let mut fills_axis = false;

    let (branch, sizes): (Branch, Vec<f32>) = if inputs.is_empty() {
        (Branch::Empty, Vec::new())
    } else if !available.is_finite() {
        (Branch::Unbounded, inputs.iter().map(|i| i.max).collect())
    } else if total_max <= available {
        let sizes = if has_fill {
            fills_axis = true;
            let fill_space = (available - spacing_total - non_fill_max).max(0.0);
            inputs
                .iter()
                .map(|i| {
                    if i.fill {
                        share(i.max, fill_space, fill_max, fill_count)
                    } else {
                        i.max
                    }
                })
                .collect()
        } else if along.is_fill() {
            fills_axis = true;
            let space = (available - spacing_total).max(0.0);
            inputs
                .iter()
                .map(|i| share(i.max, space, sum_max, inputs.len()))
                .collect()
        } else {
            inputs.iter().map(|i| i.max).collect()
        };
        (Branch::Fits, sizes)
    } else if total_min >= available {
        let fill_space = available - non_fill_min - spacing_total;
        let sizes = if has_fill && fill_space > 0.0 {
            inputs
                .iter()
                .map(|i| {
                    if i.fill {
                        share(i.max, fill_space, fill_max, fill_count)
                    } else {
                        i.min
                    }
                })
                .collect()
        } else {
            let available = available.max(0.0);
            inputs
                .iter()
                .map(|i| share(i.min, available, total_min, inputs.len()))
                .collect()
        };
        (Branch::Shrink, sizes)
    } else {
        let t = (available - total_min) / (total_max - total_min);
        let sizes = inputs
            .iter()
            .map(|i| {
                if i.is_fixed() {
                    i.min
                } else {
                    i.min + (i.max - i.min) * t
                }
            })
            .collect();
        (Branch::Interpolate, sizes)
    };

    let sizes = sizes
        .into_iter()
        .map(|s| if s.is_finite() && s > 0.0 { s } else { 0.0 })
        .collect();

    Distribution {
        sizes,
        branch,
        total_min,
        total_max,
        has_fill,
        fills_axis,
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(size: f32) -> MainRange {
        MainRange::new(size, size, false)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_empty() {
        let d = distribute(&[], 100.0, 0.0, Alignment::Leading);
        assert_eq!(d.branch, Branch::Empty);
        assert!(d.sizes.is_empty());
    }

    #[test]
    fn test_fits_keeps_max_without_fill() {
        let inputs = [fixed(50.0), MainRange::new(10.0, 30.0, false)];
        let d = distribute(&inputs, 200.0, 10.0, Alignment::Leading);
        assert_eq!(d.branch, Branch::Fits);
        assert_eq!(d.sizes, vec![50.0, 30.0]);
        assert_eq!(d.used(10.0), d.total_max);
        assert!(!d.fills_axis);
    }

    #[test]
    fn test_fits_gives_leftover_to_fill_children() {
        let inputs = [
            fixed(50.0),
            MainRange::new(0.0, 20.0, true),
            MainRange::new(0.0, 60.0, true),
        ];
        // 200 - 20 spacing - 50 = 130 for fill, split 1:3 by max
        let d = distribute(&inputs, 200.0, 20.0, Alignment::Leading);
        assert_eq!(d.branch, Branch::Fits);
        assert_eq!(d.sizes[0], 50.0);
        assert!(approx(d.sizes[1], 32.5));
        assert!(approx(d.sizes[2], 97.5));
        assert!(approx(d.used(20.0), 200.0));
        assert!(d.fills_axis);
    }

    #[test]
    fn test_fits_along_fill_scales_everyone() {
        let inputs = [fixed(20.0), fixed(60.0)];
        let d = distribute(&inputs, 170.0, 10.0, Alignment::Fill);
        assert!(approx(d.sizes[0], 40.0));
        assert!(approx(d.sizes[1], 120.0));
        assert!(approx(d.used(10.0), 170.0));
    }

    #[test]
    fn test_fill_with_zero_max_splits_equally() {
        let inputs = [fixed(40.0), MainRange::new(0.0, 0.0, true), MainRange::new(0.0, 0.0, true)];
        let d = distribute(&inputs, 100.0, 0.0, Alignment::Leading);
        assert_eq!(d.sizes, vec![40.0, 30.0, 30.0]);
        assert!(d.sizes.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_along_fill_with_zero_max_splits_equally() {
        let inputs = [fixed(0.0), fixed(0.0)];
        let d = distribute(&inputs, 50.0, 0.0, Alignment::Fill);
        assert_eq!(d.sizes, vec![25.0, 25.0]);
    }

    #[test]
    fn test_shrink_uniform_by_min() {
        let inputs = [fixed(40.0), MainRange::new(0.0, 1000.0, true)];
        let d = distribute(&inputs, 20.0, 10.0, Alignment::Leading);
        assert_eq!(d.branch, Branch::Shrink);
        assert!(approx(d.sizes[0], 16.0));
        assert_eq!(d.sizes[1], 0.0);
    }

    #[test]
    fn test_shrink_pins_non_fill_at_min() {
        let inputs = [fixed(40.0), MainRange::new(10.0, 1000.0, true)];
        // total_min = 60 >= 55; fill space = 55 - 40 - 10 = 5
        let d = distribute(&inputs, 55.0, 10.0, Alignment::Leading);
        assert_eq!(d.branch, Branch::Shrink);
        assert_eq!(d.sizes[0], 40.0);
        assert!(approx(d.sizes[1], 5.0));
        assert!(approx(d.used(10.0), 55.0));
    }

    #[test]
    fn test_shrink_never_exceeds_min() {
        let inputs = [MainRange::new(30.0, 80.0, false), MainRange::new(50.0, 90.0, false)];
        let d = distribute(&inputs, 40.0, 0.0, Alignment::Leading);
        assert!(d.sizes[0] <= 30.0);
        assert!(d.sizes[1] <= 50.0);
        assert!(approx(d.used(0.0), 40.0));
    }

    #[test]
    fn test_shrink_with_zero_total_min() {
        let inputs = [MainRange::new(0.0, 10.0, false)];
        let d = distribute(&inputs, 0.0, 0.0, Alignment::Leading);
        assert_eq!(d.branch, Branch::Shrink);
        assert_eq!(d.sizes, vec![0.0]);
    }

    #[test]
    fn test_interpolates_between_min_and_max() {
        let inputs = [MainRange::new(10.0, 110.0, false), MainRange::new(20.0, 60.0, false)];
        // total_min 30, total_max 170, available 100 -> t = 0.5
        let d = distribute(&inputs, 100.0, 0.0, Alignment::Leading);
        assert_eq!(d.branch, Branch::Interpolate);
        assert!(approx(d.sizes[0], 60.0));
        assert!(approx(d.sizes[1], 40.0));
    }

    #[test]
    fn test_interpolation_leaves_fixed_child_alone() {
        let inputs = [
            fixed(40.0),
            MainRange::new(0.0, 200.0, false),
            MainRange::new(10.0, 50.0, true),
        ];
        let d = distribute(&inputs, 150.0, 20.0, Alignment::Leading);
        assert_eq!(d.branch, Branch::Interpolate);
        assert_eq!(d.sizes[0], 40.0);
        assert!(d.sizes[1] >= 0.0 && d.sizes[1] <= 200.0);
        assert!(d.sizes[2] >= 10.0 && d.sizes[2] <= 50.0);
        assert!(approx(d.used(20.0), 150.0));
    }

    #[test]
    fn test_unbounded_takes_max() {
        let inputs = [MainRange::new(0.0, 30.0, true), fixed(10.0)];
        let d = distribute(&inputs, f32::INFINITY, 5.0, Alignment::Fill);
        assert_eq!(d.branch, Branch::Unbounded);
        assert_eq!(d.sizes, vec![30.0, 10.0]);
        assert!(!d.fills_axis);
    }
}
