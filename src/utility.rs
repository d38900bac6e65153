//! Small numeric helpers shared across modules.

/// Evenly spaced values from `start` to `end`, inclusive of both ends.
///
/// The last value is exactly `end` so that mesh edges line up with the data they were built
/// from. Fewer than 2 points returns just `start` (or nothing).
pub(crate) fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            (0..num)
                .map(|i| {
                    if i == num - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}
