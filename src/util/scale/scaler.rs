use num_traits::Float;

/// Maps values of the closed range `[min, max]` linearly onto `[0, 1]`.
pub struct Scaler<T> {
    pub min: T,
    pub max: T,
    diff: T,
}

impl<T: Float> Scaler<T> {
    pub fn new(min: T, max: T) -> Self {
        Scaler {
            min,
            max,
            diff: max - min,
        }
    }

    pub fn scale(&self, val: T) -> T {
        // a degenerate range collapses everything onto its lower end
        if self.diff == T::zero() {
            return T::zero();
        }

        (val - self.min) / self.diff
    }
}
