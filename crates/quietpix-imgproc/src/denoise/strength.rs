use std::str::FromStr;

use super::DenoiseError;

/// Smallest kernel the box and median filters are run with.
pub const MIN_KERNEL_SIZE: usize = 3;

/// Base magnitude of the wavelet soft-threshold.
const WAVELET_BASE_THRESHOLD: f32 = 20.0;

/// Offset added to the strength so the wavelet threshold never reaches zero on `[0, 1]`.
const WAVELET_THRESHOLD_FLOOR: f32 = 0.2;

/// The single knob controlling how aggressive every denoising method is.
///
/// The nominal range is `[0, 1]`. Finite values outside it are kept and the derived
/// parameters are extrapolated, with the kernel size floored at [`MIN_KERNEL_SIZE`]
/// and the wavelet threshold floored at zero. Kernels above
/// [`crate::filter::MAX_KERNEL_SIZE`] are refused by the filters, so very large
/// strengths fail as a transform error for the kernel based methods.
///
/// # Examples
///
/// ```
/// use quietpix_imgproc::denoise::Strength;
///
/// let strength = Strength::new(0.5).unwrap();
/// assert_eq!(strength.kernel_size(), 7);
/// assert!((strength.wavelet_threshold() - 14.0).abs() < 1e-5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strength(f32);

impl Strength {
    /// Strength used when the caller does not provide one.
    pub const DEFAULT: Strength = Strength(0.5);

    /// Create a strength from a raw value.
    ///
    /// # Errors
    ///
    /// NaN and infinities are rejected.
    pub fn new(value: f32) -> Result<Self, DenoiseError> {
        if !value.is_finite() {
            return Err(DenoiseError::InvalidStrength(value.to_string()));
        }
        Ok(Self(value))
    }

    /// The raw strength value.
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Kernel size for the box and median filters.
    ///
    /// `round(3 + 8 * strength)`, bumped to the next odd number and never below
    /// [`MIN_KERNEL_SIZE`]. Strength `0` gives `3`, strength `1` gives `11`.
    pub fn kernel_size(&self) -> usize {
        let k = (3.0 + self.0 * 8.0).round();
        let k = if k < MIN_KERNEL_SIZE as f32 {
            MIN_KERNEL_SIZE
        } else {
            k as usize
        };
        if k % 2 == 0 {
            k + 1
        } else {
            k
        }
    }

    /// Soft-threshold magnitude for the wavelet denoiser.
    ///
    /// `20 * (0.2 + strength)`, i.e. `4` at strength `0` up to `24` at strength `1`.
    pub fn wavelet_threshold(&self) -> f32 {
        (WAVELET_BASE_THRESHOLD * (WAVELET_THRESHOLD_FLOOR + self.0)).max(0.0)
    }
}

impl Default for Strength {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f32> for Strength {
    type Error = DenoiseError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Strength::new(value)
    }
}

impl FromStr for Strength {
    type Err = DenoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<f32>()
            .map_err(|_| DenoiseError::InvalidStrength(s.to_string()))?;
        Strength::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kernel_size_range() {
        assert_eq!(Strength(0.0).kernel_size(), 3);
        assert_eq!(Strength(0.1).kernel_size(), 5);
        assert_eq!(Strength(0.25).kernel_size(), 5);
        assert_eq!(Strength(0.5).kernel_size(), 7);
        assert_eq!(Strength(0.75).kernel_size(), 9);
        assert_eq!(Strength(1.0).kernel_size(), 11);
    }

    #[test]
    fn test_kernel_size_is_odd_and_bounded() {
        for i in 0..=1000 {
            let k = Strength(i as f32 / 1000.0).kernel_size();
            assert_eq!(k % 2, 1, "kernel {k} at step {i}");
            assert!((3..=11).contains(&k), "kernel {k} at step {i}");
        }
    }

    #[test]
    fn test_kernel_size_extrapolated() {
        assert_eq!(Strength(-2.0).kernel_size(), MIN_KERNEL_SIZE);
        assert_eq!(Strength(2.0).kernel_size(), 19);
    }

    #[test]
    fn test_wavelet_threshold_range() {
        assert_relative_eq!(Strength(0.0).wavelet_threshold(), 4.0, epsilon = 1e-5);
        assert_relative_eq!(Strength(0.5).wavelet_threshold(), 14.0, epsilon = 1e-5);
        assert_relative_eq!(Strength(1.0).wavelet_threshold(), 24.0, epsilon = 1e-5);
        assert!(Strength(0.0).wavelet_threshold() > 0.0);
    }

    #[test]
    fn test_wavelet_threshold_monotonic() {
        let thresholds: Vec<f32> = (0..=100)
            .map(|i| Strength(i as f32 / 100.0).wavelet_threshold())
            .collect();
        assert!(thresholds.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_wavelet_threshold_extrapolated() {
        assert_eq!(Strength(-1.0).wavelet_threshold(), 0.0);
        assert_relative_eq!(Strength(2.0).wavelet_threshold(), 44.0, epsilon = 1e-4);
    }

    #[test]
    fn test_strength_parse() {
        assert_eq!("0.25".parse::<Strength>(), Ok(Strength(0.25)));
        assert_eq!(" 1 ".parse::<Strength>(), Ok(Strength(1.0)));
        assert_eq!(
            "abc".parse::<Strength>(),
            Err(DenoiseError::InvalidStrength("abc".into()))
        );
        assert!(matches!(
            "NaN".parse::<Strength>(),
            Err(DenoiseError::InvalidStrength(_))
        ));
        assert!(Strength::try_from(f32::INFINITY).is_err());
        assert_eq!(Strength::default(), Strength::DEFAULT);
    }
}
