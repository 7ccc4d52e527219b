/// Create a box blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn box_blur_kernel_1d(kernel_size: usize) -> Vec<f32> {
    vec![1.0 / kernel_size as f32; kernel_size]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_blur_kernel_1d() {
        let kernel = box_blur_kernel_1d(5);
        assert_eq!(kernel.len(), 5);
        approx::assert_relative_eq!(kernel.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
        assert!(kernel.iter().all(|&k| k == 0.2));
    }
}
