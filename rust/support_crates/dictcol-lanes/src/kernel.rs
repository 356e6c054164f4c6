/// Implementation strategy of the lane compare operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareKernel {
    /// One element at a time, no batching.
    Scalar,
    /// Batched lane compare in plain Rust.
    Portable,
    /// Batched lane compare using AVX2 intrinsics.
    Avx2,
}

impl CompareKernel {
    /// Returns the fastest batched kernel supported by the running CPU.
    pub fn detect() -> CompareKernel {
        if avx2_available() {
            CompareKernel::Avx2
        } else {
            CompareKernel::Portable
        }
    }

    /// Whether the kernel can run on this host.
    pub fn is_supported(self) -> bool {
        match self {
            CompareKernel::Scalar | CompareKernel::Portable => true,
            CompareKernel::Avx2 => avx2_available(),
        }
    }

    /// Returns `self` when supported, otherwise the portable batched kernel.
    pub fn or_portable(self) -> CompareKernel {
        if self.is_supported() {
            self
        } else {
            CompareKernel::Portable
        }
    }

    /// Whether the kernel compares whole batches (as opposed to single elements).
    pub fn is_batched(self) -> bool {
        !matches!(self, CompareKernel::Scalar)
    }

    pub fn name(self) -> &'static str {
        match self {
            CompareKernel::Scalar => "scalar",
            CompareKernel::Portable => "portable",
            CompareKernel::Avx2 => "avx2",
        }
    }

    /// All kernels usable on this host, scalar first.
    pub fn available() -> Vec<CompareKernel> {
        [
            CompareKernel::Scalar,
            CompareKernel::Portable,
            CompareKernel::Avx2,
        ]
        .into_iter()
        .filter(|k| k.is_supported())
        .collect()
    }
}

impl std::fmt::Display for CompareKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[inline]
fn avx2_available() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        std::arch::is_x86_feature_detected!("avx2")
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::CompareKernel;

    #[test]
    fn test_detect_is_supported_and_batched() {
        let kernel = CompareKernel::detect();
        assert!(kernel.is_supported());
        assert!(kernel.is_batched());
        assert_eq!(kernel.or_portable(), kernel);
    }

    #[test]
    fn test_available_kernels() {
        let kernels = CompareKernel::available();
        assert_eq!(kernels[0], CompareKernel::Scalar);
        assert!(kernels.contains(&CompareKernel::Portable));
        assert_eq!(
            kernels.contains(&CompareKernel::Avx2),
            CompareKernel::Avx2.is_supported()
        );
        assert!(CompareKernel::Avx2.or_portable().is_supported());
        assert_eq!(CompareKernel::Scalar.to_string(), "scalar");
    }
}
