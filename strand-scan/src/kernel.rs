use std::sync::OnceLock;

/// Instruction-set capability selected for the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// No vector unit in use; callers take their per-byte paths.
    Scalar,
    /// 16-byte blocks via SSE2.
    Sse2,
    /// 32-byte blocks via AVX2.
    Avx2,
}

impl Level {
    /// Block width of the level in bytes; `0` for the scalar fallback.
    pub const fn width(self) -> usize {
        match self {
            Level::Scalar => 0,
            Level::Sse2 => 16,
            Level::Avx2 => 32,
        }
    }
}

static LEVEL: OnceLock<Level> = OnceLock::new();

/// Probe the CPU for the widest supported level.
///
/// Does not touch the process-global record; [`level`] does that on first
/// use. Non-x86_64 targets, and builds without the `simd` feature, always
/// report [`Level::Scalar`].
pub fn detect() -> Level {
    #[cfg(all(target_arch = "x86_64", feature = "simd"))]
    {
        if is_x86_feature_detected!("avx2") {
            return Level::Avx2;
        }
        if is_x86_feature_detected!("sse2") {
            return Level::Sse2;
        }
    }
    Level::Scalar
}

/// The process-global level, probing the CPU on first call.
///
/// Concurrent first calls are serialized by the cell; after that the record
/// is immutable.
pub fn level() -> Level {
    *LEVEL.get_or_init(|| {
        let level = detect();
        tracing::debug!(?level, width = level.width(), "scan kernel selected");
        level
    })
}

/// Pin the process-global level before first use, e.g. to force the scalar
/// paths in tests. Returns `false` when the record was already set.
pub fn force_level(level: Level) -> bool {
    LEVEL.set(level).is_ok()
}

/// Dispatch handle over the three block primitives.
///
/// All primitives require `block.len() >= width()`; only the first `width()`
/// bytes participate. A handle at [`Level::Scalar`] has no block primitives
/// to offer and callers are expected to branch on `width() == 0` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    level: Level,
}

impl Kernel {
    /// Handle bound to the process-global level.
    pub fn current() -> Self {
        Self { level: level() }
    }

    /// Handle bound to an explicit level; the caller asserts the CPU
    /// supports it.
    pub const fn with_level(level: Level) -> Self {
        Self { level }
    }

    /// The bound level.
    pub const fn level(self) -> Level {
        self.level
    }

    /// Block width in bytes; `0` means no vector path.
    pub const fn width(self) -> usize {
        self.level.width()
    }

    /// Bitmask of lanes where `block[i] == c`.
    pub fn match_byte(self, block: &[u8], c: u8) -> u32 {
        debug_assert!(block.len() >= self.width());
        match self.level {
            Level::Scalar => 0,
            #[cfg(all(target_arch = "x86_64", feature = "simd"))]
            // SAFETY: the handle is only constructed at a level the CPU
            // reported; block length is checked above.
            Level::Sse2 => unsafe { crate::x86::match_byte16(block, c) },
            #[cfg(all(target_arch = "x86_64", feature = "simd"))]
            // SAFETY: as above.
            Level::Avx2 => unsafe { crate::x86::match_byte32(block, c) },
            #[cfg(not(all(target_arch = "x86_64", feature = "simd")))]
            _ => 0,
        }
    }

    /// Bitmask of lanes where `block[i]` is a member of `set`.
    pub fn match_set(self, block: &[u8], set: &[u8]) -> u32 {
        debug_assert!(block.len() >= self.width());
        match self.level {
            Level::Scalar => 0,
            #[cfg(all(target_arch = "x86_64", feature = "simd"))]
            // SAFETY: as for `match_byte`.
            Level::Sse2 => unsafe { crate::x86::match_set16(block, set) },
            #[cfg(all(target_arch = "x86_64", feature = "simd"))]
            // SAFETY: as for `match_byte`.
            Level::Avx2 => unsafe { crate::x86::match_set32(block, set) },
            #[cfg(not(all(target_arch = "x86_64", feature = "simd")))]
            _ => 0,
        }
    }

    /// Bitmask of lanes where `a[i] == b[i]`.
    pub fn compare(self, a: &[u8], b: &[u8]) -> u32 {
        debug_assert!(a.len() >= self.width() && b.len() >= self.width());
        match self.level {
            Level::Scalar => 0,
            #[cfg(all(target_arch = "x86_64", feature = "simd"))]
            // SAFETY: as for `match_byte`.
            Level::Sse2 => unsafe { crate::x86::compare16(a, b) },
            #[cfg(all(target_arch = "x86_64", feature = "simd"))]
            // SAFETY: as for `match_byte`.
            Level::Avx2 => unsafe { crate::x86::compare32(a, b) },
            #[cfg(not(all(target_arch = "x86_64", feature = "simd")))]
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn model_match_byte(block: &[u8], c: u8, width: usize) -> u32 {
        let mut mask = 0u32;
        for (i, &b) in block.iter().take(width).enumerate() {
            if b == c {
                mask |= 1 << i;
            }
        }
        mask
    }

    fn model_match_set(block: &[u8], set: &[u8], width: usize) -> u32 {
        let mut mask = 0u32;
        for (i, &b) in block.iter().take(width).enumerate() {
            if set.contains(&b) {
                mask |= 1 << i;
            }
        }
        mask
    }

    fn model_compare(a: &[u8], b: &[u8], width: usize) -> u32 {
        let mut mask = 0u32;
        for i in 0..width {
            if a[i] == b[i] {
                mask |= 1 << i;
            }
        }
        mask
    }

    fn available_levels() -> Vec<Level> {
        let mut levels = Vec::new();
        let detected = detect();
        if detected.width() >= 16 {
            levels.push(Level::Sse2);
        }
        if detected.width() >= 32 {
            levels.push(Level::Avx2);
        }
        levels
    }

    #[test]
    fn detect_is_stable() {
        assert_eq!(detect(), detect());
        assert_eq!(level(), level());
    }

    #[test]
    fn masks_agree_with_scalar_model() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5ca9);
        for kernel in available_levels().into_iter().map(Kernel::with_level) {
            let w = kernel.width();
            for _ in 0..200 {
                let block: Vec<u8> = (0..w).map(|_| rng.gen_range(0..8)).collect();
                let c = rng.gen_range(0..8u8);
                assert_eq!(kernel.match_byte(&block, c), model_match_byte(&block, c, w));

                let set: Vec<u8> = (0..rng.gen_range(1..6)).map(|_| rng.gen_range(0..8)).collect();
                assert_eq!(kernel.match_set(&block, &set), model_match_set(&block, &set, w));

                let mut other = block.clone();
                for _ in 0..rng.gen_range(0..4) {
                    let at = rng.gen_range(0..w);
                    other[at] = other[at].wrapping_add(1);
                }
                assert_eq!(kernel.compare(&block, &other), model_compare(&block, &other, w));
            }
        }
    }

    #[test]
    fn lanes_above_width_are_zero() {
        for kernel in available_levels().into_iter().map(Kernel::with_level) {
            let w = kernel.width();
            let block = vec![0x42u8; MAX];
            let mask = kernel.match_byte(&block[..w.max(MAX)], 0x42);
            if w < 32 {
                assert_eq!(mask >> w, 0, "high lanes must stay clear");
            }
            assert_eq!(mask.count_ones() as usize, w);
        }
        const MAX: usize = 32;
    }

    #[test]
    fn first_and_last_hit_locate_via_mask_math() {
        for kernel in available_levels().into_iter().map(Kernel::with_level) {
            let w = kernel.width();
            let mut block = vec![0u8; w];
            block[3] = 0xee;
            block[w - 2] = 0xee;
            let mask = kernel.match_byte(&block, 0xee);
            assert_eq!(mask.trailing_zeros() as usize, 3);
            assert_eq!((u32::BITS - 1 - mask.leading_zeros()) as usize, w - 2);
        }
    }

    #[test]
    fn scalar_kernel_has_no_width() {
        let kernel = Kernel::with_level(Level::Scalar);
        assert_eq!(kernel.width(), 0);
        assert_eq!(kernel.match_byte(b"", 0), 0);
    }
}
