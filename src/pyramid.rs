//! Bit-sliced counter used by the Harley-Seal tier.
//!
//! Between two blocks, for every bit position of the 256-bit vectors the number of set
//! input bits seen so far equals `16 * drained + 8 * eights + 4 * fours + 2 * twos + ones`,
//! where `drained` counts the `sixteens` planes returned by [`BitPlanes::fold_block`].

use crate::simd::{csa, WideVector};

/// Number of vectors folded per block.
pub const BLOCK_VECTORS: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct BitPlanes<V: WideVector> {
    pub ones: V,
    pub twos: V,
    pub fours: V,
    pub eights: V,
}

#[allow(clippy::missing_safety_doc)]
impl<V: WideVector> BitPlanes<V> {
    #[inline(always)]
    pub unsafe fn new() -> Self {
        BitPlanes {
            ones: V::zero(),
            twos: V::zero(),
            fours: V::zero(),
            eights: V::zero(),
        }
    }

    /// Fold 16 vectors into the planes and return the overflowing `sixteens` plane.
    #[inline(always)]
    pub unsafe fn fold_block(&mut self, block: &[V; BLOCK_VECTORS]) -> V {
        let (eights_a, fours) = self.fold_half(&block[..BLOCK_VECTORS / 2]);
        self.fours = fours;
        let (eights_b, fours) = self.fold_half(&block[BLOCK_VECTORS / 2..]);
        self.fours = fours;

        let (sixteens, eights) = csa(self.eights, eights_a, eights_b);
        self.eights = eights;
        sixteens
    }

    /// Fold 8 vectors into `ones` and `twos`. Returns the `eights` carry and the new `fours`,
    /// the caller stores `fours` before the next half.
    #[inline(always)]
    unsafe fn fold_half(&mut self, half: &[V]) -> (V, V) {
        let (twos_a, ones) = csa(self.ones, half[0], half[1]);
        let (twos_b, ones) = csa(ones, half[2], half[3]);
        let (fours_a, twos) = csa(self.twos, twos_a, twos_b);
        let (twos_a, ones) = csa(ones, half[4], half[5]);
        let (twos_b, ones) = csa(ones, half[6], half[7]);
        let (fours_b, twos) = csa(twos, twos_a, twos_b);
        self.ones = ones;
        self.twos = twos;

        csa(self.fours, fours_a, fours_b)
    }

    /// Weight the accumulated `sixteens` drains by 16 and add the remaining planes
    /// with weights 8, 4, 2 and 1. Must be called once, after the last block.
    #[inline(always)]
    pub unsafe fn drain_into(self, total: V) -> V {
        let mut total = total.shl_lanes::<4>();
        total = total.add_lanes(self.eights.popcount_lanes().shl_lanes::<3>());
        total = total.add_lanes(self.fours.popcount_lanes().shl_lanes::<2>());
        total = total.add_lanes(self.twos.popcount_lanes().shl_lanes::<1>());
        total.add_lanes(self.ones.popcount_lanes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::portable::PortableVector;
    use rand::{Rng, SeedableRng};

    fn bit(v: &PortableVector, position: usize) -> u64 {
        (v.0[position / 64] >> (position % 64)) & 1
    }

    #[test]
    fn test_fold_block_keeps_counter_invariant() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let mut planes = unsafe { BitPlanes::<PortableVector>::new() };
        let mut reference = vec![0u64; 256];
        let mut drained = vec![0u64; 256];

        for block_index in 0..64 {
            let block: [PortableVector; BLOCK_VECTORS] = std::array::from_fn(|i| {
                // mix dense, sparse and random blocks so every plane overflows
                match (block_index + i) % 3 {
                    0 => PortableVector([u64::MAX; 4]),
                    1 => PortableVector(rng.gen::<[u64; 4]>().map(|x| x & rng.gen::<u64>())),
                    _ => PortableVector(rng.gen()),
                }
            });

            for v in &block {
                for (position, count) in reference.iter_mut().enumerate() {
                    *count += bit(v, position);
                }
            }

            let sixteens = unsafe { planes.fold_block(&block) };
            for (position, count) in drained.iter_mut().enumerate() {
                *count += bit(&sixteens, position);
            }

            for position in 0..256 {
                let counted = 16 * drained[position]
                    + 8 * bit(&planes.eights, position)
                    + 4 * bit(&planes.fours, position)
                    + 2 * bit(&planes.twos, position)
                    + bit(&planes.ones, position);
                assert_eq!(counted, reference[position], "block {block_index}, bit {position}");
            }
        }
    }

    #[test]
    fn test_drain_into_weights() {
        let planes = BitPlanes {
            ones: PortableVector([1, 0, 0, 0]),
            twos: PortableVector([0, 0b11, 0, 0]),
            fours: PortableVector([0, 0, 0b111, 0]),
            eights: PortableVector([0, 0, 0, 0b1111]),
        };
        let total = unsafe { planes.drain_into(PortableVector([1, 2, 3, 4])) };
        assert_eq!(total.0, [16 + 1, 32 + 4, 48 + 12, 64 + 32]);
    }

    #[test]
    fn test_all_ones_block_drains_everything() {
        let mut planes = unsafe { BitPlanes::<PortableVector>::new() };
        let block = [PortableVector([u64::MAX; 4]); BLOCK_VECTORS];
        let sixteens = unsafe { planes.fold_block(&block) };
        assert_eq!(sixteens, PortableVector([u64::MAX; 4]));
        assert_eq!(planes.ones, PortableVector::default());
        assert_eq!(planes.twos, PortableVector::default());
        assert_eq!(planes.fours, PortableVector::default());
        assert_eq!(planes.eights, PortableVector::default());
    }
}
