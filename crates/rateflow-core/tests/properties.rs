//! Property-based tests for rateflow-core's resampling primitives.
//!
//! Tests coprimality, total-output-count conservation, and ring buffer
//! round-tripping using proptest for randomized input generation.

use proptest::prelude::*;
use rateflow_core::ring_buffer::{RingBuffer, RingBufferConfig};
use rateflow_core::stage::{FilterType, SingleStageConverter, StageConfig};
use rateflow_core::{factorize, gcd};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// gcd is commutative, divides both operands, and is zero only when both
    /// inputs are zero.
    #[test]
    fn gcd_divides_both_operands(x in 1u32..100_000, y in 1u32..100_000) {
        let g = gcd(x, y);
        prop_assert!(g >= 1);
        prop_assert_eq!(x % g, 0);
        prop_assert_eq!(y % g, 0);
        prop_assert_eq!(g, gcd(y, x));
    }

    /// factorize's output always multiplies back to the input and never
    /// exceeds the requested slot count, for any bound and any input.
    #[test]
    fn factorize_product_matches_input(x in 1u32..50_000, max_count in 1usize..10) {
        let factors = factorize(x, max_count);
        prop_assert!(factors.len() <= max_count);
        let product: u64 = factors.iter().map(|&f| f as u64).product();
        prop_assert_eq!(product, x as u64);
    }

    /// P1: any coprime (input_rate, output_rate) pair that survives
    /// construction reports gcd(up_rate, down_rate) == 1.
    #[test]
    fn p1_coprimality_holds_for_any_rate_pair(
        input_rate in 1u32..2000,
        output_rate in 1u32..2000,
        max_input in 1u32..64,
    ) {
        let cfg = StageConfig {
            max_num_input_samples: max_input,
            input_rate,
            output_rate,
            filter_type: FilterType::None,
            filter_order: 1,
        };
        if let Ok(c) = SingleStageConverter::create(cfg, None) {
            prop_assert_eq!(gcd(c.up_rate(), c.down_rate()), 1);
        }
    }

    /// P2: cumulative output across arbitrarily chunked process() calls
    /// only depends on total input length, not how it was split.
    #[test]
    fn p2_total_output_count_is_chunking_invariant(
        total_len in 8usize..96,
        split in 1usize..8,
    ) {
        let max_input = total_len as u32;
        let cfg = StageConfig {
            max_num_input_samples: max_input,
            input_rate: 3,
            output_rate: 2,
            filter_type: FilterType::None,
            filter_order: 1,
        };
        let input: Vec<f32> = (0..total_len).map(|i| i as f32).collect();

        let mut whole = SingleStageConverter::create(cfg, None).unwrap();
        let mut whole_out = vec![0.0f32; total_len * 2];
        let whole_n = whole.process(&input, &mut whole_out).unwrap();

        let mut chunked = SingleStageConverter::create(cfg, None).unwrap();
        let mut chunked_total = 0usize;
        let mut scratch = vec![0.0f32; total_len * 2];
        for chunk in input.chunks(split.max(1)) {
            chunked_total += chunked.process(chunk, &mut scratch).unwrap();
        }

        prop_assert_eq!(whole_n, chunked_total);
    }

    /// P11: any sequence of puts/gets respecting capacity and
    /// max_required_size bounds returns bytes in the order they were put.
    #[test]
    fn p11_ring_buffer_round_trip_preserves_order(
        chunk_lens in prop::collection::vec(1usize..4, 1..40),
    ) {
        let max_required = 4usize;
        let mut rb = RingBuffer::new(RingBufferConfig { max_size: 16, max_required_size: max_required }).unwrap();
        let mut expected = Vec::new();
        let mut observed = Vec::new();
        let mut next_byte: u8 = 0;

        for &len in &chunk_lens {
            let free = rb.max_size() - rb.remain();
            if len > free {
                continue;
            }
            let chunk: Vec<u8> = (0..len).map(|i| next_byte.wrapping_add(i as u8)).collect();
            next_byte = next_byte.wrapping_add(len as u8);
            rb.put(&chunk).unwrap();
            expected.extend_from_slice(&chunk);

            let get_len = len.min(rb.remain()).min(max_required);
            if get_len > 0 {
                observed.extend_from_slice(rb.get(get_len).unwrap());
            }
        }
        prop_assert_eq!(&expected[..observed.len()], &observed[..]);
    }
}
