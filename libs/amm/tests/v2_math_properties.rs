//! Constant product math property tests
//!
//! These tests validate properties that must hold for every input in the
//! valid domain, independent of specific pool sizes.

use amm::{ConstantProductPool, MathError, V2Math, U256};
use proptest::prelude::*;

prop_compose! {
    fn positive_amount()
        (amount in 1u64..=u64::MAX) -> U256 {
        U256::from(amount)
    }
}

prop_compose! {
    fn reserve_pair()
        (reserve_in in 1u64..=u64::MAX, reserve_out in 1u64..=u64::MAX) -> (U256, U256) {
        (U256::from(reserve_in), U256::from(reserve_out))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn output_is_below_reserve_out(
        amount_in in positive_amount(),
        (reserve_in, reserve_out) in reserve_pair(),
    ) {
        let out = V2Math::get_amount_out(amount_in, reserve_in, reserve_out).unwrap();
        prop_assert!(out < reserve_out);
    }

    #[test]
    fn output_is_monotone_in_amount_in(
        a in positive_amount(),
        b in positive_amount(),
        (reserve_in, reserve_out) in reserve_pair(),
    ) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let out_small = V2Math::get_amount_out(small, reserve_in, reserve_out).unwrap();
        let out_large = V2Math::get_amount_out(large, reserve_in, reserve_out).unwrap();
        prop_assert!(out_small <= out_large);
    }

    #[test]
    fn output_is_monotone_in_reserves(
        amount_in in positive_amount(),
        r1 in positive_amount(),
        r2 in positive_amount(),
        other in positive_amount(),
    ) {
        let (small, large) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };

        // more output-side depth never pays less
        let by_out_small = V2Math::get_amount_out(amount_in, other, small).unwrap();
        let by_out_large = V2Math::get_amount_out(amount_in, other, large).unwrap();
        prop_assert!(by_out_small <= by_out_large);

        // more input-side depth never pays more
        let by_in_small = V2Math::get_amount_out(amount_in, small, other).unwrap();
        let by_in_large = V2Math::get_amount_out(amount_in, large, other).unwrap();
        prop_assert!(by_in_small >= by_in_large);
    }

    #[test]
    fn fee_keeps_balanced_output_below_input(
        amount_in in positive_amount(),
        reserve in positive_amount(),
    ) {
        let out = V2Math::get_amount_out(amount_in, reserve, reserve).unwrap();
        prop_assert!(out < amount_in);
    }

    #[test]
    fn integer_sqrt_is_floor(y in any::<u128>()) {
        let y = U256::from(y);
        let z = V2Math::integer_sqrt(y);
        prop_assert!(z * z <= y);
        let next = z + U256::one();
        prop_assert!(next * next > y);
    }

    #[test]
    fn trait_defaults_match_free_functions(
        amount_in in positive_amount(),
        (reserve_a, reserve_b) in reserve_pair(),
    ) {
        let pool = (reserve_a, reserve_b);
        prop_assert_eq!(
            pool.amount_out(amount_in),
            V2Math::get_amount_out(amount_in, reserve_a, reserve_b)
        );
        prop_assert_eq!(pool.spot_price(), V2Math::spot_price(reserve_a, reserve_b));
    }
}

#[test]
fn empty_pool_has_no_price() {
    let pool = (U256::zero(), U256::zero());
    assert!(pool.is_empty());
    assert_eq!(pool.spot_price(), Err(MathError::InsufficientReserves));
    assert!(matches!(
        pool.amount_out(U256::one()),
        Err(MathError::InvalidInput(_))
    ));
}
