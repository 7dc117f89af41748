use ethnum::U256;

use crate::global::{MAX_SQRT_PRICE_X64, MAX_TICK_INDEX, MIN_SQRT_PRICE_X64, MIN_TICK_INDEX};
use crate::types::{WhirlpoolError, WhirlpoolResult};

// Fractional bits resolved by the log2 approximation
const BIT_PRECISION: u32 = 14;
// log_b(2) in Q32.32 where b = sqrt(1.0001)
const LOG_B_2_X32: i128 = 59543866431248;
// 0.01
const LOG_B_P_ERR_MARGIN_LOWER_X64: i128 = 184467440737095516;
// 2^-precision / log_2(b) + 0.01
const LOG_B_P_ERR_MARGIN_UPPER_X64: i128 = 15793534762490258745;

/// Q64.64 sqrt price of `tick_index`.
///
/// # Example
/// ```rust
/// use whirlpool_sdk::price::tick_index_to_sqrt_price_x64;
///
/// assert_eq!(tick_index_to_sqrt_price_x64(0).unwrap(), 1u128 << 64);
/// ```
pub fn tick_index_to_sqrt_price_x64(tick_index: i32) -> WhirlpoolResult<u128> {
    if !(MIN_TICK_INDEX..=MAX_TICK_INDEX).contains(&tick_index) {
        return Err(WhirlpoolError::TickIndexOutOfBounds(tick_index));
    }
    Ok(sqrt_price_at_tick(tick_index))
}

/// Greatest tick index whose sqrt price does not exceed `sqrt_price_x64`.
///
/// # Example
/// ```rust
/// use whirlpool_sdk::price::sqrt_price_x64_to_tick_index;
///
/// assert_eq!(sqrt_price_x64_to_tick_index(1u128 << 64).unwrap(), 0);
/// ```
pub fn sqrt_price_x64_to_tick_index(sqrt_price_x64: u128) -> WhirlpoolResult<i32> {
    if !(MIN_SQRT_PRICE_X64..=MAX_SQRT_PRICE_X64).contains(&sqrt_price_x64) {
        return Err(WhirlpoolError::SqrtPriceOutOfBounds(sqrt_price_x64));
    }

    // Integer part of log2 from the most significant bit
    let msb: u32 = 128 - sqrt_price_x64.leading_zeros() - 1;
    let log2p_integer_x32 = (msb as i128 - 64) << 32;

    // Fractional part: square the normalized value and collect a bit each
    // time it reaches 2
    let mut bit: i128 = 0x8000_0000_0000_0000;
    let mut precision = 0;
    let mut log2p_fraction_x64: i128 = 0;
    let mut r = if msb >= 64 {
        sqrt_price_x64 >> (msb - 63)
    } else {
        sqrt_price_x64 << (63 - msb)
    };
    while bit > 0 && precision < BIT_PRECISION {
        r *= r;
        let is_r_more_than_two = r >> 127;
        r >>= 63 + is_r_more_than_two;
        log2p_fraction_x64 += bit * is_r_more_than_two as i128;
        bit >>= 1;
        precision += 1;
    }

    let log2p_fraction_x32 = log2p_fraction_x64 >> 32;
    let log2p_x32 = log2p_integer_x32 + log2p_fraction_x32;
    let logbp_x64 = log2p_x32 * LOG_B_2_X32;

    let tick_low = ((logbp_x64 - LOG_B_P_ERR_MARGIN_LOWER_X64) >> 64) as i32;
    let tick_high = ((logbp_x64 + LOG_B_P_ERR_MARGIN_UPPER_X64) >> 64) as i32;

    if tick_low == tick_high {
        Ok(tick_low)
    } else if sqrt_price_at_tick(tick_high) <= sqrt_price_x64 {
        Ok(tick_high)
    } else {
        Ok(tick_low)
    }
}

/// Price limit that lets a swap run until liquidity or the tick range ends.
pub fn default_sqrt_price_limit(a_to_b: bool) -> u128 {
    if a_to_b {
        MIN_SQRT_PRICE_X64
    } else {
        MAX_SQRT_PRICE_X64
    }
}

fn sqrt_price_at_tick(tick_index: i32) -> u128 {
    if tick_index >= 0 {
        sqrt_price_positive_tick(tick_index)
    } else {
        sqrt_price_negative_tick(tick_index)
    }
}

// Q96 table, shifted down to Q64 at the end
fn sqrt_price_positive_tick(tick: i32) -> u128 {
    let mut ratio: u128 = if tick & 1 != 0 {
        79232123823359799118286999567
    } else {
        79228162514264337593543950336
    };

    const FACTORS: [(i32, u128); 18] = [
        (2, 79236085330515764027303304731),
        (4, 79244008939048815603706035061),
        (8, 79259858533276714757314932305),
        (16, 79291567232598584799939703904),
        (32, 79355022692464371645785046466),
        (64, 79482085999252804386437311141),
        (128, 79736823300114093921829183326),
        (256, 80248749790819932309965073892),
        (512, 81282483887344747381513967011),
        (1024, 83390072131320151908154831281),
        (2048, 87770609709833776024991924138),
        (4096, 97234110755111693312479820773),
        (8192, 119332217159966728226237229890),
        (16384, 179736315981702064433883588727),
        (32768, 407748233172238350107850275304),
        (65536, 2098478828474011932436660412517),
        (131072, 55581415166113811149459800483533),
        (262144, 38992368544603139932233054999993551),
    ];
    for (mask, factor) in FACTORS {
        if tick & mask != 0 {
            ratio = mul_shift_96(ratio, factor);
        }
    }

    ratio >> 32
}

// Q64 table
fn sqrt_price_negative_tick(tick: i32) -> u128 {
    let abs_tick = tick.abs();
    let mut ratio: u128 = if abs_tick & 1 != 0 {
        18445821805675392311
    } else {
        18446744073709551616
    };

    const FACTORS: [(i32, u128); 18] = [
        (2, 18444899583751176498),
        (4, 18443055278223354162),
        (8, 18439367220385604838),
        (16, 18431993317065449817),
        (32, 18417254355718160513),
        (64, 18387811781193591352),
        (128, 18329067761203520168),
        (256, 18212142134806087854),
        (512, 17980523815641551639),
        (1024, 17526086738831147013),
        (2048, 16651378430235024244),
        (4096, 15030750278693429944),
        (8192, 12247334978882834399),
        (16384, 8131365268884726200),
        (32768, 3584323654723342297),
        (65536, 696457651847595233),
        (131072, 26294789957452057),
        (262144, 37481735321082),
    ];
    for (mask, factor) in FACTORS {
        if abs_tick & mask != 0 {
            ratio = (ratio * factor) >> 64;
        }
    }

    ratio
}

fn mul_shift_96(n0: u128, n1: u128) -> u128 {
    ((U256::from(n0) * U256::from(n1)) >> 96u32).as_u128()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_zero_is_one() {
        assert_eq!(tick_index_to_sqrt_price_x64(0).unwrap(), 1u128 << 64);
        assert_eq!(sqrt_price_x64_to_tick_index(1u128 << 64).unwrap(), 0);
    }

    #[test]
    fn bounds_map_to_each_other() {
        assert_eq!(
            tick_index_to_sqrt_price_x64(MIN_TICK_INDEX).unwrap(),
            MIN_SQRT_PRICE_X64
        );
        assert_eq!(
            tick_index_to_sqrt_price_x64(MAX_TICK_INDEX).unwrap(),
            MAX_SQRT_PRICE_X64
        );
        assert_eq!(
            sqrt_price_x64_to_tick_index(MIN_SQRT_PRICE_X64).unwrap(),
            MIN_TICK_INDEX
        );
        assert_eq!(
            sqrt_price_x64_to_tick_index(MAX_SQRT_PRICE_X64).unwrap(),
            MAX_TICK_INDEX
        );
    }

    #[test]
    fn out_of_range_inputs_are_rejected() {
        assert!(matches!(
            tick_index_to_sqrt_price_x64(MAX_TICK_INDEX + 1),
            Err(WhirlpoolError::TickIndexOutOfBounds(_))
        ));
        assert!(matches!(
            tick_index_to_sqrt_price_x64(MIN_TICK_INDEX - 1),
            Err(WhirlpoolError::TickIndexOutOfBounds(_))
        ));
        assert!(matches!(
            sqrt_price_x64_to_tick_index(MIN_SQRT_PRICE_X64 - 1),
            Err(WhirlpoolError::SqrtPriceOutOfBounds(_))
        ));
        assert!(matches!(
            sqrt_price_x64_to_tick_index(MAX_SQRT_PRICE_X64 + 1),
            Err(WhirlpoolError::SqrtPriceOutOfBounds(_))
        ));
    }

    #[test]
    fn prices_between_ticks_floor() {
        for tick in [-100_000, -1, 0, 1, 64, 100_000] {
            let at = tick_index_to_sqrt_price_x64(tick).unwrap();
            let next = tick_index_to_sqrt_price_x64(tick + 1).unwrap();
            assert_eq!(sqrt_price_x64_to_tick_index(at + 1).unwrap(), tick);
            assert_eq!(sqrt_price_x64_to_tick_index(next - 1).unwrap(), tick);
        }
    }

    #[test]
    fn sqrt_price_increases_with_tick() {
        let mut previous = tick_index_to_sqrt_price_x64(-1000).unwrap();
        for tick in -999..1000 {
            let current = tick_index_to_sqrt_price_x64(tick).unwrap();
            assert!(current > previous);
            previous = current;
        }
    }

    #[test]
    fn default_limits_follow_direction() {
        assert_eq!(default_sqrt_price_limit(true), MIN_SQRT_PRICE_X64);
        assert_eq!(default_sqrt_price_limit(false), MAX_SQRT_PRICE_X64);
    }
}
