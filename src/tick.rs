use crate::global::{MAX_TICK_INDEX, MIN_TICK_INDEX, TICK_ARRAY_SIZE};
use crate::types::{WhirlpoolError, WhirlpoolResult};

/// Number of ticks a single tick array spans for the given spacing.
pub fn ticks_in_array(tick_spacing: u16) -> WhirlpoolResult<i32> {
    if tick_spacing == 0 {
        return Err(WhirlpoolError::InvalidTickSpacing(tick_spacing));
    }
    Ok(tick_spacing as i32 * TICK_ARRAY_SIZE)
}

/// Lowest start index a tick array may have for the given spacing.
///
/// The array holding `MIN_TICK_INDEX` starts below it, so the bound is one
/// full array past the floor of `MIN_TICK_INDEX`.
pub fn min_start_tick_index(tick_spacing: u16) -> WhirlpoolResult<i32> {
    let ticks = ticks_in_array(tick_spacing)?;
    Ok(MIN_TICK_INDEX - ((MIN_TICK_INDEX % ticks) + ticks))
}

/// Start tick index of the tick array `offset` arrays away from the one
/// containing `tick_index`.
///
/// # Example
/// ```rust
/// use whirlpool_sdk::tick::get_start_tick_index;
///
/// assert_eq!(get_start_tick_index(0, 64, 0).unwrap(), 0);
/// assert_eq!(get_start_tick_index(-1, 64, 0).unwrap(), -5632);
/// assert_eq!(get_start_tick_index(0, 64, 1).unwrap(), 5632);
/// ```
pub fn get_start_tick_index(
    tick_index: i32,
    tick_spacing: u16,
    offset: i32,
) -> WhirlpoolResult<i32> {
    let ticks = ticks_in_array(tick_spacing)? as i64;
    let real_index = (tick_index as i64).div_euclid(ticks);
    let start_tick_index = (real_index + offset as i64) * ticks;
    let min_start = min_start_tick_index(tick_spacing)? as i64;
    if start_tick_index < min_start || start_tick_index > MAX_TICK_INDEX as i64 {
        return Err(WhirlpoolError::TickArrayIndexOutOfBounds { start_tick_index });
    }
    Ok(start_tick_index as i32)
}
