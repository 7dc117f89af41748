use solana_sdk::pubkey::Pubkey;

use crate::global::*;
use crate::price::sqrt_price_x64_to_tick_index;
use crate::tick::get_start_tick_index;
use crate::types::{Pda, WhirlpoolError, WhirlpoolResult};

/// Derives a program address from ordered seeds, searching bumps from 255 down.
///
/// Every named derivation in this module is a fixed seed schema over this call.
///
/// # Example
/// ```rust
/// use whirlpool_sdk::{global::ORCA_WHIRLPOOLS_PROGRAM_ID, pda::derive};
///
/// let pda = derive(&ORCA_WHIRLPOOLS_PROGRAM_ID, &[b"oracle", &[7u8; 32]]).unwrap();
/// assert!(!pda.address.is_on_curve());
/// ```
pub fn derive(program_id: &Pubkey, seeds: &[&[u8]]) -> WhirlpoolResult<Pda> {
    let pda: Pda = Pubkey::try_find_program_address(seeds, program_id)
        .ok_or(WhirlpoolError::DerivationExhausted {
            program_id: *program_id,
        })?
        .into();
    log::trace!(
        "derived {} (bump {}) from {} seeds under {}",
        pda.address,
        pda.bump,
        seeds.len(),
        program_id
    );
    Ok(pda)
}

// Fee tier style indices are fixed-width little endian
fn index_seed(index: u16) -> [u8; 2] {
    index.to_le_bytes()
}

/// Whirlpool for a config, an ordered mint pair and a fee tier index
/// (the tick spacing for pools created before adaptive fee tiers).
pub fn get_whirlpool(
    program_id: &Pubkey,
    whirlpools_config: &Pubkey,
    token_mint_a: &Pubkey,
    token_mint_b: &Pubkey,
    fee_tier_index: u16,
) -> WhirlpoolResult<Pda> {
    derive(
        program_id,
        &[
            WHIRLPOOL_SEED,
            whirlpools_config.as_ref(),
            token_mint_a.as_ref(),
            token_mint_b.as_ref(),
            &index_seed(fee_tier_index),
        ],
    )
}

pub fn get_position(program_id: &Pubkey, position_mint: &Pubkey) -> WhirlpoolResult<Pda> {
    derive(program_id, &[POSITION_SEED, position_mint.as_ref()])
}

/// Metaplex metadata account of a position NFT.
pub fn get_position_metadata(position_mint: &Pubkey) -> WhirlpoolResult<Pda> {
    metadata(position_mint)
}

/// Tick array starting at `start_tick_index`. The index is seeded as its
/// decimal string, not as bytes.
pub fn get_tick_array(
    program_id: &Pubkey,
    whirlpool: &Pubkey,
    start_tick_index: i32,
) -> WhirlpoolResult<Pda> {
    let start_tick_index = start_tick_index.to_string();
    derive(
        program_id,
        &[
            TICK_ARRAY_SEED,
            whirlpool.as_ref(),
            start_tick_index.as_bytes(),
        ],
    )
}

/// Tick array `tick_array_offset` arrays away from the one containing `tick_index`.
///
/// # Example
/// ```rust
/// use solana_sdk::pubkey::Pubkey;
/// use whirlpool_sdk::{global::ORCA_WHIRLPOOLS_PROGRAM_ID, pda};
///
/// let whirlpool = Pubkey::new_unique();
/// let from_tick =
///     pda::get_tick_array_from_tick_index(100, 64, &whirlpool, &ORCA_WHIRLPOOLS_PROGRAM_ID, 0)
///         .unwrap();
/// let direct = pda::get_tick_array(&ORCA_WHIRLPOOLS_PROGRAM_ID, &whirlpool, 0).unwrap();
/// assert_eq!(from_tick, direct);
/// ```
pub fn get_tick_array_from_tick_index(
    tick_index: i32,
    tick_spacing: u16,
    whirlpool: &Pubkey,
    program_id: &Pubkey,
    tick_array_offset: i32,
) -> WhirlpoolResult<Pda> {
    let start_tick_index = get_start_tick_index(tick_index, tick_spacing, tick_array_offset)?;
    get_tick_array(program_id, whirlpool, start_tick_index)
}

/// Tick array containing the tick of a Q64.64 sqrt price, shifted by
/// `tick_array_offset` arrays.
pub fn get_tick_array_from_sqrt_price(
    sqrt_price_x64: u128,
    tick_spacing: u16,
    whirlpool: &Pubkey,
    program_id: &Pubkey,
    tick_array_offset: i32,
) -> WhirlpoolResult<Pda> {
    let tick_index = sqrt_price_x64_to_tick_index(sqrt_price_x64)?;
    get_tick_array_from_tick_index(
        tick_index,
        tick_spacing,
        whirlpool,
        program_id,
        tick_array_offset,
    )
}

/// Tick arrays a swap starting at `tick_current_index` walks through, in order.
///
/// Returns fewer than three when the walk reaches the edge of the tick range.
pub fn get_swap_tick_arrays(
    program_id: &Pubkey,
    whirlpool: &Pubkey,
    tick_current_index: i32,
    tick_spacing: u16,
    a_to_b: bool,
) -> WhirlpoolResult<Vec<Pda>> {
    if tick_spacing == 0 {
        return Err(WhirlpoolError::InvalidTickSpacing(tick_spacing));
    }
    let shift = if a_to_b { 0 } else { tick_spacing as i32 };
    let step = if a_to_b { -1 } else { 1 };
    let mut tick_arrays = Vec::with_capacity(MAX_SWAP_TICK_ARRAYS);
    let mut offset = 0;
    for _ in 0..MAX_SWAP_TICK_ARRAYS {
        let start_tick_index = match get_start_tick_index(
            tick_current_index.saturating_add(shift),
            tick_spacing,
            offset,
        ) {
            Ok(start_tick_index) => start_tick_index,
            Err(WhirlpoolError::TickArrayIndexOutOfBounds { .. }) => break,
            Err(e) => return Err(e),
        };
        tick_arrays.push(get_tick_array(program_id, whirlpool, start_tick_index)?);
        offset += step;
    }
    Ok(tick_arrays)
}

pub fn get_fee_tier(
    program_id: &Pubkey,
    whirlpools_config: &Pubkey,
    fee_tier_index: u16,
) -> WhirlpoolResult<Pda> {
    derive(
        program_id,
        &[
            FEE_TIER_SEED,
            whirlpools_config.as_ref(),
            &index_seed(fee_tier_index),
        ],
    )
}

pub fn get_oracle(program_id: &Pubkey, whirlpool: &Pubkey) -> WhirlpoolResult<Pda> {
    derive(program_id, &[ORACLE_SEED, whirlpool.as_ref()])
}

pub fn get_position_bundle(
    program_id: &Pubkey,
    position_bundle_mint: &Pubkey,
) -> WhirlpoolResult<Pda> {
    derive(
        program_id,
        &[POSITION_BUNDLE_SEED, position_bundle_mint.as_ref()],
    )
}

/// Position `bundle_index` inside a position bundle. The index is seeded as
/// its decimal string.
pub fn get_bundled_position(
    program_id: &Pubkey,
    position_bundle_mint: &Pubkey,
    bundle_index: u16,
) -> WhirlpoolResult<Pda> {
    let bundle_index = bundle_index.to_string();
    derive(
        program_id,
        &[
            BUNDLED_POSITION_SEED,
            position_bundle_mint.as_ref(),
            bundle_index.as_bytes(),
        ],
    )
}

/// Metaplex metadata account of a position bundle NFT.
pub fn get_position_bundle_metadata(position_bundle_mint: &Pubkey) -> WhirlpoolResult<Pda> {
    metadata(position_bundle_mint)
}

pub fn get_config_extension(
    program_id: &Pubkey,
    whirlpools_config: &Pubkey,
) -> WhirlpoolResult<Pda> {
    derive(
        program_id,
        &[CONFIG_EXTENSION_SEED, whirlpools_config.as_ref()],
    )
}

pub fn get_token_badge(
    program_id: &Pubkey,
    whirlpools_config: &Pubkey,
    token_mint: &Pubkey,
) -> WhirlpoolResult<Pda> {
    derive(
        program_id,
        &[
            TOKEN_BADGE_SEED,
            whirlpools_config.as_ref(),
            token_mint.as_ref(),
        ],
    )
}

pub fn get_lock_config(program_id: &Pubkey, position: &Pubkey) -> WhirlpoolResult<Pda> {
    derive(program_id, &[LOCK_CONFIG_SEED, position.as_ref()])
}

fn metadata(mint: &Pubkey) -> WhirlpoolResult<Pda> {
    derive(
        &METADATA_PROGRAM_ID,
        &[METADATA_SEED, METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
    )
}
