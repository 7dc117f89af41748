use solana_sdk::pubkey::Pubkey;

// Orca Whirlpools (Concentrated Liquidity)
pub const ORCA_WHIRLPOOLS_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc");
// Metaplex Token Metadata
pub const METADATA_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

// Whirlpool Program Derived Address seeds
pub const WHIRLPOOL_SEED: &[u8] = b"whirlpool";
pub const POSITION_SEED: &[u8] = b"position";
pub const TICK_ARRAY_SEED: &[u8] = b"tick_array";
pub const ORACLE_SEED: &[u8] = b"oracle";
pub const FEE_TIER_SEED: &[u8] = b"fee_tier";
pub const POSITION_BUNDLE_SEED: &[u8] = b"position_bundle";
pub const BUNDLED_POSITION_SEED: &[u8] = b"bundled_position";
pub const CONFIG_EXTENSION_SEED: &[u8] = b"config_extension";
pub const TOKEN_BADGE_SEED: &[u8] = b"token_badge";
pub const LOCK_CONFIG_SEED: &[u8] = b"lock_config";
pub const METADATA_SEED: &[u8] = b"metadata";

// Tick bounds
pub const TICK_ARRAY_SIZE: i32 = 88;
pub const MIN_TICK_INDEX: i32 = -443636;
pub const MAX_TICK_INDEX: i32 = 443636;
pub const MAX_SWAP_TICK_ARRAYS: usize = 3;

// Q64.64 sqrt price bounds, matching MIN_TICK_INDEX / MAX_TICK_INDEX
pub const MIN_SQRT_PRICE_X64: u128 = 4295048016;
pub const MAX_SQRT_PRICE_X64: u128 = 79226673515401279992447579055;

// Whirlpool Instruction Discriminators
pub const SWAP_DISCRIMINATOR: [u8; 8] = [248, 198, 158, 145, 225, 117, 135, 200];

// Swap account positions
pub const SWAP_ACCOUNTS_LEN: usize = 11;
pub const ORACLE_ACCOUNT_INDEX: usize = 10;
