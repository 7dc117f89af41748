use solana_sdk::pubkey::Pubkey;

use crate::types::{WhirlpoolError, WhirlpoolResult};

const DISCRIMINATOR_LEN: usize = 8;

/// Marks a token mint as accepted by a whirlpools config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenBadge {
    pub whirlpools_config: Pubkey,
    pub token_mint: Pubkey,
}

impl TokenBadge {
    // discriminator + config + mint + reserve
    pub const LEN: usize = DISCRIMINATOR_LEN + 32 + 32 + 128;

    /// Reads the badge fields from raw account data. The discriminator is
    /// skipped, not checked.
    pub fn from_account_data(data: &[u8]) -> WhirlpoolResult<Self> {
        if data.len() < DISCRIMINATOR_LEN + 64 {
            return Err(WhirlpoolError::InvalidAccountData(format!(
                "token badge needs at least {} bytes, got {}",
                DISCRIMINATOR_LEN + 64,
                data.len()
            )));
        }
        Ok(Self {
            whirlpools_config: read_pubkey(data, DISCRIMINATOR_LEN)?,
            token_mint: read_pubkey(data, DISCRIMINATOR_LEN + 32)?,
        })
    }
}

fn read_pubkey(data: &[u8], offset: usize) -> WhirlpoolResult<Pubkey> {
    let bytes: [u8; 32] = data
        .get(offset..offset + 32)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| {
            WhirlpoolError::InvalidAccountData(format!("no pubkey at offset {}", offset))
        })?;
    Ok(Pubkey::new_from_array(bytes))
}
