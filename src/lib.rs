use solana_sdk::pubkey::Pubkey;

use crate::global::ORCA_WHIRLPOOLS_PROGRAM_ID;

pub mod global;
pub mod pda;
pub mod price;
pub mod state;
pub mod tick;
pub mod trade;
pub mod types;

pub use types::{Instructions, Pda, WhirlpoolError, WhirlpoolResult};

/// Handle on a deployed Whirlpool program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhirlpoolClient {
    pub whirlpool_program_id: Pubkey,
}

impl WhirlpoolClient {
    /// Targets the mainnet Whirlpool program.
    pub fn new() -> Self {
        Self::with_program_id(ORCA_WHIRLPOOLS_PROGRAM_ID)
    }

    /// Targets another deployment, e.g. a devnet or localnet program.
    pub fn with_program_id(whirlpool_program_id: Pubkey) -> Self {
        Self {
            whirlpool_program_id,
        }
    }

    pub fn get_associated_token_address(&self, wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
        spl_associated_token_account::get_associated_token_address(wallet, mint)
    }
}

impl Default for WhirlpoolClient {
    fn default() -> Self {
        Self::new()
    }
}
