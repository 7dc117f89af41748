use super::*;
use crate::global::{ORACLE_ACCOUNT_INDEX, SWAP_ACCOUNTS_LEN, SWAP_DISCRIMINATOR};
use crate::pda::{get_oracle, get_swap_tick_arrays};
use crate::price::default_sqrt_price_limit;
use crate::types::{Instructions, WhirlpoolResult};
use borsh::BorshSerialize;
use solana_sdk::instruction::{AccountMeta, Instruction};

/// Everything needed to build a `swap` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapParams {
    pub amount: u64,
    pub other_amount_threshold: u64,
    pub sqrt_price_limit: u128,
    pub amount_specified_is_input: bool,
    pub a_to_b: bool,
    pub whirlpool: Pubkey,
    pub token_authority: Pubkey,
    pub token_owner_account_a: Pubkey,
    pub token_vault_a: Pubkey,
    pub token_owner_account_b: Pubkey,
    pub token_vault_b: Pubkey,
    pub tick_array_0: Pubkey,
    pub tick_array_1: Pubkey,
    pub tick_array_2: Pubkey,
    pub oracle: Pubkey,
    /// Not consumed by `swap`.
    pub supplemental_tick_arrays: Option<Vec<Pubkey>>,
}

/// `swap` arguments in program order.
#[derive(BorshSerialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapArgs {
    pub amount: u64,
    pub other_amount_threshold: u64,
    pub sqrt_price_limit: u128,
    pub amount_specified_is_input: bool,
    pub a_to_b: bool,
}

impl SwapArgs {
    /// Discriminator followed by the borsh encoded arguments.
    pub fn data(&self) -> WhirlpoolResult<Vec<u8>> {
        let mut data = Vec::with_capacity(42);
        data.extend_from_slice(&SWAP_DISCRIMINATOR);
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}

/// Converts an instruction's account struct into its ordered metas.
pub trait ToAccountMetas {
    fn to_account_metas(&self) -> Vec<AccountMeta>;
}

/// Accounts of the `swap` instruction as the program interface declares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapAccounts {
    pub token_program: Pubkey,
    pub token_authority: Pubkey,
    pub whirlpool: Pubkey,
    pub token_owner_account_a: Pubkey,
    pub token_vault_a: Pubkey,
    pub token_owner_account_b: Pubkey,
    pub token_vault_b: Pubkey,
    pub tick_array_0: Pubkey,
    pub tick_array_1: Pubkey,
    pub tick_array_2: Pubkey,
    pub oracle: Pubkey,
}

impl ToAccountMetas for SwapAccounts {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(self.token_program, false),
            AccountMeta::new_readonly(self.token_authority, true),
            AccountMeta::new(self.whirlpool, false),
            AccountMeta::new(self.token_owner_account_a, false),
            AccountMeta::new(self.token_vault_a, false),
            AccountMeta::new(self.token_owner_account_b, false),
            AccountMeta::new(self.token_vault_b, false),
            AccountMeta::new(self.tick_array_0, false),
            AccountMeta::new(self.tick_array_1, false),
            AccountMeta::new(self.tick_array_2, false),
            AccountMeta::new_readonly(self.oracle, false),
        ]
    }
}

impl From<&SwapParams> for SwapArgs {
    fn from(params: &SwapParams) -> Self {
        Self {
            amount: params.amount,
            other_amount_threshold: params.other_amount_threshold,
            sqrt_price_limit: params.sqrt_price_limit,
            amount_specified_is_input: params.amount_specified_is_input,
            a_to_b: params.a_to_b,
        }
    }
}

impl From<&SwapParams> for SwapAccounts {
    fn from(params: &SwapParams) -> Self {
        Self {
            token_program: spl_token::id(),
            token_authority: params.token_authority,
            whirlpool: params.whirlpool,
            token_owner_account_a: params.token_owner_account_a,
            token_vault_a: params.token_vault_a,
            token_owner_account_b: params.token_owner_account_b,
            token_vault_b: params.token_vault_b,
            tick_array_0: params.tick_array_0,
            tick_array_1: params.tick_array_1,
            tick_array_2: params.tick_array_2,
            oracle: params.oracle,
        }
    }
}

/// Grants write access to the account at `index`, which must be `expected`.
///
/// Fails without touching the instruction when there is no account at `index`
/// or it holds a different key.
pub fn force_writable(
    instruction: &mut Instruction,
    index: usize,
    expected: &Pubkey,
) -> WhirlpoolResult<()> {
    let len = instruction.accounts.len();
    let meta = instruction
        .accounts
        .get_mut(index)
        .ok_or(WhirlpoolError::AccountIndexOutOfRange { index, len })?;
    if meta.pubkey != *expected {
        log::error!(
            "refusing to mark account {} writable at index {}: expected {}",
            meta.pubkey,
            index,
            expected
        );
        return Err(WhirlpoolError::AccountOrderMismatch {
            index,
            expected: *expected,
            found: meta.pubkey,
        });
    }
    meta.is_writable = true;
    Ok(())
}

/// Pool state a caller already holds, enough to resolve swap accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapPoolKeys {
    pub whirlpool: Pubkey,
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
    pub token_vault_a: Pubkey,
    pub token_vault_b: Pubkey,
    pub tick_current_index: i32,
    pub tick_spacing: u16,
}

impl WhirlpoolClient {
    /// Resolves the accounts of a swap paid from `wallet`'s associated token
    /// accounts, with no price limit.
    ///
    /// Tick arrays come from the pool's current tick; near the edge of the
    /// tick range the last reachable array fills the remaining slots.
    pub fn swap_params_for_wallet(
        &self,
        wallet: &Pubkey,
        pool: &SwapPoolKeys,
        amount: u64,
        other_amount_threshold: u64,
        amount_specified_is_input: bool,
        a_to_b: bool,
    ) -> WhirlpoolResult<SwapParams> {
        let tick_arrays = get_swap_tick_arrays(
            &self.whirlpool_program_id,
            &pool.whirlpool,
            pool.tick_current_index,
            pool.tick_spacing,
            a_to_b,
        )?;
        let tick_array_at = |i: usize| {
            tick_arrays
                .get(i)
                .or(tick_arrays.last())
                .map(|pda| pda.address)
                .ok_or(WhirlpoolError::TickArrayIndexOutOfBounds {
                    start_tick_index: pool.tick_current_index as i64,
                })
        };
        let oracle = get_oracle(&self.whirlpool_program_id, &pool.whirlpool)?;
        Ok(SwapParams {
            amount,
            other_amount_threshold,
            sqrt_price_limit: default_sqrt_price_limit(a_to_b),
            amount_specified_is_input,
            a_to_b,
            whirlpool: pool.whirlpool,
            token_authority: *wallet,
            token_owner_account_a: self.get_associated_token_address(wallet, &pool.token_mint_a),
            token_vault_a: pool.token_vault_a,
            token_owner_account_b: self.get_associated_token_address(wallet, &pool.token_mint_b),
            token_vault_b: pool.token_vault_b,
            tick_array_0: tick_array_at(0)?,
            tick_array_1: tick_array_at(1)?,
            tick_array_2: tick_array_at(2)?,
            oracle: oracle.address,
            supplemental_tick_arrays: None,
        })
    }
}

impl WhirlpoolClient {
    /// Constructs a swap instruction for the Whirlpool program
    ///
    /// The oracle is declared read-only by the program interface but must be
    /// passed writable; the flag is patched after the account list is built.
    ///
    /// # Arguments
    /// params - amounts, direction and the eleven swap accounts
    ///
    /// # Examples
    /// ```rust
    /// use solana_sdk::pubkey::Pubkey;
    /// use whirlpool_sdk::{WhirlpoolClient, trade::SwapParams};
    ///
    /// let client = WhirlpoolClient::new();
    /// let params = SwapParams {
    ///     amount: 1_000_000,
    ///     other_amount_threshold: 0,
    ///     sqrt_price_limit: whirlpool_sdk::price::default_sqrt_price_limit(true),
    ///     amount_specified_is_input: true,
    ///     a_to_b: true,
    ///     whirlpool: Pubkey::new_unique(),
    ///     token_authority: Pubkey::new_unique(),
    ///     token_owner_account_a: Pubkey::new_unique(),
    ///     token_vault_a: Pubkey::new_unique(),
    ///     token_owner_account_b: Pubkey::new_unique(),
    ///     token_vault_b: Pubkey::new_unique(),
    ///     tick_array_0: Pubkey::new_unique(),
    ///     tick_array_1: Pubkey::new_unique(),
    ///     tick_array_2: Pubkey::new_unique(),
    ///     oracle: Pubkey::new_unique(),
    ///     supplemental_tick_arrays: None,
    /// };
    /// let ixs = client.swap_ix(&params).unwrap();
    /// assert_eq!(ixs.instructions[0].accounts.len(), 11);
    /// ```
    pub fn swap_ix(&self, params: &SwapParams) -> WhirlpoolResult<Instructions> {
        if params.supplemental_tick_arrays.is_some() {
            log::debug!("swap ignores supplemental tick arrays");
        }
        let data = SwapArgs::from(params).data()?;
        let accounts = SwapAccounts::from(params).to_account_metas();
        debug_assert_eq!(accounts.len(), SWAP_ACCOUNTS_LEN);
        let mut instruction = Instruction {
            program_id: self.whirlpool_program_id,
            accounts,
            data,
        };
        force_writable(&mut instruction, ORACLE_ACCOUNT_INDEX, &params.oracle)?;
        log::debug!(
            "built swap for whirlpool {} (amount {}, a_to_b {})",
            params.whirlpool,
            params.amount,
            params.a_to_b
        );
        Ok(Instructions::single(instruction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SwapParams {
        SwapParams {
            amount: 1_000_000,
            other_amount_threshold: 950_000,
            sqrt_price_limit: 1u128 << 64,
            amount_specified_is_input: true,
            a_to_b: false,
            whirlpool: Pubkey::new_unique(),
            token_authority: Pubkey::new_unique(),
            token_owner_account_a: Pubkey::new_unique(),
            token_vault_a: Pubkey::new_unique(),
            token_owner_account_b: Pubkey::new_unique(),
            token_vault_b: Pubkey::new_unique(),
            tick_array_0: Pubkey::new_unique(),
            tick_array_1: Pubkey::new_unique(),
            tick_array_2: Pubkey::new_unique(),
            oracle: Pubkey::new_unique(),
            supplemental_tick_arrays: None,
        }
    }

    #[test]
    fn args_layout() {
        let data = SwapArgs::from(&params()).data().unwrap();
        assert_eq!(data.len(), 42);
        assert_eq!(&data[..8], &SWAP_DISCRIMINATOR);
        assert_eq!(&data[8..16], &1_000_000u64.to_le_bytes());
        assert_eq!(&data[16..24], &950_000u64.to_le_bytes());
        assert_eq!(&data[24..40], &(1u128 << 64).to_le_bytes());
        assert_eq!(data[40], 1);
        assert_eq!(data[41], 0);
    }

    #[test]
    fn schema_declares_oracle_read_only() {
        let metas = SwapAccounts::from(&params()).to_account_metas();
        assert_eq!(metas.len(), SWAP_ACCOUNTS_LEN);
        assert!(!metas[ORACLE_ACCOUNT_INDEX].is_writable);
    }

    #[test]
    fn swap_ix_marks_oracle_writable() {
        let client = WhirlpoolClient::new();
        let params = params();
        let ixs = client.swap_ix(&params).unwrap();
        let ix = &ixs.instructions[0];
        assert_eq!(ix.accounts[ORACLE_ACCOUNT_INDEX].pubkey, params.oracle);
        assert!(ix.accounts[ORACLE_ACCOUNT_INDEX].is_writable);
        assert!(!ix.accounts[ORACLE_ACCOUNT_INDEX].is_signer);
    }

    #[test]
    fn force_writable_rejects_wrong_account() {
        let params = params();
        let mut accounts = SwapAccounts::from(&params);
        accounts.oracle = params.tick_array_2;
        let mut ix = Instruction {
            program_id: ORCA_WHIRLPOOLS_PROGRAM_ID,
            accounts: accounts.to_account_metas(),
            data: vec![],
        };
        let before = ix.clone();
        let err = force_writable(&mut ix, ORACLE_ACCOUNT_INDEX, &params.oracle).unwrap_err();
        assert!(matches!(
            err,
            WhirlpoolError::AccountOrderMismatch { index: ORACLE_ACCOUNT_INDEX, found, .. }
                if found == params.tick_array_2
        ));
        assert_eq!(ix, before);
    }

    #[test]
    fn force_writable_rejects_short_account_list() {
        let params = params();
        let mut ix = Instruction {
            program_id: ORCA_WHIRLPOOLS_PROGRAM_ID,
            accounts: vec![AccountMeta::new_readonly(params.oracle, false)],
            data: vec![],
        };
        assert!(matches!(
            force_writable(&mut ix, ORACLE_ACCOUNT_INDEX, &params.oracle),
            Err(WhirlpoolError::AccountIndexOutOfRange { index: 10, len: 1 })
        ));
    }

    #[test]
    fn supplemental_tick_arrays_are_ignored() {
        let client = WhirlpoolClient::new();
        let plain = params();
        let mut with_supplemental = plain.clone();
        with_supplemental.supplemental_tick_arrays =
            Some(vec![Pubkey::new_unique(), Pubkey::new_unique()]);
        assert_eq!(
            client.swap_ix(&plain).unwrap(),
            client.swap_ix(&with_supplemental).unwrap()
        );
    }

    fn pool() -> SwapPoolKeys {
        SwapPoolKeys {
            whirlpool: Pubkey::new_unique(),
            token_mint_a: Pubkey::new_unique(),
            token_mint_b: Pubkey::new_unique(),
            token_vault_a: Pubkey::new_unique(),
            token_vault_b: Pubkey::new_unique(),
            tick_current_index: -120,
            tick_spacing: 8,
        }
    }

    #[test]
    fn wallet_params_resolve_owner_accounts_and_oracle() {
        let client = WhirlpoolClient::new();
        let wallet = Pubkey::new_unique();
        let pool = pool();
        let params = client
            .swap_params_for_wallet(&wallet, &pool, 500, 490, true, true)
            .unwrap();
        assert_eq!(params.token_authority, wallet);
        assert_eq!(
            params.token_owner_account_a,
            spl_associated_token_account::get_associated_token_address(&wallet, &pool.token_mint_a)
        );
        assert_eq!(
            params.token_owner_account_b,
            spl_associated_token_account::get_associated_token_address(&wallet, &pool.token_mint_b)
        );
        assert_eq!(
            params.oracle,
            get_oracle(&ORCA_WHIRLPOOLS_PROGRAM_ID, &pool.whirlpool)
                .unwrap()
                .address
        );
        assert_eq!(params.sqrt_price_limit, default_sqrt_price_limit(true));
    }

    #[test]
    fn wallet_params_use_sequential_tick_arrays() {
        let client = WhirlpoolClient::new();
        let pool = pool();
        let params = client
            .swap_params_for_wallet(&Pubkey::new_unique(), &pool, 500, 0, true, true)
            .unwrap();
        let expected = get_swap_tick_arrays(
            &ORCA_WHIRLPOOLS_PROGRAM_ID,
            &pool.whirlpool,
            pool.tick_current_index,
            pool.tick_spacing,
            true,
        )
        .unwrap();
        assert_eq!(params.tick_array_0, expected[0].address);
        assert_eq!(params.tick_array_1, expected[1].address);
        assert_eq!(params.tick_array_2, expected[2].address);
    }

    #[test]
    fn wallet_params_repeat_last_tick_array_at_range_edge() {
        let client = WhirlpoolClient::new();
        let mut pool = pool();
        pool.tick_current_index = crate::global::MAX_TICK_INDEX;
        pool.tick_spacing = 64;
        let params = client
            .swap_params_for_wallet(&Pubkey::new_unique(), &pool, 500, 0, true, false)
            .unwrap();
        assert_eq!(params.tick_array_0, params.tick_array_1);
        assert_eq!(params.tick_array_1, params.tick_array_2);
        assert!(client.swap_ix(&params).is_ok());
    }
}
