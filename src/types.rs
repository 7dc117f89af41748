use solana_sdk::{instruction::Instruction, message::Message, pubkey::Pubkey};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WhirlpoolError {
    #[error("no off-curve address found for seeds under program {program_id}")]
    DerivationExhausted { program_id: Pubkey },
    #[error("account at index {index} is {found}, expected {expected}")]
    AccountOrderMismatch {
        index: usize,
        expected: Pubkey,
        found: Pubkey,
    },
    #[error("account index {index} out of range for instruction with {len} accounts")]
    AccountIndexOutOfRange { index: usize, len: usize },
    #[error("invalid tick spacing: {0}")]
    InvalidTickSpacing(u16),
    #[error("tick array start index {start_tick_index} out of bounds")]
    TickArrayIndexOutOfBounds { start_tick_index: i64 },
    #[error("tick index {0} out of bounds")]
    TickIndexOutOfBounds(i32),
    #[error("sqrt price {0} out of bounds")]
    SqrtPriceOutOfBounds(u128),
    #[error("invalid account data: {0}")]
    InvalidAccountData(String),
    #[error("failed to serialize instruction data: {0}")]
    Serialization(#[from] std::io::Error),
}

pub type WhirlpoolResult<T> = Result<T, WhirlpoolError>;

/// A program derived address and the bump that pushed it off the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pda {
    pub address: Pubkey,
    pub bump: u8,
}

impl From<(Pubkey, u8)> for Pda {
    fn from((address, bump): (Pubkey, u8)) -> Self {
        Self { address, bump }
    }
}

/// Instructions produced by a builder, in execution order: setup, main, cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instructions {
    pub setup_instructions: Vec<Instruction>,
    pub instructions: Vec<Instruction>,
    pub cleanup_instructions: Vec<Instruction>,
}

impl Instructions {
    pub fn single(instruction: Instruction) -> Self {
        Self {
            setup_instructions: Vec::new(),
            instructions: vec![instruction],
            cleanup_instructions: Vec::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.setup_instructions
            .iter()
            .chain(self.instructions.iter())
            .chain(self.cleanup_instructions.iter())
    }

    pub fn len(&self) -> usize {
        self.setup_instructions.len() + self.instructions.len() + self.cleanup_instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends another bundle, keeping each phase grouped.
    pub fn extend(&mut self, other: Instructions) {
        self.setup_instructions.extend(other.setup_instructions);
        self.instructions.extend(other.instructions);
        self.cleanup_instructions.extend(other.cleanup_instructions);
    }

    /// Compiles the bundle into an unsigned message paid for by `payer`.
    pub fn to_message(&self, payer: &Pubkey) -> Message {
        let instructions: Vec<Instruction> = self.iter().cloned().collect();
        Message::new(&instructions, Some(payer))
    }
}
