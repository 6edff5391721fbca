use alloy::primitives::{Address, Bytes, B256};

/// One contract call recorded within a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTrace {
    pub to: Address,
    /// 4-byte selector followed by ABI-encoded arguments.
    pub input: Bytes,
}

impl CallTrace {
    pub fn new(to: Address, input: impl Into<Bytes>) -> Self {
        Self {
            to,
            input: input.into(),
        }
    }

    /// Leading 4 bytes of calldata, if present.
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.input.get(..4)?.try_into().ok()
    }

    /// The `index`-th 32-byte ABI word after the selector, if present.
    pub fn arg_word(&self, index: usize) -> Option<B256> {
        let start = 4 + index.checked_mul(32)?;
        let end = start.checked_add(32)?;
        self.input.get(start..end).map(B256::from_slice)
    }
}
