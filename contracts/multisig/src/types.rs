use soroban_sdk::{contracttype, Address, Bytes, Vec};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owners,
    Threshold,
    Policy,
    Token,
    TransactionCount,
    Transaction(u64),
    PendingIds,
}

/// Who may trigger `execute` once a transaction reaches quorum.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ExecutorPolicy {
    AnyOwner,
    ProposerOnly,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Policy {
    /// Submitting a transaction also counts as the proposer's confirmation.
    pub proposer_confirms: bool,
    pub executor: ExecutorPolicy,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            proposer_confirms: false,
            executor: ExecutorPolicy::AnyOwner,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub proposer: Address,
    pub target: Address,
    pub value: i128,
    pub payload: Bytes,
    pub confirmations: Vec<Address>,
    pub executed: bool,
    pub created_at: u64,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TransactionStatus {
    Pending = 0,
    Ready = 1,
    Executed = 2,
}

/// Registry update carried, XDR encoded, in the payload of a transaction
/// that targets the multisig itself.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GovernanceAction {
    SetOwners(Vec<Address>, u32),
    AddOwner(Address),
    RemoveOwner(Address),
    ChangeThreshold(u32),
    SetPolicy(Policy),
}
