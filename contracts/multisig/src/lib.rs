#![no_std]

mod actions;
mod engine;
mod errors;
mod events;
mod governance;
mod ledger;
mod multisig;
mod registry;
mod types;

pub use crate::actions::{ActionTarget, ActionTargetClient};
pub use crate::errors::MultisigError;
pub use crate::events::{
    ConfirmationRevoked, OwnersChanged, PolicyChanged, TransactionConfirmed, TransactionExecuted,
    TransactionProposed,
};
pub use crate::multisig::{MultiSigContract, MultiSigContractClient};
pub use crate::types::{
    ExecutorPolicy, GovernanceAction, Policy, Transaction, TransactionStatus,
};
