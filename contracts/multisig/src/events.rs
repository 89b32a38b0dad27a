use soroban_sdk::{contractevent, Address, Env, Vec};

use crate::types::{Policy, Transaction};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransactionProposed {
    #[topic]
    pub id: u64,
    pub proposer: Address,
    pub target: Address,
    pub value: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransactionConfirmed {
    #[topic]
    pub id: u64,
    pub owner: Address,
    pub confirmations: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfirmationRevoked {
    #[topic]
    pub id: u64,
    pub owner: Address,
    pub confirmations: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransactionExecuted {
    #[topic]
    pub id: u64,
    pub executor: Address,
    pub target: Address,
    pub value: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnersChanged {
    pub owners: Vec<Address>,
    pub threshold: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyChanged {
    pub policy: Policy,
}

pub(crate) fn proposed(env: &Env, transaction: &Transaction) {
    TransactionProposed {
        id: transaction.id,
        proposer: transaction.proposer.clone(),
        target: transaction.target.clone(),
        value: transaction.value,
    }
    .publish(env);
}

pub(crate) fn confirmed(env: &Env, id: u64, owner: &Address, confirmations: u32) {
    TransactionConfirmed {
        id,
        owner: owner.clone(),
        confirmations,
    }
    .publish(env);
}

pub(crate) fn revoked(env: &Env, id: u64, owner: &Address, confirmations: u32) {
    ConfirmationRevoked {
        id,
        owner: owner.clone(),
        confirmations,
    }
    .publish(env);
}

pub(crate) fn executed(env: &Env, transaction: &Transaction, executor: &Address) {
    TransactionExecuted {
        id: transaction.id,
        executor: executor.clone(),
        target: transaction.target.clone(),
        value: transaction.value,
    }
    .publish(env);
}

pub(crate) fn owners_changed(env: &Env, owners: &Vec<Address>, threshold: u32) {
    OwnersChanged {
        owners: owners.clone(),
        threshold,
    }
    .publish(env);
}

pub(crate) fn policy_changed(env: &Env, policy: &Policy) {
    PolicyChanged {
        policy: policy.clone(),
    }
    .publish(env);
}
