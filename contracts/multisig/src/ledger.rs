use soroban_sdk::{Address, Bytes, Env, Vec};

use crate::errors::MultisigError;
use crate::types::{DataKey, Transaction};

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const TRANSACTION_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const TRANSACTION_LIFETIME_THRESHOLD: u32 = TRANSACTION_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub(crate) fn count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::TransactionCount)
        .unwrap_or(0u64)
}

pub(crate) fn append(
    env: &Env,
    proposer: &Address,
    target: Address,
    value: i128,
    payload: Bytes,
) -> u64 {
    let id = count(env);
    env.storage()
        .instance()
        .set(&DataKey::TransactionCount, &(id + 1));

    let transaction = Transaction {
        id,
        proposer: proposer.clone(),
        target,
        value,
        payload,
        confirmations: Vec::new(env),
        executed: false,
        created_at: env.ledger().timestamp(),
    };
    store(env, &transaction);

    let mut pending = pending_ids(env);
    pending.push_back(id);
    store_pending_ids(env, &pending);

    id
}

pub(crate) fn get(env: &Env, id: u64) -> Result<Transaction, MultisigError> {
    env.storage()
        .persistent()
        .get(&DataKey::Transaction(id))
        .ok_or(MultisigError::NotFound)
}

pub(crate) fn add_confirmation(env: &Env, id: u64, owner: &Address) -> Result<u32, MultisigError> {
    let mut transaction = get(env, id)?;
    if transaction.executed {
        return Err(MultisigError::AlreadyExecuted);
    }
    if transaction.confirmations.contains(owner) {
        return Err(MultisigError::AlreadyConfirmed);
    }

    transaction.confirmations.push_back(owner.clone());
    store(env, &transaction);
    Ok(transaction.confirmations.len())
}

pub(crate) fn remove_confirmation(
    env: &Env,
    id: u64,
    owner: &Address,
) -> Result<u32, MultisigError> {
    let mut transaction = get(env, id)?;
    if transaction.executed {
        return Err(MultisigError::AlreadyExecuted);
    }

    let index = transaction
        .confirmations
        .first_index_of(owner)
        .ok_or(MultisigError::NotConfirmed)?;
    transaction.confirmations.remove(index);
    store(env, &transaction);
    Ok(transaction.confirmations.len())
}

/// Flips `executed` and returns the record as it was before the flip.
pub(crate) fn mark_executed(env: &Env, id: u64) -> Result<Transaction, MultisigError> {
    let transaction = get(env, id)?;
    if transaction.executed {
        return Err(MultisigError::AlreadyExecuted);
    }

    let mut marked = transaction.clone();
    marked.executed = true;
    store(env, &marked);
    Ok(transaction)
}

pub(crate) fn restore(env: &Env, transaction: &Transaction) {
    store(env, transaction);
}

/// Drops confirmations held by non-owners from unexecuted transactions.
pub(crate) fn prune_confirmations(env: &Env, owners: &Vec<Address>) {
    let mut still_pending = Vec::new(env);

    for id in pending_ids(env).iter() {
        let Ok(mut transaction) = get(env, id) else {
            continue;
        };
        if transaction.executed {
            continue;
        }

        let mut kept = Vec::new(env);
        for confirmation in transaction.confirmations.iter() {
            if owners.contains(&confirmation) {
                kept.push_back(confirmation);
            }
        }
        if kept.len() != transaction.confirmations.len() {
            transaction.confirmations = kept;
            store(env, &transaction);
        }
        still_pending.push_back(id);
    }

    store_pending_ids(env, &still_pending);
}

fn pending_ids(env: &Env) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::PendingIds)
        .unwrap_or(Vec::new(env))
}

fn store_pending_ids(env: &Env, ids: &Vec<u64>) {
    let key = DataKey::PendingIds;
    env.storage().persistent().set(&key, ids);
    env.storage().persistent().extend_ttl(
        &key,
        TRANSACTION_LIFETIME_THRESHOLD,
        TRANSACTION_BUMP_AMOUNT,
    );
}

fn store(env: &Env, transaction: &Transaction) {
    let key = DataKey::Transaction(transaction.id);
    env.storage().persistent().set(&key, transaction);
    env.storage().persistent().extend_ttl(
        &key,
        TRANSACTION_LIFETIME_THRESHOLD,
        TRANSACTION_BUMP_AMOUNT,
    );
}
