use soroban_sdk::{Address, Env, Vec};

use crate::errors::MultisigError;
use crate::types::{DataKey, Policy};

pub(crate) fn initialize(
    env: &Env,
    owners: Vec<Address>,
    threshold: u32,
    token: Address,
    policy: Policy,
) -> Result<(), MultisigError> {
    validate_configuration(&owners, threshold)?;

    env.storage().instance().set(&DataKey::Owners, &owners);
    env.storage().instance().set(&DataKey::Threshold, &threshold);
    env.storage().instance().set(&DataKey::Token, &token);
    env.storage().instance().set(&DataKey::Policy, &policy);
    env.storage().instance().set(&DataKey::TransactionCount, &0u64);
    Ok(())
}

/// Rejects an empty owner set, duplicate owners, and thresholds outside
/// `1..=owners.len()`.
pub(crate) fn validate_configuration(
    owners: &Vec<Address>,
    threshold: u32,
) -> Result<(), MultisigError> {
    if owners.is_empty() || threshold == 0 || threshold > owners.len() {
        return Err(MultisigError::InvalidConfiguration);
    }

    for i in 0..owners.len() {
        for j in (i + 1)..owners.len() {
            if owners.get_unchecked(i) == owners.get_unchecked(j) {
                return Err(MultisigError::InvalidConfiguration);
            }
        }
    }
    Ok(())
}

pub(crate) fn owners(env: &Env) -> Result<Vec<Address>, MultisigError> {
    env.storage()
        .instance()
        .get(&DataKey::Owners)
        .ok_or(MultisigError::NotInitialized)
}

pub(crate) fn is_owner(env: &Env, identity: &Address) -> Result<bool, MultisigError> {
    Ok(owners(env)?.contains(identity))
}

pub(crate) fn owner_count(env: &Env) -> Result<u32, MultisigError> {
    Ok(owners(env)?.len())
}

pub(crate) fn threshold(env: &Env) -> Result<u32, MultisigError> {
    env.storage()
        .instance()
        .get(&DataKey::Threshold)
        .ok_or(MultisigError::NotInitialized)
}

pub(crate) fn policy(env: &Env) -> Result<Policy, MultisigError> {
    env.storage()
        .instance()
        .get(&DataKey::Policy)
        .ok_or(MultisigError::NotInitialized)
}

pub(crate) fn token(env: &Env) -> Result<Address, MultisigError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(MultisigError::NotInitialized)
}

// Only reachable through an executed governance transaction.
pub(crate) fn set_owners(
    env: &Env,
    new_owners: Vec<Address>,
    new_threshold: u32,
) -> Result<(), MultisigError> {
    validate_configuration(&new_owners, new_threshold)?;

    env.storage().instance().set(&DataKey::Owners, &new_owners);
    env.storage().instance().set(&DataKey::Threshold, &new_threshold);
    Ok(())
}

pub(crate) fn set_policy(env: &Env, policy: &Policy) {
    env.storage().instance().set(&DataKey::Policy, policy);
}
