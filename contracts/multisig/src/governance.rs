use soroban_sdk::{
    log,
    xdr::{FromXdr, ToXdr},
    Address, Bytes, Env,
};

use crate::errors::MultisigError;
use crate::events;
use crate::ledger;
use crate::registry;
use crate::types::{GovernanceAction, Transaction};

pub(crate) fn is_governance(env: &Env, target: &Address) -> bool {
    *target == env.current_contract_address()
}

pub(crate) fn encode(env: &Env, action: GovernanceAction) -> Bytes {
    action.to_xdr(env)
}

pub(crate) fn decode(env: &Env, payload: &Bytes) -> Result<GovernanceAction, MultisigError> {
    if payload.is_empty() {
        return Err(MultisigError::InvalidConfiguration);
    }
    GovernanceAction::from_xdr(env, payload).map_err(|_| MultisigError::InvalidConfiguration)
}

/// Shape check done at proposal time. The resulting owner set is validated
/// again on execution, since the registry may change in between.
pub(crate) fn validate_proposal(
    env: &Env,
    value: i128,
    payload: &Bytes,
) -> Result<(), MultisigError> {
    if value != 0 {
        return Err(MultisigError::InvalidConfiguration);
    }
    decode(env, payload).map(|_| ())
}

pub(crate) fn apply(env: &Env, transaction: &Transaction) -> Result<(), MultisigError> {
    if transaction.value != 0 {
        return Err(MultisigError::InvalidConfiguration);
    }
    let action = decode(env, &transaction.payload)?;

    let mut owners = registry::owners(env)?;
    let mut threshold = registry::threshold(env)?;

    match action {
        GovernanceAction::SetOwners(new_owners, new_threshold) => {
            owners = new_owners;
            threshold = new_threshold;
        }
        GovernanceAction::AddOwner(owner) => {
            if owners.contains(&owner) {
                return Err(MultisigError::InvalidConfiguration);
            }
            owners.push_back(owner);
        }
        GovernanceAction::RemoveOwner(owner) => {
            let index = owners
                .first_index_of(&owner)
                .ok_or(MultisigError::InvalidConfiguration)?;
            owners.remove(index);
        }
        GovernanceAction::ChangeThreshold(new_threshold) => {
            threshold = new_threshold;
        }
        GovernanceAction::SetPolicy(policy) => {
            registry::set_policy(env, &policy);
            events::policy_changed(env, &policy);
            return Ok(());
        }
    }

    registry::set_owners(env, owners.clone(), threshold).map_err(|err| {
        log!(env, "governance update rejected", transaction.id);
        err
    })?;
    ledger::prune_confirmations(env, &owners);
    events::owners_changed(env, &owners, threshold);
    Ok(())
}
