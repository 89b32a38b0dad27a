use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Bytes, Env, Vec};

use crate::actions::HostActions;
use crate::engine;
use crate::errors::MultisigError;
use crate::events;
use crate::governance;
use crate::ledger::{self, DAY_IN_LEDGERS};
use crate::registry;
use crate::types::{GovernanceAction, Policy, Transaction, TransactionStatus};

const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contract]
pub struct MultiSigContract;

#[contractimpl]
impl MultiSigContract {
    // Runs once, as part of deployment.
    pub fn __constructor(
        env: Env,
        owners: Vec<Address>,
        threshold: u32,
        token: Address,
        policy: Policy,
    ) {
        if let Err(err) = registry::initialize(&env, owners.clone(), threshold, token, policy) {
            panic_with_error!(&env, err);
        }
        extend_instance(&env);
        events::owners_changed(&env, &owners, threshold);
    }

    pub fn propose(
        env: Env,
        caller: Address,
        target: Address,
        value: i128,
        payload: Bytes,
    ) -> Result<u64, MultisigError> {
        caller.require_auth();

        let id = engine::propose(&env, &caller, target, value, payload)?;
        extend_instance(&env);
        Ok(id)
    }

    pub fn confirm(env: Env, caller: Address, id: u64) -> Result<(), MultisigError> {
        caller.require_auth();

        engine::confirm(&env, &caller, id)?;
        extend_instance(&env);
        Ok(())
    }

    pub fn revoke(env: Env, caller: Address, id: u64) -> Result<(), MultisigError> {
        caller.require_auth();

        engine::revoke(&env, &caller, id)?;
        extend_instance(&env);
        Ok(())
    }

    /// Performs the action of a transaction that has reached quorum and
    /// returns the target's output (empty for transfers and governance).
    pub fn execute(env: Env, caller: Address, id: u64) -> Result<Bytes, MultisigError> {
        caller.require_auth();

        let output = engine::execute(&env, &caller, id, &HostActions)?;
        extend_instance(&env);
        Ok(output)
    }

    pub fn get_transaction(env: Env, id: u64) -> Result<Transaction, MultisigError> {
        ledger::get(&env, id)
    }

    pub fn get_status(env: Env, id: u64) -> Result<TransactionStatus, MultisigError> {
        engine::status(&env, id)
    }

    pub fn confirmation_count(env: Env, id: u64) -> Result<u32, MultisigError> {
        let transaction = ledger::get(&env, id)?;
        engine::effective_confirmations(&env, &transaction)
    }

    pub fn is_confirmed(env: Env, id: u64, owner: Address) -> Result<bool, MultisigError> {
        let confirmed = ledger::get(&env, id)?.confirmations.contains(&owner);
        Ok(confirmed && registry::is_owner(&env, &owner)?)
    }

    pub fn transaction_count(env: Env) -> u64 {
        ledger::count(&env)
    }

    pub fn get_owners(env: Env) -> Result<Vec<Address>, MultisigError> {
        registry::owners(&env)
    }

    pub fn get_threshold(env: Env) -> Result<u32, MultisigError> {
        registry::threshold(&env)
    }

    pub fn owner_count(env: Env) -> Result<u32, MultisigError> {
        registry::owner_count(&env)
    }

    pub fn is_owner(env: Env, identity: Address) -> Result<bool, MultisigError> {
        registry::is_owner(&env, &identity)
    }

    pub fn get_policy(env: Env) -> Result<Policy, MultisigError> {
        registry::policy(&env)
    }

    pub fn get_token(env: Env) -> Result<Address, MultisigError> {
        registry::token(&env)
    }

    pub fn governance_payload(env: Env, action: GovernanceAction) -> Bytes {
        governance::encode(&env, action)
    }
}

fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
