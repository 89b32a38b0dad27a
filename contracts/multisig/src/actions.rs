use soroban_sdk::{contractclient, log, token, Address, Bytes, Env};

use crate::errors::MultisigError;
use crate::governance;
use crate::registry;
use crate::types::Transaction;

/// Callback a target contract implements to receive a non-empty payload.
#[contractclient(name = "ActionTargetClient")]
pub trait ActionTarget {
    fn on_multisig_call(
        env: Env,
        multisig: Address,
        tx_id: u64,
        value: i128,
        payload: Bytes,
    ) -> Bytes;
}

pub(crate) trait ActionRunner {
    fn run(&self, env: &Env, transaction: &Transaction) -> Result<Bytes, MultisigError>;
}

/// Runs actions against the Soroban host: governance updates in place,
/// token transfers and target callbacks as cross-contract calls.
pub(crate) struct HostActions;

impl ActionRunner for HostActions {
    fn run(&self, env: &Env, transaction: &Transaction) -> Result<Bytes, MultisigError> {
        if governance::is_governance(env, &transaction.target) {
            governance::apply(env, transaction)?;
            return Ok(Bytes::new(env));
        }

        if transaction.value > 0 {
            transfer_value(env, transaction)?;
        }

        if transaction.payload.is_empty() {
            return Ok(Bytes::new(env));
        }

        let target = ActionTargetClient::new(env, &transaction.target);
        match target.try_on_multisig_call(
            &env.current_contract_address(),
            &transaction.id,
            &transaction.value,
            &transaction.payload,
        ) {
            Ok(Ok(output)) => Ok(output),
            _ => {
                log!(env, "target rejected call", transaction.id);
                Err(MultisigError::ActionFailed)
            }
        }
    }
}

fn transfer_value(env: &Env, transaction: &Transaction) -> Result<(), MultisigError> {
    let token_client = token::TokenClient::new(env, &registry::token(env)?);
    match token_client.try_transfer(
        &env.current_contract_address(),
        &transaction.target,
        &transaction.value,
    ) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "value transfer failed", transaction.id, transaction.value);
            Err(MultisigError::ActionFailed)
        }
    }
}
