use soroban_sdk::{log, Address, Bytes, Env};

use crate::actions::ActionRunner;
use crate::errors::MultisigError;
use crate::events;
use crate::governance;
use crate::ledger;
use crate::registry;
use crate::types::{ExecutorPolicy, Transaction, TransactionStatus};

pub(crate) fn propose(
    env: &Env,
    caller: &Address,
    target: Address,
    value: i128,
    payload: Bytes,
) -> Result<u64, MultisigError> {
    require_owner(env, caller)?;

    if value < 0 {
        return Err(MultisigError::InvalidValue);
    }
    if governance::is_governance(env, &target) {
        governance::validate_proposal(env, value, &payload)?;
    }

    let id = ledger::append(env, caller, target, value, payload);
    events::proposed(env, &ledger::get(env, id)?);

    if registry::policy(env)?.proposer_confirms {
        let confirmations = ledger::add_confirmation(env, id, caller)?;
        events::confirmed(env, id, caller, confirmations);
    }

    Ok(id)
}

pub(crate) fn confirm(env: &Env, caller: &Address, id: u64) -> Result<(), MultisigError> {
    require_owner(env, caller)?;
    let confirmations = ledger::add_confirmation(env, id, caller)?;
    events::confirmed(env, id, caller, confirmations);
    Ok(())
}

pub(crate) fn revoke(env: &Env, caller: &Address, id: u64) -> Result<(), MultisigError> {
    require_owner(env, caller)?;
    let confirmations = ledger::remove_confirmation(env, id, caller)?;
    events::revoked(env, id, caller, confirmations);
    Ok(())
}

// Marks the transaction executed before the action runs; the guard puts
// the record back if the action fails.
pub(crate) fn execute<R: ActionRunner>(
    env: &Env,
    caller: &Address,
    id: u64,
    runner: &R,
) -> Result<Bytes, MultisigError> {
    require_owner(env, caller)?;

    let transaction = ledger::get(env, id)?;
    if transaction.executed {
        return Err(MultisigError::AlreadyExecuted);
    }
    if registry::policy(env)?.executor == ExecutorPolicy::ProposerOnly
        && transaction.proposer != *caller
    {
        return Err(MultisigError::Unauthorized);
    }
    if effective_confirmations(env, &transaction)? < registry::threshold(env)? {
        return Err(MultisigError::NotReady);
    }

    let guard = ExecutionGuard::acquire(env, id)?;
    let output = runner.run(env, guard.transaction())?;
    guard.commit();

    events::executed(env, &transaction, caller);
    Ok(output)
}

/// Confirmations held by current owners.
pub(crate) fn effective_confirmations(
    env: &Env,
    transaction: &Transaction,
) -> Result<u32, MultisigError> {
    let owners = registry::owners(env)?;
    let mut count = 0u32;
    for owner in transaction.confirmations.iter() {
        if owners.contains(&owner) {
            count += 1;
        }
    }
    Ok(count)
}

pub(crate) fn status(env: &Env, id: u64) -> Result<TransactionStatus, MultisigError> {
    let transaction = ledger::get(env, id)?;
    if transaction.executed {
        return Ok(TransactionStatus::Executed);
    }
    if effective_confirmations(env, &transaction)? >= registry::threshold(env)? {
        Ok(TransactionStatus::Ready)
    } else {
        Ok(TransactionStatus::Pending)
    }
}

fn require_owner(env: &Env, caller: &Address) -> Result<(), MultisigError> {
    if !registry::is_owner(env, caller)? {
        return Err(MultisigError::Unauthorized);
    }
    Ok(())
}

/// Holds the execution mark on a transaction for the duration of its
/// action. Dropping the guard without `commit` restores the record.
struct ExecutionGuard<'a> {
    env: &'a Env,
    original: Transaction,
    committed: bool,
}

impl<'a> ExecutionGuard<'a> {
    fn acquire(env: &'a Env, id: u64) -> Result<Self, MultisigError> {
        let original = ledger::mark_executed(env, id)?;
        Ok(Self {
            env,
            original,
            committed: false,
        })
    }

    fn transaction(&self) -> &Transaction {
        &self.original
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for ExecutionGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            log!(self.env, "execution rolled back", self.original.id);
            ledger::restore(self.env, &self.original);
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::{Cell, RefCell};

    use super::*;
    use crate::{MultiSigContract, Policy};
    use soroban_sdk::{testutils::Address as _, vec, Vec};

    struct CountingRunner {
        calls: Cell<u32>,
    }

    impl CountingRunner {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl ActionRunner for CountingRunner {
        fn run(&self, env: &Env, _transaction: &Transaction) -> Result<Bytes, MultisigError> {
            self.calls.set(self.calls.get() + 1);
            Ok(Bytes::from_slice(env, b"done"))
        }
    }

    struct FailingRunner;

    impl ActionRunner for FailingRunner {
        fn run(&self, _env: &Env, _transaction: &Transaction) -> Result<Bytes, MultisigError> {
            Err(MultisigError::ActionFailed)
        }
    }

    /// Tries to execute the same transaction again from inside its action.
    struct ReentrantRunner {
        caller: Address,
        calls: Cell<u32>,
        nested: RefCell<Option<Result<Bytes, MultisigError>>>,
        fail_after: bool,
    }

    impl ActionRunner for ReentrantRunner {
        fn run(&self, env: &Env, transaction: &Transaction) -> Result<Bytes, MultisigError> {
            self.calls.set(self.calls.get() + 1);
            if self.nested.borrow().is_none() {
                let nested = execute(env, &self.caller, transaction.id, self);
                *self.nested.borrow_mut() = Some(nested);
            }
            if self.fail_after {
                return Err(MultisigError::ActionFailed);
            }
            Ok(Bytes::new(env))
        }
    }

    struct Setup {
        env: Env,
        contract_id: Address,
        owners: Vec<Address>,
    }

    impl Setup {
        fn new(policy: Policy) -> Self {
            let env = Env::default();
            let owners = vec![
                &env,
                Address::generate(&env),
                Address::generate(&env),
                Address::generate(&env),
            ];
            let token = Address::generate(&env);
            let contract_id =
                env.register(MultiSigContract, (owners.clone(), 2u32, token, policy));
            Self {
                env,
                contract_id,
                owners,
            }
        }

        fn owner(&self, i: u32) -> Address {
            self.owners.get_unchecked(i)
        }

        fn ready_transaction(&self) -> u64 {
            let target = Address::generate(&self.env);
            self.env.as_contract(&self.contract_id, || {
                let id = propose(&self.env, &self.owner(0), target, 100, Bytes::new(&self.env))
                    .unwrap();
                confirm(&self.env, &self.owner(0), id).unwrap();
                confirm(&self.env, &self.owner(1), id).unwrap();
                id
            })
        }
    }

    #[test]
    fn test_execute_runs_action_once() {
        let setup = Setup::new(Policy::default());
        let id = setup.ready_transaction();
        let runner = CountingRunner::new();

        setup.env.as_contract(&setup.contract_id, || {
            let output = execute(&setup.env, &setup.owner(2), id, &runner).unwrap();
            assert_eq!(output, Bytes::from_slice(&setup.env, b"done"));
            assert_eq!(
                execute(&setup.env, &setup.owner(2), id, &runner),
                Err(MultisigError::AlreadyExecuted)
            );
            assert_eq!(status(&setup.env, id), Ok(TransactionStatus::Executed));
        });
        assert_eq!(runner.calls.get(), 1);
    }

    #[test]
    fn test_reentrant_execute_fails_already_executed() {
        let setup = Setup::new(Policy::default());
        let id = setup.ready_transaction();
        let runner = ReentrantRunner {
            caller: setup.owner(1),
            calls: Cell::new(0),
            nested: RefCell::new(None),
            fail_after: false,
        };

        setup.env.as_contract(&setup.contract_id, || {
            assert!(execute(&setup.env, &setup.owner(0), id, &runner).is_ok());
            assert!(ledger::get(&setup.env, id).unwrap().executed);
        });

        assert_eq!(runner.calls.get(), 1);
        assert_eq!(
            runner.nested.borrow().clone(),
            Some(Err(MultisigError::AlreadyExecuted))
        );
    }

    #[test]
    fn test_failed_action_restores_transaction() {
        let setup = Setup::new(Policy::default());
        let id = setup.ready_transaction();

        setup.env.as_contract(&setup.contract_id, || {
            let before = ledger::get(&setup.env, id).unwrap();

            assert_eq!(
                execute(&setup.env, &setup.owner(0), id, &FailingRunner),
                Err(MultisigError::ActionFailed)
            );
            assert_eq!(ledger::get(&setup.env, id).unwrap(), before);
            assert_eq!(status(&setup.env, id), Ok(TransactionStatus::Ready));

            let runner = CountingRunner::new();
            assert!(execute(&setup.env, &setup.owner(0), id, &runner).is_ok());
            assert_eq!(runner.calls.get(), 1);
        });
    }

    #[test]
    fn test_reentry_then_failure_leaves_nothing_behind() {
        let setup = Setup::new(Policy::default());
        let id = setup.ready_transaction();
        let runner = ReentrantRunner {
            caller: setup.owner(0),
            calls: Cell::new(0),
            nested: RefCell::new(None),
            fail_after: true,
        };

        setup.env.as_contract(&setup.contract_id, || {
            assert_eq!(
                execute(&setup.env, &setup.owner(0), id, &runner),
                Err(MultisigError::ActionFailed)
            );
            assert!(!ledger::get(&setup.env, id).unwrap().executed);
        });

        assert_eq!(runner.calls.get(), 1);
        assert_eq!(
            runner.nested.borrow().clone(),
            Some(Err(MultisigError::AlreadyExecuted))
        );
    }

    #[test]
    fn test_removed_owner_confirmation_does_not_count() {
        let setup = Setup::new(Policy::default());
        let id = setup.ready_transaction();

        setup.env.as_contract(&setup.contract_id, || {
            let remaining = vec![&setup.env, setup.owner(0), setup.owner(2)];
            registry::set_owners(&setup.env, remaining, 2).unwrap();

            let transaction = ledger::get(&setup.env, id).unwrap();
            assert_eq!(transaction.confirmations.len(), 2);
            assert_eq!(effective_confirmations(&setup.env, &transaction), Ok(1));
            assert_eq!(
                execute(&setup.env, &setup.owner(0), id, &CountingRunner::new()),
                Err(MultisigError::NotReady)
            );
            assert_eq!(
                revoke(&setup.env, &setup.owner(1), id),
                Err(MultisigError::Unauthorized)
            );
        });
    }

    #[test]
    fn test_proposer_only_executor_policy() {
        let setup = Setup::new(Policy {
            proposer_confirms: false,
            executor: ExecutorPolicy::ProposerOnly,
        });
        let id = setup.ready_transaction();

        setup.env.as_contract(&setup.contract_id, || {
            assert_eq!(
                execute(&setup.env, &setup.owner(1), id, &CountingRunner::new()),
                Err(MultisigError::Unauthorized)
            );
            assert!(execute(&setup.env, &setup.owner(0), id, &CountingRunner::new()).is_ok());
        });
    }
}
