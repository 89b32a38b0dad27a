use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MultisigError {
    // Configuration entries are missing from instance storage.
    NotInitialized = 1,
    /// Caller is not a current owner, or not allowed to execute under the policy.
    Unauthorized = 3,
    NotFound = 4,
    AlreadyConfirmed = 5,
    NotConfirmed = 6,
    AlreadyExecuted = 7,
    /// Effective confirmations are below the threshold.
    NotReady = 8,
    InvalidConfiguration = 9,
    /// The token transfer or target callback rejected the action.
    ActionFailed = 10,
    InvalidValue = 11,
}
