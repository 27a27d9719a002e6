use fractic_server_error::{define_client_error, define_internal_error};

// Configuration-related.
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(
    InvalidEngineConfig,
    "Invalid engine configuration: {details}.",
    { details: &str }
);

// Transaction-related.
define_client_error!(
    InvalidTransactionType,
    "Transaction '{tx_id}' has an empty transaction-type code.",
    { tx_id: &str }
);
define_client_error!(
    InvalidTransactionAmount,
    "Transaction '{tx_id}' has a non-finite amount ({amount}).",
    { tx_id: &str, amount: f64 }
);
define_client_error!(
    MissingFilerId,
    "Transaction '{tx_id}' does not name a filer.",
    { tx_id: &str }
);
define_client_error!(
    CycleMismatch,
    "Transaction '{tx_id}' belongs to cycle {tx_cycle}, not the loaded cycle {cache_cycle}.",
    { tx_id: &str, tx_cycle: i32, cache_cycle: i32 }
);
define_internal_error!(
    TransactionStageFailed,
    "Transaction '{tx_id}' failed during stage '{stage}'.",
    { tx_id: &str, stage: &str }
);

// Entity-cache-related.
define_internal_error!(
    EntityNotLoaded,
    "Entity '{id}' ({bucket}) was not loaded into the batch cache.",
    { bucket: &str, id: &str }
);
define_internal_error!(
    UnexpectedEntityKind,
    "Entity '{id}' was expected to be a {expected} but the cache holds a {found}.",
    { id: &str, expected: &str, found: &str }
);

// Persistence-related.
define_internal_error!(
    EntityEncodeError,
    "Failed to encode stored value '{key}'.",
    { key: &str }
);
define_internal_error!(
    EntityDecodeError,
    "Failed to decode stored value '{key}'.",
    { key: &str }
);
