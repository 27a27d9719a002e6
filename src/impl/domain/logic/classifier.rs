use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use fractic_server_error::ServerError;
use sha2::{Digest, Sha256};

use crate::{
    entities::{Bucket, Classification, Direction, Transaction},
    errors::{InvalidTransactionAmount, InvalidTransactionType, MissingFilerId},
};

// Transaction-type code boundaries. Codes compare as strings.
// ---

/// Receipts are coded below this boundary.
pub(crate) const RECEIPTS_UPPER: &str = "20";
/// Convention/headquarters/recount account receipts: `[lower, upper)`.
pub(crate) const ACCOUNT_RECEIPTS_LOWER: &str = "30";
pub(crate) const ACCOUNT_RECEIPTS_UPPER: &str = "33";
/// Among receipts, loans, refunds and offsets fall into `[lower, upper)`.
pub(crate) const OTHER_RECEIPTS_LOWER: &str = "16";
pub(crate) const OTHER_RECEIPTS_UPPER: &str = RECEIPTS_UPPER;

/// Committee-to-committee contributions, transfers and loans.
pub(crate) const TRANSFER_CODES: &[&str] = &[
    "22H", "22Z", "24C", "24F", "24G", "24H", "24K", "24R", "24Z",
];

/// Contributions passed through an intermediary (conduit).
pub(crate) const EARMARK_CODES: &[&str] = &["24I", "24T"];

pub(crate) const MEMO_SENTINEL: &str = "X";

const COMMITTEE_PREFIX: char = 'C';
const CANDIDATE_PREFIXES: &[char] = &['H', 'S', 'P'];
const SYNTHETIC_ID_PREFIX: &str = "I";

pub(crate) fn is_incoming(code: &str) -> bool {
    code < RECEIPTS_UPPER || (ACCOUNT_RECEIPTS_LOWER..ACCOUNT_RECEIPTS_UPPER).contains(&code)
}

pub(crate) fn is_other_receipt(code: &str) -> bool {
    (OTHER_RECEIPTS_LOWER..OTHER_RECEIPTS_UPPER).contains(&code)
}

pub(crate) fn is_transfer(code: &str) -> bool {
    TRANSFER_CODES.contains(&code)
}

pub(crate) fn is_earmark(code: &str) -> bool {
    EARMARK_CODES.contains(&code)
}

pub(crate) fn bucket_of(id: &str) -> Bucket {
    match id.chars().next() {
        Some(COMMITTEE_PREFIX) => Bucket::Committee,
        Some(c) if CANDIDATE_PREFIXES.contains(&c) => Bucket::Candidate,
        _ => Bucket::Individual,
    }
}

/// Stable id for a counterparty without a registered id, derived from its
/// normalized name and 5-digit zip.
pub fn synthetic_id(name: &str, zip: &str) -> String {
    let name = name.trim().to_uppercase();
    let zip: String = zip.trim().chars().take(5).collect();
    let digest = Sha256::digest(format!("{}|{}", name, zip).as_bytes());
    format!("{}{}", SYNTHETIC_ID_PREFIX, URL_SAFE_NO_PAD.encode(&digest[..12]))
}

/// Counterparty id as used for cache lookups.
pub fn resolved_counterparty_id(tx: &Transaction) -> String {
    if tx.counterparty_id.is_empty() {
        synthetic_id(&tx.name, &tx.zip)
    } else {
        tx.counterparty_id.clone()
    }
}

pub(crate) struct Classifier;

impl Classifier {
    pub(crate) fn classify(tx: &Transaction) -> Result<Classification, ServerError> {
        let code = tx.tx_type.trim();
        if code.is_empty() {
            return Err(InvalidTransactionType::new(&tx.tx_id));
        }
        if !tx.amount.is_finite() {
            return Err(InvalidTransactionAmount::new(&tx.tx_id, tx.amount));
        }
        if tx.filer_id.is_empty() {
            return Err(MissingFilerId::new(&tx.tx_id));
        }

        let is_memo = tx.memo_code.trim() == MEMO_SENTINEL;

        // Earmarks are re-routed before the counterparty bucket is resolved.
        if is_earmark(code) {
            let recipient_bucket = if tx.counterparty_id.is_empty() {
                Bucket::Individual
            } else {
                bucket_of(&tx.counterparty_id)
            };
            return Ok(if recipient_bucket != Bucket::Committee {
                // Recipient keeps no committee ledger: the filer is only the
                // conduit.
                Classification {
                    filer_id: tx.filer_id.clone(),
                    counterparty_id: resolved_counterparty_id(tx),
                    counterparty_bucket: recipient_bucket,
                    direction: Direction::Outgoing,
                    is_transfer: false,
                    is_memo: true,
                    is_earmark: true,
                }
            } else {
                // The named committee received the money, through the filer.
                Classification {
                    filer_id: tx.counterparty_id.clone(),
                    counterparty_id: tx.filer_id.clone(),
                    counterparty_bucket: bucket_of(&tx.filer_id),
                    direction: Direction::Incoming,
                    is_transfer: false,
                    is_memo,
                    is_earmark: true,
                }
            });
        }

        let counterparty_id = resolved_counterparty_id(tx);
        let counterparty_bucket = if tx.counterparty_id.is_empty() {
            Bucket::Individual
        } else {
            bucket_of(&counterparty_id)
        };
        let direction = if is_incoming(code) {
            Direction::Incoming
        } else {
            Direction::Outgoing
        };

        Ok(Classification {
            filer_id: tx.filer_id.clone(),
            counterparty_id,
            counterparty_bucket,
            direction,
            is_transfer: direction == Direction::Outgoing && is_transfer(code),
            is_memo,
            is_earmark: false,
        })
    }
}
