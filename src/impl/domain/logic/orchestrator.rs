use fractic_server_error::ServerError;
use log::{debug, warn};

use crate::{
    entities::{
        BatchReport, Bucket, Classification, CommitteeLedger, EngineConfig, Entity, EntityCache,
        EntityKey, Rankings, RankingKey, Transaction,
    },
    errors::{CycleMismatch, EntityNotLoaded, TransactionStageFailed, UnexpectedEntityKind},
};

use super::{aggregate_updater::AggregateUpdater, classifier::Classifier};

/// Processing stage a transaction failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Classify,
    Resolve,
}

impl Stage {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Stage::Classify => "classify",
            Stage::Resolve => "resolve",
        }
    }
}

/// Applies transactions to the entities of a loaded batch cache: classify,
/// update additive totals, then every leaderboard and ranking the
/// transaction implicates.
///
/// Transactions must be applied one at a time, in order. A transaction that
/// fails is rejected before any entity is mutated.
#[derive(Debug, Clone)]
pub struct UpdateEngine {
    config: EngineConfig,
}

impl UpdateEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ServerError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn apply(
        &self,
        cache: &mut EntityCache,
        tx: &Transaction,
    ) -> Result<Classification, ServerError> {
        let classification =
            Classifier::classify(tx).map_err(|e| stage_error(tx, Stage::Classify, e))?;
        let (mut filer, mut counterparty) = Self::resolve(cache, tx, &classification)
            .map_err(|e| stage_error(tx, Stage::Resolve, e))?;

        // Nothing below can fail.
        if classification.is_incoming() {
            AggregateUpdater::apply_incoming(
                &classification,
                tx.tx_type.trim(),
                tx.amount,
                &mut filer,
                counterparty.as_mut(),
            );
        } else {
            AggregateUpdater::apply_outgoing(
                &classification,
                tx.amount,
                &mut filer,
                counterparty.as_mut(),
            );
        }
        self.update_leaderboards(&classification, tx.amount, &mut filer, counterparty.as_mut());
        if !classification.is_memo {
            self.update_rankings(
                &classification,
                &mut cache.rankings,
                &filer,
                counterparty.as_ref(),
            );
        }

        cache.restore(Entity::Committee(filer));
        if let Some(counterparty) = counterparty {
            cache.restore(counterparty);
        }
        Ok(classification)
    }

    /// Applies the transactions in order, stopping at the first failure. The
    /// cache must not be persisted after a failure.
    pub fn apply_all(
        &self,
        cache: &mut EntityCache,
        txs: &[Transaction],
    ) -> Result<BatchReport, ServerError> {
        let mut report = BatchReport {
            cycles: vec![cache.cycle],
            ..Default::default()
        };
        for (i, tx) in txs.iter().enumerate() {
            let classification = self.apply(cache, tx).map_err(|e| {
                warn!(
                    "batch for cycle {} aborted at transaction #{} ('{}')",
                    cache.cycle, i, tx.tx_id
                );
                e
            })?;
            report.applied += 1;
            if classification.is_memo {
                report.memos += 1;
            }
            if classification.is_earmark {
                report.earmarks += 1;
            }
        }
        Ok(report)
    }

    /// Takes the filer ledger and the counterparty out of the cache. Every
    /// check happens before anything is taken, so a failure leaves the cache
    /// untouched.
    fn resolve(
        cache: &mut EntityCache,
        tx: &Transaction,
        classification: &Classification,
    ) -> Result<(CommitteeLedger, Option<Entity>), ServerError> {
        if tx.cycle() != cache.cycle {
            return Err(CycleMismatch::new(
                &tx.tx_id,
                tx.cycle().year(),
                cache.cycle.year(),
            ));
        }

        let filer_key = classification.filer_key();
        let counterparty_key = classification.counterparty_key();
        check_loaded(cache, &filer_key)?;
        let self_referential = filer_key == counterparty_key;
        if self_referential {
            warn!(
                "transaction '{}': committee '{}' is its own counterparty",
                tx.tx_id, filer_key.id
            );
        } else {
            check_loaded(cache, &counterparty_key)?;
        }

        let filer = match cache.take(&filer_key) {
            Some(Entity::Committee(c)) => c,
            _ => return Err(EntityNotLoaded::new(filer_key.bucket.as_str(), &filer_key.id)),
        };
        let counterparty = if self_referential {
            None
        } else {
            cache.take(&counterparty_key)
        };
        Ok((filer, counterparty))
    }

    fn update_leaderboards(
        &self,
        classification: &Classification,
        amount: f64,
        filer: &mut CommitteeLedger,
        counterparty: Option<&mut Entity>,
    ) {
        let committee_limits = self.config.committee_limits();
        let Some(counterparty) = counterparty else {
            return;
        };
        match (classification.is_incoming(), counterparty) {
            (true, Entity::Individual(i)) => {
                filer
                    .top_individuals
                    .admit_or_update(committee_limits, &i.id, amount, 1);
                i.recipients
                    .admit_or_update(self.config.individual_limits(), &filer.id, amount, 1);
            }
            (true, Entity::Candidate(c)) => {
                filer
                    .top_committees
                    .admit_or_update(committee_limits, &c.id, amount, 1);
                c.direct_recipients
                    .admit_or_update(self.config.candidate_limits(), &filer.id, amount, 1);
            }
            // Mirrored from the sending committee's own outgoing record.
            (true, Entity::Committee(_)) => {}
            (false, Entity::Individual(i)) => {
                self.record_outgoing_recipient(filer, &i.id, amount, classification.is_transfer);
                i.senders
                    .admit_or_update(self.config.individual_limits(), &filer.id, amount, 1);
            }
            (false, Entity::Candidate(c)) => {
                self.record_outgoing_recipient(filer, &c.id, amount, classification.is_transfer);
                c.direct_senders
                    .admit_or_update(self.config.candidate_limits(), &filer.id, amount, 1);
            }
            (false, Entity::Committee(to)) => {
                self.apply_inter_committee_transfer(filer, to, amount, classification.is_transfer);
            }
        }
    }

    /// Books money sent by committee `from` to committee `to` on the
    /// leaderboards of both: `from` lists `to` as a recipient and, for
    /// transfers, `to` lists `from` as a contributor. Payments that are not
    /// transfers stay off `to.top_committees`. Only the sender's record drives
    /// this, so the receiver's copy of the same transaction must not touch
    /// `to.top_committees`.
    pub(crate) fn apply_inter_committee_transfer(
        &self,
        from: &mut CommitteeLedger,
        to: &mut CommitteeLedger,
        amount: f64,
        is_transfer: bool,
    ) {
        self.record_outgoing_recipient(from, &to.id, amount, is_transfer);
        if is_transfer {
            to.top_committees
                .admit_or_update(self.config.committee_limits(), &from.id, amount, 1);
        }
    }

    fn record_outgoing_recipient(
        &self,
        filer: &mut CommitteeLedger,
        recipient_id: &str,
        amount: f64,
        is_transfer: bool,
    ) {
        if is_transfer {
            filer.transfer_recipients.add(recipient_id, amount, 1);
        } else {
            filer
                .top_expenditures
                .admit_or_update(self.config.committee_limits(), recipient_id, amount, 1);
        }
    }

    /// Records the new running totals of the entities whose ranked figure the
    /// transaction changed.
    fn update_rankings(
        &self,
        classification: &Classification,
        rankings: &mut Rankings,
        filer: &CommitteeLedger,
        counterparty: Option<&Entity>,
    ) {
        let limits = self.config.rankings_limits();
        if classification.is_incoming() {
            let mut keys = vec![RankingKey::all(Bucket::Committee)];
            if let Some(party) = &filer.party {
                keys.push(RankingKey::party(Bucket::Committee, party));
            }
            if let Some(category) = &filer.category {
                keys.push(RankingKey::category(Bucket::Committee, category));
            }
            for key in keys {
                rankings
                    .board_mut(&key)
                    .record_total(limits, &filer.id, filer.total_incoming_amt);
            }
            if let Some(Entity::Individual(i)) = counterparty {
                rankings
                    .board_mut(&RankingKey::all(Bucket::Individual))
                    .record_total(limits, &i.id, i.total_out_amt);
            }
        } else if let Some(Entity::Candidate(c)) = counterparty {
            let mut keys = vec![RankingKey::all(Bucket::Candidate)];
            if let Some(party) = &c.party {
                keys.push(RankingKey::party(Bucket::Candidate, party));
            }
            for key in keys {
                rankings
                    .board_mut(&key)
                    .record_total(limits, &c.id, c.direct_in_amt);
            }
        }
        debug!("rankings updated for '{}'", filer.id);
    }
}

fn check_loaded(cache: &EntityCache, key: &EntityKey) -> Result<(), ServerError> {
    match cache.get(key) {
        None => Err(EntityNotLoaded::new(key.bucket.as_str(), &key.id)),
        Some(entity) if entity.bucket() != key.bucket => Err(UnexpectedEntityKind::new(
            &key.id,
            key.bucket.as_str(),
            entity.bucket().as_str(),
        )),
        Some(_) => Ok(()),
    }
}

fn stage_error(tx: &Transaction, stage: Stage, e: ServerError) -> ServerError {
    TransactionStageFailed::with_debug(&tx.tx_id, stage.as_str(), &e)
}
