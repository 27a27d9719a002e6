use crate::entities::{Candidate, Classification, CommitteeLedger, Entity, Individual};

use super::classifier::is_other_receipt;

/// `amount / count`, or the prior average when there is nothing to divide by.
pub(crate) fn average(amount: f64, count: u64, prior: f64) -> f64 {
    if count == 0 {
        prior
    } else {
        amount / count as f64
    }
}

impl CommitteeLedger {
    pub(crate) fn record_incoming(&mut self, code: &str, amount: f64) {
        if is_other_receipt(code) {
            self.other_receipts_in_amt += amount;
            self.other_receipts_in_txs += 1;
            self.avg_other_receipt_in = average(
                self.other_receipts_in_amt,
                self.other_receipts_in_txs,
                self.avg_other_receipt_in,
            );
        } else {
            self.contributions_in_amt += amount;
            self.contributions_in_txs += 1;
            self.avg_contribution_in = average(
                self.contributions_in_amt,
                self.contributions_in_txs,
                self.avg_contribution_in,
            );
        }
        self.total_incoming_amt = self.contributions_in_amt + self.other_receipts_in_amt;
        self.total_incoming_txs = self.contributions_in_txs + self.other_receipts_in_txs;
        self.avg_incoming = average(
            self.total_incoming_amt,
            self.total_incoming_txs,
            self.avg_incoming,
        );
        self.recompute_net_balance();
    }

    pub(crate) fn record_outgoing(&mut self, is_transfer: bool, amount: f64) {
        if is_transfer {
            self.transfers_amt += amount;
            self.transfers_txs += 1;
            self.avg_transfer = average(self.transfers_amt, self.transfers_txs, self.avg_transfer);
        } else {
            self.expenditures_amt += amount;
            self.expenditures_txs += 1;
            self.avg_expenditure = average(
                self.expenditures_amt,
                self.expenditures_txs,
                self.avg_expenditure,
            );
        }
        self.total_outgoing_amt = self.transfers_amt + self.expenditures_amt;
        self.total_outgoing_txs = self.transfers_txs + self.expenditures_txs;
        self.avg_outgoing = average(
            self.total_outgoing_amt,
            self.total_outgoing_txs,
            self.avg_outgoing,
        );
        self.recompute_net_balance();
    }

    fn recompute_net_balance(&mut self) {
        self.net_balance = self.total_incoming_amt - self.total_outgoing_amt;
    }
}

impl Individual {
    pub(crate) fn record_sent(&mut self, amount: f64) {
        self.total_out_amt += amount;
        self.total_out_txs += 1;
        self.avg_tx_out = average(self.total_out_amt, self.total_out_txs, self.avg_tx_out);
        self.net_balance = self.total_in_amt - self.total_out_amt;
    }

    pub(crate) fn record_received(&mut self, amount: f64) {
        self.total_in_amt += amount;
        self.total_in_txs += 1;
        self.avg_tx_in = average(self.total_in_amt, self.total_in_txs, self.avg_tx_in);
        self.net_balance = self.total_in_amt - self.total_out_amt;
    }
}

impl Candidate {
    pub(crate) fn record_direct_out(&mut self, amount: f64) {
        self.direct_out_amt += amount;
        self.direct_out_txs += 1;
        self.avg_direct_out = average(self.direct_out_amt, self.direct_out_txs, self.avg_direct_out);
        self.net_balance = self.direct_in_amt - self.direct_out_amt;
    }

    pub(crate) fn record_direct_in(&mut self, amount: f64) {
        self.direct_in_amt += amount;
        self.direct_in_txs += 1;
        self.avg_direct_in = average(self.direct_in_amt, self.direct_in_txs, self.avg_direct_in);
        self.net_balance = self.direct_in_amt - self.direct_out_amt;
    }
}

/// Applies the additive side of a classified transaction. Leaderboards are
/// handled by the orchestrator.
pub(crate) struct AggregateUpdater;

impl AggregateUpdater {
    /// Money entered the filer: credit its receipts, debit the counterparty's
    /// outgoing totals. `counterparty` is `None` when the filer is its own
    /// counterparty.
    pub(crate) fn apply_incoming(
        classification: &Classification,
        code: &str,
        amount: f64,
        filer: &mut CommitteeLedger,
        counterparty: Option<&mut Entity>,
    ) {
        if classification.is_memo {
            return;
        }
        filer.record_incoming(code, amount);
        match counterparty {
            Some(Entity::Individual(i)) => i.record_sent(amount),
            Some(Entity::Candidate(c)) => c.record_direct_out(amount),
            // The sending committee books this through its own record.
            Some(Entity::Committee(_)) | None => {}
        }
    }

    /// Money left the filer: debit its transfers or expenditures, credit the
    /// counterparty's incoming totals.
    pub(crate) fn apply_outgoing(
        classification: &Classification,
        amount: f64,
        filer: &mut CommitteeLedger,
        counterparty: Option<&mut Entity>,
    ) {
        if classification.is_memo {
            return;
        }
        filer.record_outgoing(classification.is_transfer, amount);
        match counterparty {
            Some(Entity::Individual(i)) => i.record_received(amount),
            Some(Entity::Candidate(c)) => c.record_direct_in(amount),
            // The receiving committee books this through its own record.
            Some(Entity::Committee(_)) | None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Bucket, Direction};

    fn classification(direction: Direction, is_transfer: bool, is_memo: bool) -> Classification {
        Classification {
            filer_id: "C1".to_string(),
            counterparty_id: "I1".to_string(),
            counterparty_bucket: Bucket::Individual,
            direction,
            is_transfer,
            is_memo,
            is_earmark: false,
        }
    }

    fn assert_balanced(c: &CommitteeLedger) {
        assert_eq!(
            c.total_incoming_amt,
            c.contributions_in_amt + c.other_receipts_in_amt
        );
        assert_eq!(c.total_outgoing_amt, c.transfers_amt + c.expenditures_amt);
        assert_eq!(c.net_balance, c.total_incoming_amt - c.total_outgoing_amt);
    }

    #[test]
    fn test_average_of_zero_count_keeps_prior() {
        assert_eq!(average(10.0, 0, 3.5), 3.5);
        assert_eq!(average(10.0, 4, 3.5), 2.5);
    }

    #[test]
    fn test_incoming_splits_contributions_and_other_receipts() {
        let mut filer = CommitteeLedger::new("C1");
        let mut donor = Entity::Individual(Individual::new("I1"));
        let c = classification(Direction::Incoming, false, false);

        AggregateUpdater::apply_incoming(&c, "15", 500.0, &mut filer, Some(&mut donor));
        AggregateUpdater::apply_incoming(&c, "17R", 0.1, &mut filer, Some(&mut donor));
        AggregateUpdater::apply_incoming(&c, "15E", 0.2, &mut filer, Some(&mut donor));

        assert_eq!(filer.contributions_in_txs, 2);
        assert_eq!(filer.other_receipts_in_amt, 0.1);
        assert_eq!(filer.total_incoming_txs, 3);
        assert_eq!(filer.avg_contribution_in, (500.0 + 0.2) / 2.0);
        assert_balanced(&filer);

        let Entity::Individual(donor) = donor else {
            panic!("donor changed kind");
        };
        assert_eq!(donor.total_out_txs, 3);
        assert_eq!(donor.net_balance, -donor.total_out_amt);
    }

    #[test]
    fn test_outgoing_splits_transfers_and_expenditures() {
        let mut filer = CommitteeLedger::new("C1");
        let mut payee = Entity::Candidate(Candidate::new("H1"));

        AggregateUpdater::apply_outgoing(
            &classification(Direction::Outgoing, true, false),
            250.0,
            &mut filer,
            Some(&mut payee),
        );
        AggregateUpdater::apply_outgoing(
            &classification(Direction::Outgoing, false, false),
            50.0,
            &mut filer,
            Some(&mut payee),
        );

        assert_eq!(filer.transfers_amt, 250.0);
        assert_eq!(filer.expenditures_amt, 50.0);
        assert_eq!(filer.avg_outgoing, 150.0);
        assert_eq!(filer.net_balance, -300.0);
        assert_balanced(&filer);

        let Entity::Candidate(payee) = payee else {
            panic!("payee changed kind");
        };
        assert_eq!(payee.direct_in_amt, 300.0);
        assert_eq!(payee.direct_in_txs, 2);
        assert_eq!(payee.net_balance, 300.0);
    }

    #[test]
    fn test_committee_counterparty_totals_untouched() {
        let mut filer = CommitteeLedger::new("C1");
        let mut other = Entity::Committee(CommitteeLedger::new("C2"));
        AggregateUpdater::apply_outgoing(
            &classification(Direction::Outgoing, true, false),
            1000.0,
            &mut filer,
            Some(&mut other),
        );
        assert_eq!(other, Entity::Committee(CommitteeLedger::new("C2")));
        assert_eq!(filer.transfers_txs, 1);
    }

    #[test]
    fn test_memo_changes_nothing() {
        let mut filer = CommitteeLedger::new("C1");
        let mut donor = Entity::Individual(Individual::new("I1"));
        AggregateUpdater::apply_incoming(
            &classification(Direction::Incoming, false, true),
            "15",
            500.0,
            &mut filer,
            Some(&mut donor),
        );
        assert_eq!(filer, CommitteeLedger::new("C1"));
        assert_eq!(donor, Entity::Individual(Individual::new("I1")));
    }
}
