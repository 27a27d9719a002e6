use std::collections::HashMap;

use crate::{
    domain::logic::sorter,
    entities::{CommitteeLedger, Leaderboard, Rankings, RunningTotals},
};

use super::utils::{format_amount, format_count};

const HEADER_WIDTH: usize = 80;

pub(crate) struct ReportPrinter {
    top_n: usize,
}

impl ReportPrinter {
    pub(crate) fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub(crate) fn print_committee(&self, committee: &CommitteeLedger) -> String {
        let mut out = String::new();

        header(&mut out, &format!("Committee {}", committee.id));
        total_line(
            &mut out,
            "Incoming",
            committee.total_incoming_amt,
            committee.total_incoming_txs,
            committee.avg_incoming,
        );
        total_line(
            &mut out,
            "  Contributions",
            committee.contributions_in_amt,
            committee.contributions_in_txs,
            committee.avg_contribution_in,
        );
        total_line(
            &mut out,
            "  Other receipts",
            committee.other_receipts_in_amt,
            committee.other_receipts_in_txs,
            committee.avg_other_receipt_in,
        );
        total_line(
            &mut out,
            "Outgoing",
            committee.total_outgoing_amt,
            committee.total_outgoing_txs,
            committee.avg_outgoing,
        );
        total_line(
            &mut out,
            "  Transfers",
            committee.transfers_amt,
            committee.transfers_txs,
            committee.avg_transfer,
        );
        total_line(
            &mut out,
            "  Expenditures",
            committee.expenditures_amt,
            committee.expenditures_txs,
            committee.avg_expenditure,
        );
        out.push_str(&format!(
            "{:18}{:>18}\n\n",
            "Net balance",
            format_amount(committee.net_balance)
        ));

        self.print_leaderboard(&mut out, "Top individual contributors", &committee.top_individuals);
        self.print_leaderboard(&mut out, "Top committee contributors", &committee.top_committees);
        self.print_running(&mut out, "Transfer recipients", &committee.transfer_recipients);
        self.print_leaderboard(&mut out, "Top expenditure recipients", &committee.top_expenditures);
        out
    }

    pub(crate) fn print_rankings(&self, rankings: &Rankings) -> String {
        let mut out = String::new();
        // BTreeMap: boards print in key order.
        for (key, board) in &rankings.boards {
            self.print_leaderboard(&mut out, &format!("Rankings {}", key), board);
        }
        out
    }

    fn print_leaderboard(&self, out: &mut String, title: &str, board: &Leaderboard) {
        self.print_ranked(out, title, &board.amts, &board.txs);
    }

    fn print_running(&self, out: &mut String, title: &str, totals: &RunningTotals) {
        self.print_ranked(out, title, &totals.amts, &totals.txs);
    }

    fn print_ranked(
        &self,
        out: &mut String,
        title: &str,
        amts: &HashMap<String, f64>,
        txs: &HashMap<String, u64>,
    ) {
        header(out, title);
        if amts.is_empty() {
            out.push_str("  (none)\n\n");
            return;
        }
        for (rank, entry) in sorter::strongest(amts, self.top_n).iter().enumerate() {
            out.push_str(&format!(
                "{:>4}. {:40}{:>20}  ({} txs)\n",
                rank + 1,
                entry.id,
                format_amount(entry.total),
                format_count(txs.get(&entry.id).copied().unwrap_or(0))
            ));
        }
        out.push('\n');
    }
}

fn header(out: &mut String, title: &str) {
    let prefix = format!("; --- {} ", title);
    let pad = HEADER_WIDTH.saturating_sub(prefix.len());
    out.push_str(&prefix);
    out.push_str(&"-".repeat(pad));
    out.push_str("\n\n");
}

fn total_line(out: &mut String, label: &str, amount: f64, txs: u64, avg: f64) {
    out.push_str(&format!(
        "{:18}{:>18}  ({} txs, avg {})\n",
        label,
        format_amount(amount),
        format_count(txs),
        format_amount(avg)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::LeaderboardLimits;

    #[test]
    fn test_committee_report_lists_strongest_first() {
        let limits = LeaderboardLimits {
            capacity: 10,
            window: 2,
        };
        let mut c = CommitteeLedger::new("C1");
        c.total_incoming_amt = 1500.0;
        c.top_individuals.admit_or_update(limits, "I-small", 500.0, 1);
        c.top_individuals.admit_or_update(limits, "I-big", 1000.0, 2);

        let report = ReportPrinter::new(10).print_committee(&c);
        assert!(report.starts_with("; --- Committee C1 "));
        assert!(report.contains("$1,500.00"));
        let big = report.find("I-big").unwrap();
        let small = report.find("I-small").unwrap();
        assert!(big < small);
        assert!(report.contains("(2 txs)"));
        assert!(report.contains("Transfer recipients"));
    }

    #[test]
    fn test_top_n_limits_rows() {
        let limits = LeaderboardLimits {
            capacity: 10,
            window: 2,
        };
        let mut board = Leaderboard::default();
        for (id, t) in [("A", 1.0), ("B", 2.0), ("C", 3.0)] {
            board.admit_or_update(limits, id, t, 1);
        }
        let mut rankings = Rankings::default();
        rankings.boards.insert("committee:ALL".to_string(), board);
        let report = ReportPrinter::new(2).print_rankings(&rankings);
        assert!(report.contains("   1. C"));
        assert!(report.contains("   2. B"));
        assert!(!report.contains("   3. A"));
    }
}
