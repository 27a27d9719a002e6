use chrono::{Datelike, NaiveDate};

/// A single itemized receipt or disbursement, as reported by the filing
/// committee.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub tx_id: String,
    pub filer_id: String,
    /// Registered id of the other party. Empty for unregistered donors and
    /// payees, which are resolved to a synthetic individual id.
    pub counterparty_id: String,
    pub tx_type: String,
    pub memo_code: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub entity_type: String,
    pub name: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub employer: String,
    pub occupation: String,
}

/// Two-year federal election cycle, identified by its closing (even) year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElectionCycle(pub(crate) i32);

// --

impl Transaction {
    pub fn new(
        tx_id: impl Into<String>,
        filer_id: impl Into<String>,
        counterparty_id: impl Into<String>,
        tx_type: impl Into<String>,
        amount: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            tx_id: tx_id.into(),
            filer_id: filer_id.into(),
            counterparty_id: counterparty_id.into(),
            tx_type: tx_type.into(),
            memo_code: String::new(),
            amount,
            date,
            entity_type: String::new(),
            name: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            employer: String::new(),
            occupation: String::new(),
        }
    }

    pub fn with_memo_code(mut self, memo_code: impl Into<String>) -> Self {
        self.memo_code = memo_code.into();
        self
    }

    pub fn with_contributor(
        mut self,
        name: impl Into<String>,
        zip: impl Into<String>,
        occupation: impl Into<String>,
    ) -> Self {
        self.name = name.into();
        self.zip = zip.into();
        self.occupation = occupation.into();
        self
    }

    pub fn cycle(&self) -> ElectionCycle {
        ElectionCycle::from_date(self.date)
    }
}

impl ElectionCycle {
    pub fn new(year: i32) -> Self {
        Self::from_year(year)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_year(date.year())
    }

    fn from_year(year: i32) -> Self {
        if year % 2 == 0 {
            ElectionCycle(year)
        } else {
            ElectionCycle(year + 1)
        }
    }

    pub fn year(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for ElectionCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
