use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use larder_core::{DomainError, DomainResult, MaterialCode};
use larder_orders::ConsumptionCounts;

/// `as_on` dates are persisted as `DD-MM-YYYY`.
pub mod as_on_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d-%m-%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Remaining quantity of one material.
///
/// The quantity may go negative: over-consumption surfaces as a negative balance
/// instead of failing the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    #[serde(rename = "product_code")]
    pub material_code: MaterialCode,
    #[serde(rename = "stock")]
    pub remaining_quantity: i64,
    #[serde(rename = "as_on", with = "as_on_format")]
    pub as_of_date: NaiveDate,
}

impl LedgerRecord {
    pub fn new(material_code: MaterialCode, remaining_quantity: i64, as_of_date: NaiveDate) -> Self {
        Self {
            material_code,
            remaining_quantity,
            as_of_date,
        }
    }
}

/// Result of applying a consumption tally to a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub ledger: Ledger,
    /// Consumed codes with no ledger record, with their counts (ordered by code).
    pub untracked: Vec<(MaterialCode, u64)>,
}

/// Ordered set of ledger records for one material kind.
///
/// Invariant: material codes are unique. The set of codes is fixed by the persisted
/// file; applying consumption never adds or removes records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<LedgerRecord>", into = "Vec<LedgerRecord>")]
pub struct Ledger {
    records: Vec<LedgerRecord>,
}

impl Ledger {
    pub fn new(records: Vec<LedgerRecord>) -> DomainResult<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(&record.material_code) {
                return Err(DomainError::validation(format!(
                    "duplicate ledger record for '{}'",
                    record.material_code
                )));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[LedgerRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<LedgerRecord> {
        self.records
    }

    pub fn get(&self, code: &MaterialCode) -> Option<&LedgerRecord> {
        self.records.iter().find(|r| &r.material_code == code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Subtract consumption from every referenced record and stamp it with `as_of`.
    ///
    /// Records not referenced by `counts` are untouched. Codes in `counts` without a
    /// record are reported back in [`Applied::untracked`]; what to do about them is the
    /// caller's policy.
    pub fn apply_consumption(&self, counts: &ConsumptionCounts, as_of: NaiveDate) -> Applied {
        let records = self
            .records
            .iter()
            .map(|record| {
                if !counts.contains(&record.material_code) {
                    return record.clone();
                }
                let used = i64::try_from(counts.get(&record.material_code)).unwrap_or(i64::MAX);
                LedgerRecord {
                    material_code: record.material_code.clone(),
                    remaining_quantity: record.remaining_quantity.saturating_sub(used),
                    as_of_date: as_of,
                }
            })
            .collect();

        let untracked = counts
            .iter()
            .filter(|(code, _)| self.get(code).is_none())
            .map(|(code, count)| (code.clone(), count))
            .collect();

        Applied {
            ledger: Ledger { records },
            untracked,
        }
    }
}

impl TryFrom<Vec<LedgerRecord>> for Ledger {
    type Error = DomainError;

    fn try_from(records: Vec<LedgerRecord>) -> Result<Self, Self::Error> {
        Ledger::new(records)
    }
}

impl From<Ledger> for Vec<LedgerRecord> {
    fn from(ledger: Ledger) -> Self {
        ledger.records
    }
}

impl core::fmt::Display for Ledger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for record in &self.records {
            writeln!(f, "{} : {}", record.material_code, record.remaining_quantity)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> MaterialCode {
        MaterialCode::new(s).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, day).unwrap()
    }

    fn ledger(entries: &[(&str, i64)]) -> Ledger {
        Ledger::new(
            entries
                .iter()
                .map(|(c, q)| LedgerRecord::new(code(c), *q, date(1)))
                .collect(),
        )
        .unwrap()
    }

    fn counts(entries: &[(&str, u64)]) -> ConsumptionCounts {
        entries.iter().map(|(c, n)| (code(c), *n)).collect()
    }

    #[test]
    fn consumption_decrements_and_restamps_referenced_records() {
        let before = ledger(&[("BOX", 100), ("BAG", 40)]);
        let applied = before.apply_consumption(&counts(&[("BOX", 3)]), date(9));

        let boxes = applied.ledger.get(&code("BOX")).unwrap();
        assert_eq!(boxes.remaining_quantity, 97);
        assert_eq!(boxes.as_of_date, date(9));

        let bags = applied.ledger.get(&code("BAG")).unwrap();
        assert_eq!(bags.remaining_quantity, 40);
        assert_eq!(bags.as_of_date, date(1));
        assert!(applied.untracked.is_empty());
    }

    #[test]
    fn quantity_may_go_negative() {
        let applied = ledger(&[("BOX", 1)]).apply_consumption(&counts(&[("BOX", 4)]), date(2));
        assert_eq!(applied.ledger.get(&code("BOX")).unwrap().remaining_quantity, -3);
    }

    #[test]
    fn unknown_codes_are_reported_not_added() {
        let applied = ledger(&[("BOX", 10)]).apply_consumption(&counts(&[("CUP", 2), ("BOX", 1)]), date(2));
        assert_eq!(applied.ledger.len(), 1);
        assert_eq!(applied.untracked, vec![(code("CUP"), 2)]);
    }

    #[test]
    fn record_order_is_preserved() {
        let applied = ledger(&[("Z", 5), ("A", 5), ("M", 5)]).apply_consumption(&counts(&[("A", 1)]), date(3));
        let codes: Vec<_> = applied.ledger.records().iter().map(|r| r.material_code.as_str()).collect();
        assert_eq!(codes, vec!["Z", "A", "M"]);
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let records = vec![
            LedgerRecord::new(code("BOX"), 1, date(1)),
            LedgerRecord::new(code("BOX"), 2, date(1)),
        ];
        assert!(Ledger::new(records).is_err());
    }

    #[test]
    fn json_uses_persisted_field_names() {
        let json = r#"[{"product_code": "SMALL_PAPER_BOX_6x6", "stock": 100, "as_on": "01-04-2024"}]"#;
        let ledger: Ledger = serde_json::from_str(json).unwrap();
        assert_eq!(ledger.records()[0].remaining_quantity, 100);
        assert_eq!(ledger.records()[0].as_of_date, date(1));

        let back = serde_json::to_value(&ledger).unwrap();
        assert_eq!(back[0]["as_on"], "01-04-2024");
        assert_eq!(back[0]["product_code"], "SMALL_PAPER_BOX_6x6");
    }

    proptest::proptest! {
        /// Property: applying `a` then `b` equals applying `a + b` once.
        #[test]
        fn apply_consumption_is_linear(
            start in proptest::collection::vec(-50i64..500, 4),
            a in proptest::collection::vec(0u64..20, 5),
            b in proptest::collection::vec(0u64..20, 5),
        ) {
            let names = ["A", "B", "C", "D", "UNTRACKED"];
            let before = ledger(&names[..4].iter().zip(&start).map(|(n, q)| (*n, *q)).collect::<Vec<_>>());
            let first: ConsumptionCounts = names.iter().zip(&a).map(|(n, c)| (code(n), *c)).collect();
            let second: ConsumptionCounts = names.iter().zip(&b).map(|(n, c)| (code(n), *c)).collect();

            let stepwise = before
                .apply_consumption(&first, date(5))
                .ledger
                .apply_consumption(&second, date(5))
                .ledger;
            let combined = before.apply_consumption(&first.clone().merge(&second), date(5)).ledger;

            proptest::prop_assert_eq!(stepwise, combined);
        }
    }
}
