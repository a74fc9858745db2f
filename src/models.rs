// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::BuddyError;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Housing,
    Food,
    Transportation,
    Utilities,
    Entertainment,
    Healthcare,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 7] = [
        ExpenseCategory::Housing,
        ExpenseCategory::Food,
        ExpenseCategory::Transportation,
        ExpenseCategory::Utilities,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Housing => "Housing",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = BuddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ExpenseCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BuddyError::UnknownCategory(wanted.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    Fixed,
    #[default]
    Discretionary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Income {
    #[serde(default)]
    pub id: String,
    #[serde(alias = "name")]
    pub source: String,
    #[serde(with = "money")]
    pub amount: Decimal,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub id: String,
    pub category: ExpenseCategory,
    #[serde(with = "money")]
    pub amount: Decimal,
    pub date: String,
    #[serde(default)]
    pub kind: ExpenseKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    #[default]
    Expense,
    Income,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Expense => "expense",
            TxKind::Income => "income",
        }
    }
}

/// Transaction amount as held by an editable row.
///
/// `Draft` keeps the raw text while a value is being typed; `Committed` is the
/// normalized number. Positive amounts are withdrawals, negative are deposits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amount {
    Draft(String),
    Committed(Decimal),
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Committed(Decimal::ZERO)
    }
}

impl Amount {
    /// Numeric value, with unparsable drafts counting as zero.
    pub fn value(&self) -> Decimal {
        match self {
            Amount::Committed(d) => *d,
            Amount::Draft(s) => Decimal::from_str(s.trim()).unwrap_or(Decimal::ZERO),
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Amount::Draft(_))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Draft(s) => f.write_str(s),
            Amount::Committed(d) => write!(f, "{:.2}", d),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Amount::Draft(text) => s.serialize_str(text),
            Amount::Committed(d) => money::serialize(d, s),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number or an in-progress amount string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                Ok(Amount::Draft(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                Ok(Amount::Committed(Decimal::from(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                Ok(Amount::Committed(Decimal::from(v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
                money::from_f64(v).map(Amount::Committed)
            }
        }

        d.deserialize_any(AmountVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: String,
    pub account: String,
    pub category: String,
    pub payee: String,
    pub amount: Amount,
    #[serde(rename = "type", default)]
    pub kind: TxKind,
}

impl Transaction {
    /// Amount as it counts toward the balance. Drafts hold a typed magnitude,
    /// so a draft on an income row counts as a deposit.
    pub fn signed_value(&self) -> Decimal {
        match (&self.amount, self.kind) {
            (Amount::Draft(_), TxKind::Income) => -self.amount.value().abs(),
            (Amount::Draft(_), TxKind::Expense) => self.amount.value().abs(),
            (Amount::Committed(d), _) => *d,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(
        rename = "moneyUsed",
        default,
        skip_serializing_if = "Option::is_none",
        with = "money::option"
    )]
    pub money_used: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingGoal {
    pub id: String,
    pub name: String,
    #[serde(with = "money")]
    pub target: Decimal,
    #[serde(with = "money", default)]
    pub saved: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl SavingGoal {
    /// Fraction of the target already saved, clamped to `[0, 1]`.
    pub fn progress(&self) -> Decimal {
        if self.target <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.saved / self.target).clamp(Decimal::ZERO, Decimal::ONE)
    }

    pub fn remaining(&self) -> Decimal {
        (self.target - self.saved).max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(with = "money")]
    pub amount: Decimal,
}

/// Anything that can be summed into category buckets.
pub trait Categorized {
    fn category(&self) -> &str;
    fn amount(&self) -> Decimal;
}

impl<T: Categorized> Categorized for &T {
    fn category(&self) -> &str {
        (**self).category()
    }

    fn amount(&self) -> Decimal {
        (**self).amount()
    }
}

impl Categorized for Expense {
    fn category(&self) -> &str {
        self.category.as_str()
    }
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Categorized for Income {
    fn category(&self) -> &str {
        &self.source
    }
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Categorized for Transaction {
    fn category(&self) -> &str {
        &self.category
    }
    fn amount(&self) -> Decimal {
        self.signed_value()
    }
}

impl Categorized for CategoryTotal {
    fn category(&self) -> &str {
        &self.category
    }
    fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Serde adapter writing decimals as JSON numbers.
///
/// Reads integers, floats and numeric strings; an empty string reads as zero.
pub mod money {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;
    use std::str::FromStr;

    pub(crate) fn from_f64<E: de::Error>(v: f64) -> Result<Decimal, E> {
        Decimal::from_str(&v.to_string())
            .map_err(|_| E::invalid_value(de::Unexpected::Float(v), &"a finite number"))
    }

    pub fn serialize<S: Serializer>(v: &Decimal, s: S) -> Result<S::Ok, S::Error> {
        if v.fract().is_zero() {
            if let Some(i) = v.to_i64() {
                return s.serialize_i64(i);
            }
        }
        match v.to_f64() {
            Some(f) => s.serialize_f64(f),
            None => Err(serde::ser::Error::custom(format!(
                "amount {} is not representable as a number",
                v
            ))),
        }
    }

    struct MoneyVisitor;

    impl<'de> Visitor<'de> for MoneyVisitor {
        type Value = Decimal;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a monetary amount")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
            from_f64(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
            let t = v.trim();
            if t.is_empty() {
                return Ok(Decimal::ZERO);
            }
            Decimal::from_str(t).map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
        d.deserialize_any(MoneyVisitor)
    }

    pub mod option {
        use rust_decimal::Decimal;
        use serde::de::{self, Visitor};
        use serde::{Deserializer, Serializer};
        use std::fmt;

        pub fn serialize<S: Serializer>(v: &Option<Decimal>, s: S) -> Result<S::Ok, S::Error> {
            match v {
                Some(d) => super::serialize(d, s),
                None => s.serialize_none(),
            }
        }

        struct OptionVisitor;

        impl<'de> Visitor<'de> for OptionVisitor {
            type Value = Option<Decimal>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an optional monetary amount")
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
                super::deserialize(d).map(Some)
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
            d.deserialize_option(OptionVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn expense_category_parses_case_insensitively() {
        assert_eq!(
            "housing".parse::<ExpenseCategory>().unwrap(),
            ExpenseCategory::Housing
        );
        assert!("Rent".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn amount_draft_and_committed_wire_shapes() {
        let draft: Amount = serde_json::from_str("\"12.\"").unwrap();
        assert_eq!(draft, Amount::Draft("12.".into()));
        let committed: Amount = serde_json::from_str("12.5").unwrap();
        assert_eq!(committed, Amount::Committed(dec("12.5")));
        assert_eq!(serde_json::to_string(&committed).unwrap(), "12.5");
        assert_eq!(
            serde_json::to_string(&Amount::Committed(dec("100"))).unwrap(),
            "100"
        );
    }

    #[test]
    fn draft_value_falls_back_to_zero() {
        assert_eq!(Amount::Draft(String::new()).value(), Decimal::ZERO);
        assert_eq!(Amount::Draft("abc".into()).value(), Decimal::ZERO);
        assert_eq!(Amount::Draft("7.25".into()).value(), dec("7.25"));
    }

    #[test]
    fn income_draft_counts_as_deposit() {
        let mut tx = Transaction {
            amount: Amount::Draft("50".into()),
            kind: TxKind::Income,
            ..Default::default()
        };
        assert_eq!(tx.signed_value(), dec("-50"));
        tx.kind = TxKind::Expense;
        assert_eq!(tx.signed_value(), dec("50"));
        tx.amount = Amount::Committed(dec("-12"));
        assert_eq!(tx.signed_value(), dec("-12"));
    }

    #[test]
    fn entries_without_ids_still_parse() {
        let inc: Vec<Income> =
            serde_json::from_str(r#"[{"name":"Salary","amount":4200,"date":"2025-08-01"}]"#)
                .unwrap();
        assert_eq!(inc[0].id, "");
        assert_eq!(inc[0].source, "Salary");
        let exp: Vec<Expense> =
            serde_json::from_str(r#"[{"category":"Housing","amount":1500,"date":"2025-08-03"}]"#)
                .unwrap();
        assert_eq!(exp[0].id, "");
        assert_eq!(exp[0].kind, ExpenseKind::Discretionary);
    }

    #[test]
    fn income_accepts_name_alias_and_transaction_defaults_to_expense() {
        let inc: Income =
            serde_json::from_str(r#"{"id":"inc-1","name":"Salary","amount":4200,"date":"2025-08-01"}"#)
                .unwrap();
        assert_eq!(inc.source, "Salary");
        let tx: Transaction = serde_json::from_str(
            r#"{"id":"tx-1","date":"2025-08-01","account":"Checking","category":"Food","payee":"Deli","amount":""}"#,
        )
        .unwrap();
        assert_eq!(tx.kind, TxKind::Expense);
        assert_eq!(tx.amount, Amount::Draft(String::new()));
    }

    #[test]
    fn profile_omits_missing_money_used() {
        let p = UserProfile {
            username: "Shelly".into(),
            money_used: None,
        };
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"username":"Shelly"}"#);
        let back: UserProfile = serde_json::from_str(r#"{"username":"Ann","moneyUsed":12.5}"#).unwrap();
        assert_eq!(back.money_used, Some(dec("12.5")));
    }

    #[test]
    fn goal_progress_is_clamped() {
        let mut g = SavingGoal {
            id: "goal-1".into(),
            name: "Trip".into(),
            target: dec("1000"),
            saved: dec("250"),
            deadline: None,
        };
        assert_eq!(g.progress(), dec("0.25"));
        g.saved = dec("1500");
        assert_eq!(g.progress(), Decimal::ONE);
        assert_eq!(g.remaining(), Decimal::ZERO);
        g.target = Decimal::ZERO;
        assert_eq!(g.progress(), Decimal::ZERO);
    }
}
