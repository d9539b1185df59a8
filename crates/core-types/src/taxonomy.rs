use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How a metric is combined when several records fall into one period bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationKind {
    /// Absolute figures (balances, income lines) add up across banks.
    Sum,
    /// Rates and per-share figures are averaged across banks.
    Mean,
}

/// The reporting section a metric belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricGroup {
    BalanceSheet,
    ProfitAndLoss,
    Ratios,
}

impl MetricGroup {
    /// All metrics of this group, in canonical order.
    pub fn metrics(self) -> impl Iterator<Item = Metric> {
        Metric::ALL.iter().copied().filter(move |m| m.group() == self)
    }
}

impl fmt::Display for MetricGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricGroup::BalanceSheet => "Balance Sheet",
            MetricGroup::ProfitAndLoss => "Profit and Loss",
            MetricGroup::Ratios => "Ratios",
        };
        write!(f, "{name}")
    }
}

/// The closed set of reported banking metrics.
///
/// Variants are declared in canonical display order: the Balance Sheet group,
/// then Profit and Loss, then Ratios. `rank()` relies on that declaration
/// order, so new metrics must be inserted into the right section, not
/// appended.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Metric {
    // Balance Sheet
    LoansAndAdv,
    TotalAssets,
    DepositsFromCustomers,
    DepositsFromCustomersAndBfi,
    DebtSecurities,
    PaidUpCapital,
    TotalEquity,
    // Profit and Loss
    InterestIncome,
    InterestExpenses,
    NetInterestIncome,
    NetFeeAndComIncome,
    NetTradingIncome,
    OtherOperatingIncome,
    TotalOperatingIncome,
    ImpairmentCharge,
    PersonnelExpenses,
    Bonus,
    StaffExpenses,
    OtherOpExpAndDepAmo,
    OperatingProfitBeforeImpPr,
    NetNonOperatingIncome,
    OperatingProfitAfterImpPr,
    ProfitBeforeIncomeTax,
    IncomeTax,
    ProfitAfterTax,
    DistributableProfit,
    // Ratios
    CapitalFundToRwa,
    Npl,
    CostOfFunds,
    CdRatio,
    BaseRate,
    SpreadRate,
    Roe,
    Liquidity,
    NetWorthPerShare,
    BasicEps,
}

impl Metric {
    /// Every declared metric, in canonical order.
    pub const ALL: [Metric; 36] = [
        Metric::LoansAndAdv,
        Metric::TotalAssets,
        Metric::DepositsFromCustomers,
        Metric::DepositsFromCustomersAndBfi,
        Metric::DebtSecurities,
        Metric::PaidUpCapital,
        Metric::TotalEquity,
        Metric::InterestIncome,
        Metric::InterestExpenses,
        Metric::NetInterestIncome,
        Metric::NetFeeAndComIncome,
        Metric::NetTradingIncome,
        Metric::OtherOperatingIncome,
        Metric::TotalOperatingIncome,
        Metric::ImpairmentCharge,
        Metric::PersonnelExpenses,
        Metric::Bonus,
        Metric::StaffExpenses,
        Metric::OtherOpExpAndDepAmo,
        Metric::OperatingProfitBeforeImpPr,
        Metric::NetNonOperatingIncome,
        Metric::OperatingProfitAfterImpPr,
        Metric::ProfitBeforeIncomeTax,
        Metric::IncomeTax,
        Metric::ProfitAfterTax,
        Metric::DistributableProfit,
        Metric::CapitalFundToRwa,
        Metric::Npl,
        Metric::CostOfFunds,
        Metric::CdRatio,
        Metric::BaseRate,
        Metric::SpreadRate,
        Metric::Roe,
        Metric::Liquidity,
        Metric::NetWorthPerShare,
        Metric::BasicEps,
    ];

    /// The column header / row label used in the source data and all reports.
    pub fn name(self) -> &'static str {
        match self {
            Metric::LoansAndAdv => "LOANS AND ADV",
            Metric::TotalAssets => "TOTAL ASSETS",
            Metric::DepositsFromCustomers => "DEPOSITS FROM CUSTOMERS",
            Metric::DepositsFromCustomersAndBfi => "DEPOSITS FROM CUSTOMERS & BFI",
            Metric::DebtSecurities => "DEBT SECURITIES",
            Metric::PaidUpCapital => "PAID UP CAPITAL",
            Metric::TotalEquity => "TOTAL EQUITY",
            Metric::InterestIncome => "INTEREST INCOME",
            Metric::InterestExpenses => "INTEREST EXPENSES",
            Metric::NetInterestIncome => "NET INTEREST INCOME",
            Metric::NetFeeAndComIncome => "NET FEE & COM INCOME",
            Metric::NetTradingIncome => "NET TRADING INCOME",
            Metric::OtherOperatingIncome => "OTHER OPERATING INCOME",
            Metric::TotalOperatingIncome => "TOTAL OPERATING INCOME",
            Metric::ImpairmentCharge => "IMPAIRMENT CHARGE",
            Metric::PersonnelExpenses => "PERSONNEL EXPENSES",
            Metric::Bonus => "BONUS",
            Metric::StaffExpenses => "STAFF EXPENSES",
            Metric::OtherOpExpAndDepAmo => "OTHER OP EXP & DEP AMO",
            Metric::OperatingProfitBeforeImpPr => "OPERATING PROFIT BEFORE IMP PR",
            Metric::NetNonOperatingIncome => "NET NON OPERATING INCOME",
            Metric::OperatingProfitAfterImpPr => "OPERATING PROFIT AFTER IMP PR",
            Metric::ProfitBeforeIncomeTax => "PROFIT BEFORE INCOME TAX",
            Metric::IncomeTax => "INCOME TAX",
            Metric::ProfitAfterTax => "PROFIT AFTER TAX (NET PROFIT)",
            Metric::DistributableProfit => "DISTRIBUTABLE PROFIT",
            Metric::CapitalFundToRwa => "CAPITAL FUND TO RWA",
            Metric::Npl => "NPL",
            Metric::CostOfFunds => "COST OF FUNDS",
            Metric::CdRatio => "CD RATIO",
            Metric::BaseRate => "BASE RATE",
            Metric::SpreadRate => "SPREAD RATE",
            Metric::Roe => "ROE",
            Metric::Liquidity => "LIQUIDITY",
            Metric::NetWorthPerShare => "NET WORTH PER SHARE",
            Metric::BasicEps => "BASIC EPS",
        }
    }

    /// Resolves the exact data-source spelling of a metric name.
    pub fn from_name(name: &str) -> Option<Metric> {
        Metric::ALL.iter().copied().find(|m| m.name() == name)
    }

    /// The group this metric is reported under.
    pub fn group(self) -> MetricGroup {
        match self {
            Metric::LoansAndAdv
            | Metric::TotalAssets
            | Metric::DepositsFromCustomers
            | Metric::DepositsFromCustomersAndBfi
            | Metric::DebtSecurities
            | Metric::PaidUpCapital
            | Metric::TotalEquity => MetricGroup::BalanceSheet,
            Metric::InterestIncome
            | Metric::InterestExpenses
            | Metric::NetInterestIncome
            | Metric::NetFeeAndComIncome
            | Metric::NetTradingIncome
            | Metric::OtherOperatingIncome
            | Metric::TotalOperatingIncome
            | Metric::ImpairmentCharge
            | Metric::PersonnelExpenses
            | Metric::Bonus
            | Metric::StaffExpenses
            | Metric::OtherOpExpAndDepAmo
            | Metric::OperatingProfitBeforeImpPr
            | Metric::NetNonOperatingIncome
            | Metric::OperatingProfitAfterImpPr
            | Metric::ProfitBeforeIncomeTax
            | Metric::IncomeTax
            | Metric::ProfitAfterTax
            | Metric::DistributableProfit => MetricGroup::ProfitAndLoss,
            Metric::CapitalFundToRwa
            | Metric::Npl
            | Metric::CostOfFunds
            | Metric::CdRatio
            | Metric::BaseRate
            | Metric::SpreadRate
            | Metric::Roe
            | Metric::Liquidity
            | Metric::NetWorthPerShare
            | Metric::BasicEps => MetricGroup::Ratios,
        }
    }

    /// Balance-sheet and P&L figures sum across banks; ratios are averaged.
    pub fn aggregation(self) -> AggregationKind {
        match self.group() {
            MetricGroup::BalanceSheet | MetricGroup::ProfitAndLoss => AggregationKind::Sum,
            MetricGroup::Ratios => AggregationKind::Mean,
        }
    }

    /// Position in the canonical total ordering (0-based, stable).
    pub fn rank(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Metric {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::from_name(s).ok_or_else(|| CoreError::UnknownMetric(s.to_string()))
    }
}
