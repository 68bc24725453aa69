use serde::{Deserialize, Serialize};

/// Annual quota of discretionary economic days per employee.
pub const ANNUAL_ECONOMIC_ALLOWANCE: i64 = 9;

/// Paid-leave categories recognized by the general working-conditions rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveCategory {
    Economic,
    Marriage,
    Bereavement,
    RetirementProcedure,
    ThesisDefense,
    Relocation,
}

impl LeaveCategory {
    pub const ALL: [LeaveCategory; 6] = [
        LeaveCategory::Economic,
        LeaveCategory::Marriage,
        LeaveCategory::Bereavement,
        LeaveCategory::RetirementProcedure,
        LeaveCategory::ThesisDefense,
        LeaveCategory::Relocation,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            LeaveCategory::Economic => "economic",
            LeaveCategory::Marriage => "marriage",
            LeaveCategory::Bereavement => "bereavement",
            LeaveCategory::RetirementProcedure => "retirement_procedure",
            LeaveCategory::ThesisDefense => "thesis_defense",
            LeaveCategory::Relocation => "relocation",
        }
    }
}

/// Whether an occurrence cap counts requests per calendar year or over the
/// employee's whole tenure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceScope {
    PerCalendarYear,
    Lifetime,
    Unbounded,
}

/// Numeric limits for one leave category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPolicy {
    pub name: &'static str,
    pub max_days_per_request: u32,
    /// `None` means the category may recur without limit.
    pub max_occurrences: Option<u32>,
    pub occurrence_scope: OccurrenceScope,
    /// Minimum gap in days between the end of one approved period and the
    /// start of the next request. Only the economic category defines one.
    pub min_interval_days: Option<i64>,
    pub description: &'static str,
}

/// The fixed regulatory table. Lookup is total: every category has exactly
/// one entry, so an unknown category cannot be expressed.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    economic: CategoryPolicy,
    marriage: CategoryPolicy,
    bereavement: CategoryPolicy,
    retirement_procedure: CategoryPolicy,
    thesis_defense: CategoryPolicy,
    relocation: CategoryPolicy,
}

impl PolicyTable {
    /// Limits from the general working-conditions regulations.
    ///
    /// The 30-day economic interval is anchored on the last day actually used
    /// (the prior period's end date), not on when the prior request was
    /// recorded; the personnel office should confirm that anchor before the
    /// table is changed.
    pub fn standard() -> Self {
        Self {
            economic: CategoryPolicy {
                name: "Economic Day",
                max_days_per_request: 3,
                max_occurrences: Some(3),
                occurrence_scope: OccurrenceScope::PerCalendarYear,
                min_interval_days: Some(30),
                description: "Personal matters, up to 3 occasions per year",
            },
            marriage: CategoryPolicy {
                name: "Marriage",
                max_days_per_request: 10,
                max_occurrences: Some(1),
                occurrence_scope: OccurrenceScope::Lifetime,
                min_interval_days: None,
                description: "Granted a single time",
            },
            bereavement: CategoryPolicy {
                name: "Bereavement / Serious Illness",
                max_days_per_request: 5,
                max_occurrences: None,
                occurrence_scope: OccurrenceScope::Unbounded,
                min_interval_days: None,
                description: "First-degree relatives; may recur",
            },
            retirement_procedure: CategoryPolicy {
                name: "Retirement Procedures",
                max_days_per_request: 2,
                max_occurrences: Some(1),
                occurrence_scope: OccurrenceScope::Lifetime,
                min_interval_days: None,
                description: "Only when the employee retires",
            },
            thesis_defense: CategoryPolicy {
                name: "Professional Exam / Thesis Defense",
                max_days_per_request: 3,
                max_occurrences: Some(3),
                occurrence_scope: OccurrenceScope::Lifetime,
                min_interval_days: None,
                description: "One occasion per degree level",
            },
            relocation: CategoryPolicy {
                name: "Change of Address",
                max_days_per_request: 1,
                max_occurrences: Some(2),
                occurrence_scope: OccurrenceScope::PerCalendarYear,
                min_interval_days: None,
                description: "Moving house",
            },
        }
    }

    pub fn lookup(&self, category: LeaveCategory) -> &CategoryPolicy {
        match category {
            LeaveCategory::Economic => &self.economic,
            LeaveCategory::Marriage => &self.marriage,
            LeaveCategory::Bereavement => &self.bereavement,
            LeaveCategory::RetirementProcedure => &self.retirement_procedure,
            LeaveCategory::ThesisDefense => &self.thesis_defense,
            LeaveCategory::Relocation => &self.relocation,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (LeaveCategory, &CategoryPolicy)> {
        LeaveCategory::ALL
            .iter()
            .map(move |category| (*category, self.lookup(*category)))
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}
