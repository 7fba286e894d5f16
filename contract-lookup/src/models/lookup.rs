use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::contract::{Contract, ContractSummaryQuery, Line, LineQuery};

/// Which data source the orchestrator consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Demo,
    Live,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Demo => "demo",
            Mode::Live => "live",
        }
    }
}

/// Search tab, addressed in URLs by its slug (`bill-to`, `contract`, `serial`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    BillTo,
    Contract,
    Serial,
}

impl Tab {
    pub fn slug(&self) -> &'static str {
        match self {
            Tab::BillTo => "bill-to",
            Tab::Contract => "contract",
            Tab::Serial => "serial",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bill-to" => Ok(Tab::BillTo),
            "contract" => Ok(Tab::Contract),
            "serial" => Ok(Tab::Serial),
            _ => Err(format!("Unknown search tab: {}", s)),
        }
    }
}

/// Tagged search key; selects the request shape sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    BillToId(String),
    ContractNumber(String),
    SerialNumber(String),
}

impl SearchCriteria {
    /// Trims the raw input. Empty input is forwarded as-is; the upstream API
    /// decides whether it is valid.
    pub fn from_input(tab: Tab, raw: &str) -> Self {
        let value = raw.trim().to_string();
        match tab {
            Tab::BillTo => SearchCriteria::BillToId(value),
            Tab::Contract => SearchCriteria::ContractNumber(value),
            Tab::Serial => SearchCriteria::SerialNumber(value),
        }
    }

    pub fn tab(&self) -> Tab {
        match self {
            SearchCriteria::BillToId(_) => Tab::BillTo,
            SearchCriteria::ContractNumber(_) => Tab::Contract,
            SearchCriteria::SerialNumber(_) => Tab::Serial,
        }
    }
}

/// Upstream request derived from the criteria.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    ContractSummary(ContractSummaryQuery),
    Lines(LineQuery),
}

impl From<SearchCriteria> for ApiRequest {
    fn from(criteria: SearchCriteria) -> Self {
        match criteria {
            SearchCriteria::BillToId(id) => ApiRequest::ContractSummary(ContractSummaryQuery {
                bill_to_id: vec![id],
            }),
            SearchCriteria::ContractNumber(number) => {
                ApiRequest::Lines(LineQuery::ContractNumber(vec![number]))
            }
            SearchCriteria::SerialNumber(serial) => {
                ApiRequest::Lines(LineQuery::SerialNumber(vec![serial]))
            }
        }
    }
}

/// Uniform search outcome, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
    Contracts(Vec<Contract>),
    Lines(Vec<Line>),
}

impl SearchResults {
    pub fn len(&self) -> usize {
        match self {
            SearchResults::Contracts(contracts) => contracts.len(),
            SearchResults::Lines(lines) => lines.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-session lookup state: operating mode and active tab.
///
/// Stored in session storage; searches never write it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupState {
    pub mode: Mode,
    pub active_tab: Tab,
}

impl LookupState {
    pub fn new(demo_by_default: bool) -> Self {
        Self {
            mode: if demo_by_default { Mode::Demo } else { Mode::Live },
            active_tab: Tab::BillTo,
        }
    }

    pub fn is_demo(&self) -> bool {
        self.mode == Mode::Demo
    }

    /// Flip between demo and live. In-flight searches keep the mode they
    /// started with.
    pub fn toggle_demo(&mut self) -> Mode {
        self.mode = match self.mode {
            Mode::Demo => Mode::Live,
            Mode::Live => Mode::Demo,
        };
        self.mode
    }

    /// Activate `tab`. The results area always goes back to the prompt.
    pub fn switch_tab(&mut self, tab: Tab) -> ResultsView {
        self.active_tab = tab;
        ResultsView::Prompt
    }
}

impl Default for LookupState {
    fn default() -> Self {
        Self::new(false)
    }
}

/// What the results area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Prompt,
    Contracts(Vec<Contract>),
    Lines(Vec<Line>),
    NoContracts,
    NoLines,
    LoginRequired,
    Error(String),
}

impl ResultsView {
    /// Empty-state text, if this view is not a card list.
    pub fn notice(&self) -> Option<String> {
        match self {
            ResultsView::Prompt => Some("Enter search criteria to view contract details.".into()),
            ResultsView::NoContracts => Some("No contracts found.".into()),
            ResultsView::NoLines => Some("No lines found.".into()),
            ResultsView::LoginRequired => Some("Please login or enable Demo Mode.".into()),
            ResultsView::Error(message) => Some(format!("Error: {}", message)),
            ResultsView::Contracts(_) | ResultsView::Lines(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResultsView::Error(_) | ResultsView::LoginRequired)
    }
}

impl From<SearchResults> for ResultsView {
    fn from(results: SearchResults) -> Self {
        match results {
            SearchResults::Contracts(contracts) if contracts.is_empty() => ResultsView::NoContracts,
            SearchResults::Contracts(contracts) => ResultsView::Contracts(contracts),
            SearchResults::Lines(lines) if lines.is_empty() => ResultsView::NoLines,
            SearchResults::Lines(lines) => ResultsView::Lines(lines),
        }
    }
}
