pub mod contract;
pub mod lookup;

pub use contract::{
    Contract, ContractSummaryQuery, ContractSummaryResponse, Line, LineQuery, LineSearchResponse,
};
pub use lookup::{ApiRequest, LookupState, Mode, ResultsView, SearchCriteria, SearchResults, Tab};
