//! Messages exchanged between the view state and the fetch tasks.

use super::loading::LoadingGuard;
use crate::domain::{City, FetchResult, State};
use crate::infrastructure::AbortToken;

/// Permission to run the one-time state list fetch.
#[derive(Debug)]
pub struct StatesRequest {
    pub abort: AbortToken,
}

impl StatesRequest {
    pub fn complete(self, result: FetchResult<Vec<State>>) -> StatesOutcome {
        StatesOutcome {
            result,
            abort: self.abort,
        }
    }
}

#[derive(Debug)]
pub struct StatesOutcome {
    pub result: FetchResult<Vec<State>>,
    pub abort: AbortToken,
}

/// A city fetch issued by a confirm. `uf` is the selection captured at
/// confirm time; later selection changes do not affect it.
#[derive(Debug)]
pub struct CityRequest {
    pub id: u64,
    pub uf: String,
    pub abort: AbortToken,
    pub loading: LoadingGuard,
}

impl CityRequest {
    pub fn complete(self, result: FetchResult<Vec<City>>) -> CitiesOutcome {
        CitiesOutcome {
            id: self.id,
            uf: self.uf,
            result,
            abort: self.abort,
            loading: self.loading,
        }
    }
}

/// Result of a city fetch. Holds the loading guard until the view state
/// has consumed it.
#[derive(Debug)]
pub struct CitiesOutcome {
    pub id: u64,
    pub uf: String,
    pub result: FetchResult<Vec<City>>,
    pub abort: AbortToken,
    pub loading: LoadingGuard,
}

#[derive(Debug)]
pub enum AppEvent {
    States(StatesOutcome),
    Cities(CitiesOutcome),
}
