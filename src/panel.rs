use std::{fmt, str::FromStr, sync::Arc};

use chrono::{NaiveDate, Utc};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info};

use crate::{
    error::{ActionError, FormError, RequestError},
    models::{
        form::TravelForm,
        search::{SearchForm, SearchMode, SearchQuery},
        travel::Travel,
    },
    services::{notifier::Notifier, store::TravelStore, travel_api::TravelApi},
};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this travel record?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    AddTravel,
    SearchTravel,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Dashboard, Tab::AddTravel, Tab::SearchTravel];

    pub fn slug(self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::AddTravel => "add-travel",
            Tab::SearchTravel => "search-travel",
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

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.slug() == raw)
            .ok_or_else(|| format!("unknown tab: {raw}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results were replaced by this many records.
    Replaced(usize),
    /// A required input was blank; nothing was sent.
    Skipped,
    /// The search mode changed while the request was in flight.
    Superseded,
}

/// State of the open edit modal.
#[derive(Debug, Clone, PartialEq)]
pub struct EditModal {
    pub form: TravelForm,
    pub last_updated: Option<String>,
}

impl From<&Travel> for EditModal {
    fn from(travel: &Travel) -> Self {
        Self {
            form: TravelForm::from_travel(travel),
            last_updated: travel
                .updated_at
                .or(travel.created_at)
                .map(|ts| ts.format("%b %-d, %Y %H:%M").to_string()),
        }
    }
}

/// Everything the page shows: the cached travel list, the active tab, the
/// forms and the toast. Only touched while the panel lock is held.
pub struct PanelState {
    store: TravelStore,
    notifier: Notifier,
    active_tab: Tab,
    search_mode: SearchMode,
    search_results: Vec<Travel>,
    add_form: TravelForm,
    editing: Option<EditModal>,
}

impl PanelState {
    fn new(notifier: Notifier) -> Self {
        Self {
            store: TravelStore::default(),
            notifier,
            active_tab: Tab::Dashboard,
            search_mode: SearchMode::All,
            search_results: Vec::new(),
            add_form: TravelForm::with_date_defaults(today()),
            editing: None,
        }
    }

    pub fn store(&self) -> &TravelStore {
        &self.store
    }

    pub fn travels(&self) -> &[Travel] {
        self.store.travels()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn search_mode(&self) -> SearchMode {
        self.search_mode
    }

    pub fn search_results(&self) -> &[Travel] {
        &self.search_results
    }

    pub fn add_form(&self) -> &TravelForm {
        &self.add_form
    }

    pub fn editing(&self) -> Option<&EditModal> {
        self.editing.as_ref()
    }

    /// Opens the edit modal for a cached record. Unknown ids are ignored.
    pub fn open_edit(&mut self, id: i64) -> bool {
        match self.store.find(id) {
            Some(travel) => {
                self.editing = Some(EditModal::from(travel));
                true
            }
            None => {
                debug!("edit requested for unknown travel {id}");
                false
            }
        }
    }

    pub fn close_edit(&mut self) {
        self.editing = None;
    }

    /// Switches the search panel and clears the previous results.
    pub fn set_search_mode(&mut self, mode: SearchMode) {
        self.search_mode = mode;
        self.search_results.clear();
    }

    pub fn dismiss_notification(&mut self) {
        self.notifier.hide();
    }

    fn apply_load(
        &mut self,
        fetched: Result<Vec<Travel>, RequestError>,
    ) -> Result<(), ActionError> {
        match fetched {
            Ok(travels) => {
                debug!("loaded {} travel records", travels.len());
                self.store.replace(travels);
                Ok(())
            }
            Err(err) => Err(self.report("load travels", err)),
        }
    }

    fn keep_edit_form(&mut self, form: TravelForm) {
        let last_updated = self.editing.take().and_then(|modal| modal.last_updated);
        self.editing = Some(EditModal { form, last_updated });
    }

    fn report(&mut self, action: &str, err: impl Into<ActionError>) -> ActionError {
        let err = err.into();
        error!("{action} failed: {err}");
        self.notifier.error(format!("Error: {err}"));
        err
    }
}

/// The admin panel. Every user action is one method here.
///
/// The state lock is only taken to read what an action needs and to apply
/// its result; backend calls run with no guard held, so the page keeps
/// rendering while a request is in flight. Concurrent actions of the same
/// kind race, and the last response to resolve wins.
#[derive(Clone)]
pub struct AdminPanel {
    api: TravelApi,
    state: Arc<Mutex<PanelState>>,
}

impl AdminPanel {
    pub fn new(api: TravelApi, notifier: Notifier) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(PanelState::new(notifier))),
        }
    }

    /// Locks the state for reading or for a synchronous change.
    pub async fn view(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().await
    }

    pub async fn load_travels(&self) -> Result<(), ActionError> {
        let fetched = self.api.list().await;
        self.view().await.apply_load(fetched)
    }

    pub async fn refresh_travels(&self) -> Result<(), ActionError> {
        self.load_travels().await?;
        self.view().await.notifier.success("Travel records refreshed!");
        Ok(())
    }

    pub async fn activate_tab(&self, tab: Tab) -> Result<(), ActionError> {
        {
            let mut state = self.view().await;
            state.active_tab = tab;
            if tab == Tab::SearchTravel {
                state.set_search_mode(SearchMode::All);
            }
        }
        match tab {
            Tab::Dashboard => self.load_travels().await,
            Tab::AddTravel | Tab::SearchTravel => Ok(()),
        }
    }

    pub async fn add_travel(&self, form: TravelForm) -> Result<(), ActionError> {
        let payload = match form.to_create_payload() {
            Ok(payload) => payload,
            Err(err) => {
                let mut state = self.view().await;
                state.add_form = form;
                return Err(state.report("add travel", err));
            }
        };
        let created = self.api.create(&payload).await;
        {
            let mut state = self.view().await;
            if let Err(err) = created {
                state.add_form = form;
                return Err(state.report("add travel", err));
            }
            info!("added travel {} -> {}", payload.origin, payload.destination);
            state.notifier.success("Travel record added successfully!");
            state.add_form = TravelForm::with_date_defaults(today());
            state.store.invalidate();
        }
        if let Err(err) = self.activate_tab(Tab::Dashboard).await {
            debug!("reload after add failed: {err}");
        }
        Ok(())
    }

    pub async fn open_edit(&self, id: i64) -> bool {
        self.view().await.open_edit(id)
    }

    pub async fn close_edit(&self) {
        self.view().await.close_edit();
    }

    pub async fn update_travel(&self, form: TravelForm) -> Result<(), ActionError> {
        let payload = match form.to_update_payload() {
            Ok(payload) => payload,
            Err(err) => {
                let mut state = self.view().await;
                state.keep_edit_form(form);
                return Err(state.report("update travel", err));
            }
        };
        let Some(id) = payload.id else {
            return Err(self.view().await.report("update travel", FormError::MissingId));
        };
        let updated = self.api.update(id, &payload).await;
        {
            let mut state = self.view().await;
            if let Err(err) = updated {
                state.keep_edit_form(form);
                return Err(state.report("update travel", err));
            }
            info!("updated travel {id}");
            state.notifier.success("Travel record updated successfully!");
            state.close_edit();
        }
        self.refetch("update").await;
        Ok(())
    }

    pub async fn delete_travel(
        &self,
        id: i64,
        confirmation: Confirmation,
    ) -> Result<(), ActionError> {
        if confirmation == Confirmation::Declined {
            debug!("delete of travel {id} declined");
            return Ok(());
        }
        let deleted = self.api.delete(id).await;
        {
            let mut state = self.view().await;
            if let Err(err) = deleted {
                return Err(state.report("delete travel", err));
            }
            info!("deleted travel {id}");
            state.notifier.success("Travel record deleted successfully!");
        }
        self.refetch("delete").await;
        Ok(())
    }

    pub async fn set_search_mode(&self, mode: SearchMode) {
        self.view().await.set_search_mode(mode);
    }

    pub async fn search(&self, form: &SearchForm) -> Result<SearchOutcome, ActionError> {
        let mode = self.view().await.search_mode;
        match form.to_query(mode) {
            Some(query) => self.run_search(mode, query).await,
            None => {
                debug!("search in mode {mode} skipped: missing input");
                Ok(SearchOutcome::Skipped)
            }
        }
    }

    pub async fn search_all(&self) -> Result<SearchOutcome, ActionError> {
        let mode = self.view().await.search_mode;
        self.run_search(mode, SearchQuery::All).await
    }

    pub async fn dismiss_notification(&self) {
        self.view().await.dismiss_notification();
    }

    async fn run_search(
        &self,
        mode: SearchMode,
        query: SearchQuery,
    ) -> Result<SearchOutcome, ActionError> {
        let found = self.api.search(&query).await;
        let mut state = self.view().await;
        match found {
            Ok(_) if state.search_mode != mode => {
                debug!("dropping {mode} results: mode is now {}", state.search_mode);
                Ok(SearchOutcome::Superseded)
            }
            Ok(results) => {
                let count = results.len();
                state.search_results = results;
                Ok(SearchOutcome::Replaced(count))
            }
            Err(err) => Err(state.report("search", err)),
        }
    }

    async fn refetch(&self, action: &str) {
        self.view().await.store.invalidate();
        if let Err(err) = self.load_travels().await {
            debug!("reload after {action} failed: {err}");
        }
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
