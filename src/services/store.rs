use crate::models::travel::Travel;

/// Last full travel list fetched from the API.
///
/// The list is only ever replaced wholesale. A mutation marks the store
/// stale with [`TravelStore::invalidate`]; the reload that follows calls
/// [`TravelStore::replace`], which clears the flag and bumps the generation.
#[derive(Debug, Clone, Default)]
pub struct TravelStore {
    travels: Vec<Travel>,
    stale: bool,
    generation: u64,
}

impl TravelStore {
    pub fn travels(&self) -> &[Travel] {
        &self.travels
    }

    pub fn find(&self, id: i64) -> Option<&Travel> {
        self.travels.iter().find(|travel| travel.id == id)
    }

    pub fn replace(&mut self, travels: Vec<Travel>) {
        self.travels = travels;
        self.stale = false;
        self.generation += 1;
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Number of completed loads so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
