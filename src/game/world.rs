//! The location graph: owns every [`Location`] and its transition table.
//! Tables are immutable after load except for the single keypad-driven
//! [`WorldGraph::unlock_edge`] path.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::game::errors::CommandError;
use crate::game::types::{Location, LocationId, Transition};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldGraph {
    locations: BTreeMap<LocationId, Location>,
}

impl WorldGraph {
    /// Build the graph from already-validated location records.
    pub fn new(locations: Vec<Location>) -> Self {
        Self {
            locations: locations.into_iter().map(|loc| (loc.id, loc)).collect(),
        }
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.locations.contains_key(&id)
    }

    /// Fetch a location. Construction-time validation guarantees every id
    /// the session holds resolves, so a miss here is defensive.
    pub fn lookup(&self, id: LocationId) -> Result<&Location, CommandError> {
        self.locations.get(&id).ok_or(CommandError::UnknownLocation(id))
    }

    pub fn lookup_mut(&mut self, id: LocationId) -> Result<&mut Location, CommandError> {
        self.locations
            .get_mut(&id)
            .ok_or(CommandError::UnknownLocation(id))
    }

    /// Pure transition-table lookup. `None` means the command is not
    /// applicable at this location.
    pub fn resolve(&self, id: LocationId, command: &str) -> Option<&Transition> {
        self.locations.get(&id)?.transitions.get(command)
    }

    /// Add a transition edge at runtime. Used once, by the keypad-success
    /// path. Idempotent: re-applying has no additional effect.
    pub fn unlock_edge(
        &mut self,
        id: LocationId,
        command: &str,
        destination: LocationId,
    ) -> Result<(), CommandError> {
        let location = self.lookup_mut(id)?;
        if location.transitions.contains_key(command) {
            return Ok(());
        }
        debug!("unlocking edge {id} --'{command}'--> {destination}");
        location
            .transitions
            .insert(command.to_string(), Transition::To(destination));
        Ok(())
    }

    /// Remove an item (by canonical name) from a location's item set.
    /// Returns false, mutating nothing, if the item is not listed there.
    pub fn take_item(&mut self, id: LocationId, name: &str) -> Result<bool, CommandError> {
        Ok(self.lookup_mut(id)?.items.remove(name))
    }

    /// Insert an item (by canonical name) into a location's item set.
    pub fn place_item(&mut self, id: LocationId, name: &str) -> Result<(), CommandError> {
        self.lookup_mut(id)?.items.insert(name.to_string());
        Ok(())
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }
}
