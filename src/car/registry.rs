/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;
use std::collections::HashMap;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{CarError, Passenger, PassengerId};

/**
 * Tracks the passengers currently inside the car.
 *
 * The registry never holds more than `capacity` occupants. An admission that would
 * exceed it is rejected and leaves the registry unchanged.
 */
pub struct PassengerRegistry {
    capacity: usize,
    occupants: HashMap<PassengerId, Passenger>,
}

impl PassengerRegistry {
    pub fn new(capacity: usize) -> PassengerRegistry {
        PassengerRegistry {
            capacity,
            occupants: HashMap::with_capacity(capacity),
        }
    }

    pub fn admit(&mut self, passenger: Passenger) -> Result<(), CarError> {
        if self.len() >= self.capacity {
            return Err(CarError::Overweight);
        }
        if self.contains(passenger.id) {
            return Err(CarError::DuplicatePassenger(passenger.id));
        }
        debug!("Passenger {} admitted", passenger.id);
        self.occupants.insert(passenger.id, passenger);
        Ok(())
    }

    // Empty is reported before not-found, whatever the id.
    pub fn remove(&mut self, id: PassengerId) -> Result<Passenger, CarError> {
        if self.is_empty() {
            return Err(CarError::Empty);
        }
        let passenger = self
            .occupants
            .remove(&id)
            .ok_or(CarError::PersonNotFound(id))?;
        debug!("Passenger {} removed", id);
        Ok(passenger)
    }

    pub fn contains(&self, id: PassengerId) -> bool {
        self.occupants.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ids(&self) -> Vec<PassengerId> {
        let mut ids: Vec<PassengerId> = self.occupants.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
