/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::collections::BTreeSet;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Floor, OperatingState, PendingRequests};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Internal,
    UpHail,
    DownHail,
}

/**
 * Pending requests of the car, one set per request kind.
 *
 * Recording is idempotent. Floors outside the car's bounds are dropped, as are up-hails
 * at the top floor and down-hails at the bottom floor. The board knows nothing about the
 * operating state; the controller drops requests while shut down before they get here.
 */
pub struct RequestBoard {
    top_floor: Floor,
    bottom_floor: Floor,
    internal: BTreeSet<Floor>,
    up_hails: BTreeSet<Floor>,
    down_hails: BTreeSet<Floor>,
}

impl RequestBoard {
    pub fn new(bottom_floor: Floor, top_floor: Floor) -> RequestBoard {
        RequestBoard {
            top_floor,
            bottom_floor,
            internal: BTreeSet::new(),
            up_hails: BTreeSet::new(),
            down_hails: BTreeSet::new(),
        }
    }

    /// Returns false when the request was dropped by the floor rules.
    pub fn record(&mut self, kind: RequestKind, floor: Floor) -> bool {
        if !self.in_bounds(floor) {
            return false;
        }
        match kind {
            RequestKind::Internal => {
                self.internal.insert(floor);
            }
            RequestKind::UpHail => {
                if floor == self.top_floor {
                    return false;
                }
                self.up_hails.insert(floor);
            }
            RequestKind::DownHail => {
                if floor == self.bottom_floor {
                    return false;
                }
                self.down_hails.insert(floor);
            }
        }
        true
    }

    /// Removes and returns the pending floor nearest to `current`.
    pub fn take_nearest(&mut self, current: Floor) -> Option<(RequestKind, Floor)> {
        let candidates = [
            (RequestKind::Internal, &self.internal),
            (RequestKind::UpHail, &self.up_hails),
            (RequestKind::DownHail, &self.down_hails),
        ];

        let mut nearest: Option<(RequestKind, Floor)> = None;
        for (kind, set) in candidates {
            for &floor in set {
                let closer = match nearest {
                    Some((_, best)) => floor.abs_diff(current) < best.abs_diff(current),
                    None => true,
                };
                if closer {
                    nearest = Some((kind, floor));
                }
            }
        }

        let (kind, floor) = nearest?;
        self.set_mut(kind).remove(&floor);
        Some((kind, floor))
    }

    /// Clears the requests served by stopping at `floor` after travelling in `travel`.
    pub fn complete(&mut self, floor: Floor, travel: OperatingState) {
        let is_top_floor = floor == self.top_floor;
        let is_bottom_floor = floor == self.bottom_floor;

        self.internal.remove(&floor);

        if travel != OperatingState::MovingDown || is_bottom_floor {
            self.up_hails.remove(&floor);
        }
        if travel != OperatingState::MovingUp || is_top_floor {
            self.down_hails.remove(&floor);
        }
    }

    pub fn snapshot(&self) -> PendingRequests {
        PendingRequests {
            internal: self.internal.clone(),
            up: self.up_hails.clone(),
            down: self.down_hails.clone(),
        }
    }

    fn in_bounds(&self, floor: Floor) -> bool {
        (self.bottom_floor..=self.top_floor).contains(&floor)
    }

    fn set_mut(&mut self, kind: RequestKind) -> &mut BTreeSet<Floor> {
        match kind {
            RequestKind::Internal => &mut self.internal,
            RequestKind::UpHail => &mut self.up_hails,
            RequestKind::DownHail => &mut self.down_hails,
        }
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
