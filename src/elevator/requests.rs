use crate::shared::Direction;
use std::collections::BTreeSet;

/**
 * Pending floor requests of the car.
 *
 * Requests form a set, so pressing the same floor twice queues it once.
 * Destinations are drained one at a time with `next_destination`, which
 * prefers the closest floor in the committed direction and otherwise falls
 * back to the closest floor overall. Equal distances resolve to the lower
 * floor.
 */
#[derive(Debug, Clone)]
pub struct FloorRequestQueue {
    pending: BTreeSet<u8>,
    direction: Direction,
}

impl FloorRequestQueue {
    pub fn new() -> FloorRequestQueue {
        FloorRequestQueue {
            pending: BTreeSet::new(),
            direction: Direction::Stop,
        }
    }

    /// Returns `false` if the floor was already pending.
    pub fn enqueue(&mut self, floor: u8) -> bool {
        self.pending.insert(floor)
    }

    pub fn next_destination(&mut self, from_floor: u8) -> Option<u8> {
        if self.pending.remove(&from_floor) {
            return Some(from_floor);
        }

        let above = self.pending.range(from_floor.saturating_add(1)..).next().copied();
        let below = self.pending.range(..from_floor).next_back().copied();

        let chosen = match (self.direction, above, below) {
            (Direction::Up, Some(floor), _) => Some(floor),
            (Direction::Down, _, Some(floor)) => Some(floor),
            (_, Some(up), Some(down)) => {
                if up - from_floor < from_floor - down {
                    Some(up)
                } else {
                    Some(down)
                }
            }
            (_, up, down) => up.or(down),
        };

        match chosen {
            Some(floor) => {
                self.pending.remove(&floor);
                self.direction = Direction::between(from_floor, floor);
            }
            None => self.direction = Direction::Stop,
        }
        chosen
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn contains(&self, floor: u8) -> bool {
        self.pending.contains(&floor)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Pending floors in ascending order.
    pub fn pending(&self) -> Vec<u8> {
        self.pending.iter().copied().collect()
    }
}

impl Default for FloorRequestQueue {
    fn default() -> Self {
        FloorRequestQueue::new()
    }
}
