//! Round-robin turn queue.
//!
//! The schedule is pure ordering logic: a circular sequence of entity ids.
//! The turn driver peeks the front, lets it act, and rotates only if the same
//! id is still at the front afterwards. An entity removed during its own turn
//! is unlinked, so the check fails and the next entity simply moves up.

use std::collections::VecDeque;

use crate::error::{ErrorSeverity, GameError};

use super::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScheduleError {
    #[error("entity {0} is already scheduled")]
    AlreadyScheduled(EntityId),
}

impl GameError for ScheduleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            ScheduleError::AlreadyScheduled(_) => "SCHEDULE_ALREADY_SCHEDULED",
        }
    }
}

/// Ordered, logically circular turn queue. Each entity appears at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    queue: VecDeque<EntityId>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// The entity whose turn it is.
    pub fn peek(&self) -> Option<EntityId> {
        self.queue.front().copied()
    }

    /// Moves the front entity to the back of the queue.
    pub fn rotate_front_to_back(&mut self) {
        if let Some(front) = self.queue.pop_front() {
            self.queue.push_back(front);
        }
    }

    /// Appends a new entity; it acts after everyone already queued.
    pub fn push_back(&mut self, entity: EntityId) -> Result<(), ScheduleError> {
        if self.queue.contains(&entity) {
            return Err(ScheduleError::AlreadyScheduled(entity));
        }
        self.queue.push_back(entity);
        Ok(())
    }

    /// Removes an entity wherever it sits. Returns true if it was scheduled.
    pub fn unlink(&mut self, entity: EntityId) -> bool {
        match self.queue.iter().position(|&queued| queued == entity) {
            Some(index) => {
                self.queue.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.queue.contains(&entity)
    }

    /// Entities in turn order, front first.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.queue.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule_of(ids: &[u32]) -> Schedule {
        let mut schedule = Schedule::new();
        for &id in ids {
            schedule.push_back(EntityId(id)).unwrap();
        }
        schedule
    }

    #[test]
    fn rotation_moves_front_to_back() {
        let mut schedule = schedule_of(&[0, 1, 2]);
        schedule.rotate_front_to_back();

        assert_eq!(
            schedule.iter().collect::<Vec<_>>(),
            vec![EntityId(1), EntityId(2), EntityId(0)]
        );
    }

    #[test]
    fn double_insertion_is_rejected() {
        let mut schedule = schedule_of(&[0, 1]);
        assert_eq!(
            schedule.push_back(EntityId(1)),
            Err(ScheduleError::AlreadyScheduled(EntityId(1)))
        );
        assert_eq!(schedule.len(), 2);
    }

    #[test]
    fn unlinking_the_front_promotes_the_next_entity() {
        let mut schedule = schedule_of(&[0, 1, 2]);
        assert!(schedule.unlink(EntityId(0)));
        assert_eq!(schedule.peek(), Some(EntityId(1)));
        assert!(!schedule.unlink(EntityId(0)));
    }

    #[test]
    fn rotating_an_empty_schedule_is_a_no_op() {
        let mut schedule = Schedule::new();
        schedule.rotate_front_to_back();
        assert_eq!(schedule.peek(), None);
    }
}
