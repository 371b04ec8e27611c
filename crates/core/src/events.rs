//! Board events - the surface renderers and scorers mirror state through
//!
//! The grid journals every mutation as a [`BoardEvent`]. Consumers either drain
//! the journal directly or replay it into a [`BoardObserver`].

use crate::cube::Cube;
use crate::types::Pos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    CubeAdded(Cube),
    CubeRemoved(Pos),
    /// A cube was relocated by compaction or the cascade
    CubeMoved { from: Pos, to: Pos },
    LayerCleared(u8),
    BoardOverflow,
}

impl BoardEvent {
    /// Invoke the matching observer callback
    pub fn dispatch(&self, observer: &mut dyn BoardObserver) {
        match self {
            BoardEvent::CubeAdded(cube) => observer.on_cube_added(cube),
            BoardEvent::CubeRemoved(pos) => observer.on_cube_removed(*pos),
            BoardEvent::CubeMoved { from, to } => observer.on_cube_moved(*from, *to),
            BoardEvent::LayerCleared(layer) => observer.on_layer_cleared(*layer),
            BoardEvent::BoardOverflow => observer.on_board_overflow(),
        }
    }
}

/// Callbacks for consumers of the engine. All methods default to no-ops.
pub trait BoardObserver {
    fn on_cube_added(&mut self, _cube: &Cube) {}
    fn on_cube_removed(&mut self, _pos: Pos) {}
    fn on_cube_moved(&mut self, _from: Pos, _to: Pos) {}
    fn on_layer_cleared(&mut self, _layer: u8) {}
    fn on_board_overflow(&mut self) {}
}

/// Observer that records everything it is told
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    pub events: Vec<BoardEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers_cleared(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BoardEvent::LayerCleared(layer) => Some(*layer),
                _ => None,
            })
            .collect()
    }

    pub fn overflow_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BoardEvent::BoardOverflow))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl BoardObserver for EventLog {
    fn on_cube_added(&mut self, cube: &Cube) {
        self.events.push(BoardEvent::CubeAdded(*cube));
    }

    fn on_cube_removed(&mut self, pos: Pos) {
        self.events.push(BoardEvent::CubeRemoved(pos));
    }

    fn on_cube_moved(&mut self, from: Pos, to: Pos) {
        self.events.push(BoardEvent::CubeMoved { from, to });
    }

    fn on_layer_cleared(&mut self, layer: u8) {
        self.events.push(BoardEvent::LayerCleared(layer));
    }

    fn on_board_overflow(&mut self) {
        self.events.push(BoardEvent::BoardOverflow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        layers: u32,
    }

    impl BoardObserver for Counter {
        fn on_layer_cleared(&mut self, _layer: u8) {
            self.layers += 1;
        }
    }

    #[test]
    fn test_dispatch_records_in_order() {
        let events = [
            BoardEvent::CubeRemoved(Pos::new(1, 1, 1)),
            BoardEvent::LayerCleared(0),
            BoardEvent::BoardOverflow,
        ];
        let mut log = EventLog::new();
        for e in &events {
            e.dispatch(&mut log);
        }
        assert_eq!(log.events, events.to_vec());
        assert_eq!(log.layers_cleared(), vec![0]);
        assert_eq!(log.overflow_count(), 1);
    }

    #[test]
    fn test_default_methods_ignore_events() {
        let mut counter = Counter::default();
        BoardEvent::BoardOverflow.dispatch(&mut counter);
        BoardEvent::LayerCleared(3).dispatch(&mut counter);
        assert_eq!(counter.layers, 1);
    }
}
