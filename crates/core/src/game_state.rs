//! Game state module - owns the grid, the active piece and the session lifecycle
//!
//! Every operation runs to completion on `&mut self`; there is no shared or
//! ambient state. Board mutations are journaled by the grid and handed out with
//! [`GameState::drain_events`] or replayed into an observer with
//! [`GameState::flush_events`].

use crate::cascade::run_cascade;
use crate::cube::Cube;
use crate::events::{BoardEvent, BoardObserver};
use crate::grid::Grid;
use crate::layers;
use crate::piece::Piece;
use crate::rng::TemplatePicker;
use crate::seeds::{get_seed, resolve_seed};
use crate::snapshot::{
    ActiveSnapshot, GameSnapshot, CELL_ACTIVE, CELL_FIXTURE, CELL_FROZEN,
};
use crate::types::*;

/// Engine settings fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Template RNG seed
    pub seed: u32,
    /// Board seed index (unknown ids fall back to 0)
    pub board: usize,
    /// Spawn this template every time instead of drawing one
    pub debug_template: Option<usize>,
    pub spawn_x: i8,
    pub spawn_z: i8,
    /// Upper bound on cascade rounds and settle passes per freeze
    pub max_cascade_passes: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            board: DEFAULT_BOARD,
            debug_template: None,
            spawn_x: DEFAULT_SPAWN_X,
            spawn_z: DEFAULT_SPAWN_Z,
            max_cascade_passes: 4 * BOARD_HEIGHT as u32,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

/// What one call to [`GameState::advance_tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not started, paused or over
    Idle,
    /// No piece was active, so one was spawned
    Spawned,
    /// The active piece moved down one row
    Fell,
    /// The active piece landed, was frozen and the next one spawned
    Froze { layers_cleared: u32 },
    /// The game ended during this tick
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    active: Option<Piece>,
    picker: TemplatePicker,
    /// Id for the next spawned piece; fixtures own 0, pieces start at 1
    next_piece_id: u32,
    board: usize,
    /// Board was reset from a seed with no fixtures
    blank: bool,
    started: bool,
    paused: bool,
    game_over: bool,
    layers_cleared: u32,
    pieces_frozen: u32,
    ticks: u64,
}

impl GameState {
    /// Create a game on the configured board. Call [`GameState::start`] to play.
    pub fn new(config: GameConfig) -> Self {
        let mut state = Self {
            config,
            grid: Grid::new(),
            active: None,
            picker: TemplatePicker::new(config.seed, config.debug_template),
            next_piece_id: 1,
            board: DEFAULT_BOARD,
            blank: true,
            started: false,
            paused: false,
            game_over: false,
            layers_cleared: 0,
            pieces_frozen: 0,
            ticks: 0,
        };
        state.reset_board(config.board);
        state
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_random();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[doc(hidden)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn board(&self) -> usize {
        self.board
    }

    pub fn is_blank(&self) -> bool {
        self.blank
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn layers_cleared(&self) -> u32 {
        self.layers_cleared
    }

    pub fn pieces_frozen(&self) -> u32 {
        self.pieces_frozen
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn playable(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    /// Clear the grid and lay the fixtures of a seed board
    ///
    /// Resets the piece counter so fixtures own id 0 and the next piece owns 1.
    /// The active piece, counters and game-over flag are discarded; the session
    /// stays started, and the next tick spawns a fresh piece.
    pub fn reset_board(&mut self, seed_id: usize) {
        self.grid.clear();
        self.active = None;
        self.next_piece_id = 1;
        self.board = resolve_seed(seed_id);
        self.game_over = false;
        self.paused = false;
        self.layers_cleared = 0;
        self.pieces_frozen = 0;
        self.ticks = 0;

        let seed = get_seed(self.board);
        self.blank = seed.is_blank();
        for (z, row) in seed.pattern.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                let pos = Pos::new(x as i8, 0, z as i8);
                let placed = self
                    .grid
                    .place(Cube::new(pos, FIXTURE_OWNER, FIXTURE_COLOR));
                debug_assert!(placed.is_ok());
            }
        }
    }

    fn spawn_anchor(&self, template: usize) -> Pos {
        let extent = crate::shapes::get_template(template).extent as i8;
        let max = BOARD_SIZE as i8 - extent;
        Pos::new(
            self.config.spawn_x.clamp(0, max),
            SPAWN_Y,
            self.config.spawn_z.clamp(0, max),
        )
    }

    fn spawn_random(&mut self) -> bool {
        let template = self.picker.draw();
        self.spawn_piece(template)
    }

    /// Spawn a piece of the given template at the spawn anchor
    ///
    /// Any active piece is removed first. Unknown templates fall back to 0.
    /// Returns false if the game is over or the spawn itself overflowed.
    pub fn spawn_piece(&mut self, template: usize) -> bool {
        let anchor = self.spawn_anchor(template);
        self.spawn_piece_at(template, anchor)
    }

    /// Spawn a piece with an explicit anchor
    pub fn spawn_piece_at(&mut self, template: usize, anchor: Pos) -> bool {
        if self.game_over {
            return false;
        }
        if let Some(old) = self.active.take() {
            old.dematerialize(&mut self.grid);
        }

        let piece = Piece::new(template, self.next_piece_id, anchor);
        self.next_piece_id = self.next_piece_id.wrapping_add(1).max(1);

        let placed = piece.materialize(&mut self.grid);
        self.active = Some(piece);
        if placed.is_err() {
            // Spawned on top of the stack: it lands and overflows at once.
            self.freeze_active();
            return false;
        }
        true
    }

    /// Raise board overflow; only the first call per game has any effect
    fn signal_overflow(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.grid.push_event(BoardEvent::BoardOverflow);
    }

    /// Freeze the active piece, then clear and cascade. Returns layers cleared.
    fn freeze_active(&mut self) -> u32 {
        let Some(mut piece) = self.active.take() else {
            return 0;
        };
        if piece.freeze(&mut self.grid).is_err() {
            self.signal_overflow();
            return 0;
        }
        self.pieces_frozen += 1;

        let report = run_cascade(&mut self.grid, self.blank, self.config.max_cascade_passes);
        self.layers_cleared += report.layers_cleared;
        report.layers_cleared
    }

    /// Land the active piece and spawn the next one
    fn land_and_respawn(&mut self) -> TickOutcome {
        let layers_cleared = self.freeze_active();
        if self.game_over {
            return TickOutcome::GameOver;
        }
        if !self.spawn_random() {
            return TickOutcome::GameOver;
        }
        TickOutcome::Froze { layers_cleared }
    }

    /// One gravity step
    ///
    /// Spawns a piece if none is active, otherwise tries to move it down one row.
    /// A failed downward shift lands the piece: it is frozen, layers are cleared
    /// and cascaded, and the next piece spawns.
    pub fn advance_tick(&mut self) -> TickOutcome {
        if !self.playable() {
            return TickOutcome::Idle;
        }
        self.ticks += 1;

        let Some(piece) = self.active.as_mut() else {
            return if self.spawn_random() {
                TickOutcome::Spawned
            } else {
                TickOutcome::GameOver
            };
        };

        if piece.shift(&mut self.grid, Axis::Y, -1) {
            return TickOutcome::Fell;
        }
        self.land_and_respawn()
    }

    /// Move the active piece until it lands, then freeze it. Returns rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.playable() {
            return 0;
        }
        let Some(piece) = self.active.as_mut() else {
            return 0;
        };

        let mut distance = 0;
        while piece.shift(&mut self.grid, Axis::Y, -1) {
            distance += 1;
        }
        self.land_and_respawn();
        distance
    }

    /// Translate the active piece; rejected moves leave everything unchanged
    pub fn shift_active_piece(&mut self, axis: Axis, amount: i8) -> bool {
        if !self.playable() {
            return false;
        }
        match self.active.as_mut() {
            Some(piece) => piece.shift(&mut self.grid, axis, amount),
            None => false,
        }
    }

    /// Rotate the active piece 90° about `axis`; rejected rotations have no effect
    pub fn rotate_active_piece(&mut self, axis: Axis) -> bool {
        if !self.playable() {
            return false;
        }
        match self.active.as_mut() {
            Some(piece) => piece.rotate(&mut self.grid, axis),
            None => false,
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Reset to the same seed board and template sequence, and play again
    pub fn restart(&mut self) {
        self.picker.reset();
        self.reset_board(self.board);
        self.started = false;
        self.start();
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Shift(axis, amount) => self.shift_active_piece(axis, amount),
            GameAction::Rotate(axis) => self.rotate_active_piece(axis),
            GameAction::Drop => self.advance_tick() != TickOutcome::Idle,
            GameAction::HardDrop => {
                if !self.playable() || self.active.is_none() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Check if layer `y` is complete and has cubes a clear would remove
    pub fn is_layer_clearable(&self, y: u8) -> bool {
        layers::is_layer_clearable(&self.grid, y)
    }

    pub fn cell_at(&self, x: i8, y: i8, z: i8) -> Option<&Cube> {
        self.grid.cell_at(x, y, z)
    }

    /// Take all board events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        self.grid.drain_events()
    }

    /// Replay pending events into an observer. Returns how many were delivered.
    pub fn flush_events(&mut self, observer: &mut dyn BoardObserver) -> usize {
        let events = self.grid.drain_events();
        for event in &events {
            event.dispatch(observer);
        }
        events.len()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.clear();
        let active_id = self.active.as_ref().map(|p| p.id);
        for cube in self.grid.cubes() {
            let code = if cube.is_fixture() {
                CELL_FIXTURE
            } else if Some(cube.owner) == active_id {
                CELL_ACTIVE
            } else {
                CELL_FROZEN
            };
            out.cells[cube.pos.y as usize][cube.pos.z as usize][cube.pos.x as usize] = code;
        }

        out.board = self.board;
        out.seed = self.picker.seed();
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.layers_cleared = self.layers_cleared;
        out.pieces_frozen = self.pieces_frozen;
        out.ticks = self.ticks;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{BLOCK_1, BLOCK_3};
    use crate::snapshot::CELL_EMPTY;

    fn cube_game(board: usize) -> GameState {
        GameState::new(GameConfig {
            board,
            debug_template: Some(BLOCK_3),
            ..GameConfig::default()
        })
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(GameConfig::with_seed(12345));
        assert!(!state.started());
        assert!(!state.game_over());
        assert!(!state.paused());
        assert!(state.active().is_none());
        assert!(state.is_blank());
        assert_eq!(state.grid().cube_count(), 0);
    }

    #[test]
    fn test_start_spawns_first_piece_with_id_one() {
        let mut state = cube_game(0);
        state.start();
        let piece = state.active().unwrap();
        assert_eq!(piece.id, 1);
        assert_eq!(piece.anchor(), Pos::new(0, SPAWN_Y, 0));
        assert_eq!(state.grid().cubes_owned_by(1).count(), 8);
    }

    #[test]
    fn test_tick_moves_piece_down() {
        let mut state = cube_game(0);
        state.start();
        assert_eq!(state.advance_tick(), TickOutcome::Fell);
        assert_eq!(state.active().unwrap().anchor().y, SPAWN_Y - 1);
        assert_eq!(state.ticks(), 1);
    }

    #[test]
    fn test_idle_before_start_and_while_paused() {
        let mut state = cube_game(0);
        assert_eq!(state.advance_tick(), TickOutcome::Idle);
        state.start();
        assert!(state.toggle_pause());
        assert_eq!(state.advance_tick(), TickOutcome::Idle);
        assert!(!state.shift_active_piece(Axis::X, 1));
        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(state.advance_tick(), TickOutcome::Fell);
    }

    #[test]
    fn test_seed_board_places_fixtures() {
        let state = cube_game(1);
        assert!(!state.is_blank());
        assert_eq!(state.grid().cube_count(), 36);
        assert!(state.grid().cubes().all(|c| c.owner == FIXTURE_OWNER));
        assert_eq!(state.cell_at(0, 0, 0).unwrap().color, FIXTURE_COLOR);
    }

    #[test]
    fn test_unknown_board_falls_back() {
        let state = cube_game(77);
        assert_eq!(state.board(), 0);
        assert!(state.is_blank());
    }

    #[test]
    fn test_spawn_clamps_to_extent() {
        let mut state = GameState::new(GameConfig {
            spawn_x: 9,
            spawn_z: 9,
            debug_template: Some(BLOCK_1),
            ..GameConfig::default()
        });
        state.start();
        assert_eq!(state.active().unwrap().anchor(), Pos::new(6, SPAWN_Y, 6));
    }

    #[test]
    fn test_hard_drop_freezes_and_respawns() {
        let mut state = cube_game(0);
        state.start();
        let dropped = state.hard_drop();
        assert_eq!(dropped, (SPAWN_Y - 1) as u32);
        assert_eq!(state.pieces_frozen(), 1);
        assert_eq!(state.active().unwrap().id, 2);
        assert_eq!(state.grid().layer_count(0), 4);
    }

    #[test]
    fn test_restart_resets_board() {
        let mut state = cube_game(2);
        state.start();
        state.hard_drop();
        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.pieces_frozen(), 0);
        assert_eq!(state.active().unwrap().id, 1);
        assert_eq!(state.grid().cube_count(), 20 + 8);
    }

    #[test]
    fn test_flush_events_counts_delivered() {
        use crate::events::EventLog;

        let mut state = cube_game(0);
        state.start();
        let mut log = EventLog::new();
        let delivered = state.flush_events(&mut log);
        assert_eq!(delivered, log.events.len());
        assert_eq!(delivered, 8);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_snapshot_codes() {
        let mut state = cube_game(1);
        state.start();
        let snap = state.snapshot();
        assert_eq!(snap.count(CELL_FIXTURE), 36);
        assert_eq!(snap.count(CELL_ACTIVE), 8);
        assert_eq!(snap.count(CELL_FROZEN), 0);
        assert_eq!(snap.code_at(Pos::new(0, 0, 0)), CELL_FIXTURE);
        assert_eq!(snap.code_at(Pos::new(0, SPAWN_Y, 0)), CELL_ACTIVE);
        assert_eq!(snap.code_at(Pos::new(5, 0, 5)), CELL_EMPTY);
        assert_eq!(snap.code_at(Pos::new(-1, 0, 0)), CELL_EMPTY);
        assert!(snap.playable());
        assert_eq!(snap.active.unwrap().cells, 8);
    }
}
