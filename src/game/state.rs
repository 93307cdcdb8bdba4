/// Coarse lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Running,
    Ended,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// The snake covers every cell, so no food can be placed
    BoardFilled,
}

/// What happened during the ticks drained by one `update` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Number of ticks processed
    pub steps: u32,
    pub moved: bool,
    pub ate_food: bool,
    pub collected_power_up: bool,
    pub game_over: bool,
    pub end_reason: Option<EndReason>,
}

/// Notification returned to the driver after each `update`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimTickResult {
    NoTick,
    Ticked(TickReport),
}

impl SimTickResult {
    pub fn report(&self) -> Option<&TickReport> {
        match self {
            SimTickResult::NoTick => None,
            SimTickResult::Ticked(report) => Some(report),
        }
    }

    pub fn ticked(&self) -> bool {
        matches!(self, SimTickResult::Ticked(_))
    }

    pub fn ate_food(&self) -> bool {
        self.report().is_some_and(|r| r.ate_food)
    }

    pub fn collected_power_up(&self) -> bool {
        self.report().is_some_and(|r| r.collected_power_up)
    }

    pub fn is_game_over(&self) -> bool {
        self.report().is_some_and(|r| r.game_over)
    }
}
