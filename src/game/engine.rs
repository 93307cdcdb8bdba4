use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    clock::SimulationClock,
    config::{SimConfig, StartLayout},
    error::SimError,
    lattice::Lattice,
    placeable::{food_exclusions, power_up_exclusions, Food, Placeable},
    position::{Action, Direction, Position},
    power_up::{PowerUpController, PowerUpPhase, TimerEvent},
    snake::Snake,
    state::{EndReason, GamePhase, SimTickResult, TickReport},
};

/// The whole simulation: snake, food, power-up, clock and lifecycle.
///
/// A driver feeds elapsed time into [`Simulation::update`] and heading
/// requests into [`Simulation::set_heading`]; everything else happens
/// synchronously inside those calls.
pub struct Simulation<const D: usize, R = StdRng> {
    layout: StartLayout<D>,
    base_interval: f64,
    snake: Snake<D>,
    food: Food<D>,
    power_ups: PowerUpController<D>,
    clock: SimulationClock,
    phase: GamePhase,
    end_reason: Option<EndReason>,
    score: u32,
    steps: u32,
    rng: R,
}

impl<const D: usize> Simulation<D, StdRng> {
    /// Create a simulation seeded from `config.seed`, or from entropy
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<const D: usize, R: Rng> Simulation<D, R> {
    /// Create a simulation drawing cells and delays from `rng`.
    /// The run stays in [`GamePhase::NotStarted`] until [`Simulation::start`].
    pub fn with_rng(config: &SimConfig, mut rng: R) -> Result<Self, SimError> {
        let layout = config.layout::<D>()?;
        let snake = Snake::new(layout.head, layout.heading, layout.length);
        let food = Food::at(
            layout
                .lattice
                .random_free_cell(&mut rng, &food_exclusions(&snake))?,
        );

        Ok(Self {
            layout,
            base_interval: config.base_interval,
            snake,
            food,
            power_ups: PowerUpController::new(config.power_up.clone()),
            clock: SimulationClock::new(config.base_interval),
            phase: GamePhase::NotStarted,
            end_reason: None,
            score: 0,
            steps: 0,
            rng,
        })
    }

    /// Begin a run. Does nothing while a run is already in progress.
    pub fn start(&mut self) -> Result<(), SimError> {
        if self.phase == GamePhase::Running {
            return Ok(());
        }
        self.reset()
    }

    /// Throw away the current run and begin a fresh one
    pub fn restart(&mut self) -> Result<(), SimError> {
        self.reset()
    }

    /// Full reinitialisation into [`GamePhase::Running`]
    pub fn reset(&mut self) -> Result<(), SimError> {
        let StartLayout {
            lattice,
            head,
            heading,
            length,
        } = self.layout;

        self.score = 0;
        self.steps = 0;
        self.end_reason = None;
        self.clock.reset(self.base_interval);
        self.snake.reset(head, length, heading);
        self.food
            .spawn(&lattice, &mut self.rng, &food_exclusions(&self.snake))?;
        self.power_ups.reset();
        self.phase = GamePhase::Running;

        info!(%head, %heading, length, food = %self.food.cell(), "run started");
        Ok(())
    }

    /// Request a new heading; exact reversals are ignored
    pub fn set_heading(&mut self, heading: Direction<D>) -> bool {
        self.snake.set_heading(heading)
    }

    pub fn apply(&mut self, action: Action<D>) {
        if let Action::Move(heading) = action {
            self.set_heading(heading);
        }
    }

    /// Advance the simulation by `dt` seconds of elapsed time
    pub fn update(&mut self, dt: f64) -> SimTickResult {
        if self.phase != GamePhase::Running {
            return SimTickResult::NoTick;
        }
        let dt = dt.max(0.0);

        let event = self.power_ups.advance(
            dt,
            &mut self.rng,
            &self.layout.lattice,
            || power_up_exclusions(&self.snake, &self.food),
        );
        if event == Some(TimerEvent::BoostExpired) {
            self.clock.set_interval(self.base_interval);
        }

        self.clock.accumulate(dt);
        let mut report = TickReport::default();
        while self.phase == GamePhase::Running && self.clock.take_tick() {
            self.step(&mut report);
        }

        if report.steps == 0 {
            SimTickResult::NoTick
        } else {
            SimTickResult::Ticked(report)
        }
    }

    /// One tick: move, collect, then check collisions
    fn step(&mut self, report: &mut TickReport) {
        self.steps += 1;
        report.steps += 1;

        self.snake.move_forward();
        report.moved = true;
        let head = self.snake.head();

        if self.food.is_at(head) {
            self.snake.grow();
            self.score += 1;
            report.ate_food = true;

            let respawned = self.food.spawn(
                &self.layout.lattice,
                &mut self.rng,
                &food_exclusions(&self.snake),
            );
            match respawned {
                Ok(next) => debug!(%head, %next, score = self.score, "food eaten"),
                Err(_) => {
                    self.end(EndReason::BoardFilled, report);
                    return;
                }
            }
        }

        if self.power_ups.try_collect(head) {
            report.collected_power_up = true;
            self.clock
                .set_interval(self.power_ups.effective_interval(self.base_interval));
        }

        if self.snake.collides_with_wall(&self.layout.lattice) {
            self.end(EndReason::Wall, report);
        } else if self.snake.collides_with_self() {
            self.end(EndReason::SelfCollision, report);
        }
    }

    /// Enter [`GamePhase::Ended`]; the final move stays in place
    fn end(&mut self, reason: EndReason, report: &mut TickReport) {
        self.phase = GamePhase::Ended;
        self.end_reason = Some(reason);
        report.game_over = true;
        report.end_reason = Some(reason);

        self.power_ups.halt();
        self.clock.set_interval(self.base_interval);

        info!(
            ?reason,
            score = self.score,
            steps = self.steps,
            head = %self.snake.head(),
            "run ended"
        );
    }

    #[cfg(test)]
    pub(crate) fn place_food(&mut self, pos: Position<D>) {
        self.food.place(pos);
    }

    #[cfg(test)]
    pub(crate) fn place_power_up(&mut self, pos: Position<D>) {
        self.power_ups.place_item(pos);
    }
}

/// Read-only queries for drivers and renderers
impl<const D: usize, R> Simulation<D, R> {
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Ticks taken in the current run
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn snake(&self) -> &Snake<D> {
        &self.snake
    }

    /// Snake cells, head first
    pub fn body(&self) -> impl ExactSizeIterator<Item = Position<D>> + '_ {
        self.snake.body()
    }

    pub fn head(&self) -> Position<D> {
        self.snake.head()
    }

    pub fn heading(&self) -> Direction<D> {
        self.snake.heading()
    }

    pub fn food(&self) -> Position<D> {
        self.food.cell()
    }

    /// Power-up cell while one is on the board
    pub fn power_up(&self) -> Option<Position<D>> {
        self.power_ups.item_position()
    }

    pub fn power_up_active(&self) -> bool {
        self.power_ups.item_active()
    }

    pub fn power_up_phase(&self) -> PowerUpPhase {
        self.power_ups.phase()
    }

    pub fn boost_active(&self) -> bool {
        self.power_ups.boost_active()
    }

    pub fn boost_remaining(&self) -> f64 {
        self.power_ups.boost_remaining()
    }

    /// Seconds per tick right now, boost included
    pub fn tick_interval(&self) -> f64 {
        self.clock.interval()
    }

    pub fn base_interval(&self) -> f64 {
        self.base_interval
    }

    pub fn lattice(&self) -> &Lattice<D> {
        &self.layout.lattice
    }
}
