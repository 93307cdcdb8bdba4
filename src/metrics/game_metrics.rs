use std::time::Duration;

use crate::game::SimTickResult;

/// Per-session statistics kept by a driver across restarts
#[derive(Debug, Clone, Default)]
pub struct GameMetrics {
    /// Running time of the current run
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// Power-ups collected during the current run
    pub power_ups_collected: u32,
    pub longest_snake: usize,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame's elapsed time to the current run
    pub fn record_frame(&mut self, dt: Duration) {
        self.elapsed_time += dt;
    }

    /// Fold a tick notification and the snake length after it into the totals
    pub fn record_tick(&mut self, result: &SimTickResult, snake_len: usize) {
        if result.collected_power_up() {
            self.power_ups_collected += 1;
        }
        self.longest_snake = self.longest_snake.max(snake_len);
    }

    pub fn on_game_start(&mut self) {
        self.elapsed_time = Duration::ZERO;
        self.power_ups_collected = 0;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}
