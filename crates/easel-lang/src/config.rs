/// Limits applied to every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Statements evaluated per submission, counting every loop iteration and
    /// every statement replayed by a method call.
    pub max_steps: u64,
    /// Nested `call` depth.
    pub max_call_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_steps: 1_000_000, max_call_depth: 64 }
    }
}

impl Config {
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}
