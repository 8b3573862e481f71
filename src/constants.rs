//! Centralized defaults for flapper simulation parameters.
//!
//! Every constant carries the `FLAPPER_` prefix, matching the environment variable that
//! overrides it through [crate::config::SimConfig::from_env].

// ============================================================================
// Population Parameters
// ============================================================================

/// Number of agents in every generation
pub const FLAPPER_POPULATION_SIZE: usize = 10;

/// Number of top agents cloned unchanged into the next generation
pub const FLAPPER_ELITE_COUNT: usize = 4;

/// Number of top agents who take part in breeding
pub const FLAPPER_BREEDING_PARENTS: usize = 3;

/// Generations run by the trainer when no other target is given
pub const FLAPPER_GENERATIONS: usize = 500;

// ============================================================================
// Policy Parameters
// ============================================================================

/// Width of the perceptron's hidden layer
pub const FLAPPER_HIDDEN_WIDTH: usize = 6;

/// Standard deviation of the gaussian noise added to every weight when breeding
pub const FLAPPER_MUTATION_SIGMA: f64 = 0.5;

/// Divisor applied to both observation components
pub const FLAPPER_OBSERVATION_SCALE: f64 = 1000.0;

// ============================================================================
// Agent Physics
// ============================================================================

/// Vertical velocity set by a flap. Negative is up
pub const FLAPPER_IMPULSE_VELOCITY: f64 = -10.5;

/// Downward acceleration
pub const FLAPPER_GRAVITY: f64 = 3.0;

/// Largest downward displacement in a single tick
pub const FLAPPER_TERMINAL_VELOCITY: f64 = 16.0;

/// Where every agent is spawned, as (x, y)
pub const FLAPPER_SPAWN: (f64, f64) = (230.0, 350.0);

/// Agent bounding box, as (width, height)
pub const FLAPPER_AGENT_SIZE: (f64, f64) = (68.0, 48.0);

/// Vertical coordinate of the ground line
pub const FLAPPER_GROUND_Y: f64 = 730.0;

// ============================================================================
// Obstacle Parameters
// ============================================================================

/// Height of the opening between the two segments of an obstacle pair
pub const FLAPPER_GAP_HEIGHT: f64 = 200.0;

/// Gap centers are drawn uniformly from this half-open range
pub const FLAPPER_GAP_RANGE: (f64, f64) = (50.0, 450.0);

/// Leftward distance travelled by obstacles every tick
pub const FLAPPER_OBSTACLE_VELOCITY: f64 = 5.0;

/// Horizontal extent of an obstacle segment
pub const FLAPPER_OBSTACLE_WIDTH: f64 = 104.0;

/// Vertical extent of an obstacle segment
pub const FLAPPER_SEGMENT_HEIGHT: f64 = 640.0;

/// Where the first obstacle of an episode is spawned
pub const FLAPPER_INITIAL_OBSTACLE_X: f64 = 550.0;

/// Where replacement obstacles are spawned once one is passed
pub const FLAPPER_SPAWN_OBSTACLE_X: f64 = 550.0;

// ============================================================================
// Frontend Parameters
// ============================================================================

/// Ticks per second held by a paced frontend
pub const FLAPPER_TICK_RATE: u32 = 30;
