// Scaling between scenario files and world units
pub const PERIOD_MULTIPLIER: f64 = 86_400.0; // seconds in a day
pub const SCALE_MULTIPLIER: f64 = 1_000.0; // megametres to kilometres, 1 unit is 1 km

// Orbit phase is quantized to eighths of a second
pub const TIME_PRECISION: f64 = 0.125;

// Ship acceleration, in multiples of standard gravity
pub const SHIP_GS: f64 = 1.0;

// 9.80665 m/s^2, in km/s^2
pub const STANDARD_GRAVITY: f64 = 9.80665e-3;

// Upper bound on how many legs a single ship may complete in one evaluation
pub const MAX_LEGS_PER_EVALUATION: usize = 256;

// Fixed-point iterations used to predict where a destination will be at arrival
pub const INTERCEPT_ITERATIONS: usize = 4;
