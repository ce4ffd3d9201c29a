//! Lorenz system integration
//!
//! The Lorenz equations with the classic chaotic parameters and a
//! fixed-step fourth-order Runge-Kutta integrator. Fixed steps keep paired
//! trajectories sampled at identical times, which the divergence analysis
//! relies on.

/// A point in the Lorenz phase space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl State {
    /// Create a state from its three coordinates
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another state
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dz.mul_add(dz, dx.mul_add(dx, dy * dy)).sqrt()
    }

    fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    fn plus(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

/// Lorenz system parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LorenzParams {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for LorenzParams {
    /// The classic chaotic parameter set
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

/// Time derivative of the Lorenz system at a state
#[must_use]
pub fn derivative(params: &LorenzParams, state: &State) -> State {
    State::new(
        params.sigma * (state.y - state.x),
        state.x * (params.rho - state.z) - state.y,
        state.x * state.y - params.beta * state.z,
    )
}

/// One fixed-step fourth-order Runge-Kutta step
#[must_use]
pub fn rk4_step(params: &LorenzParams, state: State, dt: f64) -> State {
    let k1 = derivative(params, &state);
    let k2 = derivative(params, &state.plus(k1.scaled(dt / 2.0)));
    let k3 = derivative(params, &state.plus(k2.scaled(dt / 2.0)));
    let k4 = derivative(params, &state.plus(k3.scaled(dt)));

    let increment = k1
        .plus(k2.scaled(2.0))
        .plus(k3.scaled(2.0))
        .plus(k4)
        .scaled(dt / 6.0);
    state.plus(increment)
}

/// A sampled trajectory of the system
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// Sample times, evenly spaced from zero to the duration
    pub times: Vec<f64>,
    /// States at the sample times
    pub states: Vec<State>,
}

impl Trajectory {
    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the trajectory holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Integrate the system from `initial` over `duration`, taking `samples`
/// evenly spaced samples (the initial state is the first sample)
#[must_use]
pub fn integrate(
    params: &LorenzParams,
    initial: State,
    duration: f64,
    samples: usize,
) -> Trajectory {
    let steps = samples.saturating_sub(1).max(1);
    #[allow(clippy::cast_precision_loss)]
    let dt = duration / steps as f64;

    let mut times = Vec::with_capacity(samples);
    let mut states = Vec::with_capacity(samples);
    let mut state = initial;

    for i in 0..samples {
        #[allow(clippy::cast_precision_loss)]
        times.push(i as f64 * dt);
        states.push(state);
        state = rk4_step(params, state, dt);
    }

    Trajectory { times, states }
}
