//! Feedforward controller mapping a feature vector to an action.
//!
//! One hidden layer with tanh activation, linear outputs and no biases. The
//! weights come from a flat genome laid out in two row-major blocks:
//!
//! - `weights[i * num_hidden + h]` connects input `i` to hidden neuron `h`
//! - `weights[offset + h * num_outputs + o]` connects hidden `h` to output `o`,
//!   where `offset = num_inputs * num_hidden`

use ndarray::{Array1, ArrayView2, s};

use super::entity::Player;
use super::error::SimError;

/// Layer sizes of the controller network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    /// Size of the feature vector.
    pub num_inputs: usize,
    /// Hidden layer width.
    pub num_hidden: usize,
    /// Number of actions to choose from.
    pub num_outputs: usize,
}

impl Topology {
    /// Creates a topology.
    pub fn new(num_inputs: usize, num_hidden: usize, num_outputs: usize) -> Self {
        Self {
            num_inputs,
            num_hidden,
            num_outputs,
        }
    }

    /// Length a genome must have to drive this network.
    pub fn num_expected_weights(&self) -> usize {
        self.num_inputs * self.num_hidden + self.num_hidden * self.num_outputs
    }
}

/// Discrete per-tick control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Walk left.
    Left,
    /// Walk right.
    Right,
    /// Jump if standing on a platform.
    Jump,
}

impl Action {
    /// Number of actions, and therefore of network outputs.
    pub const COUNT: usize = 3;

    /// Maps an output index to its action.
    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Action::Left),
            1 => Some(Action::Right),
            2 => Some(Action::Jump),
            _ => None,
        }
    }

    /// Applies the action to a player.
    pub fn apply(self, player: &mut Player, jump_velocity: i32) {
        match self {
            Action::Left => player.move_left(),
            Action::Right => player.move_right(),
            Action::Jump => player.jump(jump_velocity),
        }
    }
}

/// Stateless evaluator for a fixed topology. Weights are supplied per call so
/// one brain serves the whole population.
#[derive(Debug, Clone)]
pub struct Brain {
    topology: Topology,
}

impl Brain {
    /// Creates a brain for `topology`.
    pub fn new(topology: Topology) -> Self {
        Self { topology }
    }

    /// The network's layer sizes.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Runs the network and returns the raw output activations.
    pub fn think(
        &self,
        inputs: &Array1<f32>,
        weights: &Array1<f32>,
    ) -> Result<Array1<f32>, SimError> {
        let Topology {
            num_inputs,
            num_hidden,
            num_outputs,
        } = self.topology;
        let expected_weights = self.topology.num_expected_weights();

        if inputs.len() != num_inputs {
            return Err(SimError::InputLength {
                expected: num_inputs,
                actual: inputs.len(),
            });
        }
        if weights.len() != expected_weights {
            return Err(SimError::WeightLength {
                expected: expected_weights,
                actual: weights.len(),
            });
        }

        let weight_error = |_| SimError::WeightLength {
            expected: expected_weights,
            actual: weights.len(),
        };
        let offset = num_inputs * num_hidden;

        let input_weights: ArrayView2<f32> = weights
            .slice(s![..offset])
            .into_shape_with_order((num_inputs, num_hidden))
            .map_err(weight_error)?;
        let output_weights: ArrayView2<f32> = weights
            .slice(s![offset..])
            .into_shape_with_order((num_hidden, num_outputs))
            .map_err(weight_error)?;

        let mut hidden = inputs.dot(&input_weights);
        hidden.mapv_inplace(f32::tanh);

        Ok(hidden.dot(&output_weights))
    }

    /// Runs the network and returns the index of the strongest output.
    ///
    /// Ties go to the lowest index.
    pub fn forward(&self, inputs: &Array1<f32>, weights: &Array1<f32>) -> Result<usize, SimError> {
        let outputs = self.think(inputs, weights)?;
        Ok(argmax(&outputs))
    }
}

/// Index of the first maximum.
fn argmax(values: &Array1<f32>) -> usize {
    let mut best = 0;

    for (idx, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = idx;
        }
    }

    best
}
