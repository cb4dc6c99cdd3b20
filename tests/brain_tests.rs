#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use climber::simulation::brain::{Action, Brain, Topology};
use climber::simulation::entity::Player;
use climber::simulation::error::SimError;
use climber::simulation::evolution::Genome;
use climber::simulation::params::Params;
use climber::simulation::perception::NUM_FEATURES;
use ndarray::{Array1, array};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_brain() -> Brain {
    Brain::new(Topology::new(NUM_FEATURES, 18, Action::COUNT))
}

#[test]
fn test_expected_weight_count() {
    let topology = Topology::new(9, 18, 3);
    assert_eq!(topology.num_expected_weights(), 9 * 18 + 18 * 3);
}

#[test]
fn test_zero_weights_pick_first_action() {
    let brain = create_test_brain();
    let inputs = array![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
    let weights = Array1::zeros(brain.topology().num_expected_weights());

    let outputs = brain.think(&inputs, &weights).expect("valid lengths");
    assert_eq!(outputs.len(), Action::COUNT);
    assert!(outputs.iter().all(|&o| o == 0.0));

    assert_eq!(brain.forward(&inputs, &weights), Ok(0));
}

#[test]
fn test_wrong_input_length_is_rejected() {
    let brain = create_test_brain();
    let inputs = Array1::zeros(NUM_FEATURES - 1);
    let weights = Array1::zeros(brain.topology().num_expected_weights());

    assert_eq!(
        brain.forward(&inputs, &weights),
        Err(SimError::InputLength {
            expected: NUM_FEATURES,
            actual: NUM_FEATURES - 1,
        })
    );
}

#[test]
fn test_wrong_weight_length_is_rejected() {
    let brain = create_test_brain();
    let expected = brain.topology().num_expected_weights();
    let inputs = Array1::zeros(NUM_FEATURES);
    let weights = Array1::zeros(expected + 1);

    assert_eq!(
        brain.think(&inputs, &weights),
        Err(SimError::WeightLength {
            expected,
            actual: expected + 1,
        })
    );
}

#[test]
fn test_weight_layout() {
    // 2 inputs, 1 hidden neuron, 2 outputs:
    // [in0->h0, in1->h0, h0->out0, h0->out1]
    let brain = Brain::new(Topology::new(2, 1, 2));
    let weights = array![1.0, 5.0, -1.0, 2.0];

    let outputs = brain.think(&array![1.0, 0.0], &weights).expect("valid lengths");
    let hidden = 1.0f32.tanh();

    assert!((outputs[0] + hidden).abs() < 1e-6);
    assert!((outputs[1] - 2.0 * hidden).abs() < 1e-6);
    assert_eq!(brain.forward(&array![1.0, 0.0], &weights), Ok(1));
}

#[test]
fn test_hidden_layer_uses_tanh() {
    let brain = Brain::new(Topology::new(1, 2, 1));
    // in0->h0 = 10, in0->h1 = -10, h0->out0 = 1, h1->out0 = 1
    let weights = array![10.0, -10.0, 1.0, 1.0];

    let outputs = brain.think(&array![1.0], &weights).expect("valid lengths");

    assert!(outputs[0].abs() < 1e-6, "symmetric saturation should cancel");
}

#[test]
fn test_forward_matches_argmax_of_outputs() {
    let brain = create_test_brain();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..50 {
        let genome = Genome::new_random(brain.topology().num_expected_weights(), &mut rng);
        let inputs = Genome::new_random(NUM_FEATURES, &mut rng).weights;

        let outputs = brain.think(&inputs, &genome.weights).expect("valid lengths");
        let chosen = brain.forward(&inputs, &genome.weights).expect("valid lengths");

        assert!(chosen < Action::COUNT);
        for (idx, &value) in outputs.iter().enumerate() {
            assert!(value <= outputs[chosen]);
            if idx < chosen {
                assert!(value < outputs[chosen], "ties must go to the lowest index");
            }
        }
    }
}

#[test]
fn test_action_indices() {
    assert_eq!(Action::from_index(0), Some(Action::Left));
    assert_eq!(Action::from_index(1), Some(Action::Right));
    assert_eq!(Action::from_index(2), Some(Action::Jump));
    assert_eq!(Action::from_index(3), None);
}

#[test]
fn test_actions_drive_player() {
    let params = Params::default();
    let mut player = Player::spawn(&params);
    player.body.is_on_ground = true;

    Action::Left.apply(&mut player, params.jump_velocity);
    assert_eq!(player.body.v_x, -1);

    Action::Right.apply(&mut player, params.jump_velocity);
    assert_eq!(player.body.v_x, 1);

    Action::Jump.apply(&mut player, params.jump_velocity);
    assert_eq!(player.body.v_y, params.jump_velocity);
    assert!(!player.body.is_on_ground);
}
