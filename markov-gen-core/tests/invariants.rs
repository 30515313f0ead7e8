use markov_gen_core::model::source::ReplaySource;
use markov_gen_core::model::state::State;
use markov_gen_core::model::trainer::Trainer;
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

fn total<T>(states: &[State<T>]) -> f64 {
	states.iter().map(State::weight).sum()
}

proptest! {
	#[test]
	fn distributions_are_normalized(
		corpus in prop::collection::vec("[a-e]{0,8}", 1..30),
		order in 1usize..5,
	) {
		let mut trainer = Trainer::new(order).unwrap();
		trainer.teach(&corpus);
		let model = trainer.build();

		prop_assert!((total(model.start_states()) - 1.0).abs() < TOLERANCE);
		for context in model.contexts() {
			let successors = model.successors(context).unwrap();
			prop_assert!(!successors.is_empty());
			prop_assert!((total(successors) - 1.0).abs() < TOLERANCE);
		}
	}

	#[test]
	fn distributions_are_strictly_ordered(
		corpus in prop::collection::vec("[a-e]{0,8}", 0..30),
		order in 1usize..5,
	) {
		let mut trainer = Trainer::new(order).unwrap();
		trainer.teach(&corpus);
		let model = trainer.build();

		for pair in model.start_states().windows(2) {
			prop_assert!(pair[0].value() < pair[1].value());
		}
		for context in model.contexts() {
			for pair in model.successors(context).unwrap().windows(2) {
				prop_assert!(pair[0].value() < pair[1].value());
			}
		}
	}

	#[test]
	fn training_order_is_irrelevant(
		corpus in prop::collection::vec("[a-e]{0,8}", 0..30),
		order in 1usize..5,
	) {
		let mut forward = Trainer::new(order).unwrap();
		forward.teach(&corpus);
		let mut backward = Trainer::new(order).unwrap();
		backward.teach(corpus.iter().rev());

		prop_assert_eq!(forward.build(), backward.build());
	}

	#[test]
	fn short_samples_are_reproduced(
		sample in "[a-z]{1,6}",
		extra in 0usize..3,
		draw in 0.0f64..1.0,
	) {
		let mut trainer = Trainer::new(sample.len() + extra).unwrap();
		trainer.teach([&sample]);
		let model = trainer.build();

		let mut source = ReplaySource::new(vec![draw]);
		prop_assert_eq!(model.generate(&mut source), sample);
	}

	#[test]
	fn every_starting_key_is_a_context(
		corpus in prop::collection::vec("[a-e]{0,8}", 0..30),
		order in 1usize..5,
	) {
		let mut trainer = Trainer::new(order).unwrap();
		trainer.teach(&corpus);
		let model = trainer.build();

		for state in model.start_states() {
			prop_assert!(model.successors(state.value()).is_some());
		}
	}
}
