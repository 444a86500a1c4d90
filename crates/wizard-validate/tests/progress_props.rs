use proptest::prelude::*;
use wizard_model::{ColumnMapping, DataType, ExpectedColumn, TabularDataset};
use wizard_transform::Transformer;
use wizard_validate::{ValidationEngine, ValidationRules};

fn dataset(values: &[String]) -> TabularDataset {
    let mut rows = vec![vec!["NAME".to_string(), "AGE".to_string()]];
    rows.extend(values.iter().map(|v| vec!["someone".to_string(), v.clone()]));
    TabularDataset::new("props.csv", rows)
}

fn mappings() -> Vec<ColumnMapping> {
    let mut age = ColumnMapping::unmapped(&ExpectedColumn::new("age", "AGE", DataType::Number));
    age.source_index = Some(1);
    vec![age]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0),
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn progress_is_monotone_and_ends_at_100(
        values in proptest::collection::vec("[0-9a-z]{0,4}", 0..300),
        batch_size in 1usize..150,
    ) {
        let data = dataset(&values);
        let rules = ValidationRules::new().with_numeric("age");
        let mut engine = ValidationEngine::new(batch_size);
        let run = engine.start(&data, 0, &mappings(), &rules, &Transformer::default());

        let mut reported = Vec::new();
        let outcome = run.run_to_end(|progress| reported.push(progress));

        prop_assert!(reported.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert_eq!(reported.last().copied(), Some(100));
        prop_assert!(engine.complete(outcome));
    }

    #[test]
    fn batch_size_does_not_change_issues(
        values in proptest::collection::vec("[0-9a-z]{0,4}", 0..120),
        batch_size in 1usize..50,
    ) {
        let data = dataset(&values);
        let rules = ValidationRules::new().with_numeric("age");
        let transformer = Transformer::default();

        let batched = ValidationEngine::new(batch_size)
            .validate(&data, 0, &mappings(), &rules, &transformer)
            .to_vec();
        let single = ValidationEngine::new(values.len().max(1))
            .validate(&data, 0, &mappings(), &rules, &transformer)
            .to_vec();
        prop_assert_eq!(batched, single);
    }
}
