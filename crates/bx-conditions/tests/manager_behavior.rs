//! Behavior suite for the conditions manager: step interpolation,
//! exact-time concentration events, table ingestion, and templates.

use bx_conditions::{
    ConditionError, ConditionUpdate, ConditionsManager, PRESSURE_COLUMN, TEMPERATURE_COLUMN,
    TIME_COLUMN,
};
use bx_core::{Mechanism, Reaction, ReactionKind, Species, Table};

#[test]
fn new_manager_is_empty() {
    let manager = ConditionsManager::new();
    assert_eq!(manager.len(), 0);
    assert!(!manager.has_conditions());
    assert!(manager.get_times().is_empty());
}

#[test]
fn set_single_condition() {
    let mut manager = ConditionsManager::new();
    manager
        .set_condition(
            0.0,
            ConditionUpdate::new()
                .with_temperature(300.0)
                .with_pressure(101_325.0),
        )
        .unwrap();

    assert!(manager.has_conditions());
    assert_eq!(manager.len(), 1);
    assert_eq!(manager.get_times(), vec![0.0]);

    let snapshot = manager.get_conditions_at_time(0.0);
    assert_eq!(snapshot.temperature, 300.0);
    assert_eq!(snapshot.pressure, 101_325.0);
}

#[test]
fn method_chaining_sets_multiple_times() {
    let mut manager = ConditionsManager::new();
    manager
        .set_condition(0.0, ConditionUpdate::new().with_temperature(300.0))
        .unwrap()
        .set_condition(3600.0, ConditionUpdate::new().with_temperature(310.0))
        .unwrap();

    assert_eq!(manager.len(), 2);
    assert_eq!(manager.get_times(), vec![0.0, 3600.0]);
}

#[test]
fn step_interpolation_holds_previous_value() {
    let mut manager = ConditionsManager::new();
    manager
        .set_condition(
            0.0,
            ConditionUpdate::new()
                .with_temperature(300.0)
                .with_pressure(101_325.0),
        )
        .unwrap()
        .set_condition(
            3600.0,
            ConditionUpdate::new()
                .with_temperature(310.0)
                .with_pressure(101_000.0),
        )
        .unwrap();

    assert_eq!(manager.get_conditions_at_time(1800.0).temperature, 300.0);
    assert_eq!(manager.get_conditions_at_time(3600.0).temperature, 310.0);
    assert_eq!(manager.get_conditions_at_time(5400.0).temperature, 310.0);
}

#[test]
fn concentration_events_are_exact_time_only() {
    let mut manager = ConditionsManager::new();
    manager
        .set_condition(
            0.0,
            ConditionUpdate::new()
                .with_concentration("A", 1.0)
                .with_concentration("B", 0.5),
        )
        .unwrap();

    let at_zero = manager.get_conditions_at_time(0.0);
    assert_eq!(at_zero.species_concentrations["A"], 1.0);
    assert_eq!(at_zero.species_concentrations["B"], 0.5);

    let at_fifty = manager.get_conditions_at_time(50.0);
    assert!(!at_fifty.species_concentrations.contains_key("A"));
    assert!(at_fifty.species_concentrations.is_empty());
}

#[test]
fn rate_parameters_step_interpolate() {
    let mut manager = ConditionsManager::new();
    manager
        .set_condition(
            0.0,
            ConditionUpdate::new()
                .with_rate_parameter("EMIS.NO.mol m-3 s-1", 1e-10)
                .with_rate_parameter("PHOTO.O3_1.s-1", 0.001),
        )
        .unwrap();

    let snapshot = manager.get_conditions_at_time(100.0);
    assert_eq!(snapshot.rate_parameters["EMIS.NO.mol m-3 s-1"], 1e-10);
    assert_eq!(snapshot.rate_parameters["PHOTO.O3_1.s-1"], 0.001);
}

#[test]
fn surf_rate_parameters_with_dotted_units() {
    let mut manager = ConditionsManager::new();
    manager
        .set_condition(
            0.0,
            ConditionUpdate::new()
                .with_rate_parameter("SURF.surface.particle number concentration.# m-3", 1e12)
                .with_rate_parameter("SURF.surface.effective radius.m", 1e-7),
        )
        .unwrap();

    let snapshot = manager.get_conditions_at_time(0.0);
    assert_eq!(
        snapshot.rate_parameters["SURF.surface.particle number concentration.# m-3"],
        1e12
    );
}

#[test]
fn defaults_before_first_specified_time() {
    let mut manager = ConditionsManager::new();
    manager
        .set_condition(100.0, ConditionUpdate::new().with_temperature(310.0))
        .unwrap();

    let snapshot = manager.get_conditions_at_time(50.0);
    assert_eq!(snapshot.temperature, 298.15);
    assert_eq!(snapshot.pressure, 101_325.0);
}

#[test]
fn queries_are_idempotent() {
    let mut manager = ConditionsManager::new();
    manager
        .set_condition(
            0.0,
            ConditionUpdate::new()
                .with_temperature(300.0)
                .with_concentration("A", 1.0)
                .with_rate_parameter("USER.k1", 2.0),
        )
        .unwrap();

    let first = manager.get_conditions_at_time(0.0);
    let second = manager.get_conditions_at_time(0.0);
    assert_eq!(first, second);
}

#[test]
fn get_interpolated_builds_dense_rows() {
    let mut manager = ConditionsManager::new();
    manager
        .set_condition(
            0.0,
            ConditionUpdate::new()
                .with_temperature(300.0)
                .with_pressure(101_325.0),
        )
        .unwrap()
        .set_condition(100.0, ConditionUpdate::new().with_temperature(310.0))
        .unwrap();

    let dense = manager.get_interpolated(200.0, 50.0).unwrap();

    assert_eq!(dense.n_rows(), 5);
    let times: Vec<f64> = dense
        .column(TIME_COLUMN)
        .unwrap()
        .iter()
        .map(|c| c.unwrap())
        .collect();
    assert_eq!(times, vec![0.0, 50.0, 100.0, 150.0, 200.0]);

    let temperatures: Vec<f64> = dense
        .column(TEMPERATURE_COLUMN)
        .unwrap()
        .iter()
        .map(|c| c.unwrap())
        .collect();
    assert_eq!(temperatures, vec![300.0, 300.0, 310.0, 310.0, 310.0]);
}

#[test]
fn get_interpolated_fills_missing_time_zero_with_defaults() {
    let mut manager = ConditionsManager::new();
    manager
        .set_condition(3600.0, ConditionUpdate::new().with_temperature(310.0))
        .unwrap();

    let dense = manager.get_interpolated(100.0, 50.0).unwrap();

    assert_eq!(dense.get(0, TEMPERATURE_COLUMN), Some(298.15));
    assert_eq!(dense.get(0, PRESSURE_COLUMN), Some(101_325.0));
}

#[test]
fn set_from_table_routes_concentrations_to_events() {
    let mut input = Table::from_headers([
        "time.s",
        "ENV.temperature.K",
        "ENV.pressure.Pa",
        "CONC.A.mol m-3",
    ]);
    input
        .push_row(vec![Some(0.0), Some(300.0), Some(101_325.0), Some(1.0)])
        .unwrap();
    input
        .push_row(vec![Some(3600.0), Some(310.0), Some(101_000.0), Some(0.5)])
        .unwrap();

    let mut manager = ConditionsManager::new();
    manager.set_from_table(&input).unwrap();

    assert_eq!(manager.len(), 2);
    assert!(!manager.raw().has_column("CONC.A.mol m-3"));

    let at_zero = manager.get_conditions_at_time(0.0);
    assert_eq!(at_zero.temperature, 300.0);
    assert_eq!(at_zero.species_concentrations["A"], 1.0);

    let at_end = manager.get_conditions_at_time(3600.0);
    assert_eq!(at_end.temperature, 310.0);
    assert_eq!(at_end.species_concentrations["A"], 0.5);

    // Between events: held environment, no concentration backfill
    let between = manager.get_conditions_at_time(1800.0);
    assert_eq!(between.temperature, 300.0);
    assert!(between.species_concentrations.is_empty());
}

#[test]
fn set_from_table_requires_time_column() {
    let mut input = Table::from_headers(["ENV.temperature.K"]);
    input.push_row(vec![Some(300.0)]).unwrap();

    let mut manager = ConditionsManager::new();
    let err = manager.set_from_table(&input).unwrap_err();
    assert!(matches!(err, ConditionError::MissingTimeColumn { .. }));
}

#[test]
fn set_from_table_rejects_invalid_column_names() {
    let mut input = Table::from_headers(["time.s", "BOGUS.x.y"]);
    input.push_row(vec![Some(0.0), Some(1.0)]).unwrap();

    let mut manager = ConditionsManager::new();
    let err = manager.set_from_table(&input).unwrap_err();
    assert!(matches!(err, ConditionError::InvalidColumnFormat { .. }));
}

#[test]
fn add_from_table_merges_by_exact_time() {
    let mut manager = ConditionsManager::new();
    manager
        .set_condition(0.0, ConditionUpdate::new().with_temperature(300.0))
        .unwrap();

    let mut input = Table::from_headers(["time.s", "ENV.pressure.Pa"]);
    input.push_row(vec![Some(0.0), Some(101_325.0)]).unwrap();
    input.push_row(vec![Some(3600.0), Some(101_000.0)]).unwrap();

    manager.add_from_table(&input).unwrap();

    assert_eq!(manager.len(), 2);
    let at_zero = manager.get_conditions_at_time(0.0);
    assert_eq!(at_zero.temperature, 300.0);
    assert_eq!(at_zero.pressure, 101_325.0);
}

#[test]
fn add_from_table_skips_missing_cells() {
    let mut manager = ConditionsManager::new();
    manager
        .set_condition(
            0.0,
            ConditionUpdate::new()
                .with_temperature(300.0)
                .with_pressure(101_325.0),
        )
        .unwrap();

    let mut input = Table::from_headers(["time.s", "ENV.temperature.K", "ENV.pressure.Pa"]);
    input.push_row(vec![Some(0.0), Some(305.0), None]).unwrap();

    manager.add_from_table(&input).unwrap();

    let snapshot = manager.get_conditions_at_time(0.0);
    assert_eq!(snapshot.temperature, 305.0);
    assert_eq!(snapshot.pressure, 101_325.0); // untouched by the missing cell
}

#[test]
fn dense_table_round_trips_through_set_from_table() {
    let mut manager = ConditionsManager::new();
    manager
        .set_condition(
            0.0,
            ConditionUpdate::new()
                .with_temperature(300.0)
                .with_pressure(101_325.0)
                .with_rate_parameter("PHOTO.jNO2.s-1", 0.01),
        )
        .unwrap()
        .set_condition(
            100.0,
            ConditionUpdate::new()
                .with_temperature(310.0)
                .with_rate_parameter("PHOTO.jNO2.s-1", 0.02),
        )
        .unwrap();

    let dense = manager.get_interpolated(200.0, 50.0).unwrap();

    let mut restored = ConditionsManager::new();
    restored.set_from_table(&dense).unwrap();

    for time in manager.get_times() {
        let original = manager.get_conditions_at_time(time);
        let rebuilt = restored.get_conditions_at_time(time);
        assert_eq!(original.temperature, rebuilt.temperature);
        assert_eq!(original.pressure, rebuilt.pressure);
        assert_eq!(original.rate_parameters, rebuilt.rate_parameters);
    }
}

#[test]
fn template_lists_mechanism_columns() {
    let mechanism = Mechanism::new(
        vec![Species::new("O3"), Species::new("NO2")],
        vec![
            Reaction::new("NO", ReactionKind::Emission),
            Reaction::new("jNO2", ReactionKind::Photolysis),
            Reaction::new("wall", ReactionKind::FirstOrderLoss),
            Reaction::new("dust", ReactionKind::Surface),
        ],
    );
    let manager = ConditionsManager::with_mechanism(mechanism);
    let template = manager.get_template();

    let headers = template.headers();
    assert_eq!(headers[0], "time.s");
    assert!(headers.contains(&"ENV.temperature.K"));
    assert!(headers.contains(&"ENV.pressure.Pa"));
    assert!(headers.contains(&"CONC.O3.mol m-3"));
    assert!(headers.contains(&"CONC.NO2.mol m-3"));
    assert!(headers.contains(&"EMIS.NO.mol m-3 s-1"));
    assert!(headers.contains(&"PHOTO.jNO2.s-1"));
    assert!(headers.contains(&"LOSS.wall.s-1"));
    assert!(headers.contains(&"SURF.dust.particle number concentration.# m-3"));
    assert!(headers.contains(&"SURF.dust.effective radius.m"));

    assert_eq!(template.n_rows(), 1);
    assert_eq!(template.get(0, "time.s"), None);
}

#[test]
fn get_times_includes_event_only_times() {
    let mut manager = ConditionsManager::new();
    manager
        .set_condition(0.0, ConditionUpdate::new().with_temperature(300.0))
        .unwrap()
        .set_condition(300.0, ConditionUpdate::new().with_concentration("A", 1.0))
        .unwrap();

    // 300.0 has only a concentration event, no sparse row cells beyond time
    assert_eq!(manager.get_times(), vec![0.0, 300.0]);
}
