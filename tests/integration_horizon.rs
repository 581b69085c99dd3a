//! Integration tests for the full 25-year horizon.

mod common;

use btes_sim::config::PvConfig;
use btes_sim::io::export::write_csv;
use btes_sim::sim::engine::Engine;
use btes_sim::sim::report::HorizonReport;
use btes_sim::sim::year::pv_degradation_factor;

#[test]
fn full_horizon_produces_25_ordered_records() {
    let engine =
        Engine::new(common::default_config(), common::default_season()).expect("valid config");
    let results = engine.run().expect("clean run");
    assert_eq!(results.len(), 25);
    for (i, r) in results.iter().enumerate() {
        assert_eq!(r.year, i);
    }
}

#[test]
fn temperatures_stay_within_bounds_every_year() {
    let cfg = common::default_config();
    let engine = Engine::new(cfg.clone(), common::default_season()).expect("valid config");
    let results = engine.run().expect("clean run");

    let floor = cfg.storage.initial_temp_c;
    for r in &results {
        for temp in [r.start_temp_c, r.post_charge_temp_c, r.end_temp_c] {
            assert!(temp >= floor, "year {}: {temp} below floor", r.year);
            assert!(temp <= 55.0, "year {}: {temp} above ceiling", r.year);
        }
        // Charging only adds heat.
        assert!(r.post_charge_temp_c >= r.start_temp_c);
        // Withdrawal only removes it.
        assert!(r.end_temp_c <= r.post_charge_temp_c);
    }
}

#[test]
fn no_withdrawal_in_the_first_three_years() {
    let engine =
        Engine::new(common::default_config(), common::default_season()).expect("valid config");
    let results = engine.run().expect("clean run");
    for r in &results[..3] {
        assert_eq!(r.heat_withdrawn_kwh, 0.0, "year {}", r.year);
    }
}

#[test]
fn withdrawal_respects_cap_and_reserve_floor() {
    let cfg = common::default_config();
    let engine = Engine::new(cfg.clone(), common::default_season()).expect("valid config");
    let results = engine.run().expect("clean run");

    for r in &results[3..] {
        if r.post_charge_temp_c <= 35.0 {
            assert_eq!(r.heat_withdrawn_kwh, 0.0, "year {}", r.year);
        } else {
            let cap = (cfg.storage.heat_capacity_kwh_per_k * (r.post_charge_temp_c - 35.0))
                .min(cfg.building.annual_heat_demand_kwh);
            assert!(
                (r.heat_withdrawn_kwh - cap).abs() < 1e-6,
                "year {}: withdrew {} against cap {cap}",
                r.year,
                r.heat_withdrawn_kwh
            );
        }
    }
}

#[test]
fn degradation_factors_are_exact_and_non_increasing() {
    let cfg = common::default_config();
    let engine = Engine::new(cfg.clone(), common::default_season()).expect("valid config");
    let results = engine.run().expect("clean run");

    assert!((results[0].pv_factor - cfg.pv.year1_yield).abs() < 1e-12);
    assert!((results[24].pv_factor - cfg.pv.year25_yield).abs() < 1e-12);
    for pair in results.windows(2) {
        assert!(pair[1].pv_factor <= pair[0].pv_factor);
    }
    for (i, r) in results.iter().enumerate() {
        assert!((r.pv_factor - pv_degradation_factor(&cfg.pv, i)).abs() < 1e-12);
    }
}

#[test]
fn yearly_temperatures_chain_across_the_horizon() {
    let cfg = common::default_config();
    let engine = Engine::new(cfg.clone(), common::default_season()).expect("valid config");
    let results = engine.run().expect("clean run");

    for pair in results.windows(2) {
        let expected = (pair[0].end_temp_c
            - pair[1].storage_loss_kwh / cfg.storage.heat_capacity_kwh_per_k)
            .max(cfg.storage.initial_temp_c);
        assert!(
            (pair[1].start_temp_c - expected).abs() < 1e-9,
            "year {} start temperature not seeded from year {}",
            pair[1].year,
            pair[0].year
        );
    }
}

#[test]
fn loss_series_matches_the_configured_years() {
    let cfg = common::default_config();
    let engine = Engine::new(cfg.clone(), common::default_season()).expect("valid config");
    let results = engine.run().expect("clean run");
    for (i, r) in results.iter().enumerate() {
        assert_eq!(r.storage_loss_kwh, cfg.storage.annual_loss_kwh[i]);
    }
}

#[test]
fn undegraded_pv_never_loses_to_a_degraded_run() {
    // The same season with a flat yield must store at least as much heat
    // in year 24 as the degraded configuration does.
    let season = common::default_season();
    let mut flat = common::default_config();
    flat.pv = PvConfig {
        year1_yield: 0.985,
        year25_yield: 0.985,
    };
    let degraded = common::default_config();

    let flat_results = Engine::new(flat, season.clone())
        .expect("valid config")
        .run()
        .expect("clean run");
    let degraded_results = Engine::new(degraded, season)
        .expect("valid config")
        .run()
        .expect("clean run");

    assert!(flat_results[24].heat_stored_kwh >= degraded_results[24].heat_stored_kwh);
    assert!(flat_results[24].operating_hours >= degraded_results[24].operating_hours);
}

#[test]
fn export_is_deterministic_for_a_fixed_seed() {
    let engine =
        Engine::new(common::default_config(), common::default_season()).expect("valid config");

    let run_a = engine.run().expect("first run");
    let run_b = engine.run().expect("second run");

    let mut out_a = Vec::new();
    write_csv(&run_a, &mut out_a).expect("first export should succeed");
    let mut out_b = Vec::new();
    write_csv(&run_b, &mut out_b).expect("second export should succeed");

    assert_eq!(out_a, out_b);
}

#[test]
fn exported_table_has_one_row_per_year() {
    let engine =
        Engine::new(common::default_config(), common::default_season()).expect("valid config");
    let results = engine.run().expect("clean run");

    let mut buf = Vec::new();
    write_csv(&results, &mut buf).expect("export should succeed");
    let csv = String::from_utf8(buf).expect("csv output should be valid UTF-8");
    // 1 header + 25 data rows
    assert_eq!(csv.lines().count(), 26);
}

#[test]
fn horizon_report_totals_match_the_records() {
    let engine =
        Engine::new(common::default_config(), common::default_season()).expect("valid config");
    let results = engine.run().expect("clean run");
    let report = HorizonReport::from_results(&results);

    let stored: f64 = results.iter().map(|r| r.heat_stored_kwh).sum();
    let withdrawn: f64 = results.iter().map(|r| r.heat_withdrawn_kwh).sum();
    assert!((report.total_heat_stored_kwh - stored).abs() < 1e-6);
    assert!((report.total_heat_withdrawn_kwh - withdrawn).abs() < 1e-6);
    assert_eq!(report.years, 25);
    assert_eq!(report.final_temp_c, results[24].end_temp_c);
}

#[test]
fn both_well_fields_run_the_same_season() {
    use btes_sim::config::SystemConfig;

    let season = common::flat_season(500, 900.0, 18.0, 150.0, 0.8);
    let field_1 = Engine::new(SystemConfig::well_field_1(), season.clone())
        .expect("valid config")
        .run()
        .expect("clean run");
    let field_2 = Engine::new(SystemConfig::well_field_2(), season)
        .expect("valid config")
        .run()
        .expect("clean run");

    // Same charging plant pushes the smaller thermal mass further.
    assert!(field_1[0].post_charge_temp_c > field_2[0].post_charge_temp_c);
    // Both stay inside the model bounds.
    for (a, b) in field_1.iter().zip(&field_2) {
        assert!(a.post_charge_temp_c <= 55.0);
        assert!(b.post_charge_temp_c <= 55.0);
    }
}
