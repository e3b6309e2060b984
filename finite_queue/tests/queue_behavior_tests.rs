// Whole-run behaviour through the public API: seeded runs for the standard
// configurations and hand-checked trajectories with a scripted draw source.

use approx::assert_relative_eq;
use finite_queue::scenarios::standard_pair;
use finite_queue::{
    DrawSource, FIRST_ARRIVAL_TIME, QueueParams, SimulationReport, UniformRange, simulate,
    simulate_with,
};

/// Every inter-arrival and service time takes its lower bound.
struct LowerBound;

impl DrawSource for LowerBound {
    fn draw(&mut self, range: &UniformRange) -> f64 {
        range.low()
    }
}

fn assert_well_formed(report: &SimulationReport) {
    assert_eq!(report.state_time.len(), report.capacity + 1);
    assert_eq!(report.state_prob.len(), report.capacity + 1);
    assert!(report.state_time.iter().all(|t| *t >= 0.0));
    assert!(report.state_prob.iter().all(|p| (0.0..=1.0).contains(p)));
    assert!(report.lost <= report.arrivals);
}

// ============================================================================
// Scripted trajectories
// ============================================================================

#[test]
fn given_single_slot_when_second_customer_arrives_then_lost() {
    // GIVEN: c=1, K=1, inter-arrival always 2, service always 3, 4 draws
    let params = QueueParams {
        servers: 1,
        capacity: 1,
        max_draws: 4,
        ..Default::default()
    };

    // WHEN: t=2 arrives (dep 5, arr 4), t=4 lost (arr 6), t=5 departs,
    // t=6 arrives (dep 9 takes draw 4 and sets the cutoff), t=9 departs
    let report = simulate_with(&params, LowerBound).unwrap();

    // THEN
    assert_eq!(report.lost, 1);
    assert_eq!(report.arrivals, 3);
    assert_eq!(report.draws_used, 4);
    assert_eq!(report.final_time, 9.0);
    assert_eq!(report.state_time, vec![3.0, 6.0]);
    assert_relative_eq!(report.state_prob[0], 1.0 / 3.0);
    assert_relative_eq!(report.state_prob[1], 2.0 / 3.0);
}

#[test]
fn given_queued_customer_when_server_frees_then_same_server_continues() {
    // GIVEN: c=1, K=3, 5 draws
    let params = QueueParams {
        servers: 1,
        capacity: 3,
        max_draws: 5,
        ..Default::default()
    };

    // WHEN:
    //   t=2 arrive, size 1 (dep 5, arr 4)
    //   t=4 arrive, size 2, waiting (arr 6)
    //   t=5 depart, size 1, server picks up the waiting customer (dep 8)
    //   t=6 arrive, size 2 (arr 8 takes draw 5: cutoff 8)
    //   t=8 arrive before the departure at the same time, size 3, waiting 2
    //   t=8 depart, size 2, no draws left for the next service
    let report = simulate_with(&params, LowerBound).unwrap();

    // THEN
    assert_eq!(report.lost, 0);
    assert_eq!(report.draws_used, 5);
    assert_eq!(report.final_time, 8.0);
    assert_eq!(report.state_time, vec![2.0, 3.0, 3.0, 0.0]);
    assert_relative_eq!(report.total_time(), report.final_time);
}

#[test]
fn given_departure_and_arrival_at_same_time_then_arrival_seen_first() {
    // GIVEN: c=1, K=1, inter-arrival and service both always 3, 3 draws
    let params = QueueParams {
        servers: 1,
        capacity: 1,
        inter_arrival: (3.0, 5.0),
        service: (3.0, 5.0),
        max_draws: 3,
        ..Default::default()
    };

    // WHEN:
    //   t=2 arrive, size 1 (dep 5, arr 5)
    //   t=5 arrive while the server is still busy: lost (arr 8 takes draw 3: cutoff 8)
    //   t=5 depart, size 0
    //   t=8 arrive, size 1, nothing more scheduled
    let report = simulate_with(&params, LowerBound).unwrap();

    // THEN
    assert_eq!(report.lost, 1);
    assert_eq!(report.arrivals, 3);
    assert_eq!(report.draws_used, 3);
    assert_eq!(report.final_time, 8.0);
    assert_eq!(report.state_time, vec![5.0, 3.0]);
}

#[test]
fn given_zero_draws_then_only_first_arrival_happens() {
    let params = QueueParams {
        max_draws: 0,
        ..Default::default()
    };

    let report = simulate(&params).unwrap();

    assert_eq!(report.draws_used, 0);
    assert_eq!(report.lost, 0);
    assert_eq!(report.arrivals, 1);
    assert_eq!(report.final_time, FIRST_ARRIVAL_TIME);
    // only the wait for the first customer is on the clock
    assert_eq!(report.state_time[0], FIRST_ARRIVAL_TIME);
    assert_relative_eq!(report.state_prob.iter().sum::<f64>(), 1.0);
    assert_well_formed(&report);
}

// ============================================================================
// Seeded runs of the standard configurations
// ============================================================================

#[test]
fn standard_runs_spend_exactly_the_draw_budget() {
    for params in standard_pair(42, 100_000) {
        let report = simulate(&params).unwrap();
        assert_eq!(report.draws_used, 100_000);
        assert!(report.final_time >= FIRST_ARRIVAL_TIME);
        assert_relative_eq!(report.state_prob.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(report.total_time(), report.final_time, max_relative = 1e-9);
        assert_well_formed(&report);
    }
}

#[test]
fn seeded_single_server_matches_pinned_output() {
    let report = simulate(&QueueParams::single_server()).unwrap();

    assert_eq!(report.final_time.to_bits(), 0x4106_c3eb_ad90_3bf3);
    assert_eq!(report.lost, 6743);
    assert_eq!(report.arrivals, 53374);
    let state_time_bits: Vec<u64> = report.state_time.iter().map(|t| t.to_bits()).collect();
    assert_eq!(
        state_time_bits,
        vec![
            0x4000_0000_0000_0000,
            0x4027_4bed_6d4e_5335,
            0x4068_d818_62e6_3e7c,
            0x40bf_e3b9_bcc5_23f6,
            0x40f7_ca33_bf39_f1a4,
            0x40f3_b221_947d_5671,
        ]
    );
}

#[test]
fn same_seed_reproduces_run_exactly() {
    let params = QueueParams::single_server();

    let first = simulate(&params).unwrap();
    let second = simulate(&params).unwrap();

    assert_eq!(first.state_time, second.state_time);
    assert_eq!(first.lost, second.lost);
    assert_eq!(first.final_time.to_bits(), second.final_time.to_bits());
    assert_eq!(first, second);
}

#[test]
fn different_seeds_give_different_trajectories() {
    let a = simulate(&QueueParams {
        seed: 1,
        ..Default::default()
    })
    .unwrap();
    let b = simulate(&QueueParams {
        seed: 2,
        ..Default::default()
    })
    .unwrap();

    assert_ne!(a.final_time, b.final_time);
}

#[test]
fn second_server_does_not_increase_losses() {
    let [one, two] = standard_pair(42, 100_000);

    let single = simulate(&one).unwrap();
    let double = simulate(&two).unwrap();

    // mean service 4 exceeds mean inter-arrival 3.5: one server saturates
    assert!(single.lost > 0);
    assert!(
        double.lost <= single.lost,
        "c=2 lost {} but c=1 lost {}",
        double.lost,
        single.lost
    );
    assert!(double.loss_ratio() < single.loss_ratio());
    assert!(double.mean_occupancy() < single.mean_occupancy());
}

#[test]
fn saturated_single_server_spends_most_time_full() {
    let report = simulate(&QueueParams::single_server()).unwrap();

    // with utilisation above one the queue should sit near capacity
    let upper: f64 = report.state_prob[3..].iter().sum();
    assert!(upper > 0.5, "P(n >= 3) = {}", upper);
    assert!(report.state_prob[0] < 0.1);
}
