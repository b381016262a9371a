//! Long-running simulation: 1000 ticks from the default roster.

use fleetpulse_core::domain::{TruckId, TruckStatus};
use fleetpulse_core::fleet::{FleetSimulator, FleetState, SimulationConfig};
use fleetpulse_core::rng::SeededRandom;

const TICKS: usize = 1000;

#[test]
fn thousand_ticks_stay_in_range() {
    let cfg = SimulationConfig::default();
    let mut fleet = FleetState::seeded();
    let mut sim = FleetSimulator::new(cfg.clone(), SeededRandom::new(7));
    let mut ever_alert: Vec<TruckId> = Vec::new();

    for _ in 0..TICKS {
        let snapshot = sim.tick(&mut fleet);
        assert_eq!(snapshot.len(), 5);

        for truck in &snapshot {
            assert!((0.0..cfg.lat_bound).contains(&truck.lat));
            assert!((0.0..cfg.lng_bound).contains(&truck.lng));
            assert!((0.0..=100.0).contains(&truck.fuel));

            // alert trucks are frozen with vib from their last moving tick
            assert!(
                (cfg.vib[0]..cfg.vib[1]).contains(&truck.vib) || truck.vib == cfg.vibration_spike,
                "{} vib {}",
                truck.id,
                truck.vib
            );

            if truck.status != TruckStatus::Alert {
                assert!(
                    (cfg.speed[0]..=cfg.speed[1]).contains(&truck.speed),
                    "{} speed {}",
                    truck.id,
                    truck.speed
                );
                assert!((cfg.temp[0]..=cfg.temp[1]).contains(&truck.temp));
                assert!((cfg.oil[0]..=cfg.oil[1]).contains(&truck.oil));
            }

            if truck.status == TruckStatus::Alert {
                assert_eq!(truck.speed, 0, "{} moving while in alert", truck.id);
                if !ever_alert.contains(&truck.id) {
                    ever_alert.push(truck.id.clone());
                }
            } else {
                assert!(!ever_alert.contains(&truck.id), "{} left alert", truck.id);
            }
        }

        let kpis = fleet.kpis();
        assert_eq!(kpis.total, 5);
        assert_eq!(kpis.active + kpis.empty + kpis.warning + kpis.alert, 5);
        assert!(kpis.utilization <= 100);
        assert!(kpis.empty_rate <= 100);
    }

    assert_eq!(fleet.tick_count(), TICKS as u64);
    // the seeded alert truck is there from the start
    assert!(ever_alert.contains(&TruckId::new("JH-09-QQ-1122")));
}

#[test]
fn fleet_revenue_is_constant() {
    let mut fleet = FleetState::seeded();
    let before = fleet.kpis().total_revenue;
    let mut sim = FleetSimulator::new(SimulationConfig::default(), SeededRandom::new(99));
    for _ in 0..TICKS {
        sim.tick(&mut fleet);
    }
    assert_eq!(fleet.kpis().total_revenue, before);
}

#[test]
fn same_seed_same_trajectory() {
    let run = |seed| {
        let mut fleet = FleetState::seeded();
        let mut sim = FleetSimulator::new(SimulationConfig::default(), SeededRandom::new(seed));
        for _ in 0..250 {
            sim.tick(&mut fleet);
        }
        fleet
    };
    let a = run(3);
    let b = run(3);
    assert_eq!(a.trucks(), b.trucks());
    assert_eq!(a.transitions(), b.transitions());
}

#[test]
fn empty_truck_keeps_its_status() {
    // empty trucks move but never act on anomaly draws
    let mut fleet = FleetState::seeded();
    let mut sim = FleetSimulator::new(SimulationConfig::default(), SeededRandom::new(11));
    let id = TruckId::new("JH-01-XX-5555");
    for _ in 0..TICKS {
        sim.tick(&mut fleet);
        assert_eq!(fleet.truck(&id).map(|t| t.status), Some(TruckStatus::Empty));
    }
}
